use crate::error::InstallError;
use serde::Deserialize;
use std::{fs, io, net::Ipv4Addr, path::PathBuf};

/// Optional override file; compiled-in defaults are used when it is absent.
pub const CONFIG_PATH: &str = "/etc/kubeprep.toml";

/// Everything the setup steps need to know about the target host. Passed
/// explicitly into every step so there is no process-wide implicit state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
	pub hostname: String,
	/// Network adapters to pin to their current addresses. The first entry
	/// is the primary adapter and carries the default route.
	pub adapters: Vec<String>,
	pub netplan_path: PathBuf,
	pub resolver_path: PathBuf,
	/// Nameservers written to the resolver configuration. Empty means the
	/// resolver file is left as-is.
	pub nameservers: Vec<Ipv4Addr>,
}

impl Default for HostConfig {
	fn default() -> Self {
		Self {
			hostname: "k8-controlplane".to_owned(),
			adapters: vec!["ens33".to_owned(), "ens34".to_owned(), "ens35".to_owned()],
			netplan_path: PathBuf::from("/etc/netplan/01-netcfg.yaml"),
			resolver_path: PathBuf::from("/etc/resolv.conf"),
			nameservers: vec![Ipv4Addr::new(172, 100, 55, 2)],
		}
	}
}

impl HostConfig {
	pub fn load() -> Result<Self, InstallError> {
		Self::load_from(CONFIG_PATH)
	}

	fn load_from(path: &str) -> Result<Self, InstallError> {
		match fs::read_to_string(path) {
			Ok(txt) => toml::from_str(&txt)
				.map_err(|err| InstallError::Config(format!("{path}: {err}"))),
			Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
			Err(err) => Err(err.into()),
		}
	}

	pub fn primary_adapter(&self) -> Option<&str> {
		self.adapters.first().map(String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::io::Write;

	#[test]
	fn defaults_designate_first_adapter_as_primary() {
		let config = HostConfig::default();
		assert_eq!(config.primary_adapter(), Some("ens33"));
	}

	#[test]
	fn toml_overrides_replace_defaults() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"
				hostname = "node-7"
				adapters = ["eth0", "eth1"]
				nameservers = ["8.8.8.8", "1.1.1.1"]
			"#
		)
		.unwrap();
		let config = HostConfig::load_from(file.path().to_str().unwrap()).unwrap();
		assert_eq!(config.hostname, "node-7");
		assert_eq!(config.primary_adapter(), Some("eth0"));
		assert_eq!(
			config.nameservers,
			vec![Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(1, 1, 1, 1)]
		);
		// Unset keys keep their defaults.
		assert_eq!(config.netplan_path, PathBuf::from("/etc/netplan/01-netcfg.yaml"));
	}

	#[test]
	fn missing_file_falls_back_to_defaults() {
		let config = HostConfig::load_from("/nonexistent/kubeprep.toml").unwrap();
		assert_eq!(config.adapters.len(), 3);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "hostnam = \"typo\"").unwrap();
		assert!(HostConfig::load_from(file.path().to_str().unwrap()).is_err());
	}
}
