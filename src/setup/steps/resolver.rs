use crate::config::HostConfig;
use crate::error::InstallError;
use crate::setup::SetupStep;
use std::{fs, net::Ipv4Addr};
use tracing::info;

/// Pins the resolver configuration to the configured nameservers. Skipped
/// entirely when no nameservers are configured.
pub struct Resolver;

impl Resolver {
	fn render(nameservers: &[Ipv4Addr]) -> String {
		nameservers
			.iter()
			.map(|ns| format!("nameserver {ns}\n"))
			.collect()
	}
}

impl SetupStep for Resolver {
	fn name(&self) -> &'static str {
		"Resolver"
	}

	fn check(&self, config: &HostConfig) -> Result<bool, InstallError> {
		if config.nameservers.is_empty() {
			info!("No nameservers configured, leaving resolver untouched.");
			return Ok(true);
		}
		let Ok(current) = fs::read_to_string(&config.resolver_path) else {
			info!("Resolver configuration missing or unreadable.");
			return Ok(false);
		};
		if current != Resolver::render(&config.nameservers) {
			info!("Resolver configuration differs from configured nameservers.");
			return Ok(false);
		}
		Ok(true)
	}

	fn set(&self, config: &HostConfig) -> Result<(), InstallError> {
		info!(
			"Writing {} nameserver(s) to {}.",
			config.nameservers.len(),
			config.resolver_path.display()
		);
		fs::write(&config.resolver_path, Resolver::render(&config.nameservers))?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn renders_one_line_per_nameserver() {
		let nameservers = [
			"172.100.55.2".parse::<Ipv4Addr>().unwrap(),
			"8.8.8.8".parse().unwrap(),
		];
		assert_eq!(
			Resolver::render(&nameservers),
			"nameserver 172.100.55.2\nnameserver 8.8.8.8\n"
		);
		assert_eq!(Resolver::render(&[]), "");
	}
}
