use crate::cmd;
use crate::config::HostConfig;
use crate::error::InstallError;
use crate::setup::utils::pkg;
use crate::setup::SetupStep;
use std::fs;
use tracing::info;

pub struct Crio;

impl Crio {
	pub const PACKAGE_NAMES: &'static [&'static str] = &["cri-o", "cri-o-runc"];
	pub const SERVICE_NAME: &'static str = "crio";
	pub const OS_VERSION: &'static str = "xUbuntu_22.04";
	pub const CRIO_VERSION: &'static str = "1.28";
	pub const BASE_URL: &'static str =
		"https://download.opensuse.org/repositories/devel:/kubic:/libcontainers:/stable";
	pub const APT_KEY_PATH: &'static str =
		"/usr/share/keyrings/libcontainers-archive-keyring.gpg";
	pub const APT_CONFIG_PATH: &'static str = "/etc/apt/sources.list.d/libcontainers.list";
	pub const APT_VERSION_CONFIG_PATH: &'static str = "/etc/apt/sources.list.d/cri-o.list";

	fn stable_repo() -> String {
		format!(
			"deb [signed-by={}] {}/{}/ /\n",
			Crio::APT_KEY_PATH,
			Crio::BASE_URL,
			Crio::OS_VERSION,
		)
	}

	fn versioned_repo() -> String {
		format!(
			"deb [signed-by={}] {}:/cri-o:/{}/{}/ /\n",
			Crio::APT_KEY_PATH,
			Crio::BASE_URL,
			Crio::CRIO_VERSION,
			Crio::OS_VERSION,
		)
	}
}

impl SetupStep for Crio {
	fn name(&self) -> &'static str {
		"Crio"
	}

	fn check(&self, _config: &HostConfig) -> Result<bool, InstallError> {
		for package_name in Crio::PACKAGE_NAMES {
			if !pkg::is_installed(package_name)? {
				info!("{package_name} is not installed.");
				return Ok(false);
			}
		}
		let is_active = cmd::capture(
			"systemctl",
			&["is-active", "--quiet", Crio::SERVICE_NAME],
		)?
		.is_some();
		if !is_active {
			info!("CRI-O service is not active.");
			return Ok(false);
		}
		Ok(true)
	}

	fn set(&self, _config: &HostConfig) -> Result<(), InstallError> {
		info!("Adding CRI-O apt repositories.");
		pkg::import_repo_key(
			&format!("{}/{}/Release.key", Crio::BASE_URL, Crio::OS_VERSION),
			Crio::APT_KEY_PATH,
		)?;
		fs::write(Crio::APT_CONFIG_PATH, Crio::stable_repo())?;
		fs::write(Crio::APT_VERSION_CONFIG_PATH, Crio::versioned_repo())?;
		pkg::update()?;
		info!("Installing CRI-O.");
		pkg::install(Crio::PACKAGE_NAMES)?;
		cmd::status("systemctl", &["enable", Crio::SERVICE_NAME])?;
		cmd::status("systemctl", &["start", Crio::SERVICE_NAME])?;
		info!("CRI-O installed and running.");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn repo_lines_pin_key_and_os() {
		assert_eq!(
			Crio::stable_repo(),
			"deb [signed-by=/usr/share/keyrings/libcontainers-archive-keyring.gpg] \
			 https://download.opensuse.org/repositories/devel:/kubic:/libcontainers:/stable/xUbuntu_22.04/ /\n"
		);
		assert_eq!(
			Crio::versioned_repo(),
			"deb [signed-by=/usr/share/keyrings/libcontainers-archive-keyring.gpg] \
			 https://download.opensuse.org/repositories/devel:/kubic:/libcontainers:/stable:/cri-o:/1.28/xUbuntu_22.04/ /\n"
		);
	}
}
