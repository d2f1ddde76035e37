use crate::config::HostConfig;
use crate::error::InstallError;
use crate::setup::utils::pkg;
use crate::setup::SetupStep;
use tracing::info;

/// Refreshes the package index and installs the tools the later repo steps
/// shell out to. Runs first: `pkg::import_repo_key` needs curl, and the apt
/// https transports must exist before any sources.list.d entry is usable.
pub struct Prerequisites;

impl Prerequisites {
	pub const PACKAGE_NAMES: &'static [&'static str] = &[
		"apt-transport-https",
		"ca-certificates",
		"curl",
		"software-properties-common",
	];
}

impl SetupStep for Prerequisites {
	fn name(&self) -> &'static str {
		"Prerequisites"
	}

	fn check(&self, _config: &HostConfig) -> Result<bool, InstallError> {
		for package_name in Prerequisites::PACKAGE_NAMES {
			if !pkg::is_installed(package_name)? {
				info!("{package_name} is not installed.");
				return Ok(false);
			}
		}
		Ok(true)
	}

	fn set(&self, _config: &HostConfig) -> Result<(), InstallError> {
		info!("Updating package index and installing prerequisites.");
		pkg::update()?;
		pkg::install(Prerequisites::PACKAGE_NAMES)?;
		info!("Prerequisites installed.");
		Ok(())
	}
}
