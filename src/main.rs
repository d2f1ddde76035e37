mod cmd;
mod config;
mod error;
mod logging;
mod netplan;
mod setup;

use crate::config::HostConfig;
use crate::error::InstallError;
use rustix::process::geteuid;
use tracing::{error, info};

fn run() -> Result<(), InstallError> {
	if !geteuid().is_root() {
		return Err(InstallError::Privilege);
	}
	let config = HostConfig::load()?;
	setup::setup(&config)
}

fn main() {
	logging::init();
	info!("Host provisioning started.");
	if let Err(err) = run() {
		error!("Installer failed: {}", err);
		std::process::exit(1);
	}
	info!("Host provisioning finished successfully.");
}
