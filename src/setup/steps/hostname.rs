use crate::cmd;
use crate::config::HostConfig;
use crate::error::InstallError;
use crate::setup::SetupStep;
use std::fs;
use tracing::info;

pub struct Hostname;

impl Hostname {
	pub const HOSTS_PATH: &'static str = "/etc/hosts";

	fn hosts_line(hostname: &str) -> String {
		format!("127.0.1.1 {hostname}")
	}
}

impl SetupStep for Hostname {
	fn name(&self) -> &'static str {
		"Hostname"
	}

	fn check(&self, config: &HostConfig) -> Result<bool, InstallError> {
		let current = cmd::capture("hostname", &[])?.unwrap_or_default();
		if current != config.hostname {
			info!("Hostname is '{current}', expected '{}'.", config.hostname);
			return Ok(false);
		}
		let hosts_txt = fs::read_to_string(Hostname::HOSTS_PATH)?;
		let wanted = Hostname::hosts_line(&config.hostname);
		let has_entry = hosts_txt
			.lines()
			.any(|line| line.split_whitespace().collect::<Vec<_>>().join(" ") == wanted);
		if !has_entry {
			info!("Hosts file has no entry for '{}'.", config.hostname);
			return Ok(false);
		}
		Ok(true)
	}

	fn set(&self, config: &HostConfig) -> Result<(), InstallError> {
		info!("Setting hostname to '{}'.", config.hostname);
		cmd::status("hostnamectl", &["set-hostname", &config.hostname])?;
		let hosts_txt = fs::read_to_string(Hostname::HOSTS_PATH)?;
		let wanted = Hostname::hosts_line(&config.hostname);
		let has_entry = hosts_txt
			.lines()
			.any(|line| line.split_whitespace().collect::<Vec<_>>().join(" ") == wanted);
		if !has_entry {
			let mut updated = hosts_txt;
			if !updated.ends_with('\n') {
				updated.push('\n');
			}
			updated.push_str(&wanted);
			updated.push('\n');
			fs::write(Hostname::HOSTS_PATH, updated)?;
		}
		Ok(())
	}
}
