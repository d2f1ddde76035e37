use crate::cmd;
use crate::config::HostConfig;
use crate::error::InstallError;
use crate::setup::SetupStep;
use hex_literal::hex;
use sha2::{Digest, Sha256};
use std::fs;
use tracing::info;

pub struct DisableIpv6;

impl DisableIpv6 {
	pub const CONFIG_PATH: &'static str = "/etc/sysctl.d/99-kubeprep-ipv6.conf";
	pub const RUNTIME_PATH: &'static str = "/proc/sys/net/ipv6/conf/all/disable_ipv6";
}

impl SetupStep for DisableIpv6 {
	fn name(&self) -> &'static str {
		"DisableIpv6"
	}

	fn check(&self, _config: &HostConfig) -> Result<bool, InstallError> {
		const EXPECTED: [u8; 32] =
			hex!("426e883ddac55e0317fad896fde782ef305e139951413097551c91e4bf8b2026");
		let Ok(config_txt) = fs::read(DisableIpv6::CONFIG_PATH) else {
			info!("IPv6 sysctl config missing or unreadable.");
			return Ok(false);
		};
		let is_valid = Sha256::digest(&config_txt)[..] == EXPECTED;
		if !is_valid {
			info!("IPv6 sysctl config differs from the expected content.");
			return Ok(false);
		}
		let Ok(runtime) = fs::read_to_string(DisableIpv6::RUNTIME_PATH) else {
			// No ipv6 module at all means there is nothing to disable.
			info!("IPv6 runtime state unavailable, treating as disabled.");
			return Ok(true);
		};
		if runtime.trim() != "1" {
			info!("IPv6 is still enabled at runtime.");
			return Ok(false);
		}
		Ok(true)
	}

	fn set(&self, _config: &HostConfig) -> Result<(), InstallError> {
		info!("Disabling IPv6 via sysctl.");
		let config_txt = [
			"net.ipv6.conf.all.disable_ipv6 = 1",
			"net.ipv6.conf.default.disable_ipv6 = 1",
		]
		.join("\n")
			+ "\n";
		fs::write(DisableIpv6::CONFIG_PATH, config_txt)?;
		cmd::status("sysctl", &["--system"])?;
		info!("IPv6 has been disabled.");
		Ok(())
	}
}
