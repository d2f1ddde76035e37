use crate::cmd;
use crate::config::HostConfig;
use crate::error::InstallError;
use crate::setup::SetupStep;
use std::fs;
use tracing::info;

pub struct DisableSwap;

impl DisableSwap {
	pub const FSTAB_PATH: &'static str = "/etc/fstab";
}

/// Drops every fstab line whose filesystem type is swap, preserving the
/// trailing-newline state of the original file.
fn strip_swap_entries(fstab: &str) -> String {
	let cleaned = fstab
		.lines()
		.filter(|line| {
			line.split_whitespace()
				.nth(2)
				.is_none_or(|fs_type| fs_type != "swap")
		})
		.collect::<Vec<_>>()
		.join("\n");
	if fstab.ends_with('\n') && !cleaned.is_empty() {
		cleaned + "\n"
	} else {
		cleaned
	}
}

impl SetupStep for DisableSwap {
	fn name(&self) -> &'static str {
		"DisableSwap"
	}

	fn check(&self, _config: &HostConfig) -> Result<bool, InstallError> {
		let is_swap_on = fs::read_to_string("/proc/swaps")?.lines().count() > 1;
		if is_swap_on {
			info!("Swap is enabled.");
			return Ok(false);
		}
		let Ok(config_txt) = fs::read_to_string(DisableSwap::FSTAB_PATH) else {
			info!("fstab is missing or unreadable.");
			return Ok(false);
		};
		let is_configured = config_txt
			.lines()
			.filter(|line| !line.trim_start().starts_with('#'))
			.any(|line| {
				let fields = line.split_whitespace().collect::<Vec<&str>>();
				fields.len() >= 3 && fields[2] == "swap"
			});
		if is_configured {
			info!("Swap is enabled in fstab.");
			return Ok(false);
		}
		Ok(true)
	}

	fn set(&self, _config: &HostConfig) -> Result<(), InstallError> {
		cmd::status("swapoff", &["-a"])?;
		let original = fs::read_to_string(DisableSwap::FSTAB_PATH)?;
		let cleaned = strip_swap_entries(&original);
		if cleaned.as_bytes() != original.as_bytes() {
			info!("Removing swap entries from {}.", DisableSwap::FSTAB_PATH);
			fs::write(DisableSwap::FSTAB_PATH, cleaned)?;
		}
		Ok(())
	}
}
