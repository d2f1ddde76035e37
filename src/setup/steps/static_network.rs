use crate::cmd;
use crate::config::HostConfig;
use crate::error::InstallError;
use crate::netplan::{discover, document::NetworkDocument};
use crate::setup::SetupStep;
use std::{fs, os::unix::fs::PermissionsExt};
use tracing::{info, warn};

/// Pins every configured adapter to its currently discovered address by
/// writing a static netplan configuration and applying it.
pub struct StaticNetwork;

impl StaticNetwork {
	/// Owner read/write only; netplan warns about world-readable configs.
	const FILE_MODE: u32 = 0o600;

	/// Discovers all configured adapters and assembles the document. A
	/// discovery failure on one adapter drops that adapter and keeps going.
	fn build_document(config: &HostConfig) -> NetworkDocument {
		let nameservers = discover::read_nameservers(&config.resolver_path);
		let mut found = Vec::with_capacity(config.adapters.len());
		for (index, adapter) in config.adapters.iter().enumerate() {
			let primary = index == 0;
			match discover::discover(adapter, primary, &nameservers) {
				Ok(Some(adapter_config)) => {
					info!(
						"Adapter {adapter}: {} gateway {:?}.",
						adapter_config.address, adapter_config.gateway
					);
					found.push(adapter_config);
				}
				Ok(None) => {
					warn!("No IPv4 address on adapter {adapter}, omitting it.");
				}
				Err(err) => {
					warn!("Discovery failed for adapter {adapter}: {err}");
				}
			}
		}
		NetworkDocument::assemble(&found)
	}
}

impl SetupStep for StaticNetwork {
	fn name(&self) -> &'static str {
		"StaticNetwork"
	}

	fn check(&self, config: &HostConfig) -> Result<bool, InstallError> {
		let Ok(existing_txt) = fs::read_to_string(&config.netplan_path) else {
			info!("Netplan configuration missing or unreadable.");
			return Ok(false);
		};
		let Ok(existing) = serde_yaml::from_str::<NetworkDocument>(&existing_txt) else {
			info!("Netplan configuration is not one this tool wrote.");
			return Ok(false);
		};
		let wanted = StaticNetwork::build_document(config);
		if existing != wanted {
			info!("Netplan configuration differs from discovered adapter state.");
			return Ok(false);
		}
		Ok(true)
	}

	fn set(&self, config: &HostConfig) -> Result<(), InstallError> {
		let document = StaticNetwork::build_document(config);
		if document.network.ethernets.is_empty() {
			warn!("No adapter produced a usable configuration.");
		}
		let yaml = document.to_yaml()?;
		fs::write(&config.netplan_path, yaml)?;
		fs::set_permissions(
			&config.netplan_path,
			fs::Permissions::from_mode(StaticNetwork::FILE_MODE),
		)?;
		info!(
			"Netplan configuration written to {}.",
			config.netplan_path.display()
		);
		cmd::status("netplan", &["apply"])?;
		info!("Netplan configuration applied.");
		Ok(())
	}
}
