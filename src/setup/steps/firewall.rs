use crate::cmd;
use crate::config::HostConfig;
use crate::error::InstallError;
use crate::setup::SetupStep;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Firewall;

#[derive(Debug, Clone)]
pub struct FirewallRule<'a> {
	port: &'a str,
	protocol: &'a str,
	comment: &'a str,
}

impl FirewallRule<'_> {
	fn port_spec(&self) -> String {
		format!("{}/{}", self.port, self.protocol)
	}
}

impl Firewall {
	pub const RULES: &'static [FirewallRule<'static>] = &[
		FirewallRule {
			port: "6443",
			protocol: "tcp",
			comment: "kube-apiserver",
		},
		FirewallRule {
			port: "2379:2380",
			protocol: "tcp",
			comment: "etcd",
		},
		FirewallRule {
			port: "10250",
			protocol: "tcp",
			comment: "kubelet",
		},
		FirewallRule {
			port: "10255",
			protocol: "tcp",
			comment: "kubelet read-only",
		},
		FirewallRule {
			port: "30000:32767",
			protocol: "tcp",
			comment: "nodeport services",
		},
	];

	fn missing_rules(added_output: &str) -> Vec<&'static FirewallRule<'static>> {
		let added = added_output
			.lines()
			.filter(|line| line.contains("kubeprep"))
			.collect::<Vec<_>>();
		Firewall::RULES
			.iter()
			.filter(|rule| !added.iter().any(|line| line.contains(&rule.port_spec())))
			.collect()
	}
}

impl SetupStep for Firewall {
	fn name(&self) -> &'static str {
		"Firewall"
	}

	fn check(&self, _config: &HostConfig) -> Result<bool, InstallError> {
		let Some(status_output) = cmd::capture("ufw", &["status"])? else {
			info!("Firewall status unavailable.");
			return Ok(false);
		};
		if !status_output.contains("Status: active") {
			info!("Firewall is not active.");
			return Ok(false);
		}
		let Some(added_output) = cmd::capture("ufw", &["show", "added"])? else {
			info!("Firewall rules unavailable.");
			return Ok(false);
		};
		let missing = Firewall::missing_rules(&added_output);
		if missing.is_empty() {
			Ok(true)
		} else {
			info!("Firewall is missing {} rule(s).", missing.len());
			Ok(false)
		}
	}

	fn set(&self, _config: &HostConfig) -> Result<(), InstallError> {
		info!("Opening Kubernetes ports.");
		for rule in Firewall::RULES {
			cmd::status(
				"ufw",
				&[
					"allow",
					&rule.port_spec(),
					"comment",
					&format!("kubeprep: {}", rule.comment),
				],
			)?;
		}
		cmd::status("ufw", &["--force", "enable"])?;
		info!("Kubernetes ports are open.");
		Ok(())
	}
}
