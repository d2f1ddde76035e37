mod steps;
mod utils;

use crate::config::HostConfig;
use crate::error::InstallError;
use crate::setup::steps::{
	Crio, DisableIpv6, DisableSwap, Firewall, Hostname, Kubes, Preflight, Prerequisites, Resolver,
	StaticNetwork,
};
use tracing::info;

pub trait SetupStep {
	fn name(&self) -> &'static str;
	fn check(&self, config: &HostConfig) -> Result<bool, InstallError>;
	fn set(&self, config: &HostConfig) -> Result<(), InstallError>;
}

const SETUP_STEPS: &[&dyn SetupStep] = &[
	&Prerequisites,
	&Hostname,
	&Resolver,
	&DisableIpv6,
	&DisableSwap,
	&StaticNetwork,
	&Firewall,
	&Crio,
	&Kubes,
	&Preflight,
];

pub fn setup(config: &HostConfig) -> Result<(), InstallError> {
	for step in SETUP_STEPS {
		info!("Step: {}.", step.name());
		if step.check(config)? {
			continue;
		}
		step.set(config)?;
		if !step.check(config)? {
			return Err(InstallError::StepFailed { step: step.name() });
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn position(name: &str) -> usize {
		SETUP_STEPS
			.iter()
			.position(|step| step.name() == name)
			.unwrap()
	}

	#[test]
	fn prerequisites_run_before_any_repo_step() {
		// The Crio and Kubes steps download repo keys with curl.
		assert!(position("Prerequisites") < position("Crio"));
		assert!(position("Prerequisites") < position("Kubes"));
	}

	#[test]
	fn kubes_are_installed_before_preflight() {
		assert!(position("Kubes") < position("Preflight"));
	}
}

