use std::{io, process::ExitStatus};

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
	#[error("I/O error: {0}.")]
	Io(#[from] io::Error),

	#[error("Failed to execute command '{cmd}': {source}")]
	CommandLaunch {
		cmd: String,
		#[source]
		source: io::Error,
	},

	#[error("Command failed: {cmd}")]
	CommandFailed {
		cmd: String,
		status: ExitStatus,
		stderr: Option<String>,
	},

	#[error("Step '{step}' failed after attempt to set it.")]
	StepFailed { step: &'static str },

	#[error("This program must be run as root. Please try again with 'sudo'.")]
	Privilege,

	#[error("Invalid configuration: {0}.")]
	Config(String),

	#[error("Failed to serialize network configuration: {0}.")]
	Serialize(#[from] serde_yaml::Error),

	#[error(transparent)]
	Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
