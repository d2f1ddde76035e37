use crate::error::InstallError;
use std::{
	io::Write,
	process::{Command, Output, Stdio},
};

fn display(program: &str, args: &[&str]) -> String {
	let mut cmd = program.to_owned();
	for arg in args {
		cmd.push(' ');
		cmd.push_str(arg);
	}
	cmd
}

fn collect_stderr(output: &Output) -> Option<String> {
	if output.stderr.is_empty() {
		None
	} else {
		Some(String::from_utf8_lossy(&output.stderr).trim().to_owned())
	}
}

/// Runs a command inheriting stdio, failing on a non-zero exit.
pub fn status(program: &str, args: &[&str]) -> Result<(), InstallError> {
	let status = Command::new(program)
		.args(args)
		.status()
		.map_err(|source| InstallError::CommandLaunch {
			cmd: display(program, args),
			source,
		})?;
	if !status.success() {
		return Err(InstallError::CommandFailed {
			cmd: display(program, args),
			status,
			stderr: None,
		});
	}
	Ok(())
}

/// Runs a command capturing stdio, failing on a non-zero exit.
pub fn output(program: &str, args: &[&str]) -> Result<Output, InstallError> {
	let output = Command::new(program)
		.args(args)
		.output()
		.map_err(|source| InstallError::CommandLaunch {
			cmd: display(program, args),
			source,
		})?;
	if !output.status.success() {
		let stderr = collect_stderr(&output);
		return Err(InstallError::CommandFailed {
			cmd: display(program, args),
			status: output.status,
			stderr,
		});
	}
	Ok(output)
}

/// Runs a command and returns its trimmed stdout, or `None` on a non-zero
/// exit. Only a failure to launch the program at all is an error.
pub fn capture(program: &str, args: &[&str]) -> Result<Option<String>, InstallError> {
	let output = Command::new(program)
		.args(args)
		.output()
		.map_err(|source| InstallError::CommandLaunch {
			cmd: display(program, args),
			source,
		})?;
	if !output.status.success() {
		return Ok(None);
	}
	Ok(Some(
		String::from_utf8_lossy(&output.stdout).trim().to_owned(),
	))
}

/// Runs a command with the given bytes piped to its stdin.
pub fn feed_stdin(program: &str, args: &[&str], input: &[u8]) -> Result<(), InstallError> {
	let mut child = Command::new(program)
		.args(args)
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.map_err(|source| InstallError::CommandLaunch {
			cmd: display(program, args),
			source,
		})?;
	let stdin = child.stdin.as_mut().ok_or_else(|| {
		InstallError::Other(format!("Failed to open stdin for {program}").into())
	})?;
	stdin.write_all(input)?;
	let output = child
		.wait_with_output()
		.map_err(|source| InstallError::CommandLaunch {
			cmd: display(program, args),
			source,
		})?;
	if !output.status.success() {
		let stderr = collect_stderr(&output);
		return Err(InstallError::CommandFailed {
			cmd: display(program, args),
			status: output.status,
			stderr,
		});
	}
	Ok(())
}
