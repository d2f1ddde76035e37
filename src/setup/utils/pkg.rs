use crate::cmd;
use crate::error::InstallError;

pub enum PkgManager {
	Apt,
}

fn get_pkg_manager() -> PkgManager {
	PkgManager::Apt
}

pub fn is_installed(package_name: &str) -> Result<bool, InstallError> {
	let installed;
	match get_pkg_manager() {
		PkgManager::Apt => {
			let status = cmd::capture("dpkg-query", &["-W", "-f=${Status}", package_name])?;
			installed = matches!(
				status.as_deref(),
				Some("install ok installed") | Some("hold ok installed")
			);
		}
	}
	Ok(installed)
}

pub fn update() -> Result<(), InstallError> {
	match get_pkg_manager() {
		PkgManager::Apt => cmd::status("apt-get", &["update"]),
	}
}

pub fn install(package_names: &[&str]) -> Result<(), InstallError> {
	match get_pkg_manager() {
		PkgManager::Apt => {
			let mut args = vec!["install", "-y", "--no-install-recommends"];
			args.extend_from_slice(package_names);
			cmd::status("apt-get", &args)
		}
	}
}

pub fn mark(package_names: &[&str]) -> Result<(), InstallError> {
	match get_pkg_manager() {
		PkgManager::Apt => {
			let mut args = vec!["hold"];
			args.extend_from_slice(package_names);
			cmd::status("apt-mark", &args)
		}
	}
}

/// Downloads an armored repository key and dearmors it to the keyring path.
pub fn import_repo_key(key_url: &str, key_path: &str) -> Result<(), InstallError> {
	let key = cmd::output("curl", &["-fsSL", key_url])?;
	cmd::feed_stdin("gpg", &["--dearmor", "--yes", "-o", key_path], &key.stdout)
}
