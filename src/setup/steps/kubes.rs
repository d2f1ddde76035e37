use crate::config::HostConfig;
use crate::error::InstallError;
use crate::setup::utils::pkg;
use crate::setup::SetupStep;
use std::fs;
use tracing::info;

pub struct Kubes;

impl Kubes {
	pub const PACKAGE_NAMES: &'static [&'static str] = &["kubelet", "kubeadm", "kubectl"];
	pub const APT_CONFIG_PATH: &'static str = "/etc/apt/sources.list.d/kubernetes.list";
	pub const APT_KEY_PATH: &'static str = "/etc/apt/keyrings/kubernetes-apt-keyring.gpg";
	pub const K8S_BASE_URL: &'static str = "https://pkgs.k8s.io/core:/stable:/v1.28/deb";
}

impl SetupStep for Kubes {
	fn name(&self) -> &'static str {
		"Kubes"
	}

	fn check(&self, _config: &HostConfig) -> Result<bool, InstallError> {
		for package_name in Kubes::PACKAGE_NAMES {
			if !pkg::is_installed(package_name)? {
				info!("{package_name} is not installed.");
				return Ok(false);
			}
		}
		info!("Kubes are installed.");
		Ok(true)
	}

	fn set(&self, _config: &HostConfig) -> Result<(), InstallError> {
		info!("Installing Kubernetes tooling via apt-get.");
		pkg::import_repo_key(
			&format!("{}/Release.key", Kubes::K8S_BASE_URL),
			Kubes::APT_KEY_PATH,
		)?;
		let apt_config_txt = format!(
			"deb [signed-by={}] {} /\n",
			Kubes::APT_KEY_PATH,
			Kubes::K8S_BASE_URL,
		);
		fs::write(Kubes::APT_CONFIG_PATH, apt_config_txt)?;
		pkg::update()?;
		pkg::install(Kubes::PACKAGE_NAMES)?;
		pkg::mark(Kubes::PACKAGE_NAMES)?;
		info!("Kubernetes tooling installed.");
		Ok(())
	}
}
