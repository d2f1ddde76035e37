use crate::cmd;
use crate::config::HostConfig;
use crate::error::InstallError;
use crate::setup::SetupStep;
use tracing::info;

/// Pre-pulls the control plane images so a later `kubeadm init`/`join` does
/// not stall on registry fetches. Runs last, after the Kubes step has put
/// kubeadm and crictl on the host.
pub struct Preflight;

impl Preflight {
	/// Image references kubeadm wants that crictl does not already have,
	/// compared by repository (crictl lists repository and tag as separate
	/// columns).
	fn missing_images(wanted: &str, have: &str) -> Vec<String> {
		let pulled = have
			.lines()
			.skip(1) // header row
			.filter_map(|line| line.split_whitespace().next())
			.collect::<Vec<_>>();
		wanted
			.lines()
			.map(str::trim)
			.filter(|image| !image.is_empty())
			.filter(|image| !pulled.contains(&repository_of(image)))
			.map(str::to_owned)
			.collect()
	}
}

// Strips a trailing tag, but only a real one: a `:` inside the registry
// host (`registry:5000/pause`) is part of the repository.
fn repository_of(image: &str) -> &str {
	match image.rsplit_once(':') {
		Some((repository, tag)) if !tag.contains('/') => repository,
		_ => image,
	}
}

impl SetupStep for Preflight {
	fn name(&self) -> &'static str {
		"Preflight"
	}

	fn check(&self, _config: &HostConfig) -> Result<bool, InstallError> {
		let Some(wanted) = cmd::capture("kubeadm", &["config", "images", "list"])? else {
			info!("kubeadm cannot list its images yet.");
			return Ok(false);
		};
		let Some(have) = cmd::capture("crictl", &["images"])? else {
			info!("crictl cannot list pulled images.");
			return Ok(false);
		};
		let missing = Preflight::missing_images(&wanted, &have);
		if missing.is_empty() {
			info!("All control plane images are present.");
			Ok(true)
		} else {
			info!("{} control plane image(s) not pulled yet.", missing.len());
			Ok(false)
		}
	}

	fn set(&self, _config: &HostConfig) -> Result<(), InstallError> {
		info!("Pulling control plane images.");
		cmd::status("kubeadm", &["config", "images", "pull"])?;
		info!("Control plane images pulled.");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	const WANTED: &str = "\
registry.k8s.io/kube-apiserver:v1.28.4
registry.k8s.io/kube-controller-manager:v1.28.4
registry.k8s.io/etcd:3.5.9-0
";

	#[test]
	fn everything_missing_without_pulled_images() {
		let have = "IMAGE TAG IMAGE ID SIZE\n";
		let missing = Preflight::missing_images(WANTED, have);
		assert_eq!(missing.len(), 3);
	}

	#[test]
	fn pulled_images_match_by_repository() {
		let have = "\
IMAGE TAG IMAGE ID SIZE
registry.k8s.io/kube-apiserver v1.28.4 5374347291230 34.7MB
registry.k8s.io/etcd 3.5.9-0 73deb9a3f7025 103MB
";
		let missing = Preflight::missing_images(WANTED, have);
		assert_eq!(
			missing,
			vec!["registry.k8s.io/kube-controller-manager:v1.28.4".to_owned()]
		);
	}

	#[test]
	fn registry_ports_are_not_mistaken_for_tags() {
		assert_eq!(repository_of("registry:5000/pause"), "registry:5000/pause");
		assert_eq!(repository_of("registry:5000/pause:3.9"), "registry:5000/pause");
		assert_eq!(repository_of("registry.k8s.io/etcd:3.5.9-0"), "registry.k8s.io/etcd");
		assert_eq!(repository_of("pause"), "pause");

		let wanted = "registry:5000/pause\n";
		let have = "\
IMAGE TAG IMAGE ID SIZE
registry:5000/pause latest 1234567890abc 700kB
";
		assert_eq!(Preflight::missing_images(wanted, have), Vec::<String>::new());
	}

	#[test]
	fn blank_lines_in_image_list_are_ignored() {
		assert_eq!(Preflight::missing_images("\n\n", "IMAGE TAG ID SIZE\n"), Vec::<String>::new());
	}
}
