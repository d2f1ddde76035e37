//! The declarative netplan document handed to the network manager.
//!
//! The document is assembled fresh on every run from live adapter state and
//! never read back, so the types here exist to make the YAML shape explicit
//! and the assembly testable. Deserialization is only used to compare a
//! previously written file against a freshly assembled document.

use indexmap::IndexMap;
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Per-adapter state discovered from the live system. The nameserver list is
/// shared across all adapters in a run; it is sourced once from the resolver
/// configuration and copied onto each record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
	pub name: String,
	pub address: Ipv4Net,
	/// Set only on the primary adapter, and only when a default route was
	/// bound to it at discovery time.
	pub gateway: Option<Ipv4Addr>,
	pub nameservers: Vec<Ipv4Addr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDocument {
	pub network: Network,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
	pub version: u8,
	pub renderer: String,
	pub ethernets: IndexMap<String, Ethernet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ethernet {
	pub addresses: Vec<Ipv4Net>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub routes: Option<Vec<Route>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub nameservers: Option<Nameservers>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
	pub to: String,
	pub via: Ipv4Addr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nameservers {
	pub addresses: Vec<Ipv4Addr>,
}

impl NetworkDocument {
	pub const VERSION: u8 = 2;
	pub const RENDERER: &'static str = "networkd";
	pub const DEFAULT_ROUTE: &'static str = "0.0.0.0/0";

	/// Builds the document from the adapters that survived discovery.
	/// Adapters without a discoverable address never reach this function, so
	/// every entry carries exactly one address.
	pub fn assemble(adapters: &[AdapterConfig]) -> Self {
		let mut ethernets = IndexMap::with_capacity(adapters.len());
		for adapter in adapters {
			let routes = adapter.gateway.map(|via| {
				vec![Route {
					to: Self::DEFAULT_ROUTE.to_owned(),
					via,
				}]
			});
			let nameservers = if adapter.nameservers.is_empty() {
				None
			} else {
				Some(Nameservers {
					addresses: adapter.nameservers.clone(),
				})
			};
			ethernets.insert(
				adapter.name.clone(),
				Ethernet {
					addresses: vec![adapter.address],
					routes,
					nameservers,
				},
			);
		}
		Self {
			network: Network {
				version: Self::VERSION,
				renderer: Self::RENDERER.to_owned(),
				ethernets,
			},
		}
	}

	pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
		serde_yaml::to_string(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn adapter(
		name: &str,
		address: &str,
		gateway: Option<&str>,
		nameservers: &[&str],
	) -> AdapterConfig {
		AdapterConfig {
			name: name.to_owned(),
			address: address.parse().unwrap(),
			gateway: gateway.map(|gw| gw.parse().unwrap()),
			nameservers: nameservers.iter().map(|ns| ns.parse().unwrap()).collect(),
		}
	}

	#[test]
	fn primary_gets_default_route_secondary_does_not() {
		let adapters = [
			adapter("A", "10.0.0.5/24", Some("10.0.0.1"), &["8.8.8.8"]),
			adapter("B", "10.0.0.6/24", None, &["8.8.8.8"]),
		];
		let doc = NetworkDocument::assemble(&adapters);
		assert_eq!(doc.network.ethernets.len(), 2);
		let a = &doc.network.ethernets["A"];
		assert_eq!(
			a.routes,
			Some(vec![Route {
				to: "0.0.0.0/0".to_owned(),
				via: "10.0.0.1".parse().unwrap(),
			}])
		);
		assert_eq!(
			a.nameservers.as_ref().unwrap().addresses,
			vec!["8.8.8.8".parse::<std::net::Ipv4Addr>().unwrap()]
		);
		let b = &doc.network.ethernets["B"];
		assert_eq!(b.routes, None);
		assert_eq!(b.nameservers, a.nameservers);
	}

	#[test]
	fn failed_adapters_are_absent_not_empty() {
		// Discovery already dropped "B"; only "A" reaches assembly.
		let adapters = [adapter("A", "10.0.0.5/24", Some("10.0.0.1"), &[])];
		let doc = NetworkDocument::assemble(&adapters);
		assert_eq!(doc.network.ethernets.len(), 1);
		assert!(doc.network.ethernets.contains_key("A"));
		assert!(!doc.network.ethernets.contains_key("B"));
	}

	#[test]
	fn empty_nameserver_list_omits_the_block() {
		let adapters = [adapter("A", "10.0.0.5/24", None, &[])];
		let doc = NetworkDocument::assemble(&adapters);
		assert_eq!(doc.network.ethernets["A"].nameservers, None);
		let yaml = doc.to_yaml().unwrap();
		assert!(!yaml.contains("nameservers"));
		assert!(!yaml.contains("routes"));
	}

	#[test]
	fn assembly_is_deterministic() {
		let adapters = [
			adapter("A", "10.0.0.5/24", Some("10.0.0.1"), &["8.8.8.8", "1.1.1.1"]),
			adapter("B", "10.0.0.6/24", None, &["8.8.8.8", "1.1.1.1"]),
		];
		let first = NetworkDocument::assemble(&adapters);
		let second = NetworkDocument::assemble(&adapters);
		assert_eq!(first, second);
		assert_eq!(first.to_yaml().unwrap(), second.to_yaml().unwrap());
	}

	#[test]
	fn yaml_shape_matches_netplan() {
		let adapters = [adapter("ens33", "192.168.1.50/24", Some("192.168.1.1"), &["8.8.8.8"])];
		let yaml = NetworkDocument::assemble(&adapters).to_yaml().unwrap();
		assert!(yaml.contains("version: 2"));
		assert!(yaml.contains("renderer: networkd"));
		assert!(yaml.contains("ens33"));
		assert!(yaml.contains("192.168.1.50/24"));
		assert!(yaml.contains("to: 0.0.0.0/0"));
		assert!(yaml.contains("via: 192.168.1.1"));
	}

	#[test]
	fn documents_round_trip_through_yaml() {
		let adapters = [
			adapter("A", "10.0.0.5/24", Some("10.0.0.1"), &["8.8.8.8"]),
			adapter("B", "10.0.0.6/24", None, &[]),
		];
		let doc = NetworkDocument::assemble(&adapters);
		let parsed: NetworkDocument =
			serde_yaml::from_str(&doc.to_yaml().unwrap()).unwrap();
		assert_eq!(parsed, doc);
	}
}
