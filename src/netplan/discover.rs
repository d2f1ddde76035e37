//! Live adapter state discovery via `ip` and the resolver configuration.
//!
//! Discovery for one adapter never blocks the others: an adapter with no
//! IPv4 address yields `Ok(None)` and is dropped from the document, and a
//! missing default route on the primary adapter just leaves the gateway
//! unset.

use crate::cmd;
use crate::error::InstallError;
use crate::netplan::document::AdapterConfig;
use ipnet::Ipv4Net;
use std::{fs, net::Ipv4Addr, path::Path};
use tracing::warn;

/// Queries address, prefix and (for the primary adapter) the default route
/// of a single live interface.
pub fn discover(
	adapter: &str,
	primary: bool,
	nameservers: &[Ipv4Addr],
) -> Result<Option<AdapterConfig>, InstallError> {
	let addr_output = cmd::capture("ip", &["-o", "-4", "addr", "show", "dev", adapter])?;
	let Some(address) = addr_output.as_deref().and_then(parse_addr_output) else {
		return Ok(None);
	};
	let gateway = if primary {
		cmd::capture("ip", &["route", "show", "dev", adapter, "default"])?
			.as_deref()
			.and_then(parse_route_output)
	} else {
		None
	};
	Ok(Some(AdapterConfig {
		name: adapter.to_owned(),
		address,
		gateway,
		nameservers: nameservers.to_vec(),
	}))
}

/// Reads the resolver configuration once per run. A missing or unreadable
/// file is not an error; it just yields no nameservers.
pub fn read_nameservers(path: &Path) -> Vec<Ipv4Addr> {
	match fs::read_to_string(path) {
		Ok(txt) => parse_resolv_conf(&txt),
		Err(err) => {
			warn!("Failed to read resolver configuration {}: {err}.", path.display());
			Vec::new()
		}
	}
}

// `ip -o -4 addr show dev <name>` puts the CIDR address in the 4th field:
// "2: ens33    inet 192.168.1.50/24 brd 192.168.1.255 scope global ..."
fn parse_addr_output(output: &str) -> Option<Ipv4Net> {
	output
		.lines()
		.next()?
		.split_whitespace()
		.nth(3)?
		.parse()
		.ok()
}

// "default via 192.168.1.1 proto dhcp src 192.168.1.50 metric 100"
fn parse_route_output(output: &str) -> Option<Ipv4Addr> {
	output
		.lines()
		.next()?
		.split_whitespace()
		.nth(2)?
		.parse()
		.ok()
}

fn parse_resolv_conf(txt: &str) -> Vec<Ipv4Addr> {
	txt.lines()
		.filter_map(|line| {
			let line = line.trim_start();
			if !line.starts_with("nameserver") {
				return None;
			}
			line.split_whitespace().nth(1)?.parse().ok()
		})
		.collect()
}
