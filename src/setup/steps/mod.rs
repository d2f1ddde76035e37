pub mod crio;
pub mod disable_ipv6;
pub mod disable_swap;
pub mod firewall;
pub mod hostname;
pub mod kubes;
pub mod preflight;
pub mod prerequisites;
pub mod resolver;
pub mod static_network;

pub use crio::Crio;
pub use disable_ipv6::DisableIpv6;
pub use disable_swap::DisableSwap;
pub use firewall::Firewall;
pub use hostname::Hostname;
pub use kubes::Kubes;
pub use preflight::Preflight;
pub use prerequisites::Prerequisites;
pub use resolver::Resolver;
pub use static_network::StaticNetwork;
