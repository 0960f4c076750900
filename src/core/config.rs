use std::default::Default;
use super::ring::KEY_SPACE;

#[derive(Clone, Debug)]
pub struct Config {
	// ratio between the offsets of adjacent fingers
	pub finger_ratio: u64,
	// max number of nodes the finger table is sized for
	pub max_ring_size: u128,
	// keep k successors for recovery
	pub successor_list_size: usize,
	/// interval in ms between maintenance rounds (0 means disabling it)
	pub maintenance_interval: u64,
	/// deadline in ms of a single remote call
	pub rpc_timeout: u64,
	/// deadline in ms of remote calls that route through the ring
	pub lookup_timeout: u64,
	pub connect_timeout: u64,
	// backoff in ms between join/bind attempts
	pub retry_interval: u64,
	pub retry_limit: u64,
	pub max_lookup_hops: usize,
	/// max number of concurrent connections buffered
	pub max_connections: u64
}

impl Default for Config {
	fn default() -> Self {
		Self {
			finger_ratio: 2,
			max_ring_size: KEY_SPACE,
			successor_list_size: 4,
			maintenance_interval: 200,
			rpc_timeout: 1000,
			lookup_timeout: 5000,
			connect_timeout: 1000,
			retry_interval: 100,
			retry_limit: 3,
			max_lookup_hops: 64,
			max_connections: 16
		}
	}
}
