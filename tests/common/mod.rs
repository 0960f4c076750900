#![allow(dead_code)]

use std::{
	collections::HashMap,
	sync::Arc
};
use chord_ring::{
	core::{
		config::Config,
		ring::Digest,
		Node,
		NodeServer
	},
	monitor::{MonitorConfig, RingMonitor},
	server::ServerManager,
	transport::MemoryNetwork
};

pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// Maintenance stepped by hand, small finger table
pub fn manual_config() -> Config {
	Config {
		maintenance_interval: 0,
		max_ring_size: 1 << 8,
		successor_list_size: 3,
		retry_interval: 10,
		..Config::default()
	}
}

pub fn test_node(id: Digest) -> Node {
	Node::new(id, format!("node-{}", id))
}

/// Node responsible for id among keys
pub fn owner(keys: &[Digest], id: Digest) -> Digest {
	let mut sorted = keys.to_vec();
	sorted.sort_unstable();
	sorted.iter()
		.find(|k| **k >= id)
		.copied()
		.unwrap_or(sorted[0])
}

/// The n nodes following id in key order
pub fn following(keys: &[Digest], id: Digest, n: usize) -> Vec<Digest> {
	let mut sorted = keys.to_vec();
	sorted.sort_unstable();
	let pos = sorted.iter().position(|k| *k == id).unwrap();
	(1..=n.min(sorted.len() - 1))
		.map(|i| sorted[(pos + i) % sorted.len()])
		.collect()
}

pub async fn fix_all_fingers(server: &NodeServer) {
	for _ in 0..server.finger_table_len() {
		// a failed lookup leaves the slot empty
		let _ = server.fix_next_finger().await;
	}
}

/// Nodes on one in-process network
pub struct TestRing {
	pub network: Arc<MemoryNetwork>,
	pub config: Config,
	servers: Vec<NodeServer>,
	managers: HashMap<Digest, ServerManager>
}

impl TestRing {
	pub fn new(config: Config) -> Self {
		TestRing {
			network: Arc::new(MemoryNetwork::new()),
			config,
			servers: Vec::new(),
			managers: HashMap::new()
		}
	}

	pub fn with_network(network: Arc<MemoryNetwork>, config: Config) -> Self {
		TestRing {
			network,
			config,
			servers: Vec::new(),
			managers: HashMap::new()
		}
	}

	pub async fn add(&mut self, id: Digest, join: Option<Digest>) -> anyhow::Result<NodeServer> {
		let server = NodeServer::new(test_node(id), self.config.clone(), self.network.clone());
		let manager = server.start(join.map(test_node)).await?;
		self.servers.push(server.clone());
		self.managers.insert(id, manager);
		Ok(server)
	}

	/// Create a ring from keys, every node joining through the first one
	pub async fn build(config: Config, keys: &[Digest]) -> anyhow::Result<Self> {
		let mut ring = TestRing::new(config);
		ring.extend(keys).await?;
		Ok(ring)
	}

	pub async fn extend(&mut self, keys: &[Digest]) -> anyhow::Result<()> {
		let first = keys[0];
		self.add(first, None).await?;
		for id in &keys[1..] {
			self.add(*id, Some(first)).await?;
			self.stabilize_all(2).await;
		}
		self.stabilize_all(keys.len() + self.config.successor_list_size).await;
		self.fix_all_fingers().await;
		Ok(())
	}

	pub fn server(&self, id: Digest) -> &NodeServer {
		self.servers.iter().find(|s| s.node().id == id).unwrap()
	}

	pub fn alive(&self) -> Vec<&NodeServer> {
		self.servers.iter()
			.filter(|s| self.managers.contains_key(&s.node().id))
			.collect()
	}

	pub fn keys(&self) -> Vec<Digest> {
		self.alive().iter().map(|s| s.node().id).collect()
	}

	pub async fn kill(&mut self, id: Digest) -> anyhow::Result<()> {
		let manager = self.managers.remove(&id).unwrap();
		manager.stop().await?;
		Ok(())
	}

	/// Full maintenance rounds (check_predecessor, stabilize, one finger)
	pub async fn maintain_all(&self, rounds: usize) {
		for _ in 0..rounds {
			for s in self.alive() {
				s.maintain().await;
			}
		}
	}

	/// Rounds without finger maintenance
	pub async fn stabilize_all(&self, rounds: usize) {
		for _ in 0..rounds {
			for s in self.alive() {
				s.check_predecessor().await;
				let _ = s.stabilize().await;
			}
		}
	}

	pub async fn fix_all_fingers(&self) {
		for s in self.alive() {
			fix_all_fingers(s).await;
		}
	}

	pub fn monitor(&self) -> RingMonitor {
		RingMonitor::new(self.network.clone(), MonitorConfig::default())
	}

	pub async fn stop_all(mut self) -> anyhow::Result<()> {
		for (_, manager) in self.managers.drain() {
			manager.stop().await?;
		}
		Ok(())
	}
}

/// Check successor and predecessor pointers against key order
pub fn assert_ring(servers: &[&NodeServer]) {
	let keys: Vec<Digest> = servers.iter().map(|s| s.node().id).collect();
	for s in servers {
		let id = s.node().id;
		let succ = s.get_successor().unwrap().id;
		assert_eq!(succ, following(&keys, id, 1).first().copied().unwrap_or(id), "successor of {}", id);
		let pred = s.get_predecessor().unwrap().id;
		let expected_pred = servers.iter()
			.map(|s| s.node().id)
			.find(|k| following(&keys, *k, 1).first().copied().unwrap_or(*k) == id)
			.unwrap();
		assert_eq!(pred, expected_pred, "predecessor of {}", id);
	}
}
