use std::{
	collections::HashMap,
	sync::{Arc, RwLock},
	time::{Duration, SystemTime}
};
use tarpc::context;
use log::debug;
use super::{
	ring::Digest,
	node::Node,
	error::*
};
use crate::{
	rpc::NodeServiceClient,
	transport::Transport
};

/// Live rpc clients indexed by node key.
///
/// Nodes only keep (key, address) pairs for their peers and resolve a
/// client here on demand, so mutual references on the ring never become
/// ownership cycles.
#[derive(Clone)]
pub struct ConnectionPool {
	transport: Arc<dyn Transport>,
	// deadline in ms of the key query in resolve
	rpc_timeout: u64,
	connection_map: Arc<RwLock<HashMap<Digest, NodeServiceClient>>>
}

impl ConnectionPool {
	pub fn new(transport: Arc<dyn Transport>, rpc_timeout: u64) -> Self {
		ConnectionPool {
			transport,
			rpc_timeout,
			connection_map: Arc::new(RwLock::new(HashMap::new()))
		}
	}

	pub fn transport(&self) -> &Arc<dyn Transport> {
		&self.transport
	}

	pub async fn get(&self, node: &Node) -> DhtResult<NodeServiceClient> {
		// Use block to drop map immediately after use
		{
			let map = self.connection_map.read().unwrap();
			if let Some(c) = map.get(&node.id) {
				// client can be cloned with lost cost
				return Ok(c.clone());
			}
		}

		debug!("connecting to {}", node);
		let c = self.transport.connect(&node.addr).await?;
		let mut map = self.connection_map.write().unwrap();
		map.insert(node.id, c.clone());
		Ok(c)
	}

	/// Connect by address only and learn the node's key
	pub async fn resolve(&self, addr: &str) -> DhtResult<Node> {
		let c = self.transport.connect(addr).await?;
		let mut ctx = context::current();
		ctx.deadline = SystemTime::now() + Duration::from_millis(self.rpc_timeout);
		let id = c.get_key_rpc(ctx).await?;
		let node = Node::new(id, addr);
		self.connection_map.write().unwrap().insert(id, c);
		Ok(node)
	}

	/// Forget a stale client so the next call reconnects
	pub fn drop_connection(&self, node: &Node) {
		self.connection_map.write().unwrap().remove(&node.id);
	}

	pub fn clear(&self) {
		self.connection_map.write().unwrap().clear();
	}
}
