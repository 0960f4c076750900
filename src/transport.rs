pub mod tcp;
pub mod memory;

pub use tcp::TcpTransport;
pub use memory::MemoryNetwork;

use async_trait::async_trait;
use tokio::{sync::watch, task::JoinHandle};
use crate::{
	core::{NodeServer, error::DhtResult},
	rpc::NodeServiceClient
};

/// How nodes reach each other.
///
/// The protocol engine only sees this trait, so the same engine runs over
/// TCP in deployments and over in-process channels in tests.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
	/// Serve the node's rpc surface at its address until shutdown turns true
	async fn listen(&self, server: NodeServer, shutdown: watch::Receiver<bool>) -> DhtResult<JoinHandle<()>>;

	/// Open a client to the node at addr
	async fn connect(&self, addr: &str) -> DhtResult<NodeServiceClient>;
}
