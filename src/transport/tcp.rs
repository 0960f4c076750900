use async_trait::async_trait;
use futures::{future, prelude::*};
use log::{debug, warn};
use tarpc::{
	server::{BaseChannel, Channel},
	tokio_serde::formats::Bincode
};
use tokio::{
	sync::watch,
	task::JoinHandle,
	time::{timeout, Duration}
};
use super::Transport;
use crate::{
	client::setup_client,
	core::{NodeServer, error::*},
	rpc::{NodeService, NodeServiceClient}
};

/// tarpc over TCP with bincode frames
#[derive(Debug, Clone)]
pub struct TcpTransport {
	connect_timeout: u64,
	max_connections: usize
}

impl TcpTransport {
	pub fn new(connect_timeout: u64, max_connections: u64) -> Self {
		TcpTransport {
			connect_timeout,
			max_connections: max_connections as usize
		}
	}
}

#[async_trait]
impl Transport for TcpTransport {
	async fn listen(&self, server: NodeServer, mut shutdown: watch::Receiver<bool>) -> DhtResult<JoinHandle<()>> {
		let node = server.node().clone();
		let mut listener = tarpc::serde_transport::tcp::listen(node.addr.as_str(), Bincode::default)
			.await
			.map_err(|e| DhtError::BindFailure {
				addr: node.addr.clone(),
				message: e.to_string()
			})?;
		let max_connections = self.max_connections;

		// Listen for rpc call
		Ok(tokio::spawn(async move {
			listener.config_mut().max_frame_length(usize::MAX);
			let listener_fut = listener
				.filter_map(|r| future::ready(r.ok()))
				.map(BaseChannel::with_defaults)
				.map(|channel| {
					// Clone a new server to share the data in Arc
					let server = server.clone();
					async move {
						channel.execute(server.serve()).await;
					}
				})
				.buffer_unordered(max_connections)
				.for_each(|_| async {});

			debug!("{}: listening", node);

			tokio::select! {
				_ = listener_fut => {
					warn!("{}: listener terminated", node);
				},
				_ = shutdown.changed() => {
					debug!("{}: listener stopped gracefully", node);
				}
			};
		}))
	}

	async fn connect(&self, addr: &str) -> DhtResult<NodeServiceClient> {
		match timeout(Duration::from_millis(self.connect_timeout), setup_client(addr)).await {
			Ok(c) => c,
			Err(_) => Err(DhtError::NetworkFault(format!("connecting to {} timed out", addr)))
		}
	}
}
