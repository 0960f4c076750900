use std::{
	collections::HashMap,
	sync::{Arc, RwLock}
};
use async_trait::async_trait;
use log::debug;
use tarpc::server::{BaseChannel, Channel};
use tokio::{sync::watch, task::JoinHandle};
use super::Transport;
use crate::{
	core::{NodeServer, error::*},
	rpc::{NodeService, NodeServiceClient}
};

struct Endpoint {
	server: NodeServer,
	shutdown: watch::Receiver<bool>
}

/// In-process network: addresses map to running servers and every
/// connection is a tarpc channel pair.
///
/// A node that shuts down is removed from the registry and all channels
/// to it are closed, which peers observe exactly like a crashed host.
#[derive(Clone, Default)]
pub struct MemoryNetwork {
	endpoints: Arc<RwLock<HashMap<String, Endpoint>>>
}

impl MemoryNetwork {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_reachable(&self, addr: &str) -> bool {
		self.endpoints.read().unwrap().contains_key(addr)
	}
}

#[async_trait]
impl Transport for MemoryNetwork {
	async fn listen(&self, server: NodeServer, mut shutdown: watch::Receiver<bool>) -> DhtResult<JoinHandle<()>> {
		let addr = server.node().addr.clone();
		{
			let mut endpoints = self.endpoints.write().unwrap();
			if endpoints.contains_key(&addr) {
				return Err(DhtError::BindFailure {
					addr,
					message: "address already in use".to_string()
				});
			}
			endpoints.insert(addr.clone(), Endpoint {
				server,
				shutdown: shutdown.clone()
			});
		}

		let endpoints = self.endpoints.clone();
		Ok(tokio::spawn(async move {
			// sender dropped counts as shutdown as well
			let _ = shutdown.changed().await;
			endpoints.write().unwrap().remove(&addr);
			debug!("{}: removed from memory network", addr);
		}))
	}

	async fn connect(&self, addr: &str) -> DhtResult<NodeServiceClient> {
		let (server, mut shutdown) = {
			let endpoints = self.endpoints.read().unwrap();
			match endpoints.get(addr) {
				Some(e) if !*e.shutdown.borrow() => (e.server.clone(), e.shutdown.clone()),
				_ => return Err(DhtError::NetworkFault(format!("{} is unreachable", addr)))
			}
		};

		let (client_transport, server_transport) = tarpc::transport::channel::unbounded();
		let channel = BaseChannel::with_defaults(server_transport);
		tokio::spawn(async move {
			tokio::select! {
				_ = channel.execute(server.serve()) => (),
				_ = shutdown.changed() => ()
			};
		});

		Ok(NodeServiceClient::new(tarpc::client::Config::default(), client_transport).spawn())
	}
}
