use crate::{
	core::error::*,
	rpc::NodeServiceClient
};

use tarpc::tokio_serde::formats::Bincode;

pub async fn setup_client(addr: &str) -> DhtResult<NodeServiceClient> {
	let transport = tarpc::serde_transport::tcp::connect(addr, Bincode::default)
		.await
		.map_err(|e| DhtError::NetworkFault(format!("fail to connect to {}: {}", addr, e)))?;
	Ok(NodeServiceClient::new(tarpc::client::Config::default(), transport).spawn())
}
