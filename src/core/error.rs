use thiserror::Error;
use serde::{Serialize, Deserialize};
use std::result::Result;
use super::{
	ring::Digest,
	node::NodeState
};

#[derive(Error, Debug)]
pub enum DhtError {
	#[error("Network fault: {0}")]
	NetworkFault(String),
	#[error("No preceding node for key digest {0}")]
	NoPrecedingNode(Digest),
	#[error("No reachable node in successor list")]
	NoReachableNode,
	#[error("Node is not part of a ring ({0:?})")]
	NotInRing(NodeState),
	#[error("Failed to join {addr}: {message}")]
	JoinFailure {
		addr: String,
		message: String
	},
	#[error("Failed to bind {addr}: {message}")]
	BindFailure {
		addr: String,
		message: String
	},
	#[error("Task failure")]
	TaskFailure(#[from] tokio::task::JoinError)
}

pub type DhtResult<T> = Result<T, DhtError>;

/// The only error that crosses the rpc boundary
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[error("{0}")]
pub struct RemoteFault(pub String);

impl From<tarpc::client::RpcError> for DhtError {
	fn from(e: tarpc::client::RpcError) -> Self {
		DhtError::NetworkFault(e.to_string())
	}
}

impl From<RemoteFault> for DhtError {
	fn from(e: RemoteFault) -> Self {
		DhtError::NetworkFault(e.0)
	}
}

impl From<DhtError> for RemoteFault {
	fn from(e: DhtError) -> Self {
		RemoteFault(e.to_string())
	}
}
