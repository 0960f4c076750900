use crate::core::{
	ring::Digest,
	Node,
	error::RemoteFault
};

#[tarpc::service]
pub trait NodeService {
	// Get fields at this node
	async fn get_key_rpc() -> Digest;
	async fn get_address_rpc() -> String;
	async fn get_predecessor_rpc() -> Option<Node>;
	async fn get_successor_rpc() -> Result<Node, RemoteFault>;
	async fn get_successor_list_rpc() -> Vec<Node>;
	async fn get_finger_list_rpc() -> Vec<Option<Node>>;

	// Core functions for Chord
	async fn notify_rpc(node: Node);
	async fn join_rpc(node: Node) -> Result<(), RemoteFault>;
	async fn lookup_rpc(id: Digest) -> Result<Node, RemoteFault>;
	async fn next_hop_rpc(id: Digest) -> Result<(bool, Node), RemoteFault>;
	async fn ping_rpc();
	async fn notify_failure_rpc(node: Node);

	// Toggle parts of the maintenance loop
	async fn enable_stabilization_rpc(enabled: bool);
	async fn enable_predecessor_maintenance_rpc(enabled: bool);
	async fn enable_peer_state_maintenance_rpc(enabled: bool);
}
