use crate::core::{error::*, NodeServer, NodeState};
use futures::future;

/// Handle of a running node.
///
/// Holds the listener and maintenance tasks; `stop` shuts the node down
/// and waits for both to finish.
pub struct ServerManager {
	pub server: NodeServer,
	pub handle: future::JoinAll<tokio::task::JoinHandle<()>>
}

impl ServerManager {
	/// Wait for the server to terminate
	pub async fn wait(self) -> DhtResult<()> {
		self.handle.await
			.into_iter()
			.collect::<Result<Vec<_>, tokio::task::JoinError>>()?;

		self.server.set_state(NodeState::Terminated);
		Ok(())
	}

	/// Stop the server gracefully
	pub async fn stop(self) -> DhtResult<()> {
		self.server.shut_down();
		self.wait().await
	}
}
