use std::{
	hash::{Hash, Hasher},
	sync::{
		Arc, RwLock,
		atomic::{AtomicBool, Ordering}
	},
	time::{Duration, SystemTime}
};
use tarpc::context;
use serde::{Serialize, Deserialize};
use futures::future;
use log::{info, warn, debug, error};
use tokio::{
	sync::{mpsc, watch},
	task::JoinHandle
};
use super::{
	ring::*,
	config::*,
	finger_table::FingerTable,
	successor_list::SuccessorList,
	connection::ConnectionPool,
	event::NodeEvent,
	error::{
		*,
		DhtError::*
	}
};
use crate::{
	rpc::*,
	server::ServerManager,
	transport::Transport
};

/// Handle of a node on the ring: its key and where to reach it.
///
/// Handles compare and hash by key only; the address is only used to
/// (re)connect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
	pub id: Digest,
	pub addr: String
}

impl Node {
	pub fn new(id: Digest, addr: impl Into<String>) -> Self {
		Node {
			id,
			addr: addr.into()
		}
	}
}

impl PartialEq for Node {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for Node {}

impl Hash for Node {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl std::fmt::Display for Node {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Node({}, {})", self.id, self.addr)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
	/// constructed, not in a ring yet
	Forming,
	Active,
	ShuttingDown,
	Terminated
}

struct MaintenanceFlags {
	stabilization: AtomicBool,
	predecessor: AtomicBool,
	peer_state: AtomicBool
}

impl Default for MaintenanceFlags {
	fn default() -> Self {
		MaintenanceFlags {
			stabilization: AtomicBool::new(true),
			predecessor: AtomicBool::new(true),
			peer_state: AtomicBool::new(true)
		}
	}
}

enum JoinTarget {
	Node(Node),
	// key not known yet
	Address(String)
}

impl JoinTarget {
	fn addr(&self) -> &str {
		match self {
			JoinTarget::Node(n) => &n.addr,
			JoinTarget::Address(addr) => addr
		}
	}
}

impl std::fmt::Display for JoinTarget {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			JoinTarget::Node(n) => write!(f, "{}", n),
			JoinTarget::Address(addr) => write!(f, "{}", addr)
		}
	}
}

#[derive(Clone)]
pub struct NodeServer {
	node: Node,
	config: Config,
	state: Arc<RwLock<NodeState>>,
	predecessor: Arc<RwLock<Option<Node>>>,
	// None until the node creates or joins a ring
	successor: Arc<RwLock<Option<Node>>>,
	// Maintain k successors for recovery
	successor_list: Arc<RwLock<SuccessorList>>,
	finger_table: Arc<RwLock<FingerTable>>,
	// connection to remote nodes
	connections: ConnectionPool,
	maintenance: Arc<MaintenanceFlags>,
	// channel used to shutdown (true means shutdown)
	shutdown: Arc<watch::Sender<bool>>,
	shutdown_rx: watch::Receiver<bool>,
	events: Option<mpsc::Sender<NodeEvent>>
}

impl NodeServer {
	pub fn new(node: Node, config: Config, transport: Arc<dyn Transport>) -> Self {
		assert!(config.finger_ratio >= 2, "finger_ratio less than 2");
		assert!(config.max_ring_size >= config.finger_ratio as u128, "max_ring_size less than finger_ratio");
		assert!(config.successor_list_size != 0, "successor_list_size equal to 0");

		let finger_table = FingerTable::new(node.id, config.finger_ratio, config.max_ring_size);
		let successor_list = SuccessorList::new(node.id, config.successor_list_size);
		let connections = ConnectionPool::new(transport, config.rpc_timeout);
		let (tx, rx) = watch::channel(false);

		NodeServer {
			node,
			config,
			state: Arc::new(RwLock::new(NodeState::Forming)),
			predecessor: Arc::new(RwLock::new(None)),
			successor: Arc::new(RwLock::new(None)),
			successor_list: Arc::new(RwLock::new(successor_list)),
			finger_table: Arc::new(RwLock::new(finger_table)),
			connections,
			maintenance: Arc::new(MaintenanceFlags::default()),
			shutdown: Arc::new(tx),
			shutdown_rx: rx,
			events: None
		}
	}

	/// Report routing state changes to tx.
	/// Events are dropped when the queue is full.
	pub fn with_events(mut self, tx: mpsc::Sender<NodeEvent>) -> Self {
		self.events = Some(tx);
		self
	}

	pub fn node(&self) -> &Node {
		&self.node
	}

	pub fn state(&self) -> NodeState {
		*self.state.read().unwrap()
	}

	pub(crate) fn set_state(&self, state: NodeState) {
		*self.state.write().unwrap() = state;
	}

	pub fn get_successor(&self) -> Option<Node> {
		self.successor.read().unwrap().clone()
	}

	pub fn get_successor_list(&self) -> Vec<Node> {
		self.successor_list.read().unwrap().entries().to_vec()
	}

	pub fn get_predecessor(&self) -> Option<Node> {
		self.predecessor.read().unwrap().clone()
	}

	pub fn get_fingers(&self) -> Vec<Option<Node>> {
		self.finger_table.read().unwrap().get_fingers()
	}

	pub fn finger_table_len(&self) -> usize {
		self.finger_table.read().unwrap().len()
	}

	pub fn enable_stabilization(&self, enabled: bool) {
		self.maintenance.stabilization.store(enabled, Ordering::Relaxed);
	}

	pub fn enable_predecessor_maintenance(&self, enabled: bool) {
		self.maintenance.predecessor.store(enabled, Ordering::Relaxed);
	}

	pub fn enable_peer_state_maintenance(&self, enabled: bool) {
		self.maintenance.peer_state.store(enabled, Ordering::Relaxed);
	}

	fn emit(&self, event: NodeEvent) {
		if let Some(tx) = self.events.as_ref() {
			if tx.try_send(event).is_err() {
				debug!("{}: event queue full or closed, event dropped", self.node);
			}
		}
	}

	fn set_predecessor(&self, node: Option<Node>) {
		let changed = {
			let mut pred = self.predecessor.write().unwrap();
			let changed = *pred != node;
			*pred = node.clone();
			changed
		};
		if changed {
			debug!("{}: predecessor set to {:?}", self.node, node.as_ref().map(|n| n.id));
			self.emit(NodeEvent::PredecessorChanged(node));
		}
	}

	fn set_successor(&self, node: Node) {
		let changed = {
			let mut succ = self.successor.write().unwrap();
			let changed = succ.as_ref() != Some(&node);
			*succ = Some(node.clone());
			changed
		};
		if changed {
			debug!("{}: successor set to {}", self.node, node);
			self.emit(NodeEvent::SuccessorChanged(node));
		}
	}

	fn refresh_successor_list(&self, succ: &Node, successors_of_successor: &[Node]) {
		let list = {
			let mut list = self.successor_list.write().unwrap();
			if !list.refresh_list(succ, successors_of_successor) {
				return;
			}
			list.entries().to_vec()
		};
		self.emit(NodeEvent::SuccessorListChanged(list));
	}

	fn context_with(&self, timeout: u64) -> context::Context {
		let mut ctx = context::current();
		ctx.deadline = SystemTime::now() + Duration::from_millis(timeout);
		ctx
	}

	fn rpc_context(&self) -> context::Context {
		self.context_with(self.config.rpc_timeout)
	}

	fn lookup_context(&self) -> context::Context {
		self.context_with(self.config.lookup_timeout)
	}

	/// Successor of an Active node
	fn active_successor(&self) -> DhtResult<Node> {
		let state = self.state();
		if state != NodeState::Active {
			return Err(NotInRing(state));
		}
		self.get_successor().ok_or(NotInRing(state))
	}

	/// Start the server
	/// Returns once the node is part of a ring
	pub async fn start(&self, join_node: Option<Node>) -> DhtResult<ServerManager> {
		self.start_with(join_node.map(JoinTarget::Node)).await
	}

	/// Start the server and join the node listening at addr,
	/// whose key is learned once the local address is bound
	pub async fn start_joining(&self, addr: &str) -> DhtResult<ServerManager> {
		self.start_with(Some(JoinTarget::Address(addr.to_string()))).await
	}

	async fn start_with(&self, target: Option<JoinTarget>) -> DhtResult<ServerManager> {
		// Listen locally first
		let listener_handle = self.listen_with_retry().await?;

		// Join node after server starts
		match target.as_ref() {
			Some(t) => {
				if let Err(e) = self.join_with_retry(t).await {
					error!("{}: fail to join {}: {}", self.node, t, e);
					self.shut_down();
					listener_handle.await?;
					self.set_state(NodeState::Terminated);
					return Err(JoinFailure {
						addr: t.addr().to_string(),
						message: e.to_string()
					});
				}
			},
			None => self.create_ring()
		};

		// Periodically maintain the ring
		let server = self.clone();
		let mut maintenance_rx = self.shutdown_rx.clone();
		let maintenance_interval = self.config.maintenance_interval;
		let maintenance_handle = tokio::spawn(async move {
			if maintenance_interval == 0 {
				return;
			}
			let mut interval = tokio::time::interval(
				Duration::from_millis(maintenance_interval)
			);
			loop {
				tokio::select! {
					_ = interval.tick() => server.maintain().await,
					_ = maintenance_rx.changed() => {
						debug!("{}: maintenance task stopped gracefully", server.node);
						break;
					}
				};
			}
		});

		info!("{}: listening at {}", self.node, self.node.addr);
		// An aggregated handle for all tasks
		Ok(ServerManager {
			server: self.clone(),
			handle: future::join_all(vec![
				listener_handle,
				maintenance_handle
			])
		})
	}

	async fn listen_with_retry(&self) -> DhtResult<JoinHandle<()>> {
		let transport = self.connections.transport();
		let mut retry = 0;
		loop {
			match transport.listen(self.clone(), self.shutdown_rx.clone()).await {
				Ok(handle) => return Ok(handle),
				Err(e) if retry < self.config.retry_limit => {
					warn!("{}: fail to listen (retry {}): {}", self.node, retry, e);
					retry += 1;
					tokio::time::sleep(Duration::from_millis(self.config.retry_interval)).await;
				},
				Err(e) => {
					error!("{}: fail to listen: {}", self.node, e);
					return Err(e);
				}
			};
		}
	}

	async fn join_with_retry(&self, target: &JoinTarget) -> DhtResult<()> {
		let mut retry = 0;
		loop {
			let result = match target {
				JoinTarget::Node(n) => self.join(n).await,
				JoinTarget::Address(addr) => match self.connections.resolve(addr).await {
					Ok(n) => self.join(&n).await,
					Err(e) => Err(e)
				}
			};
			match result {
				Ok(_) => return Ok(()),
				Err(e) if retry < self.config.retry_limit => {
					warn!("{}: fail to join {} (retry {}): {}", self.node, target, retry, e);
					retry += 1;
					tokio::time::sleep(Duration::from_millis(self.config.retry_interval)).await;
				},
				Err(e) => return Err(e)
			};
		}
	}

	/// Stop maintenance and serving. Irreversible.
	pub fn shut_down(&self) {
		{
			let mut state = self.state.write().unwrap();
			if matches!(*state, NodeState::ShuttingDown | NodeState::Terminated) {
				return;
			}
			*state = NodeState::ShuttingDown;
		}
		// the node holds a receiver itself so sending cannot fail
		let _ = self.shutdown.send(true);
		self.connections.clear();
		info!("{}: shutting down", self.node);
	}

	// Figure 6: n.create
	pub fn create_ring(&self) {
		self.set_predecessor(None);
		self.set_successor(self.node.clone());
		self.set_state(NodeState::Active);
		info!("{}: created a new ring", self.node);
	}

	// Figure 6: n.join
	pub async fn join(&self, node: &Node) -> DhtResult<()> {
		debug!("{}: joining {}", self.node, node);
		let result: DhtResult<Node> = async {
			let n = self.connections.get(node).await?;
			let succ = n.lookup_rpc(self.lookup_context(), self.node.id).await??;
			if succ.id != self.node.id {
				return Ok(succ);
			}
			// Already reachable through node: keep our position on its ring
			Ok(n.lookup_rpc(self.lookup_context(), self.node.id.wrapping_add(1)).await??)
		}.await;

		let succ = match result {
			Ok(succ) => succ,
			Err(e) => {
				self.connections.drop_connection(node);
				return Err(e);
			}
		};

		self.set_predecessor(None);
		if succ.id != self.node.id || self.get_successor().is_none() {
			self.set_successor(succ);
		}
		{
			let mut state = self.state.write().unwrap();
			if *state == NodeState::Forming {
				*state = NodeState::Active;
			}
		}
		info!("{}: joined {}", self.node, node);
		Ok(())
	}

	/// One maintenance round in fixed order
	pub async fn maintain(&self) {
		if self.state() != NodeState::Active {
			return;
		}
		if self.maintenance.predecessor.load(Ordering::Relaxed) {
			self.check_predecessor().await;
		}
		if self.maintenance.stabilization.load(Ordering::Relaxed) {
			if let Err(e) = self.stabilize().await {
				warn!("{}: fail to stabilize: {}", self.node, e);
			}
		}
		if self.maintenance.peer_state.load(Ordering::Relaxed) {
			if let Err(e) = self.fix_next_finger().await {
				warn!("{}: fail to fix finger: {}", self.node, e);
			}
		}
	}

	// Figure 7: n.stabilize
	pub async fn stabilize(&self) -> DhtResult<()> {
		let succ = self.active_successor()?;
		match self.stabilize_with(succ.clone()).await {
			Ok(_) => Ok(()),
			Err(e) => {
				// the successor may have moved to its predecessor before failing
				let failed = self.get_successor().unwrap_or(succ);
				warn!("{}: fail to stabilize with {}: {}", self.node, failed, e);
				let replacement = self.replace_successor(&failed).await?;
				self.stabilize_with(replacement).await
			}
		}
	}

	async fn stabilize_with(&self, mut succ: Node) -> DhtResult<()> {
		let ctx = self.rpc_context();
		let n = self.connections.get(&succ).await?;

		if let Some(x) = n.get_predecessor_rpc(ctx).await? {
			// a successor pointing at ourselves covers the whole ring
			let self_pointing = succ.id == self.node.id;
			if x.id != self.node.id && (self_pointing || in_half_open_segment(x.id, self.node.id, succ.id)) {
				succ = x;
				self.set_successor(succ.clone());
			}
		}

		let n = self.connections.get(&succ).await?;
		n.notify_rpc(ctx, self.node.clone()).await?;
		let succ_list = n.get_successor_list_rpc(ctx).await?;
		self.refresh_successor_list(&succ, &succ_list);
		Ok(())
	}

	/// Switch to the first live entry of the successor list
	async fn replace_successor(&self, failed: &Node) -> DhtResult<Node> {
		self.forget_peer(failed);
		let list = self.successor_list.read().unwrap().clone();
		let replacement = match list
			.find_first_working_node(move |n| async move { self.ping(&n).await.is_ok() })
			.await {
			Ok(n) => n,
			Err(NoReachableNode) => self.last_resort_successor().await,
			Err(e) => return Err(e)
		};
		warn!("{}: successor {} failed, replaced by {}", self.node, failed, replacement);
		self.set_successor(replacement.clone());
		Ok(replacement)
	}

	/// Successor once every entry of the successor list is gone:
	/// a live predecessor, or the node itself as a one-node ring
	async fn last_resort_successor(&self) -> Node {
		if let Some(pred) = self.get_predecessor() {
			if pred.id == self.node.id || self.ping(&pred).await.is_ok() {
				return pred;
			}
			warn!("{}: predecessor {} failed as well", self.node, pred);
			self.set_predecessor(None);
			self.forget_peer(&pred);
		}
		self.node.clone()
	}

	// Figure 7: n.notify
	pub fn notify(&self, node: Node) {
		let adopted = {
			let mut pred = self.predecessor.write().unwrap();
			let adopt = match pred.as_ref() {
				None => true,
				// a predecessor pointing at ourselves covers the whole ring
				Some(p) if p.id == self.node.id => node.id != self.node.id,
				Some(p) => node.id != self.node.id && in_half_open_segment(node.id, p.id, self.node.id)
			};
			if adopt {
				*pred = Some(node.clone());
			}
			adopt
		};

		if adopted {
			debug!("{}: new predecessor set in notify: {}", self.node, node);
			self.emit(NodeEvent::PredecessorChanged(Some(node)));
		}
	}

	// Figure 7: n.check_predecessor
	pub async fn check_predecessor(&self) {
		let pred = match self.get_predecessor() {
			Some(p) if p.id != self.node.id => p,
			_ => return
		};

		if let Err(e) = self.ping(&pred).await {
			warn!("{}: predecessor {} failed: {}", self.node, pred, e);
			{
				let mut p = self.predecessor.write().unwrap();
				// notify may have replaced it meanwhile
				if p.as_ref() != Some(&pred) {
					return;
				}
				*p = None;
			}
			self.emit(NodeEvent::PredecessorChanged(None));
			self.forget_peer(&pred);
		}
	}

	// Figure 7: n.fix_fingers
	/// Refresh one finger per call, returns whether it changed
	pub async fn fix_next_finger(&self) -> DhtResult<bool> {
		let (index, target) = {
			let mut table = self.finger_table.write().unwrap();
			let index = table.advance_cursor();
			(index, table.target(index))
		};

		let (finger, result) = match self.lookup(target).await {
			// the local node is never a useful shortcut
			Ok(n) if n.id == self.node.id => (None, Ok(())),
			Ok(n) => (Some(n), Ok(())),
			Err(e) => (None, Err(e))
		};

		let changed = self.finger_table.write().unwrap().set_finger(index, finger.clone());
		if changed {
			debug!("{}: finger {} set to {:?}", self.node, index, finger.as_ref().map(|n| n.id));
			self.emit(NodeEvent::FingerChanged { index, finger });
		}
		result.map(|_| changed)
	}

	/// Drop everything pointing at a node known to be dead
	fn forget_peer(&self, node: &Node) {
		if node.id == self.node.id {
			return;
		}
		self.connections.drop_connection(node);
		let cleared = self.finger_table.write().unwrap().finger_failure(node.id);
		for index in cleared {
			self.emit(NodeEvent::FingerChanged { index, finger: None });
		}
		let list = {
			let mut list = self.successor_list.write().unwrap();
			if !list.remove(node.id) {
				None
			} else {
				Some(list.entries().to_vec())
			}
		};
		if let Some(list) = list {
			self.emit(NodeEvent::SuccessorListChanged(list));
		}
	}

	/// Hint from a peer that node looks dead
	pub fn notify_failure(&self, node: &Node) {
		if node.id == self.node.id {
			return;
		}
		debug!("{}: failure hint for {}", self.node, node);
		self.connections.drop_connection(node);
		let cleared = self.finger_table.write().unwrap().finger_failure(node.id);
		for index in cleared {
			self.emit(NodeEvent::FingerChanged { index, finger: None });
		}
	}

	async fn ping(&self, node: &Node) -> DhtResult<()> {
		if node.id == self.node.id {
			return Ok(());
		}
		let n = self.connections.get(node).await?;
		n.ping_rpc(self.rpc_context()).await?;
		Ok(())
	}

	/// One routing step: (true, owner) or (false, closer node)
	pub fn next_hop(&self, id: Digest) -> DhtResult<(bool, Node)> {
		let succ = self.active_successor()?;
		if id == self.node.id {
			return Ok((true, self.node.clone()));
		}
		if succ.id == self.node.id || in_half_open_segment(id, self.node.id, succ.id) {
			return Ok((true, succ));
		}

		let closest = self.finger_table.read().unwrap().closest_preceding_node(id);
		match closest {
			Ok(n) => Ok((false, n)),
			Err(NoPrecedingNode(_)) => Ok((false, succ)),
			Err(e) => Err(e)
		}
	}

	async fn next_hop_at(&self, node: &Node, id: Digest) -> DhtResult<(bool, Node)> {
		if node.id == self.node.id {
			return self.next_hop(id);
		}
		let n = self.connections.get(node).await?;
		Ok(n.next_hop_rpc(self.rpc_context(), id).await??)
	}

	// Figure 4: n.find_successor, iteratively
	/// Find the node responsible for id
	pub async fn lookup(&self, id: Digest) -> DhtResult<Node> {
		let mut current = self.node.clone();
		// the node that recommended current
		let mut last_good = self.node.clone();
		let mut failures = 0;

		for _ in 0..self.config.max_lookup_hops {
			match self.next_hop_at(&current, id).await {
				Ok((true, owner)) => {
					debug!("{}: lookup({}) returns {}", self.node, id, owner);
					return Ok(owner);
				},
				Ok((false, next)) => {
					last_good = std::mem::replace(&mut current, next);
				},
				Err(e) => {
					if current.id == self.node.id || failures >= self.config.retry_limit {
						return Err(e);
					}
					failures += 1;
					warn!("{}: lookup({}) failed at {} (retry {}): {}", self.node, id, current, failures, e);
					self.forget_peer(&current);
					if self.get_successor().as_ref() == Some(&current) {
						if let Err(e) = self.replace_successor(&current).await {
							warn!("{}: no successor to fall back to: {}", self.node, e);
						}
					}

					let failed = std::mem::replace(&mut current, last_good.clone());
					if last_good.id != self.node.id {
						match self.route_around(&last_good, &failed, id).await {
							Some((true, owner)) => return Ok(owner),
							Some((false, next)) => current = next,
							None => {
								// restart from ourselves
								current = self.node.clone();
								last_good = self.node.clone();
							}
						};
					}
				}
			};
		}

		Err(NetworkFault(format!("lookup({}) exceeded {} hops", id, self.config.max_lookup_hops)))
	}

	/// Continue a lookup whose hop recommended by `from` is dead,
	/// using the successor list of `from` to step over it
	async fn route_around(&self, from: &Node, failed: &Node, id: Digest) -> Option<(bool, Node)> {
		let n = self.connections.get(from).await.ok()?;
		// from drops the dead node from its fingers
		n.notify_failure_rpc(self.rpc_context(), failed.clone()).await.ok()?;
		let succ_list = n.get_successor_list_rpc(self.rpc_context()).await.ok()?;

		let pos = match succ_list.iter().position(|n| n == failed) {
			Some(pos) => pos,
			// a dead finger: ask from again
			None => return Some((false, from.clone()))
		};
		for next in succ_list[pos + 1..].iter() {
			if self.ping(next).await.is_ok() {
				// everything between from and next is dead
				return Some((in_half_open_segment(id, from.id, next.id), next.clone()));
			}
		}
		None
	}
}

#[tarpc::server]
impl NodeService for NodeServer {
	async fn get_key_rpc(self, _: context::Context) -> Digest {
		self.node.id
	}

	async fn get_address_rpc(self, _: context::Context) -> String {
		self.node.addr.clone()
	}

	async fn get_predecessor_rpc(self, _: context::Context) -> Option<Node> {
		self.get_predecessor()
	}

	async fn get_successor_rpc(self, _: context::Context) -> Result<Node, RemoteFault> {
		Ok(self.active_successor()?)
	}

	async fn get_successor_list_rpc(self, _: context::Context) -> Vec<Node> {
		self.get_successor_list()
	}

	async fn get_finger_list_rpc(self, _: context::Context) -> Vec<Option<Node>> {
		self.get_fingers()
	}

	async fn notify_rpc(self, _: context::Context, node: Node) {
		self.notify(node)
	}

	async fn join_rpc(self, _: context::Context, node: Node) -> Result<(), RemoteFault> {
		Ok(self.join(&node).await?)
	}

	async fn lookup_rpc(self, _: context::Context, id: Digest) -> Result<Node, RemoteFault> {
		Ok(self.lookup(id).await?)
	}

	async fn next_hop_rpc(self, _: context::Context, id: Digest) -> Result<(bool, Node), RemoteFault> {
		Ok(self.next_hop(id)?)
	}

	async fn ping_rpc(self, _: context::Context) {}

	async fn notify_failure_rpc(self, _: context::Context, node: Node) {
		self.notify_failure(&node)
	}

	async fn enable_stabilization_rpc(self, _: context::Context, enabled: bool) {
		self.enable_stabilization(enabled)
	}

	async fn enable_predecessor_maintenance_rpc(self, _: context::Context, enabled: bool) {
		self.enable_predecessor_maintenance(enabled)
	}

	async fn enable_peer_state_maintenance_rpc(self, _: context::Context, enabled: bool) {
		self.enable_peer_state_maintenance(enabled)
	}
}
