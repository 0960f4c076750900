//! Cluster-level ring observation and partition healing.
//!
//! The monitor never owns ring membership: it is handed a [`Roster`] of
//! nodes believed to be running and only observes them through the rpc
//! surface, issuing `join` when it finds ring fragments.

use std::{
	collections::HashSet,
	sync::{Arc, RwLock},
	time::{Duration, SystemTime}
};
use futures::{stream, StreamExt};
use log::{info, warn, debug};
use tarpc::context;
use tokio::sync::watch;
use crate::{
	core::{
		Node,
		ring::Digest,
		connection::ConnectionPool,
		error::*
	},
	transport::Transport
};

#[derive(Clone, Debug)]
pub struct MonitorConfig {
	/// deadline in ms of a single pointer read
	pub rpc_timeout: u64,
	/// deadline in ms of a join call, which routes through the ring
	pub join_timeout: u64,
	/// max number of nodes checked at once
	pub max_concurrency: usize,
	/// interval in ms between scans of a spawned monitor
	pub scan_interval: u64
}

impl Default for MonitorConfig {
	fn default() -> Self {
		Self {
			rpc_timeout: 1000,
			join_timeout: 10000,
			max_concurrency: 16,
			scan_interval: 1000
		}
	}
}

/// Nodes reported running, in insertion order.
/// The first one is the merge target of a scan.
#[derive(Clone, Default)]
pub struct Roster {
	nodes: Arc<RwLock<Vec<Node>>>
}

impl Roster {
	pub fn new(nodes: Vec<Node>) -> Self {
		Roster {
			nodes: Arc::new(RwLock::new(nodes))
		}
	}

	pub fn add(&self, node: Node) {
		let mut nodes = self.nodes.write().unwrap();
		if !nodes.contains(&node) {
			nodes.push(node);
		}
	}

	pub fn remove(&self, id: Digest) {
		self.nodes.write().unwrap().retain(|n| n.id != id);
	}

	pub fn running(&self) -> Vec<Node> {
		self.nodes.read().unwrap().clone()
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
	/// Some running node does not see a closed ring; nothing was done
	Deferred {
		open: Vec<Node>
	},
	/// Every node already sees the whole ring
	Converged,
	Merged {
		target: Node,
		joined: Vec<Node>,
		failed: Vec<Node>
	}
}

#[derive(Clone)]
pub struct RingMonitor {
	connections: ConnectionPool,
	config: MonitorConfig
}

impl RingMonitor {
	pub fn new(transport: Arc<dyn Transport>, config: MonitorConfig) -> Self {
		RingMonitor {
			connections: ConnectionPool::new(transport, config.rpc_timeout),
			config
		}
	}

	fn context_with(&self, timeout: u64) -> context::Context {
		let mut ctx = context::current();
		ctx.deadline = SystemTime::now() + Duration::from_millis(timeout);
		ctx
	}

	async fn neighbour(&self, node: &Node, forwards: bool) -> DhtResult<Option<Node>> {
		let result: DhtResult<Option<Node>> = async {
			let n = self.connections.get(node).await?;
			let ctx = self.context_with(self.config.rpc_timeout);
			if forwards {
				Ok(Some(n.get_successor_rpc(ctx).await??))
			} else {
				Ok(n.get_predecessor_rpc(ctx).await?)
			}
		}.await;

		if result.is_err() {
			self.connections.drop_connection(node);
		}
		result
	}

	/// Hops needed to get back to start following successors (or
	/// predecessors). 0 if the walk breaks or loops without start.
	pub async fn cycle_length_from(&self, start: &Node, forwards: bool) -> usize {
		let mut visited = HashSet::new();
		let mut current = start.clone();
		let mut hops = 0;

		loop {
			let next = match self.neighbour(&current, forwards).await {
				Ok(Some(n)) => n,
				Ok(None) => {
					debug!("cycle from {}: {} has no neighbour", start, current);
					return 0;
				},
				Err(e) => {
					debug!("cycle from {}: fail to reach {}: {}", start, current, e);
					return 0;
				}
			};
			hops += 1;
			if next == *start {
				return hops;
			}
			if !visited.insert(next.id) {
				debug!("cycle from {}: loop at {} without start", start, next);
				return 0;
			}
			current = next;
		}
	}

	/// One partition scan over the running nodes
	pub async fn scan(&self, roster: &Roster) -> ScanOutcome {
		let lengths: Vec<(Node, usize)> = stream::iter(roster.running())
			.map(|n| async move {
				let len = self.cycle_length_from(&n, true).await;
				(n, len)
			})
			.buffered(self.config.max_concurrency)
			.collect()
			.await;

		let open: Vec<Node> = lengths.iter()
			.filter(|(_, len)| *len == 0)
			.map(|(n, _)| n.clone())
			.collect();
		if !open.is_empty() {
			info!("ring not closed at {} node(s), deferring partition scan", open.len());
			return ScanOutcome::Deferred { open };
		}

		let total = lengths.len();
		let target = match lengths.first() {
			Some((n, _)) if total > 1 => n.clone(),
			_ => return ScanOutcome::Converged
		};
		let fragments: Vec<Node> = lengths[1..].iter()
			.filter(|(_, len)| *len < total)
			.map(|(n, _)| n.clone())
			.collect();
		if fragments.is_empty() {
			return ScanOutcome::Converged;
		}

		info!("merging {} node(s) into the ring of {}", fragments.len(), target);
		let results: Vec<(Node, DhtResult<()>)> = stream::iter(fragments)
			.map(|n| {
				let target = target.clone();
				async move {
					let res = self.join(&n, &target).await;
					(n, res)
				}
			})
			.buffer_unordered(self.config.max_concurrency)
			.collect()
			.await;

		let mut joined = Vec::new();
		let mut failed = Vec::new();
		for (n, res) in results {
			match res {
				Ok(_) => joined.push(n),
				Err(e) => {
					warn!("fail to join {} to {}: {}", n, target, e);
					failed.push(n);
				}
			}
		}
		ScanOutcome::Merged { target, joined, failed }
	}

	async fn join(&self, node: &Node, target: &Node) -> DhtResult<()> {
		let n = self.connections.get(node).await?;
		let ctx = self.context_with(self.config.join_timeout);
		match n.join_rpc(ctx, target.clone()).await {
			Ok(res) => Ok(res?),
			Err(e) => {
				self.connections.drop_connection(node);
				Err(e.into())
			}
		}
	}

	/// Scan periodically until the handle is stopped
	pub fn spawn(self, roster: Roster) -> MonitorHandle {
		let (tx, mut rx) = watch::channel(false);
		let interval_ms = self.config.scan_interval.max(1);
		let handle = tokio::spawn(async move {
			let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
			loop {
				tokio::select! {
					_ = interval.tick() => {
						let outcome = self.scan(&roster).await;
						debug!("partition scan: {:?}", outcome);
					},
					_ = rx.changed() => {
						debug!("monitor stopped gracefully");
						break;
					}
				};
			}
		});

		MonitorHandle { handle, tx }
	}
}

pub struct MonitorHandle {
	handle: tokio::task::JoinHandle<()>,
	tx: watch::Sender<bool>
}

impl MonitorHandle {
	pub async fn stop(self) -> DhtResult<()> {
		// the task may have exited already
		let _ = self.tx.send(true);
		self.handle.await?;
		Ok(())
	}
}
