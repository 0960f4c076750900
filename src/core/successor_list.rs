use std::future::Future;
use super::{
	ring::Digest,
	node::Node,
	error::*
};

/// The next few nodes after the owner, used to recover from a failed successor.
/// Entry 0 is the immediate successor.
#[derive(Debug, Clone)]
pub struct SuccessorList {
	owner: Digest,
	capacity: usize,
	entries: Vec<Node>
}

impl SuccessorList {
	pub fn new(owner: Digest, capacity: usize) -> Self {
		SuccessorList {
			owner,
			capacity,
			entries: Vec::with_capacity(capacity)
		}
	}

	pub fn entries(&self) -> &[Node] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Rebuild the list as the successor followed by its own successors.
	/// Stops at the owner so the list never wraps past the whole ring.
	/// Returns whether the list changed.
	pub fn refresh_list(&mut self, successor: &Node, successors_of_successor: &[Node]) -> bool {
		let mut list = Vec::with_capacity(self.capacity);
		if successor.id != self.owner && self.capacity > 0 {
			list.push(successor.clone());
			for n in successors_of_successor {
				if list.len() >= self.capacity || n.id == self.owner {
					break;
				}
				list.push(n.clone());
			}
		}

		if list == self.entries {
			return false;
		}
		self.entries = list;
		true
	}

	/// Drop a failed node from the list
	pub fn remove(&mut self, id: Digest) -> bool {
		let len = self.entries.len();
		self.entries.retain(|n| n.id != id);
		len != self.entries.len()
	}

	/// Probe entries in order and return the first live one
	pub async fn find_first_working_node<F, Fut>(&self, mut probe: F) -> DhtResult<Node>
	where
		F: FnMut(Node) -> Fut,
		Fut: Future<Output = bool>
	{
		for n in self.entries.iter() {
			if probe(n.clone()).await {
				return Ok(n.clone());
			}
		}
		Err(DhtError::NoReachableNode)
	}
}
