use super::{
	ring::*,
	node::Node,
	error::*
};

/// Geometrically spaced routing shortcuts.
///
/// Entry `i` targets `local + KEY_SPACE / ratio^(F - i)`, so the last entry
/// points half way around the ring (for ratio 2) and the first one right
/// after the local node.
#[derive(Debug, Clone)]
pub struct FingerTable {
	local: Digest,
	targets: Vec<Digest>,
	fingers: Vec<Option<Node>>,
	// next entry refreshed by fix_next_finger
	cursor: usize
}

/// F = floor(log_ratio(max_ring_size))
fn finger_count(ratio: u64, max_ring_size: u128) -> usize {
	let ratio = ratio as u128;
	let size = max_ring_size.min(KEY_SPACE);
	let mut count = 0;
	let mut power: u128 = 1;
	while let Some(next) = power.checked_mul(ratio) {
		if next > size {
			break;
		}
		power = next;
		count += 1;
	}
	count
}

impl FingerTable {
	pub fn new(local: Digest, ratio: u64, max_ring_size: u128) -> Self {
		let count = finger_count(ratio, max_ring_size);
		let targets = (0..count)
			.map(|i| {
				// ratio^(F-i) <= max_ring_size <= KEY_SPACE, so it fits and offset >= 1
				let divisor = (ratio as u128).pow((count - i) as u32);
				local.wrapping_add((KEY_SPACE / divisor) as Digest)
			})
			.collect();

		FingerTable {
			local,
			targets,
			fingers: vec![None; count],
			cursor: count.saturating_sub(1)
		}
	}

	pub fn len(&self) -> usize {
		self.fingers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fingers.is_empty()
	}

	pub fn target(&self, index: usize) -> Digest {
		self.targets[index]
	}

	pub fn get_fingers(&self) -> Vec<Option<Node>> {
		self.fingers.clone()
	}

	/// Farthest finger that lies strictly between the local node and id
	pub fn closest_preceding_node(&self, id: Digest) -> DhtResult<Node> {
		for finger in self.fingers.iter().rev().flatten() {
			if finger.id != self.local
				&& finger.id != id
				&& closer_in_ring(finger.id, self.local, id) {
				return Ok(finger.clone());
			}
		}
		Err(DhtError::NoPrecedingNode(id))
	}

	/// Index to refresh next; walks from the farthest entry down to 0 and wraps
	pub fn advance_cursor(&mut self) -> usize {
		let index = self.cursor;
		self.cursor = if index == 0 {
			self.len().saturating_sub(1)
		} else {
			index - 1
		};
		index
	}

	/// Returns whether the key stored at index changed
	pub fn set_finger(&mut self, index: usize, finger: Option<Node>) -> bool {
		let old = self.fingers[index].as_ref().map(|n| n.id);
		let changed = old != finger.as_ref().map(|n| n.id);
		self.fingers[index] = finger;
		changed
	}

	/// Clear every entry pointing at a failed node.
	/// Returns the cleared indices.
	pub fn finger_failure(&mut self, id: Digest) -> Vec<usize> {
		let mut cleared = Vec::new();
		for (i, slot) in self.fingers.iter_mut().enumerate() {
			if slot.as_ref().map_or(false, |n| n.id == id) {
				*slot = None;
				cleared.push(i);
			}
		}
		cleared
	}
}
