use std::mem::size_of;

pub type Digest = u64;
// number of bits
pub const NUM_BITS: usize = size_of::<Digest>() * 8;
// number of keys on the ring (2^NUM_BITS)
pub const KEY_SPACE: u128 = 1 << NUM_BITS;

/// Clockwise distance from a to b
pub fn distance(a: Digest, b: Digest) -> Digest {
	b.wrapping_sub(a)
}

/// Whether a is strictly closer to reference than b going clockwise.
/// Ties keep b.
pub fn closer_in_ring(a: Digest, b: Digest, reference: Digest) -> bool {
	distance(a, reference) < distance(b, reference)
}

// Half-open segment: id in (start, end]
// start == end is a segment only containing end
pub fn in_half_open_segment(id: Digest, start: Digest, end: Digest) -> bool {
	if start < end {
		// (start, id, end]
		id > start && id <= end
	}
	else if start > end {
		// wraps around 0
		id > start || id <= end
	}
	else {
		id == end
	}
}
