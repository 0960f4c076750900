use chord_ring::core::{
	ring::{distance, Digest},
	NodeEvent
};
use rand::prelude::*;
use tokio::sync::mpsc;

mod common;
use common::*;

fn random_keys(seed: u64, n: usize) -> Vec<Digest> {
	let mut rng = StdRng::seed_from_u64(seed);
	let mut keys = Vec::new();
	while keys.len() < n {
		let k = rng.gen::<u64>();
		if !keys.contains(&k) {
			keys.push(k);
		}
	}
	keys
}

#[tokio::test]
async fn test_single_node() -> anyhow::Result<()> {
	init_logger();
	let mut ring = TestRing::new(manual_config());
	let s = ring.add(42, None).await?;

	assert_eq!(s.get_successor().unwrap().id, 42);
	assert_eq!(s.get_predecessor(), None);
	assert_eq!(s.lookup(7).await?.id, 42);
	assert_eq!(s.lookup(42).await?.id, 42);
	assert_eq!(s.lookup(43).await?.id, 42);

	ring.stabilize_all(1).await;
	assert_eq!(s.get_predecessor().unwrap().id, 42);
	assert!(s.get_successor_list().is_empty());

	ring.stop_all().await
}

#[tokio::test]
async fn test_two_nodes() -> anyhow::Result<()> {
	init_logger();
	let mut ring = TestRing::new(manual_config());
	let a = ring.add(1000, None).await?;
	let b = ring.add(2000, Some(1000)).await?;
	assert_eq!(b.get_successor().unwrap().id, 1000);
	assert_eq!(b.get_predecessor(), None);

	b.stabilize().await?;
	a.stabilize().await?;

	assert_eq!(a.get_successor().unwrap().id, 2000);
	assert_eq!(b.get_successor().unwrap().id, 1000);
	assert_eq!(a.get_predecessor().unwrap().id, 2000);
	assert_eq!(b.get_predecessor().unwrap().id, 1000);

	// one successor each in a ring of two
	assert_eq!(a.get_successor_list().len(), 1);
	assert_eq!(b.get_successor_list().len(), 1);

	ring.stop_all().await
}

#[tokio::test]
async fn test_ring_closure() -> anyhow::Result<()> {
	init_logger();
	let keys = random_keys(1, 6);
	let ring = TestRing::build(manual_config(), &keys).await?;
	assert_ring(&ring.alive());

	let monitor = ring.monitor();
	for s in ring.alive() {
		assert_eq!(monitor.cycle_length_from(s.node(), true).await, keys.len());
		assert_eq!(monitor.cycle_length_from(s.node(), false).await, keys.len());
	}

	ring.stop_all().await
}

#[tokio::test]
async fn test_successor_list_shape() -> anyhow::Result<()> {
	init_logger();
	// K = 3
	for n in [2, 3, 5] {
		let keys = random_keys(n as u64, n);
		let ring = TestRing::build(manual_config(), &keys).await?;
		for s in ring.alive() {
			let list: Vec<Digest> = s.get_successor_list().iter().map(|n| n.id).collect();
			assert_eq!(list.len(), 3.min(n - 1));
			assert_eq!(list, following(&keys, s.node().id, 3));
		}
		ring.stop_all().await?;
	}
	Ok(())
}

#[tokio::test]
async fn test_routing() -> anyhow::Result<()> {
	init_logger();
	let keys = random_keys(7, 8);
	let ring = TestRing::build(manual_config(), &keys).await?;

	for t in ring.alive() {
		let target = t.node().id;
		let succ = following(&keys, target, 1)[0];
		let pred = keys.iter()
			.copied()
			.find(|k| following(&keys, *k, 1)[0] == target)
			.unwrap();

		for from in ring.alive() {
			let before = from.lookup(target.wrapping_sub(1)).await?.id;
			if pred == target.wrapping_sub(1) {
				assert_eq!(before, pred);
			} else {
				assert_eq!(before, target);
			}
			assert_eq!(from.lookup(target).await?.id, target);
			assert_eq!(from.lookup(target.wrapping_add(1)).await?.id, succ);
		}
	}

	// arbitrary keys
	let mut rng = StdRng::seed_from_u64(0);
	for _ in 0..50 {
		let id = rng.gen::<u64>();
		let from = ring.alive()[rng.gen_range(0..keys.len())];
		assert_eq!(from.lookup(id).await?.id, owner(&keys, id));
	}

	ring.stop_all().await
}

#[tokio::test]
async fn test_finger_monotonicity() -> anyhow::Result<()> {
	init_logger();
	let keys = random_keys(11, 10);
	let ring = TestRing::build(manual_config(), &keys).await?;

	for s in ring.alive() {
		let id = s.node().id;
		let fingers = s.get_fingers();
		assert_eq!(fingers.len(), 8);
		let distances: Vec<u64> = fingers.iter()
			.flatten()
			.map(|f| distance(id, f.id))
			.collect();
		assert!(!distances.is_empty());
		assert!(distances.windows(2).all(|w| w[0] <= w[1]), "fingers of {}: {:?}", id, distances);
		// no finger points at the node itself
		assert!(fingers.iter().flatten().all(|f| f.id != id));
	}

	ring.stop_all().await
}

#[tokio::test]
async fn test_join_idempotent() -> anyhow::Result<()> {
	init_logger();
	let keys = random_keys(3, 5);
	let ring = TestRing::build(manual_config(), &keys).await?;

	let joiner = ring.server(keys[3]);
	let known = ring.server(keys[0]).node().clone();
	joiner.join(&known).await?;
	joiner.join(&known).await?;
	ring.stabilize_all(1).await;

	assert_ring(&ring.alive());
	for s in ring.alive() {
		let list: Vec<Digest> = s.get_successor_list().iter().map(|n| n.id).collect();
		assert_eq!(list, following(&keys, s.node().id, 3));
	}

	ring.stop_all().await
}

type Snapshot = (Digest, Option<Digest>, Vec<Digest>, Vec<Option<Digest>>);

fn snapshot(ring: &TestRing) -> Vec<Snapshot> {
	let mut state: Vec<Snapshot> = ring.alive().iter()
		.map(|s| (
			s.get_successor().unwrap().id,
			s.get_predecessor().map(|n| n.id),
			s.get_successor_list().iter().map(|n| n.id).collect(),
			s.get_fingers().iter().map(|f| f.as_ref().map(|n| n.id)).collect()
		))
		.collect();
	state.sort_unstable();
	state
}

#[tokio::test]
async fn test_fresh_join_twice() -> anyhow::Result<()> {
	init_logger();
	let keys = random_keys(5, 5);
	let (known, newcomer) = (keys[0], keys[4]);

	let mut once = TestRing::build(manual_config(), &keys[..4]).await?;
	let joined_once = once.add(newcomer, Some(known)).await?;

	let mut twice = TestRing::build(manual_config(), &keys[..4]).await?;
	let joined_twice = twice.add(newcomer, Some(known)).await?;
	joined_twice.join(&test_node(known)).await?;

	// nobody knows the newcomer yet, both joins route to the same successor
	let expected = following(&keys, newcomer, 1)[0];
	assert_eq!(joined_once.get_successor().unwrap().id, expected);
	assert_eq!(joined_twice.get_successor().unwrap().id, expected);
	assert_eq!(joined_twice.get_predecessor(), None);

	for ring in [&once, &twice] {
		ring.stabilize_all(keys.len() + 3).await;
		ring.fix_all_fingers().await;
		assert_ring(&ring.alive());
	}
	assert_eq!(snapshot(&once), snapshot(&twice));

	once.stop_all().await?;
	twice.stop_all().await
}

#[tokio::test]
async fn test_events() -> anyhow::Result<()> {
	init_logger();
	let mut ring = TestRing::new(manual_config());
	ring.add(10, None).await?;

	let (tx, mut rx) = mpsc::channel(64);
	let config = ring.config.clone();
	let s = chord_ring::core::NodeServer::new(test_node(20), config, ring.network.clone())
		.with_events(tx);
	let manager = s.start(Some(test_node(10))).await?;
	assert_eq!(rx.recv().await, Some(NodeEvent::SuccessorChanged(test_node(10))));

	s.stabilize().await?;
	assert_eq!(rx.recv().await, Some(NodeEvent::SuccessorListChanged(vec![test_node(10)])));
	// node 10 adopts 20 as successor and notifies it
	ring.stabilize_all(1).await;
	assert_eq!(rx.recv().await, Some(NodeEvent::PredecessorChanged(Some(test_node(10)))));

	manager.stop().await?;
	ring.stop_all().await
}
