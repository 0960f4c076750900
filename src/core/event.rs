use super::node::Node;

/// Changes of routing state reported to an attached listener
#[derive(Debug, Clone, PartialEq)]
pub enum NodeEvent {
	PredecessorChanged(Option<Node>),
	SuccessorChanged(Node),
	SuccessorListChanged(Vec<Node>),
	FingerChanged {
		index: usize,
		finger: Option<Node>
	}
}
