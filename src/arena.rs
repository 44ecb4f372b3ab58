use crate::node::Node;

/// Stable handle to a slot in the arena. An id stays valid until the node it
/// names is removed; the slot may then be recycled by a later insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

/// Owns every node in the list.
///
/// Nodes are stored in a single `Vec` and addressed through `NodeId`s;
/// removed slots go onto a free list and get recycled, so unrelated removals
/// never invalidate a live id. This replaces the classic owning-pointer graph
/// with plain index arithmetic.
#[derive(Debug)]
pub(crate) struct NodeArena<K, V> {
    slots_: Vec<Option<Node<K, V>>>,
    free_: Vec<NodeId>,
}

impl<K, V> NodeArena<K, V> {
    pub fn new() -> NodeArena<K, V> {
        NodeArena {
            slots_: Vec::new(),
            free_: Vec::new(),
        }
    }

    pub fn insert(&mut self, node: Node<K, V>) -> NodeId {
        match self.free_.pop() {
            Some(id) => {
                debug_assert!(self.slots_[id.0].is_none());
                self.slots_[id.0] = Some(node);
                id
            }
            None => {
                let id = NodeId(self.slots_.len());
                self.slots_.push(Some(node));
                id
            }
        }
    }

    /// Vacates the slot and hands the node back. `id` must name a live node.
    pub fn remove(&mut self, id: NodeId) -> Node<K, V> {
        let node = match self.slots_[id.0].take() {
            Some(node) => node,
            None => unreachable!("slot {:?} vacated twice", id),
        };

        self.free_.push(id);
        node
    }

    pub fn get(&self, id: NodeId) -> &Node<K, V> {
        match self.slots_[id.0].as_ref() {
            Some(node) => node,
            None => unreachable!("live link into vacant slot {:?}", id),
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match self.slots_[id.0].as_mut() {
            Some(node) => node,
            None => unreachable!("live link into vacant slot {:?}", id),
        }
    }

    pub fn clear(&mut self) {
        self.slots_.clear();
        self.free_.clear();
    }
}
