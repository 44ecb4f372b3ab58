use crate::arena::NodeId;

/// A per-level forward link. `None` is the end of that level; real links
/// always name a live arena slot.
pub(crate) type Link = Option<NodeId>;

#[derive(Debug)]
pub(crate) struct Node<K, V> {
    forward_: Vec<Link>,
    key_: K,
    value_: V,
}

impl<K, V> Node<K, V> {
    // Node of height 0 means it has only one link to the next node, node of
    // height 1 additionally keeps a link to the next height-1 node, and so
    // on and so forth.
    pub fn new(key: K, value: V, height: usize) -> Node<K, V> {
        Node {
            forward_: vec![None; height + 1],
            key_: key,
            value_: value,
        }
    }

    pub fn height(&self) -> usize {
        self.forward_.len() - 1
    }

    /// Returns the link out of this node at the given height, if the node
    /// spans that height at all.
    pub fn next(&self, height: usize) -> Link {
        self.forward_.get(height).copied().flatten()
    }

    pub fn link_to(&mut self, height: usize, destination: Link) {
        debug_assert!(height <= self.height());
        self.forward_[height] = destination;
    }

    pub fn key(&self) -> &K {
        &self.key_
    }

    pub fn value(&self) -> &V {
        &self.value_
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value_
    }

    pub fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value_, value)
    }

    pub fn into_value(self) -> V {
        self.value_
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::NodeArena;

    #[test]
    fn new() {
        let key = 3;
        let value = 12;
        let height = 5;
        let node: Node<i32, i32> = Node::new(key, value, height);
        assert_eq!(*node.key(), key);
        assert_eq!(*node.value(), value);
        assert_eq!(node.height(), height);
    }

    #[test]
    fn next_out_of_bounds() {
        let node: Node<i32, i32> = Node::new(3, 12, 5);
        assert!(node.next(10).is_none());
    }

    #[test]
    fn next_empty() {
        let height = 5;
        let node: Node<i32, i32> = Node::new(3, 42, height);
        for h in 0..=height {
            assert!(node.next(h).is_none());
        }
    }

    #[test]
    fn link_singleton() {
        let height = 5;
        let linked_height = 0;

        let mut arena: NodeArena<i32, i32> = NodeArena::new();
        let destination = arena.insert(Node::new(4, 12312, height));

        let mut node: Node<i32, i32> = Node::new(2, 99, height);
        node.link_to(linked_height, Some(destination));

        for h in 0..=node.height() {
            if h == linked_height {
                assert_eq!(node.next(h), Some(destination));
            } else {
                assert!(node.next(h).is_none());
            }
        }
    }

    #[test]
    fn replace_value_returns_old() {
        let mut node: Node<i32, i32> = Node::new(1, 10, 0);
        assert_eq!(node.replace_value(20), 10);
        assert_eq!(*node.value(), 20);
    }
}
