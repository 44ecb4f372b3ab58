use crate::arena::{NodeArena, NodeId};
use crate::compare::{Comparator, NaturalOrder};
use crate::height_control::HeightControl;
use crate::iter::Iter;
use crate::node::{Link, Node};

use std::cmp::Ordering;

use log::trace;

pub struct SkipListMap<K, V, C = NaturalOrder> {
    /// Owns every node; all links are ids into this arena.
    arena_: NodeArena<K, V>,

    /// Per-level entry links. `head_forward_[h]` is the first node spanning
    /// level `h`, or `None` when that level is empty.
    ///
    /// The classic layout keeps a "ghost" head node with dummy key and value
    /// that the algorithms must never touch. Holding the head's forward
    /// links directly on the map removes that node, and with it the implicit
    /// contract that its fields are never read.
    head_forward_: Vec<Link>,

    /// Number of elements in the map.
    length_: usize,

    /// Highest height among live nodes; 0 when the map is empty.
    height_: usize,

    /// Maximum height the `controller_` can generate. This is stored here
    /// instead of calling `controller_` because all calls to `controller_`
    /// are virtually dispatched, which is more expensive than just holding
    /// an usize.
    max_height_: usize,

    /// Used to generate the height for any given node when inserting data.
    controller_: Box<dyn HeightControl>,

    /// Defines the key ordering. Key equality is derived from it: two keys
    /// are the same key exactly when they compare `Equal`.
    comparator_: C,
}

impl<K, V> SkipListMap<K, V, NaturalOrder> {
    pub fn new(controller: Box<dyn HeightControl>) -> SkipListMap<K, V, NaturalOrder> {
        Self::with_comparator(NaturalOrder, controller)
    }
}

impl<K, V, C> SkipListMap<K, V, C> {
    pub fn with_comparator(
        comparator: C,
        controller: Box<dyn HeightControl>,
    ) -> SkipListMap<K, V, C> {
        let max_height = controller.max_height();

        SkipListMap {
            arena_: NodeArena::new(),
            head_forward_: vec![None; max_height + 1],
            length_: 0,
            height_: 0,
            // See comment on `SkipListMap::max_height` for reference.
            max_height_: max_height,
            // The only direct call to controller_ should be done in the
            // `SkipListMap::insert` function.
            controller_: controller,
            comparator_: comparator,
        }
    }

    /// Returns the number of elements stored in the structure.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.length_
    }

    /// Returns `true` if there are no elements stored within the structure.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.length_ == 0
    }

    /// Returns the maximum reachable height of the skip list.
    #[inline(always)]
    fn max_height(&self) -> usize {
        self.max_height_
    }

    /// Removes all elements. Calling this on an empty map is a no-op.
    pub fn clear(&mut self) {
        self.arena_.clear();
        for link in self.head_forward_.iter_mut() {
            *link = None;
        }
        self.length_ = 0;
        self.height_ = 0;
        trace!("clear: map reset");
    }

    /// Exchanges the entire contents of the two maps in O(1), comparators
    /// and height generators included. Both maps stay independently usable.
    #[inline(always)]
    pub fn swap(&mut self, other: &mut SkipListMap<K, V, C>) {
        std::mem::swap(self, other);
    }

    /// Smallest entry in the map, if any.
    pub fn first(&self) -> Option<(&K, &V)> {
        let id = self.head_forward_[0]?;
        let node = self.arena_.get(id);
        Some((node.key(), node.value()))
    }

    /// Visits all entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter::new(self, self.head_forward_[0])
    }

    /// Returns the `index`-th entry in ascending key order by walking from
    /// the front. This is a plain linear scan, O(index), not an indexed
    /// lookup through the skip structure.
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        self.iter().nth(index)
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        self.arena_.get(id)
    }

    /// Follows the level-`height` link out of `origin`, where `None` stands
    /// for the head. A `None` result is the end of that level.
    fn next_after(&self, origin: Option<NodeId>, height: usize) -> Link {
        match origin {
            Some(id) => self.arena_.get(id).next(height),
            None => self.head_forward_[height],
        }
    }

    /// Repoints the level-`height` link out of `origin` (head when `None`).
    fn link_from(&mut self, origin: Option<NodeId>, height: usize, destination: Link) {
        match origin {
            Some(id) => self.arena_.get_mut(id).link_to(height, destination),
            None => self.head_forward_[height] = destination,
        }
    }
}

impl<K, V, C: Comparator<K>> SkipListMap<K, V, C> {
    #[inline(always)]
    fn is_less(&self, lhs: &K, rhs: &K) -> bool {
        self.comparator_.compare(lhs, rhs) == Ordering::Less
    }

    #[inline(always)]
    fn is_same_key(&self, lhs: &K, rhs: &K) -> bool {
        self.comparator_.compare(lhs, rhs) == Ordering::Equal
    }

    /// Finds the node previous to the node that would have `key`, if any.
    /// `None` is the head.
    fn find_lower_bound(&self, key: &K) -> Option<NodeId> {
        let mut current = None;

        for height in (0..=self.height_).rev() {
            while let Some(next) = self.next_after(current, height) {
                if self.is_less(self.arena_.get(next).key(), key) {
                    current = Some(next);
                } else {
                    break;
                }
            }
        }

        current
    }

    /// Finds the node previous to the node that would have `key`, if any. It
    /// also generates an `updates` vector; the vector contains for height h
    /// the last node before the target position that spans level h. These
    /// are the splice points for insert and remove.
    ///
    /// The returned link is the candidate: the node holding `key` if it is
    /// present, otherwise the first node with a greater key, or `None` at
    /// the end of the list.
    fn find_lower_bound_with_updates(&self, key: &K) -> (Link, Vec<Option<NodeId>>) {
        // Entries above the current height stay at the head.
        let mut updates = vec![None; self.max_height() + 1];
        let mut current = None;

        for height in (0..=self.height_).rev() {
            while let Some(next) = self.next_after(current, height) {
                if self.is_less(self.arena_.get(next).key(), key) {
                    current = Some(next);
                } else {
                    break;
                }
            }

            updates[height] = current;
        }

        (self.next_after(current, 0), updates)
    }

    /// Inserts `key` with `value`. If the map already holds a key comparing
    /// equal, its value is overwritten in place and the old value returned;
    /// the stored key, the length and the node heights are left untouched.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (candidate, updates) = self.find_lower_bound_with_updates(&key);

        if let Some(found) = candidate {
            // The lower bound's next node, if present, could be the same
            // key as the one we are inserting.
            if self.is_same_key(self.arena_.get(found).key(), &key) {
                trace!("insert: key present, overwriting value in place");
                return Some(self.arena_.get_mut(found).replace_value(value));
            }
        }

        // The draw is capped at max_height_ only; a lucky draw may open
        // several new levels in a single insert. The fresh levels splice at
        // the head, which is what `updates` already holds there.
        let height = self.controller_.get_height();
        debug_assert!(height <= self.max_height_);

        let id = self.arena_.insert(Node::new(key, value, height));
        for h in 0..=height {
            let next = self.next_after(updates[h], h);
            self.arena_.get_mut(id).link_to(h, next);
            self.link_from(updates[h], h, Some(id));
        }

        if height > self.height_ {
            trace!("insert: height raised from {} to {}", self.height_, height);
            self.height_ = height;
        }
        self.length_ += 1;
        None
    }

    /// Removes `key` from the map, returning its value. Removing an absent
    /// key is a no-op returning `None`.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let (candidate, updates) = self.find_lower_bound_with_updates(key);

        let id = candidate?;
        if !self.is_same_key(self.arena_.get(id).key(), key) {
            return None;
        }

        // Unlink at every level the node spans, then drop the levels that
        // just became empty.
        let node_height = self.arena_.get(id).height();
        for h in 0..=node_height {
            let next = self.arena_.get(id).next(h);
            self.link_from(updates[h], h, next);
        }

        let node = self.arena_.remove(id);
        while self.height_ > 0 && self.head_forward_[self.height_].is_none() {
            self.height_ -= 1;
        }
        self.length_ -= 1;
        trace!(
            "remove: node of height {} unlinked, map height now {}",
            node_height,
            self.height_
        );

        Some(node.into_value())
    }

    /// Returns a reference to the value stored under `key`, if present.
    pub fn get(&self, key: &K) -> Option<&V> {
        let lower_bound = self.find_lower_bound(key);
        let id = self.next_after(lower_bound, 0)?;

        let node = self.arena_.get(id);
        if self.is_same_key(node.key(), key) {
            Some(node.value())
        } else {
            None
        }
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let lower_bound = self.find_lower_bound(key);
        let id = self.next_after(lower_bound, 0)?;

        if !self.is_same_key(self.arena_.get(id).key(), key) {
            return None;
        }
        Some(self.arena_.get_mut(id).value_mut())
    }

    /// Returns true if `key` is in the map.
    #[inline(always)]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns an iterator positioned at `key`, continuing over the rest of
    /// the map in order. When `key` is absent the iterator is exhausted.
    pub fn find(&self, key: &K) -> Iter<'_, K, V, C> {
        let lower_bound = self.find_lower_bound(key);
        let current = match self.next_after(lower_bound, 0) {
            Some(id) if self.is_same_key(self.arena_.get(id).key(), key) => Some(id),
            _ => None,
        };

        Iter::new(self, current)
    }
}

impl<K, V, C> std::ops::Index<usize> for SkipListMap<K, V, C> {
    type Output = V;

    /// Value of the `index`-th entry in ascending key order. O(index).
    ///
    /// Panics when `index >= len()`; positional access past the end is a
    /// contract violation, not an absent key.
    fn index(&self, index: usize) -> &Self::Output {
        match self.get_index(index) {
            Some((_, value)) => value,
            None => panic!("index out of range: {} >= {}", index, self.len()),
        }
    }
}

impl<K: std::fmt::Display, V: std::fmt::Display, C> std::fmt::Display for SkipListMap<K, V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut remaining = self.len();

        write!(f, "[")?;
        for (key, value) in self.iter() {
            remaining -= 1;

            if remaining >= 1 {
                write!(f, "{}: {}, ", key, value)?;
            } else {
                write!(f, "{}: {}", key, value)?;
            }
        }
        write!(f, "]")
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug, C> std::fmt::Debug for SkipListMap<K, V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut remaining = self.len();

        write!(f, "[")?;
        for (key, value) in self.iter() {
            remaining -= 1;

            if remaining >= 1 {
                write!(f, "{:?}: {:?}, ", key, value)?;
            } else {
                write!(f, "{:?}: {:?}", key, value)?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::height_control::GeometricalGenerator;

    fn seeded(seed: u64) -> Box<dyn HeightControl> {
        Box::new(GeometricalGenerator::with_seed(16, 0.5, seed))
    }

    /// Highest height among live nodes, recomputed by walking level 0.
    fn live_height<K, V, C>(map: &SkipListMap<K, V, C>) -> usize {
        let mut highest = 0;
        let mut current = map.head_forward_[0];
        while let Some(id) = current {
            let node = map.arena_.get(id);
            highest = std::cmp::max(highest, node.height());
            current = node.next(0);
        }
        highest
    }

    #[test]
    fn new() {
        let map: SkipListMap<i32, i32> = SkipListMap::new(seeded(1));
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
    }

    #[test]
    fn insert_get_single() {
        let key = 34;
        let value = 433;
        let mut map: SkipListMap<i32, i32> = SkipListMap::new(seeded(2));
        assert!(map.insert(key, value).is_none());

        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());
        assert_eq!(map.get(&key), Some(&value));
        assert!(map.get(&35).is_none());
    }

    #[test]
    fn insert_duplicate_overwrites() {
        let key = 55;
        let mut map: SkipListMap<i32, i32> = SkipListMap::new(seeded(3));

        assert!(map.insert(key, 555).is_none());
        // The second insertion keeps the node and hands back the old value
        assert_eq!(map.insert(key, 556), Some(555));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&key), Some(&556));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut map: SkipListMap<i32, i32> = SkipListMap::new(seeded(4));
        map.insert(1, 10);

        *map.get_mut(&1).unwrap() += 5;
        assert_eq!(map.get(&1), Some(&15));
        assert!(map.get_mut(&2).is_none());
    }

    #[test]
    fn remove_single() {
        let key = 12;
        let mut map: SkipListMap<i32, i32> = SkipListMap::new(seeded(5));

        assert!(map.insert(key, 833).is_none());
        assert_eq!(map.remove(&key), Some(833));
        assert_eq!(map.len(), 0);
        assert!(!map.contains_key(&key));
        assert!(map.remove(&key).is_none());
    }

    #[test]
    fn height_tracks_live_nodes() {
        let mut map: SkipListMap<u32, u32> = SkipListMap::new(seeded(6));

        for key in 0..200 {
            map.insert(key, key);
            assert_eq!(map.height_, live_height(&map));
        }

        for key in 0..200 {
            assert_eq!(map.remove(&key), Some(key));
            assert_eq!(map.height_, live_height(&map));
        }
        assert_eq!(map.height_, 0);
    }

    #[test]
    fn level_lists_are_subsequences() {
        let mut map: SkipListMap<u32, u32> = SkipListMap::new(seeded(7));
        for key in 0..500 {
            map.insert(key * 2, key);
        }

        // Every level must be strictly ascending; level 0 must see all nodes.
        for height in 0..=map.height_ {
            let mut visited = 0;
            let mut previous: Option<u32> = None;
            let mut current = map.head_forward_[height];
            while let Some(id) = current {
                let node = map.arena_.get(id);
                assert!(node.height() >= height);
                if let Some(previous) = previous {
                    assert!(previous < *node.key());
                }
                previous = Some(*node.key());
                visited += 1;
                current = node.next(height);
            }

            if height == 0 {
                assert_eq!(visited, map.len());
            }
        }
    }

    #[test]
    fn clear_resets_and_stays_usable() {
        let mut map: SkipListMap<i32, i32> = SkipListMap::new(seeded(8));
        for key in 0..50 {
            map.insert(key, key + 1);
        }

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.height_, 0);

        map.insert(3, 4);
        assert_eq!(map.get(&3), Some(&4));
    }
}
