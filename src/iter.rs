use crate::arena::NodeId;
use crate::map::SkipListMap;

/// Forward iterator over a map's entries in ascending key order.
///
/// Advancing follows the level-0 links only, one node per step, and ends
/// when the last node's link runs out.
pub struct Iter<'a, K, V, C> {
    map: &'a SkipListMap<K, V, C>,
    current: Option<NodeId>,
}

impl<'a, K, V, C> Iter<'a, K, V, C> {
    pub(crate) fn new(map: &'a SkipListMap<K, V, C>, current: Option<NodeId>) -> Iter<'a, K, V, C> {
        Iter { map, current }
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.map.node(id);
        self.current = node.next(0);
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // We only know the total length, not how far along we are.
        (0, Some(self.map.len()))
    }
}
