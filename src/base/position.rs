/// Source positions for parsed nodes.
///
/// Maps each [`NodeId`] to the offset of the token that introduced the node.
/// Diagnostics coming back from the type oracle are keyed by node, and this
/// map turns them back into positioned errors.
use rustc_hash::FxHashMap;
use text_size::TextSize;

use super::NodeId;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PositionMap {
    offsets: FxHashMap<NodeId, TextSize>,
}

impl PositionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the offset of a node. A node keeps its first recorded offset.
    pub fn insert(&mut self, id: NodeId, offset: TextSize) {
        self.offsets.entry(id).or_insert(offset);
    }

    pub fn get(&self, id: NodeId) -> Option<TextSize> {
        self.offsets.get(&id).copied()
    }

    /// Offset of a node, or the start of input when the node was never recorded.
    pub fn offset_or_start(&self, id: Option<NodeId>) -> TextSize {
        id.and_then(|id| self.get(id)).unwrap_or_default()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.offsets.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, TextSize)> + '_ {
        self.offsets.iter().map(|(id, offset)| (*id, *offset))
    }
}
