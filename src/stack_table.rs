use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::json;

use crate::fast_hash_map::FastHashMap;
use crate::frame_table::FrameIndex;

/// The index of a stack in a thread's stack table.
#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct StackIndex(pub(crate) usize);

impl StackIndex {
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl Serialize for StackIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0 as u64)
    }
}

/// One node of the stack prefix tree. `prefix` is `None` for root nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stack {
    pub prefix: Option<StackIndex>,
    pub frame: FrameIndex,
}

#[derive(Debug, Clone, Default)]
pub struct StackTable {
    stacks: Vec<Stack>,

    // (parent stack, frame_index) -> stack index
    index: FastHashMap<(Option<StackIndex>, FrameIndex), StackIndex>,
}

impl StackTable {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn index_for_stack(
        &mut self,
        prefix: Option<StackIndex>,
        frame: FrameIndex,
    ) -> StackIndex {
        match self.index.get(&(prefix, frame)) {
            Some(stack) => *stack,
            None => {
                let stack = StackIndex(self.stacks.len());
                self.stacks.push(Stack { prefix, frame });
                self.index.insert((prefix, frame), stack);
                stack
            }
        }
    }

    /// Folds the frames, root first, into a chain of stacks and returns the
    /// stack of the last frame. Returns `None` for an empty frame list.
    pub fn index_for_frames(
        &mut self,
        frames: impl IntoIterator<Item = FrameIndex>,
    ) -> Option<StackIndex> {
        frames
            .into_iter()
            .fold(None, |prefix, frame| Some(self.index_for_stack(prefix, frame)))
    }

    pub fn get(&self, stack_index: StackIndex) -> Option<&Stack> {
        self.stacks.get(stack_index.0)
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stack> {
        self.stacks.iter()
    }

    /// The frames of a stack, leaf first.
    pub fn frames_leaf_first(&self, stack_index: StackIndex) -> Vec<FrameIndex> {
        let mut frames = Vec::new();
        let mut current = Some(stack_index);
        while let Some(stack) = current.and_then(|s| self.get(s)) {
            frames.push(stack.frame);
            current = stack.prefix;
        }
        frames
    }
}

impl Serialize for StackTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("schema", &json!({ "prefix": 0, "frame": 1 }))?;
        map.serialize_entry("data", &SerializableStackRows(&self.stacks))?;
        map.end()
    }
}

struct SerializableStackRows<'a>(&'a [Stack]);

impl Serialize for SerializableStackRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for stack in self.0 {
            seq.serialize_element(&(stack.prefix, stack.frame))?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_eq;

    use super::*;

    #[test]
    fn shared_prefixes_are_stored_once() {
        let (a, b, c, d) = (FrameIndex(0), FrameIndex(1), FrameIndex(2), FrameIndex(3));
        let mut table = StackTable::new();
        let abc = table.index_for_frames([a, b, c]).unwrap();
        let abd = table.index_for_frames([a, b, d]).unwrap();
        assert_ne!(abc, abd);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(abc).unwrap().prefix, table.get(abd).unwrap().prefix);
        assert_eq!(table.frames_leaf_first(abd), vec![d, b, a]);
    }

    #[test]
    fn same_frame_under_different_prefixes() {
        let (a, b) = (FrameIndex(0), FrameIndex(1));
        let mut table = StackTable::new();
        let ab = table.index_for_frames([a, b]).unwrap();
        let b_root = table.index_for_frames([b]).unwrap();
        assert_ne!(ab, b_root);
        assert_eq!(table.get(b_root).unwrap().prefix, None);
        assert_eq!(table.index_for_frames(std::iter::empty()), None);
    }

    #[test]
    fn serialize_stack_table() {
        let mut table = StackTable::new();
        table.index_for_frames([FrameIndex(0), FrameIndex(1)]);
        table.index_for_frames([FrameIndex(0), FrameIndex(2)]);
        assert_json_eq!(
            table,
            json!({
                "schema": { "prefix": 0, "frame": 1 },
                "data": [[null, 0], [0, 1], [0, 2]]
            })
        );
    }
}
