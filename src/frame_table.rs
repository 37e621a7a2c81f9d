use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::json;

use crate::category::{stored_label, Category};
use crate::fast_hash_map::FastHashMap;
use crate::string_table::{StringIndex, StringTable};

/// The index of a frame in a thread's frame table.
#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct FrameIndex(pub(crate) usize);

impl FrameIndex {
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl Serialize for FrameIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0 as u64)
    }
}

/// One row of the frame table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// The label with any Java marker stripped.
    pub location: StringIndex,
    pub category: Category,
}

#[derive(Debug, Clone, Default)]
pub struct FrameTable {
    frames: Vec<Frame>,

    // raw label -> frame index
    index: FastHashMap<String, FrameIndex>,
}

impl FrameTable {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the frame for this raw label, creating it on first use.
    ///
    /// Frames are keyed on the raw label, so `foo_[j]` and `foo` are different
    /// frames even though both are stored as "foo".
    pub fn index_for_label(
        &mut self,
        raw_label: &str,
        string_table: &mut StringTable,
    ) -> FrameIndex {
        if let Some(frame_index) = self.index.get(raw_label) {
            return *frame_index;
        }

        let category = Category::for_label(raw_label);
        let location = string_table.index_for_string(stored_label(raw_label));
        let frame_index = FrameIndex(self.frames.len());
        self.frames.push(Frame { location, category });
        self.index.insert(raw_label.to_string(), frame_index);
        frame_index
    }

    pub fn get(&self, frame_index: FrameIndex) -> Option<&Frame> {
        self.frames.get(frame_index.0)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }
}

impl Serialize for FrameTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(
            "schema",
            &json!({
                "location": 0,
                "relevantForJS": 1,
                "innerWindowID": 2,
                "implementation": 3,
                "optimizations": 4,
                "line": 5,
                "column": 6,
                "category": 7,
                "subcategory": 8,
            }),
        )?;
        map.serialize_entry("data", &SerializableFrameRows(&self.frames))?;
        map.end()
    }
}

struct SerializableFrameRows<'a>(&'a [Frame]);

impl Serialize for SerializableFrameRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for frame in self.0 {
            seq.serialize_element(&(
                frame.location,
                false,
                0,
                None::<()>,
                None::<()>,
                None::<()>,
                None::<()>,
                frame.category,
                0,
            ))?;
        }
        seq.end()
    }
}
