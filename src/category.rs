use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Label suffix that async-profiler and `stackcollapse-jstack` append to Java frames.
const JAVA_FRAME_SUFFIX: &str = "_[j]";

/// The category of a frame.
///
/// The collapsed stack format carries no type information, so the category
/// is guessed from the frame label, see [`Category::for_label`].
#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum Category {
    Other,
    Java,
    Native,
}

impl Category {
    /// All categories, in the order in which they appear in `meta.categories`.
    pub const ALL: [Category; 3] = [Category::Other, Category::Java, Category::Native];

    /// Guess the category from a raw frame label.
    ///
    /// A `_[j]` suffix means Java. A label without `::` is treated as native
    /// code, and anything else falls back to Other.
    pub fn for_label(raw_label: &str) -> Self {
        if raw_label.ends_with(JAVA_FRAME_SUFFIX) {
            Category::Java
        } else if !raw_label.contains("::") {
            Category::Native
        } else {
            Category::Other
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Category::Other => 0,
            Category::Java => 1,
            Category::Native => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Other => "Other",
            Category::Java => "Java",
            Category::Native => "Native",
        }
    }

    pub fn color(self) -> CategoryColor {
        match self {
            Category::Other => CategoryColor::Grey,
            Category::Java => CategoryColor::Yellow,
            Category::Native => CategoryColor::Blue,
        }
    }
}

/// The label under which a frame is stored in the string table.
///
/// This is the raw label with the Java `_[j]` marker removed.
pub fn stored_label(raw_label: &str) -> &str {
    raw_label
        .strip_suffix(JAVA_FRAME_SUFFIX)
        .unwrap_or(raw_label)
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}

/// The colors used by the fixed categories.
#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq)]
pub enum CategoryColor {
    Grey,
    Yellow,
    Blue,
}

impl Serialize for CategoryColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CategoryColor::Grey => "grey".serialize(serializer),
            CategoryColor::Yellow => "yellow".serialize(serializer),
            CategoryColor::Blue => "blue".serialize(serializer),
        }
    }
}

/// Serializes the `meta.categories` list.
pub(crate) struct SerializableCategories;

impl Serialize for SerializableCategories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(Category::ALL.len()))?;
        for category in Category::ALL {
            seq.serialize_element(&SerializableCategory(category))?;
        }
        seq.end()
    }
}

struct SerializableCategory(Category);

impl Serialize for SerializableCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", self.0.name())?;
        map.serialize_entry("color", &self.0.color())?;
        map.serialize_entry("subcategories", &["Other"])?;
        map.end()
    }
}
