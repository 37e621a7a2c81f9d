use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::json;

/// Collapsed stacks carry no markers, so the converted thread always has
/// this empty marker table.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyMarkerTable;

impl Serialize for EmptyMarkerTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(
            "schema",
            &json!({
                "name": 0,
                "startTime": 1,
                "endTime": 2,
                "phase": 3,
                "category": 4,
                "data": 5,
            }),
        )?;
        map.serialize_entry("data", &[] as &[()])?;
        map.end()
    }
}
