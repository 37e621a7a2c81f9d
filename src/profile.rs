use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::category::SerializableCategories;
use crate::props::ImportProps;
use crate::thread::Thread;

/// A converted profile in the Gecko profile format.
///
/// Serialize it with [`serde_json`] to get a file that the Firefox Profiler
/// can load.
#[derive(Debug, Clone)]
pub struct Profile {
    product: String,
    interval_ms: f64,
    thread: Thread,
}

impl Profile {
    pub fn new(props: &ImportProps, thread: Thread) -> Self {
        Self {
            product: props.product.clone(),
            interval_ms: props.interval_ms,
            thread,
        }
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// The converted thread. Collapsed stack input always yields exactly one.
    pub fn thread(&self) -> &Thread {
        &self.thread
    }

    pub fn threads(&self) -> &[Thread] {
        std::slice::from_ref(&self.thread)
    }
}

impl Serialize for Profile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("meta", &SerializableProfileMeta(self))?;
        map.serialize_entry("libs", &[] as &[()])?;
        map.serialize_entry("threads", self.threads())?;
        map.serialize_entry("processes", &[] as &[()])?;
        map.serialize_entry("pausedRanges", &[] as &[()])?;
        map.end()
    }
}

struct SerializableProfileMeta<'a>(&'a Profile);

impl Serialize for SerializableProfileMeta<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("version", &24)?;
        map.serialize_entry("interval", &self.0.interval_ms)?;
        map.serialize_entry("processType", &0)?;
        map.serialize_entry("product", &self.0.product)?;
        map.serialize_entry("pid", &self.0.thread.pid())?;
        map.serialize_entry("startTime", &0)?;
        map.serialize_entry("shutdownTime", &None::<f64>)?;
        map.serialize_entry("pausedRanges", &[] as &[()])?;
        map.serialize_entry("categories", &SerializableCategories)?;
        map.serialize_entry("markerSchema", &[] as &[()])?;
        map.end()
    }
}
