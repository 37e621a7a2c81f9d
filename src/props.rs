use serde_derive::{Deserialize, Serialize};

use crate::sample_table::DEFAULT_MAX_SAMPLES;

/// Settings for converting a collapsed stack profile.
///
/// The defaults produce the fixed metadata that the Firefox Profiler's own
/// flame graph importer emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportProps {
    /// Stored in `meta.product`.
    pub product: String,
    /// The name of the single converted thread.
    pub thread_name: String,
    /// Stored in `meta.interval`. Samples are always one time unit apart.
    pub interval_ms: f64,
    /// The most samples the thread may hold. Lines whose count would go past
    /// it are skipped.
    pub max_samples: u64,
}

impl Default for ImportProps {
    fn default() -> Self {
        Self {
            product: "Flamegraph".to_string(),
            thread_name: "MainThread".to_string(),
            interval_ms: 1.0,
            max_samples: DEFAULT_MAX_SAMPLES,
        }
    }
}
