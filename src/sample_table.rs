use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::json;

use crate::error::LineError;
use crate::stack_table::StackIndex;

/// The default cap on the number of samples in one thread.
pub const DEFAULT_MAX_SAMPLES: u64 = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub stack: StackIndex,
    /// Synthetic timestamp, equal to the sample's position in the table.
    pub time: u64,
    pub responsiveness: u32,
}

/// The sample table of a converted thread.
///
/// Collapsed stacks have weights rather than timestamps, so each weight unit
/// becomes its own sample, one time unit after the previous sample. The total
/// number of samples is capped at `max_samples`.
#[derive(Debug, Clone)]
pub struct SampleTable {
    samples: Vec<Sample>,
    next_timestamp: u64,
    max_samples: u64,
}

impl Default for SampleTable {
    fn default() -> Self {
        Self::with_max_samples(DEFAULT_MAX_SAMPLES)
    }
}

impl SampleTable {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_max_samples(max_samples: u64) -> Self {
        Self {
            samples: Vec::new(),
            next_timestamp: 0,
            max_samples,
        }
    }

    pub fn max_samples(&self) -> u64 {
        self.max_samples
    }

    /// Makes room for `weight` more samples.
    ///
    /// Fails without touching the table if the samples would exceed the cap
    /// or cannot be allocated.
    pub fn reserve(&mut self, weight: u64) -> Result<(), LineError> {
        let remaining = self.max_samples.saturating_sub(self.samples.len() as u64);
        if weight > remaining {
            return Err(LineError::WeightTooLarge(weight));
        }
        let additional = usize::try_from(weight).map_err(|_| LineError::WeightTooLarge(weight))?;
        self.samples
            .try_reserve(additional)
            .map_err(|_| LineError::WeightTooLarge(weight))
    }

    /// Appends `weight` samples for `stack`.
    pub fn add_samples(&mut self, stack: StackIndex, weight: u64) -> Result<(), LineError> {
        self.reserve(weight)?;
        for _ in 0..weight {
            self.samples.push(Sample {
                stack,
                time: self.next_timestamp,
                responsiveness: 0,
            });
            self.next_timestamp += 1;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

impl Serialize for SampleTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(
            "schema",
            &json!({ "stack": 0, "time": 1, "responsiveness": 2 }),
        )?;
        map.serialize_entry("data", &SerializableSampleRows(&self.samples))?;
        map.end()
    }
}

struct SerializableSampleRows<'a>(&'a [Sample]);

impl Serialize for SerializableSampleRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for sample in self.0 {
            seq.serialize_element(&(sample.stack, sample.time, sample.responsiveness))?;
        }
        seq.end()
    }
}
