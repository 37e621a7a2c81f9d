use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, LineError};
use crate::frame_table::{FrameIndex, FrameTable};
use crate::line_parser::CollapsedStack;
use crate::marker_table::EmptyMarkerTable;
use crate::sample_table::SampleTable;
use crate::stack_table::{StackIndex, StackTable};
use crate::string_table::{StringIndex, StringTable};

/// The single thread of a converted profile, together with its interning tables.
///
/// All tables are append-only: an index handed out once stays valid and keeps
/// pointing at the same row.
#[derive(Debug, Clone)]
pub struct Thread {
    name: String,
    pid: u32,
    tid: u32,
    string_table: StringTable,
    frame_table: FrameTable,
    stack_table: StackTable,
    samples: SampleTable,
}

impl Thread {
    pub fn new(name: &str) -> Self {
        Self::with_sample_table(name, SampleTable::new())
    }

    /// A thread that holds at most `max_samples` samples.
    pub fn with_max_samples(name: &str, max_samples: u64) -> Self {
        Self::with_sample_table(name, SampleTable::with_max_samples(max_samples))
    }

    fn with_sample_table(name: &str, samples: SampleTable) -> Self {
        Self {
            name: name.to_string(),
            pid: 0,
            tid: 0,
            string_table: StringTable::new(),
            frame_table: FrameTable::new(),
            stack_table: StackTable::new(),
            samples,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn tid(&self) -> u32 {
        self.tid
    }

    pub fn string_table(&self) -> &StringTable {
        &self.string_table
    }

    pub fn frame_table(&self) -> &FrameTable {
        &self.frame_table
    }

    pub fn stack_table(&self) -> &StackTable {
        &self.stack_table
    }

    pub fn samples(&self) -> &SampleTable {
        &self.samples
    }

    pub fn string(&self, index: StringIndex) -> Option<&str> {
        self.string_table.get_string(index)
    }

    /// The stored label of a frame, i.e. without the Java marker.
    pub fn frame_label(&self, frame: FrameIndex) -> Option<&str> {
        let frame = self.frame_table.get(frame)?;
        self.string_table.get_string(frame.location)
    }

    // frames is ordered from caller to callee, i.e. root function first, leaf last
    pub fn stack_index_for_frames<'a>(
        &mut self,
        frames: impl IntoIterator<Item = &'a str>,
    ) -> Option<StackIndex> {
        let Thread {
            string_table,
            frame_table,
            stack_table,
            ..
        } = self;
        stack_table.index_for_frames(
            frames
                .into_iter()
                .map(|label| frame_table.index_for_label(label, string_table)),
        )
    }

    /// Interns the stack of a parsed line and adds one sample per weight unit.
    ///
    /// A line whose samples do not fit leaves the thread unchanged.
    pub fn add_collapsed_stack(
        &mut self,
        line: &CollapsedStack<'_>,
    ) -> Result<Option<StackIndex>, LineError> {
        self.samples.reserve(line.weight)?;
        let Some(stack) = self.stack_index_for_frames(line.frames()) else {
            return Ok(None);
        };
        self.samples.add_samples(stack, line.weight)?;
        Ok(Some(stack))
    }

    /// Checks that every index stored in a table refers to an existing row,
    /// that every stack's prefix chain ends at a root, and that sample times
    /// are exactly `0..len`.
    pub fn validate(&self) -> Result<(), Error> {
        for (row, frame) in self.frame_table.iter().enumerate() {
            if frame.location.as_usize() >= self.string_table.len() {
                return Err(Error::InvariantViolation {
                    table: "frame",
                    row,
                    reason: format!("unknown string {}", frame.location.as_usize()),
                });
            }
        }

        for (row, stack) in self.stack_table.iter().enumerate() {
            if stack.frame.as_usize() >= self.frame_table.len() {
                return Err(Error::InvariantViolation {
                    table: "stack",
                    row,
                    reason: format!("unknown frame {}", stack.frame.as_usize()),
                });
            }
            // Prefixes always point backwards, which rules out cycles.
            if let Some(prefix) = stack.prefix {
                if prefix.as_usize() >= row {
                    return Err(Error::InvariantViolation {
                        table: "stack",
                        row,
                        reason: format!("prefix {} is not an earlier stack", prefix.as_usize()),
                    });
                }
            }
        }

        for (row, sample) in self.samples.iter().enumerate() {
            if sample.stack.as_usize() >= self.stack_table.len() {
                return Err(Error::InvariantViolation {
                    table: "sample",
                    row,
                    reason: format!("unknown stack {}", sample.stack.as_usize()),
                });
            }
            if sample.time != row as u64 {
                return Err(Error::InvariantViolation {
                    table: "sample",
                    row,
                    reason: format!("unexpected timestamp {}", sample.time),
                });
            }
        }

        Ok(())
    }
}

impl Serialize for Thread {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("pid", &self.pid)?;
        map.serialize_entry("tid", &self.tid)?;
        map.serialize_entry("processType", "default")?;
        map.serialize_entry("registerTime", &0)?;
        map.serialize_entry("unregisterTime", &None::<f64>)?;
        map.serialize_entry("frameTable", &self.frame_table)?;
        map.serialize_entry("stackTable", &self.stack_table)?;
        map.serialize_entry("samples", &self.samples)?;
        map.serialize_entry("markers", &EmptyMarkerTable)?;
        map.serialize_entry("stringTable", &self.string_table)?;
        map.end()
    }
}
