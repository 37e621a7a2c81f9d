use crate::error::Error;
use crate::line_parser::parse_line;
use crate::profile::Profile;
use crate::props::ImportProps;
use crate::thread::Thread;

/// Counters collected while converting one input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// All lines, including blank and skipped ones.
    pub lines: usize,
    pub blank_lines: usize,
    /// Lines that did not have the `frame;frame <count>` shape, or whose
    /// count would push the thread past `ImportProps::max_samples`.
    pub skipped_lines: usize,
    pub samples: usize,
}

/// Converts collapsed stack text into a single-thread profile.
///
/// Malformed lines are logged and skipped, so input without a single valid
/// line still produces a valid profile without samples. Use
/// [`is_collapsed_stacks_format`](crate::is_collapsed_stacks_format) first
/// to decide whether this converter is the right one for the input.
pub fn convert(text: &str, props: &ImportProps) -> Result<Profile, Error> {
    let (profile, _stats) = convert_with_stats(text, props)?;
    Ok(profile)
}

/// Like [`convert`], but also returns line and sample counts.
pub fn convert_with_stats(
    text: &str,
    props: &ImportProps,
) -> Result<(Profile, ConversionStats), Error> {
    let mut thread = Thread::with_max_samples(&props.thread_name, props.max_samples);
    let mut stats = ConversionStats::default();

    for (line_index, line) in text.lines().enumerate() {
        stats.lines += 1;
        if line.trim().is_empty() {
            stats.blank_lines += 1;
            continue;
        }
        if let Err(err) = parse_line(line).and_then(|stack| thread.add_collapsed_stack(&stack)) {
            log::warn!("Skipping line {}: {err}", line_index + 1);
            log::debug!("Skipped line content: {line:?}");
            stats.skipped_lines += 1;
        }
    }
    stats.samples = thread.samples().len();

    thread.validate()?;

    log::info!(
        "Converted {} lines ({} skipped) into {} frames, {} stacks and {} samples",
        stats.lines,
        stats.skipped_lines,
        thread.frame_table().len(),
        thread.stack_table().len(),
        stats.samples
    );

    Ok((Profile::new(props, thread), stats))
}
