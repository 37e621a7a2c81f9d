use std::sync::OnceLock;

use regex::Regex;

fn first_line_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[^;]+(?:;[^;]+)*\s+[0-9]+$").expect("the pattern is a valid regex")
    })
}

/// Returns whether `text` looks like a collapsed stack profile, i.e. lines
/// of the shape `root;caller;leaf 42`.
///
/// Only the first line is inspected, so this is cheap even for huge inputs.
/// Text starting with `{` is assumed to be a JSON profile. A structured
/// profile whose first line happens to look like `text;text 123` will be
/// misdetected.
pub fn is_collapsed_stacks_format(text: &str) -> bool {
    if text.starts_with('{') {
        return false;
    }
    let first_line = match text.split_once('\n') {
        Some((first_line, _)) => first_line,
        None => text,
    };
    first_line_regex().is_match(first_line.trim_end())
}
