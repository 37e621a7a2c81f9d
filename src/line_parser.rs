use crate::error::LineError;

/// One parsed line of collapsed stack input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapsedStack<'a> {
    stack: &'a str,
    pub weight: u64,
}

impl<'a> CollapsedStack<'a> {
    /// The frame labels, root first and leaf last.
    pub fn frames(&self) -> impl Iterator<Item = &'a str> {
        self.stack.split(';')
    }
}

/// Parses a line of the shape `root;caller;...;leaf <count>`.
///
/// The count is the trailing run of ASCII digits and has to be separated
/// from the stack by whitespace. Frame labels are kept verbatim, including
/// any spaces inside them, but none of them may be empty.
pub fn parse_line(line: &str) -> Result<CollapsedStack<'_>, LineError> {
    let line = line.trim_end();
    let stack_and_separator = line.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &line[stack_and_separator.len()..];
    if digits.is_empty() {
        return Err(LineError::MissingWeight);
    }

    let stack = stack_and_separator.trim_end();
    if stack.is_empty() {
        return Err(LineError::EmptyStack);
    }
    if stack.len() == stack_and_separator.len() {
        return Err(LineError::WeightNotSeparated);
    }

    let weight = digits
        .parse()
        .map_err(|_| LineError::WeightOverflow(digits.to_string()))?;

    if let Some(position) = stack.split(';').position(str::is_empty) {
        return Err(LineError::EmptyFrame(position));
    }

    Ok(CollapsedStack { stack, weight })
}
