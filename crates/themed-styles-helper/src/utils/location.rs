use crate::rule::SourceLocation;

/// Convert a byte offset into a 1-indexed row and column
pub fn offset_to_location(content: &str, offset: usize) -> SourceLocation {
    let before = &content[..offset];
    let row = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|pos| pos + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;

    SourceLocation { row, column }
}

/// Location of the start of a 0-indexed line
pub fn line_location(line: usize) -> SourceLocation {
    SourceLocation {
        row: line + 1,
        column: 1,
    }
}
