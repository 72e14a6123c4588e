//! Locating the structural boundaries of a screen component.
//!
//! The first pass finds each marker line independently. The second pass
//! resolves the lines that depend on an earlier anchor (the themed closer and
//! the end of the base table) and then checks that the layout is
//!
//! ```text
//! component_start <= themed_start < themed_end < base_start <= base_end
//! ```

use crate::config::AnchorPatterns;
use crate::error::{AnchorKind, StyleSplitError};
use crate::lexer::BraceCounter;

/// Line indices (0-based) of the anchors in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors {
    pub component_start: usize,
    pub themed_start: usize,
    pub themed_end: usize,
    pub base_start: usize,
    /// Line where the base table's braces close again
    pub base_end: usize,
}

impl Anchors {
    pub fn locate(lines: &[&str], patterns: &AnchorPatterns) -> Result<Self, StyleSplitError> {
        let find = |anchor: AnchorKind, pattern: &str| {
            lines
                .iter()
                .position(|line| line.contains(pattern))
                .ok_or_else(|| StyleSplitError::MissingAnchor {
                    anchor,
                    pattern: pattern.to_string(),
                })
        };

        let component_start = find(AnchorKind::ComponentStart, &patterns.component)?;
        let themed_start = find(AnchorKind::ThemedStart, &patterns.themed_start)?;
        let base_start = find(AnchorKind::BaseStart, &patterns.base_start)?;

        let themed_end = lines
            .iter()
            .enumerate()
            .skip(themed_start + 1)
            .find(|(_, line)| line.trim() == patterns.themed_end)
            .map(|(i, _)| i)
            .ok_or_else(|| StyleSplitError::MissingAnchor {
                anchor: AnchorKind::ThemedEnd,
                pattern: patterns.themed_end.clone(),
            })?;

        let base_end = find_block_end(lines, base_start).ok_or_else(|| {
            StyleSplitError::MissingAnchor {
                anchor: AnchorKind::BaseEnd,
                pattern: format!("closing brace for `{}`", patterns.base_start),
            }
        })?;

        let anchors = Self {
            component_start,
            themed_start,
            themed_end,
            base_start,
            base_end,
        };
        anchors.validate()?;

        tracing::debug!(
            component_start = component_start + 1,
            themed_start = themed_start + 1,
            themed_end = themed_end + 1,
            base_start = base_start + 1,
            base_end = base_end + 1,
            "Located anchors"
        );

        Ok(anchors)
    }

    fn validate(&self) -> Result<(), StyleSplitError> {
        let ordered = [
            (AnchorKind::ComponentStart, self.component_start, AnchorKind::ThemedStart, self.themed_start, false),
            (AnchorKind::ThemedEnd, self.themed_end, AnchorKind::BaseStart, self.base_start, true),
        ];

        for (first, first_index, second, second_index, strict) in ordered {
            let in_order = if strict {
                first_index < second_index
            } else {
                first_index <= second_index
            };
            if !in_order {
                return Err(StyleSplitError::AnchorOrder {
                    first,
                    first_line: first_index + 1,
                    second,
                    second_line: second_index + 1,
                });
            }
        }

        Ok(())
    }

    /// Lines between the themed opener and its closer
    pub fn themed_region<'a>(&self, lines: &'a [&'a str]) -> &'a [&'a str] {
        lines.get(self.themed_start + 1..self.themed_end).unwrap_or(&[])
    }

    /// Lines between the base table opener and its closer
    pub fn base_region<'a>(&self, lines: &'a [&'a str]) -> &'a [&'a str] {
        lines.get(self.base_start + 1..self.base_end).unwrap_or(&[])
    }
}

/// Index of the line on which the braces opened at `start` are all closed.
fn find_block_end(lines: &[&str], start: usize) -> Option<usize> {
    let mut counter = BraceCounter::new();
    let mut depth = 0;

    for (index, line) in lines.iter().enumerate().skip(start) {
        depth += counter.scan_line(line).delta;
        if depth <= 0 {
            return Some(index);
        }
    }

    None
}
