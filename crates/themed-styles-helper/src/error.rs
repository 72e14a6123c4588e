//! Error types for locating, scanning, and splicing style regions.

use thiserror::Error;

/// The structural boundaries the transformation needs to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    ComponentStart,
    ThemedStart,
    ThemedEnd,
    BaseStart,
    BaseEnd,
}

impl std::fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AnchorKind::ComponentStart => "component start",
            AnchorKind::ThemedStart => "themed styles start",
            AnchorKind::ThemedEnd => "themed styles end",
            AnchorKind::BaseStart => "base styles start",
            AnchorKind::BaseEnd => "base styles end",
        };
        f.write_str(name)
    }
}

/// Errors raised while splitting and merging style regions.
///
/// Line numbers are 1-indexed.
#[derive(Debug, Error)]
pub enum StyleSplitError {
    /// An anchor pattern matched no line
    #[error("Could not find the {anchor} (looked for `{pattern}`)")]
    MissingAnchor { anchor: AnchorKind, pattern: String },

    /// Anchors were found but not in the expected layout
    #[error("The {first} (line {first_line}) must come before the {second} (line {second_line})")]
    AnchorOrder {
        first: AnchorKind,
        first_line: usize,
        second: AnchorKind,
        second_line: usize,
    },

    /// A line inside a style region is neither a block, a property, a closer, nor noise
    #[error("Unrecognized line {line} in style region: `{text}`")]
    UnclassifiedLine { line: usize, text: String },

    /// A style block was still open when its region ended
    #[error("Style block `{name}` opened on line {line} is never closed")]
    UnterminatedBlock { name: String, line: usize },

    /// Closing braces outnumber opening ones
    #[error("Unbalanced closing brace on line {line}")]
    UnbalancedBraces { line: usize },

    /// The configuration file could not be interpreted
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
