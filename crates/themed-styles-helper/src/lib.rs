//! Merge a screen component's `StyleSheet.create` table into its themed
//! style factory.
//!
//! The pipeline is line oriented: [`anchors`] finds the two
//! style regions, [`scanner`] recovers named blocks from each, [`merge`]
//! filters and combines them, [`serialize`] renders the factory and
//! [`splice`] stitches the document back together. The [`rule`] layer wraps
//! that pipeline (and a JSX reference rewrite) for the command line.

pub mod anchors;
pub mod config;
pub mod conversions;
pub mod error;
pub mod lexer;
pub mod merge;
pub mod rule;
pub mod scanner;
pub mod serialize;
pub mod splice;
pub mod utils;

pub use config::HelperConfig;
pub use error::{AnchorKind, StyleSplitError};
pub use rule::{Rule, RuleRegistry};
