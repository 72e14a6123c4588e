//! Extraction of named style blocks from an object-literal region.
//!
//! The scanner walks a region line by line, tracking brace depth with a
//! [`BraceCounter`]. Every line must be one of:
//!
//! - a block opener at depth 0 (`container: {`), or a whole block on one
//!   line (`row: { flexDirection: 'row' },`)
//! - a property at depth 1 (`flex: 1,`), possibly continued over several
//!   lines until its braces and brackets are balanced and it ends with the
//!   separator (`shadowOffset: {`, `transform: [`, or a value wrapped onto
//!   the next line)
//! - a block closer returning to depth 0 (`},`)
//! - noise: blank or comment-only lines
//!
//! Anything else is an error rather than being dropped.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::StyleSplitError;
use crate::lexer::{BraceCounter, split_top_level};

static BLOCK_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_$][\w$]*)\s*:\s*\{").unwrap());

/// A property of a style block, kept as raw source lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub lines: Vec<String>,
    /// Document line index (0-based) of the first line
    pub line: usize,
    /// Where the trailing separator belongs when the source omitted it
    pub missing_separator: Option<usize>,
}

impl Property {
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        Self {
            lines: vec![text.into()],
            line,
            missing_separator: None,
        }
    }

    /// Trimmed first line, e.g. `backgroundColor: colors.card,`
    pub fn head(&self) -> &str {
        self.lines.first().map(|l| l.trim()).unwrap_or("")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    /// Source lines with the separator restored when it was missing
    pub fn rendered_lines(&self) -> impl Iterator<Item = Cow<'_, str>> {
        let last = self.lines.len().saturating_sub(1);
        self.lines.iter().enumerate().map(move |(i, line)| {
            match self.missing_separator {
                Some(at) if i == last => {
                    let mut fixed = line.clone();
                    fixed.insert(at, ',');
                    Cow::Owned(fixed)
                }
                _ => Cow::Borrowed(line.as_str()),
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    pub properties: Vec<Property>,
    /// Document line range (0-based, end exclusive) the block occupied
    pub span: Range<usize>,
}

/// Blocks keyed by name, iterated in lexicographic order.
pub type BlockMap = BTreeMap<String, Block>;

struct OpenBlock {
    name: String,
    start: usize,
    properties: Vec<Property>,
}

/// A property still being read: its value has not reached the separator.
struct OpenValue {
    property: Property,
    /// `[`/`(` nesting inside the value
    nesting: i32,
    /// `code_end` of the last line carrying code
    code_end: usize,
}

enum State {
    Between,
    InBlock(OpenBlock),
    InValue(OpenBlock, OpenValue),
}

/// Scan `lines` for style blocks.
///
/// `first_line` is the document index of `lines[0]`; it is only used for
/// spans and error messages. A name seen twice keeps the later block.
pub fn scan_blocks(lines: &[&str], first_line: usize) -> Result<BlockMap, StyleSplitError> {
    let mut blocks = BlockMap::new();
    let mut counter = BraceCounter::new();
    let mut state = State::Between;
    let mut depth = 0i32;

    for (offset, raw) in lines.iter().enumerate() {
        let index = first_line + offset;
        let scan = counter.scan_line(raw);
        let code = scan.code.trim();
        let before = depth;
        let after = depth + scan.delta;

        if before + scan.lowest < 0 {
            return Err(StyleSplitError::UnbalancedBraces { line: index + 1 });
        }

        let unclassified = || StyleSplitError::UnclassifiedLine {
            line: index + 1,
            text: raw.trim().to_string(),
        };

        state = match state {
            State::Between if code.is_empty() => State::Between,
            State::Between => {
                let name = BLOCK_OPEN
                    .captures(code)
                    .map(|caps| caps[1].to_string())
                    .ok_or_else(unclassified)?;
                match after {
                    1 => State::InBlock(OpenBlock {
                        name,
                        start: index,
                        properties: Vec::new(),
                    }),
                    0 => {
                        let properties = inline_properties(raw, code, index).ok_or_else(unclassified)?;
                        insert_block(
                            &mut blocks,
                            Block {
                                name,
                                properties,
                                span: index..index + 1,
                            },
                        );
                        State::Between
                    }
                    _ => return Err(unclassified()),
                }
            }
            State::InBlock(block) if code.is_empty() => State::InBlock(block),
            State::InBlock(block) if after == 0 && is_closer(code) => {
                close_block(&mut blocks, block, index);
                State::Between
            }
            State::InBlock(block) => {
                let value = OpenValue {
                    property: Property::new(*raw, index),
                    nesting: scan.nesting,
                    code_end: scan.code_end,
                };
                continue_value(block, value, after, code).ok_or_else(unclassified)?
            }
            // An entry without a separator, closed by the block closer
            State::InValue(mut block, mut value)
                if before == 1 && after == 0 && value.nesting == 0 && is_closer(code) =>
            {
                value.property.missing_separator = Some(value.code_end);
                block.properties.push(value.property);
                close_block(&mut blocks, block, index);
                State::Between
            }
            State::InValue(block, value) if code.is_empty() && before == 1 && value.nesting == 0 => {
                State::InValue(block, value)
            }
            State::InValue(block, mut value) => {
                value.property.lines.push(raw.to_string());
                value.nesting += scan.nesting;
                if !code.is_empty() {
                    value.code_end = scan.code_end;
                }
                continue_value(block, value, after, code).ok_or_else(unclassified)?
            }
        };
        depth = after;
    }

    match state {
        State::Between => Ok(blocks),
        State::InBlock(block) | State::InValue(block, _) => Err(StyleSplitError::UnterminatedBlock {
            name: block.name,
            line: block.start + 1,
        }),
    }
}

fn is_closer(code: &str) -> bool {
    code == "}" || code == "},"
}

fn close_block(blocks: &mut BlockMap, block: OpenBlock, index: usize) {
    insert_block(
        blocks,
        Block {
            name: block.name,
            properties: block.properties,
            span: block.start..index + 1,
        },
    );
}

/// A property ends on a line that brings braces and brackets back to the
/// block level and ends with the separator. Otherwise its value goes on.
/// `None` means the line left the block level.
fn continue_value(mut block: OpenBlock, value: OpenValue, after: i32, code: &str) -> Option<State> {
    if after < 1 || value.nesting < 0 {
        return None;
    }
    if after == 1 && value.nesting == 0 && code.ends_with(',') {
        block.properties.push(value.property);
        Some(State::InBlock(block))
    } else {
        Some(State::InValue(block, value))
    }
}

fn insert_block(blocks: &mut BlockMap, block: Block) {
    if let Some(previous) = blocks.get(&block.name) {
        tracing::warn!(
            name = %block.name,
            first = previous.span.start + 1,
            second = block.span.start + 1,
            "Duplicate style name, keeping the later definition"
        );
    }
    blocks.insert(block.name.clone(), block);
}

/// Split a one-line block such as `row: { flexDirection: 'row', gap: 4 },`
/// into one property per entry. Returns `None` when anything other than a
/// separator follows the closing brace.
fn inline_properties(raw: &str, code: &str, index: usize) -> Option<Vec<Property>> {
    let open = code.find('{')?;
    let close = code.rfind('}')?;
    if close < open || !matches!(code[close + 1..].trim(), "" | ",") {
        return None;
    }

    let indent: String = raw.chars().take_while(|c| c.is_whitespace()).collect();
    Some(
        split_top_level(&code[open + 1..close], ',')
            .into_iter()
            .map(|entry| Property::new(format!("{indent}  {entry},"), index))
            .collect(),
    )
}
