//! Brace counting that skips string literals and comments.
//!
//! This is not a tokenizer for the host language. It only knows enough to
//! keep `'{'`, `"}"`, `` `{` `` and `// }` from moving the brace depth.
//! Square brackets and parentheses are tracked separately so a value such
//! as `transform: [` can be followed to its closing `],`.
//! Block comments and template literals may span lines, so a
//! [`BraceCounter`] carries its state from one line to the next.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    Code,
    BlockComment,
    Template,
}

/// What one line contributes to the brace depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineScan {
    /// Opening minus closing braces
    pub delta: i32,
    /// Lowest running depth reached inside the line, relative to its start
    pub lowest: i32,
    /// Opening minus closing `[` and `(`
    pub nesting: i32,
    /// The line with comments removed
    pub code: String,
    /// Byte offset in the original line just past the last code character
    pub code_end: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BraceCounter {
    mode: Mode,
}

impl BraceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scan_line(&mut self, line: &str) -> LineScan {
        let mut code = String::with_capacity(line.len());
        let mut depth = 0;
        let mut lowest = 0;
        let mut nesting = 0;
        let mut code_end = 0;
        let mut quote: Option<char> = None;
        let mut chars = line.char_indices().peekable();

        while let Some((idx, c)) = chars.next() {
            let end = idx + c.len_utf8();
            match self.mode {
                Mode::BlockComment => {
                    if c == '*' && matches!(chars.peek(), Some((_, '/'))) {
                        chars.next();
                        self.mode = Mode::Code;
                        code.push(' ');
                    }
                    continue;
                }
                Mode::Template => {
                    code.push(c);
                    code_end = end;
                    if c == '\\' {
                        if let Some((next_idx, next)) = chars.next() {
                            code.push(next);
                            code_end = next_idx + next.len_utf8();
                        }
                    } else if c == '`' {
                        self.mode = Mode::Code;
                    }
                    continue;
                }
                Mode::Code => {}
            }

            if let Some(q) = quote {
                code.push(c);
                code_end = end;
                if c == '\\' {
                    if let Some((next_idx, next)) = chars.next() {
                        code.push(next);
                        code_end = next_idx + next.len_utf8();
                    }
                } else if c == q {
                    quote = None;
                }
                continue;
            }

            match c {
                '/' if matches!(chars.peek(), Some((_, '/'))) => break,
                '/' if matches!(chars.peek(), Some((_, '*'))) => {
                    chars.next();
                    self.mode = Mode::BlockComment;
                    continue;
                }
                '\'' | '"' => quote = Some(c),
                '`' => self.mode = Mode::Template,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    lowest = lowest.min(depth);
                }
                '[' | '(' => nesting += 1,
                ']' | ')' => nesting -= 1,
                _ => {}
            }
            code.push(c);
            if !c.is_whitespace() {
                code_end = end;
            }
        }

        LineScan {
            delta: depth,
            lowest,
            nesting,
            code,
            code_end,
        }
    }
}

/// Split `text` at `separator` wherever it is not nested inside brackets or
/// a string literal. Empty pieces are dropped and the rest are trimmed.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut nesting = 0i32;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '{' | '[' | '(' => nesting += 1,
            '}' | ']' | ')' => nesting -= 1,
            _ if c == separator && nesting == 0 => {
                pieces.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}
