//! Line classifier: decides whether a line is blank, comment or code.
//!
//! The classifier is a small state machine. The only state carried from one
//! line to the next is [`BlockCarry`]: whether an unterminated block comment
//! is open, and which delimiter closes it.
//!
//! Rules, in priority order:
//!
//! 1. A line that is empty after trimming is **blank**, even inside an open
//!    block comment. The carry passes through unchanged.
//! 2. Inside a block comment, the line is searched for the closing delimiter.
//!    If absent the line is a comment. If present, the line is a comment only
//!    when nothing but whitespace follows the delimiter; the block closes
//!    either way.
//! 3. Otherwise line markers are tried, then block pairs, each in declaration
//!    order. The first block pair whose start occurs in the line decides: a
//!    block closed on the same line is a comment line only if no code sits
//!    before or after it; an unclosed block makes the line a comment and opens
//!    the carry.
//! 4. Anything else is code.
//!
//! No string literal, escape or nesting awareness exists.

use std::ops::Range;

use serde::Serialize;

use crate::syntax::{BlockPattern, CommentSyntax, FallbackPatterns, ResolvedSyntax};

/// Whitespace for blank detection: Unicode whitespace plus the ASCII
/// separators U+001C to U+001F.
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn trim(s: &str) -> &str {
    s.trim_matches(is_space)
}

fn is_blank(s: &str) -> bool {
    s.chars().all(is_space)
}

/// Category of a single line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum LineKind {
    Blank,
    Comment,
    Code,
}

/// Delimiter that closes the currently open block comment.
#[derive(Debug, Copy, Clone)]
pub enum Closer {
    /// Literal end delimiter from the syntax table
    Literal(&'static str),
    /// End pattern of a fallback block pair
    Pattern(&'static BlockPattern),
}

impl Closer {
    /// Byte range of the first occurrence of the closer in `line`.
    fn find(&self, line: &str) -> Option<Range<usize>> {
        match self {
            Closer::Literal(end) => line.find(end).map(|at| at..at + end.len()),
            Closer::Pattern(pair) => pair.end.find(line).map(|m| m.range()),
        }
    }
}

impl PartialEq for Closer {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Closer::Literal(a), Closer::Literal(b)) => a == b,
            (Closer::Pattern(a), Closer::Pattern(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl Eq for Closer {}

/// State carried between consecutive lines of one file.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum BlockCarry {
    /// Not inside a block comment
    #[default]
    Outside,
    /// Inside a block comment, waiting for the closer
    Inside(Closer),
}

impl BlockCarry {
    pub fn is_inside(&self) -> bool {
        matches!(self, BlockCarry::Inside(_))
    }
}

/// Result of classifying one line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: LineKind,
    pub carry: BlockCarry,
}

impl Classification {
    fn new(kind: LineKind, carry: BlockCarry) -> Self {
        Self { kind, carry }
    }

    fn comment() -> Self {
        Self::new(LineKind::Comment, BlockCarry::Outside)
    }

    fn code() -> Self {
        Self::new(LineKind::Code, BlockCarry::Outside)
    }

    fn opens(closer: Closer) -> Self {
        Self::new(LineKind::Comment, BlockCarry::Inside(closer))
    }

    /// A block opened and closed on the same line.
    fn closed_block(before: &str, after: &str) -> Self {
        if is_blank(before) && is_blank(after) {
            Self::comment()
        } else {
            Self::code()
        }
    }
}

/// Classify one line given the file's syntax and the carried state.
///
/// ```rust
/// use contalinhalib::data::classifier::{classify, BlockCarry, LineKind};
/// use contalinhalib::syntax::ResolvedSyntax;
///
/// let c = ResolvedSyntax::resolve(".c");
/// let first = classify("/* start", c, BlockCarry::Outside);
/// assert_eq!(first.kind, LineKind::Comment);
/// assert!(first.carry.is_inside());
///
/// let second = classify("end */ run();", c, first.carry);
/// assert_eq!(second.kind, LineKind::Code);
/// assert_eq!(second.carry, BlockCarry::Outside);
/// ```
pub fn classify(line: &str, syntax: ResolvedSyntax, carry: BlockCarry) -> Classification {
    if is_blank(line) {
        return Classification::new(LineKind::Blank, carry);
    }

    if let BlockCarry::Inside(closer) = carry {
        return match closer.find(line) {
            None => Classification::new(LineKind::Comment, carry),
            Some(end) if is_blank(&line[end.end..]) => Classification::comment(),
            Some(_) => Classification::code(),
        };
    }

    match syntax {
        ResolvedSyntax::Table(syntax) => classify_literal(line, syntax),
        ResolvedSyntax::Fallback(patterns) => classify_pattern(line, patterns),
    }
}

fn classify_literal(line: &str, syntax: &'static CommentSyntax) -> Classification {
    let trimmed = trim(line);
    if syntax.line.iter().any(|marker| trimmed.starts_with(marker)) {
        return Classification::comment();
    }

    for &(start, end) in syntax.block {
        let Some(start_at) = line.find(start) else {
            continue;
        };
        let rest = &line[start_at + start.len()..];
        return match rest.find(end) {
            Some(end_at) => {
                Classification::closed_block(&line[..start_at], &rest[end_at + end.len()..])
            }
            None => Classification::opens(Closer::Literal(end)),
        };
    }

    Classification::code()
}

fn classify_pattern(line: &str, patterns: &'static FallbackPatterns) -> Classification {
    if patterns.line.iter().any(|re| re.is_match(line)) {
        return Classification::comment();
    }

    for pair in &patterns.block {
        let Some(start) = pair.start.find(line) else {
            continue;
        };
        let rest = &line[start.end()..];
        return match pair.end.find(rest) {
            Some(end) => Classification::closed_block(&line[..start.start()], &rest[end.end()..]),
            None => Classification::opens(Closer::Pattern(pair)),
        };
    }

    Classification::code()
}

/// Stateful wrapper that threads the carry through the lines of one file.
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier {
    syntax: ResolvedSyntax,
    carry: BlockCarry,
}

impl LineClassifier {
    /// Start a new file with no open block comment.
    pub fn new(syntax: ResolvedSyntax) -> Self {
        Self {
            syntax,
            carry: BlockCarry::Outside,
        }
    }

    /// Classify the next line and advance the carry.
    pub fn next_line(&mut self, line: &str) -> LineKind {
        let result = classify(line, self.syntax, self.carry);
        self.carry = result.carry;
        result.kind
    }

    /// The carry after the last classified line.
    pub fn carry(&self) -> BlockCarry {
        self.carry
    }
}
