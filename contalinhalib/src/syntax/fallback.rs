//! Generic comment patterns for files whose extension is not in the table.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

/// Line-comment patterns, anchored at line start and matched case-insensitively.
const LINE_PATTERNS: &[&str] = &[
    r"^\s*#",     // Python, Shell, Ruby
    r"^\s*//",    // C-like, Java, JS, Go
    r"^\s*;",     // Lisp, Assembly
    r"^\s*--",    // SQL, Ada, Haskell
    r"^\s*\*",    // inside /* */ blocks, or COBOL
    r"^\s*REM(\s|$)", // Batch
    r"^\s*::",    // Batch
    r"^\s*%",     // Erlang
    r"^\s*!",     // Fortran
];

/// Block-comment `(start, end)` patterns.
const BLOCK_PATTERNS: &[(&str, &str)] = &[
    (r"/\*", r"\*/"),       // C, Java, JavaScript
    (r"\(\*", r"\*\)"),     // Pascal, OCaml
    (r#"""""#, r#"""""#),   // Python
    (r"'''", r"'''"),       // Python
    (r"<!--", r"-->"),      // HTML, XML
    (r"\{-", r"-\}"),       // Haskell
    (r"=begin", r"=end"),   // Ruby
    (r"=pod", r"=cut"),     // Perl
    (r"<#", r"#>"),         // PowerShell
    (r"#=", r"=#"),         // Julia
];

/// A compiled `(start, end)` block-comment pattern pair.
#[derive(Debug)]
pub struct BlockPattern {
    pub start: Regex,
    pub end: Regex,
}

/// The ordered fallback pattern set.
///
/// Line patterns are always tried in full before any block pattern.
#[derive(Debug)]
pub struct FallbackPatterns {
    pub line: Vec<Regex>,
    pub block: Vec<BlockPattern>,
}

impl FallbackPatterns {
    /// The process-wide compiled pattern set.
    ///
    /// # Panics
    ///
    /// Panics if a built-in pattern fails to compile, which the unit tests rule out.
    pub fn global() -> &'static FallbackPatterns {
        static PATTERNS: OnceLock<FallbackPatterns> = OnceLock::new();
        PATTERNS.get_or_init(|| Self::compile().expect("built-in fallback patterns are valid"))
    }

    fn compile() -> Result<Self, regex::Error> {
        let line = LINE_PATTERNS
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;

        let block = BLOCK_PATTERNS
            .iter()
            .map(|(start, end)| {
                Ok(BlockPattern {
                    start: Regex::new(start)?,
                    end: Regex::new(end)?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self { line, block })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        let patterns = FallbackPatterns::compile().unwrap();
        assert_eq!(patterns.line.len(), LINE_PATTERNS.len());
        assert_eq!(patterns.block.len(), BLOCK_PATTERNS.len());
    }

    #[test]
    fn test_line_patterns_are_anchored() {
        let patterns = FallbackPatterns::global();
        let hash = &patterns.line[0];
        assert!(hash.is_match("   # comment"));
        assert!(!hash.is_match("x = 1 # trailing"));
    }

    #[test]
    fn test_rem_is_case_insensitive() {
        let rem = &FallbackPatterns::global().line[5];
        assert!(rem.is_match("rem hello"));
        assert!(rem.is_match("REM hello"));
        assert!(!rem.is_match("remark"));
    }

    #[test]
    fn test_bare_rem_is_a_comment() {
        let rem = &FallbackPatterns::global().line[5];
        assert!(rem.is_match("REM"));
        assert!(rem.is_match("  rem"));
        assert!(!rem.is_match("REMOVE"));
    }

    #[test]
    fn test_haskell_braces_are_literal() {
        let haskell = &FallbackPatterns::global().block[5];
        assert!(haskell.start.is_match("{- note"));
        assert!(haskell.end.is_match("note -}"));
    }
}
