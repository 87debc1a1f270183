//! Static comment syntax table keyed by file extension.
//!
//! Keys are lowercased extensions with their leading dot (`.py`), or the
//! lowercased form of a special file name (`makefile`). The table is built
//! once on first use and never mutated.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

/// Comment markers recognized for one file type.
///
/// `line` markers match at the start of a line after leading whitespace is
/// trimmed. `block` pairs are `(start, end)` delimiters searched anywhere in
/// the line. Both are tried in declaration order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommentSyntax {
    /// Line-comment markers
    pub line: &'static [&'static str],
    /// Block-comment `(start, end)` delimiter pairs
    pub block: &'static [(&'static str, &'static str)],
}

impl CommentSyntax {
    const fn new(
        line: &'static [&'static str],
        block: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { line, block }
    }
}

const C_STYLE: CommentSyntax = CommentSyntax::new(&["//"], &[("/*", "*/")]);
const HASH: CommentSyntax = CommentSyntax::new(&["#"], &[]);
const MARKUP: CommentSyntax = CommentSyntax::new(&[], &[("<!--", "-->")]);
const SEMICOLON: CommentSyntax = CommentSyntax::new(&[";"], &[]);
const COBOL: CommentSyntax = CommentSyntax::new(&["*"], &[]);
const PERL: CommentSyntax = CommentSyntax::new(&["#"], &[("=pod", "=cut")]);
const BATCH: CommentSyntax = CommentSyntax::new(&["REM", "::"], &[]);

const ENTRIES: &[(&str, CommentSyntax)] = &[
    (
        ".py",
        CommentSyntax::new(&["#"], &[("\"\"\"", "\"\"\""), ("'''", "'''")]),
    ),
    (".js", C_STYLE),
    (".ts", C_STYLE),
    (".jsx", C_STYLE),
    (".tsx", C_STYLE),
    (".html", MARKUP),
    (".htm", MARKUP),
    (".xml", MARKUP),
    (".svg", MARKUP),
    (".css", CommentSyntax::new(&[], &[("/*", "*/")])),
    (".scss", C_STYLE),
    (".sass", C_STYLE),
    (".less", C_STYLE),
    (".c", C_STYLE),
    (".cpp", C_STYLE),
    (".h", C_STYLE),
    (".hpp", C_STYLE),
    (".cs", C_STYLE),
    (".java", C_STYLE),
    (".kt", C_STYLE),
    (".sh", HASH),
    (".bash", HASH),
    (".zsh", HASH),
    (".ps1", CommentSyntax::new(&["#"], &[("<#", "#>")])),
    (".rb", CommentSyntax::new(&["#"], &[("=begin", "=end")])),
    (".pl", PERL),
    (".pm", PERL),
    (".php", CommentSyntax::new(&["//", "#"], &[("/*", "*/")])),
    (".sql", CommentSyntax::new(&["--"], &[("/*", "*/")])),
    (".lisp", SEMICOLON),
    (".clj", SEMICOLON),
    (".hs", CommentSyntax::new(&["--"], &[("{-", "-}")])),
    (".lua", CommentSyntax::new(&["--"], &[("--[[", "]]")])),
    (".go", C_STYLE),
    (".rs", C_STYLE),
    (".cob", COBOL),
    (".cbl", COBOL),
    (".cpy", COBOL),
    (".esf", COBOL),
    (".cics", COBOL),
    (".cicis", COBOL),
    (".jcl", COBOL),
    (".asm", SEMICOLON),
    (".s", CommentSyntax::new(&[";", "#"], &[])),
    (".pas", CommentSyntax::new(&["//"], &[("{", "}"), ("(*", "*)")])),
    (".f", CommentSyntax::new(&["!", "C"], &[])),
    (".f90", CommentSyntax::new(&["!"], &[])),
    (".yml", HASH),
    (".yaml", HASH),
    // Markdown has no comment syntax: every non-blank line is code.
    (".md", CommentSyntax::new(&[], &[])),
    (".r", HASH),
    (".swift", C_STYLE),
    (".dart", C_STYLE),
    (".groovy", C_STYLE),
    (".scala", C_STYLE),
    (".erl", CommentSyntax::new(&["%"], &[])),
    (".ex", HASH),
    (".exs", HASH),
    (".jl", CommentSyntax::new(&["#"], &[("#=", "=#")])),
    ("dockerfile", HASH),
    ("makefile", HASH),
    (".mk", HASH),
    (".bat", BATCH),
    (".cmd", BATCH),
    (".asp", CommentSyntax::new(&["'", "Rem"], &[])),
];

fn table() -> &'static HashMap<&'static str, CommentSyntax> {
    static TABLE: OnceLock<HashMap<&'static str, CommentSyntax>> = OnceLock::new();
    TABLE.get_or_init(|| ENTRIES.iter().copied().collect())
}

/// Look up the comment syntax for an extension key, ignoring case.
///
/// ```rust
/// use contalinhalib::syntax::lookup;
///
/// assert_eq!(lookup(".PY"), lookup(".py"));
/// assert!(lookup("Makefile").is_some());
/// assert!(lookup(".unknown").is_none());
/// ```
pub fn lookup(key: &str) -> Option<&'static CommentSyntax> {
    table().get(key.to_lowercase().as_str())
}
