//! Comment syntax resolution: which markers apply to which file.
//!
//! Every file is keyed by its extension (see [`extension_key`]). A key found
//! in the static table resolves to its [`CommentSyntax`]; any other key
//! resolves to the generic [`FallbackPatterns`] and is reported as
//! unrecognized.

pub mod fallback;
pub mod table;

pub use fallback::{BlockPattern, FallbackPatterns};
pub use table::{lookup, CommentSyntax};

/// Key used for files whose name has no extension.
pub const NO_EXTENSION: &str = "(sem extensão)";

/// File names without a dot extension that still have fixed comment rules.
pub const SPECIAL_FILENAMES: &[&str] = &["Dockerfile", "Makefile"];

/// Comment syntax resolved for one file.
#[derive(Debug, Clone, Copy)]
pub enum ResolvedSyntax {
    /// Literal markers from the syntax table
    Table(&'static CommentSyntax),
    /// Generic regular-expression patterns
    Fallback(&'static FallbackPatterns),
}

impl ResolvedSyntax {
    /// Resolve an extension key (case-insensitive) to its syntax.
    pub fn resolve(key: &str) -> Self {
        match lookup(key) {
            Some(syntax) => Self::Table(syntax),
            None => Self::Fallback(FallbackPatterns::global()),
        }
    }

    /// Whether the key was found in the syntax table.
    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Table(_))
    }
}

/// Compute the extension key of a file name.
///
/// - The last dot segment, lowercased, with its dot: `archive.tar.GZ` → `.gz`
/// - Leading dots do not start an extension: `.bashrc` has none
/// - Special names map to themselves: `makefile` → `Makefile`
/// - Anything else → [`NO_EXTENSION`]
///
/// ```rust
/// use contalinhalib::syntax::{extension_key, NO_EXTENSION};
///
/// assert_eq!(extension_key("Main.PY"), ".py");
/// assert_eq!(extension_key("archive.tar.gz"), ".gz");
/// assert_eq!(extension_key("Makefile"), "Makefile");
/// assert_eq!(extension_key("LICENSE"), NO_EXTENSION);
/// ```
pub fn extension_key(file_name: &str) -> String {
    if let Some(ext) = split_extension(file_name) {
        return ext.to_lowercase();
    }

    SPECIAL_FILENAMES
        .iter()
        .find(|name| name.eq_ignore_ascii_case(file_name))
        .map(|name| name.to_string())
        .unwrap_or_else(|| NO_EXTENSION.to_string())
}

fn split_extension(file_name: &str) -> Option<&str> {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    let dot = file_name[stem_start..].rfind('.')?;
    Some(&file_name[stem_start + dot..])
}
