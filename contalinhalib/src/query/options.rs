//! Ordering options for the per-extension breakdown.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Column to order extension rows by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderBy {
    /// Extension key (lexicographical)
    Extension,
    /// Number of files
    #[default]
    Files,
    /// Total line count
    Lines,
    /// Size in bytes
    Size,
    /// Blank line count
    Blank,
    /// Comment line count
    Comment,
    /// Code line count
    Code,
    /// Billable line count
    Billable,
}

impl OrderBy {
    /// Names accepted by [`FromStr`], for help text.
    pub const NAMES: &'static [&'static str] = &[
        "extension",
        "files",
        "lines",
        "size",
        "blank",
        "comment",
        "code",
        "billable",
    ];
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extension" | "ext" | "label" => Ok(OrderBy::Extension),
            "files" | "file" => Ok(OrderBy::Files),
            "lines" | "total" => Ok(OrderBy::Lines),
            "size" | "kb" => Ok(OrderBy::Size),
            "blank" | "blanks" => Ok(OrderBy::Blank),
            "comment" | "comments" => Ok(OrderBy::Comment),
            "code" => Ok(OrderBy::Code),
            "billable" => Ok(OrderBy::Billable),
            _ => Err(format!("Unknown order field: {}", s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Smallest first
    Ascending,
    /// Largest first
    #[default]
    Descending,
}

/// Ordering configuration for extension rows.
///
/// Sorting is stable in both directions: rows with equal keys keep the order
/// in which their extension was first seen during the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ordering {
    /// Field to order by
    pub by: OrderBy,
    /// Sort direction
    pub direction: OrderDirection,
}

impl Ordering {
    /// Order by `by`, largest first.
    pub fn by(by: OrderBy) -> Self {
        Self {
            by,
            direction: OrderDirection::Descending,
        }
    }

    /// Order by file count, largest first (default)
    pub fn by_files() -> Self {
        Self::default()
    }

    /// Order by code line count, largest first
    pub fn by_code() -> Self {
        Self::by(OrderBy::Code)
    }

    /// Order by extension name, A-Z
    pub fn by_extension() -> Self {
        Self::by(OrderBy::Extension).ascending()
    }

    /// Set sort direction to ascending
    pub fn ascending(mut self) -> Self {
        self.direction = OrderDirection::Ascending;
        self
    }

    /// Set sort direction to descending
    pub fn descending(mut self) -> Self {
        self.direction = OrderDirection::Descending;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_default() {
        let ordering = Ordering::default();
        assert_eq!(ordering.by, OrderBy::Files);
        assert_eq!(ordering.direction, OrderDirection::Descending);
        assert_eq!(ordering, Ordering::by_files());
    }

    #[test]
    fn test_ordering_builders() {
        assert_eq!(Ordering::by_code().by, OrderBy::Code);
        assert_eq!(
            Ordering::by_extension().direction,
            OrderDirection::Ascending
        );

        let ordering = Ordering::by(OrderBy::Size).ascending();
        assert_eq!(ordering.by, OrderBy::Size);
        assert_eq!(ordering.direction, OrderDirection::Ascending);
        assert_eq!(ordering.descending().direction, OrderDirection::Descending);
    }

    #[test]
    fn test_order_by_from_str() {
        assert_eq!(OrderBy::from_str("files").unwrap(), OrderBy::Files);
        assert_eq!(OrderBy::from_str("EXT").unwrap(), OrderBy::Extension);
        assert_eq!(OrderBy::from_str("lines").unwrap(), OrderBy::Lines);
        assert_eq!(OrderBy::from_str("size").unwrap(), OrderBy::Size);
        assert_eq!(OrderBy::from_str("blanks").unwrap(), OrderBy::Blank);
        assert_eq!(OrderBy::from_str("comment").unwrap(), OrderBy::Comment);
        assert_eq!(OrderBy::from_str("code").unwrap(), OrderBy::Code);
        assert_eq!(OrderBy::from_str("billable").unwrap(), OrderBy::Billable);
        assert!(OrderBy::from_str("tests").is_err());
    }

    #[test]
    fn test_every_listed_name_parses() {
        for name in OrderBy::NAMES {
            assert!(OrderBy::from_str(name).is_ok(), "{name}");
        }
    }
}
