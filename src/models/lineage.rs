//! Lineage keys tie generated metadata back to the mapping row and the
//! disaggregation it was generated for.
//!
//! The key is stored in the `description` field as `{rowId}-{aocUid}-{cocUid}`.
//! Metadata UIDs never contain `-`, so the two UIDs are split off from the
//! right and whatever remains is the row id, even when the row id itself
//! contains dashes (`rowId-XXXXXXXXXXX`).

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineageKey {
    pub row_id: String,
    pub aoc_uid: String,
    pub coc_uid: String,
}

impl LineageKey {
    pub fn new(
        row_id: impl Into<String>,
        aoc_uid: impl Into<String>,
        coc_uid: impl Into<String>,
    ) -> Self {
        Self {
            row_id: row_id.into(),
            aoc_uid: aoc_uid.into(),
            coc_uid: coc_uid.into(),
        }
    }

    /// Parse a description, returning `None` for anything that is not a key
    pub fn parse(description: &str) -> Option<Self> {
        description.parse().ok()
    }

    /// Whether `description` is a lineage key of `row_id`
    pub fn belongs_to_row(description: Option<&str>, row_id: &str) -> bool {
        description
            .and_then(Self::parse)
            .is_some_and(|key| key.row_id == row_id)
    }
}

impl FromStr for LineageKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, '-');
        let coc_uid = parts.next().filter(|p| !p.is_empty()).ok_or(())?;
        let aoc_uid = parts.next().filter(|p| !p.is_empty()).ok_or(())?;
        let row_id = parts.next().filter(|p| !p.is_empty()).ok_or(())?;
        Ok(Self::new(row_id, aoc_uid, coc_uid))
    }
}

impl fmt::Display for LineageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.row_id, self.aoc_uid, self.coc_uid)
    }
}

/// Whether `text` mentions `row_id` as a whole token
///
/// Used for names of metadata that carry no lineage key (program indicator
/// groups). The character following the match must not continue the id, so
/// `rowId-abc` does not match inside `rowId-abcd`.
pub fn mentions_row(text: &str, row_id: &str) -> bool {
    if row_id.is_empty() {
        return false;
    }
    let continues_id = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
    text.match_indices(row_id).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + row_id.len()..].chars().next();
        !before.is_some_and(|c| c.is_ascii_alphanumeric()) && !after.is_some_and(continues_id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_row_id_with_dashes() {
        let key = LineageKey::parse("rowId-Ab3dE5gH9jK-aocUid00001-cocUid00001").unwrap();
        assert_eq!(key.row_id, "rowId-Ab3dE5gH9jK");
        assert_eq!(key.aoc_uid, "aocUid00001");
        assert_eq!(key.coc_uid, "cocUid00001");
        assert_eq!(key.to_string(), "rowId-Ab3dE5gH9jK-aocUid00001-cocUid00001");
    }

    #[test]
    fn rejects_free_text() {
        assert!(LineageKey::parse("Number of ANC visits").is_none());
        assert!(LineageKey::parse("a-b").is_none());
        assert!(LineageKey::parse("--").is_none());
    }

    #[test]
    fn row_prefix_is_not_a_match() {
        let description = "rowId-abcd-aoc-coc";
        assert!(LineageKey::belongs_to_row(Some(description), "rowId-abcd"));
        assert!(!LineageKey::belongs_to_row(Some(description), "rowId-abc"));
        assert!(!LineageKey::belongs_to_row(None, "rowId-abcd"));
    }

    #[test]
    fn mentions_row_requires_token_boundary() {
        assert!(mentions_row("piMappingGroup-rowId-abc (generated)", "rowId-abc"));
        assert!(mentions_row("rowId-abc", "rowId-abc"));
        assert!(!mentions_row("piMappingGroup-rowId-abcd", "rowId-abc"));
        assert!(!mentions_row("anything", ""));
    }
}
