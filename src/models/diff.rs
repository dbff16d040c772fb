//! Diff sequence types: tagged text chunks forming an edit script.

use serde::{Deserialize, Serialize};

/// The kind of a diff chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffTag {
    /// Text present in both revisions.
    Equal,
    /// Text present only in the new revision.
    Insert,
    /// Text present only in the old revision.
    Delete,
}

/// One entry of a diff sequence: a tag and a contiguous text chunk.
///
/// An ordered `Vec<DiffOp>` is a valid edit script: the Equal+Delete
/// projection reconstructs the old text exactly, and the Equal+Insert
/// projection reconstructs the new text exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOp {
    pub tag: DiffTag,
    pub text: String,
}

impl DiffOp {
    pub fn equal(text: impl Into<String>) -> Self {
        Self { tag: DiffTag::Equal, text: text.into() }
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self { tag: DiffTag::Insert, text: text.into() }
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Self { tag: DiffTag::Delete, text: text.into() }
    }
}

/// Reconstruct the old text from a diff sequence (Equal + Delete chunks).
pub fn old_text(ops: &[DiffOp]) -> String {
    ops.iter()
        .filter(|op| op.tag != DiffTag::Insert)
        .map(|op| op.text.as_str())
        .collect()
}

/// Reconstruct the new text from a diff sequence (Equal + Insert chunks).
pub fn new_text(ops: &[DiffOp]) -> String {
    ops.iter()
        .filter(|op| op.tag != DiffTag::Delete)
        .map(|op| op.text.as_str())
        .collect()
}

/// Number of Insert/Delete entries in the sequence.
pub fn mutation_count(ops: &[DiffOp]) -> usize {
    ops.iter().filter(|op| op.tag != DiffTag::Equal).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projections_split_by_tag() {
        let ops = vec![
            DiffOp::equal("The limit is "),
            DiffOp::delete("100"),
            DiffOp::insert("150"),
            DiffOp::equal(" units."),
        ];
        assert_eq!(old_text(&ops), "The limit is 100 units.");
        assert_eq!(new_text(&ops), "The limit is 150 units.");
        assert_eq!(mutation_count(&ops), 2);
    }

    #[test]
    fn empty_sequence_projects_to_empty() {
        assert_eq!(old_text(&[]), "");
        assert_eq!(new_text(&[]), "");
        assert_eq!(mutation_count(&[]), 0);
    }

    #[test]
    fn equal_only_sequence_has_no_mutations() {
        let ops = vec![DiffOp::equal("same text")];
        assert_eq!(old_text(&ops), new_text(&ops));
        assert_eq!(mutation_count(&ops), 0);
    }
}
