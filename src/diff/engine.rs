//! Character diff with word-level coalescing and a soft deadline.
//!
//! The comparison itself is delegated to `dissimilar` (the Rust port of
//! the diff-match-patch algorithm family, semantic cleanup included). A
//! post-pass widens substitutions to word boundaries so a one-character
//! edit inside a word reads as a whole-word replacement. The wall-clock
//! budget bounds the comparison; on expiry the engine returns a coarse
//! prefix/suffix script instead of blocking. Less optimal, still a
//! valid edit script.

use std::time::Duration;

use dissimilar::Chunk;

use crate::constants::DIFF_TIMEOUT_SECS;
use crate::models::{DiffOp, DiffTag};

/// Computes diff sequences between two normalized texts.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    timeout: Duration,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new(Duration::from_secs(DIFF_TIMEOUT_SECS))
    }
}

impl DiffEngine {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Compare two texts and return an edit script.
    ///
    /// Never fails: a timed-out or panicked comparison degrades to the
    /// coarse fallback. The result always satisfies the round-trip
    /// invariant (Equal+Delete reconstructs `old`, Equal+Insert
    /// reconstructs `new`).
    pub async fn compare(&self, old: &str, new: &str) -> Vec<DiffOp> {
        if old == new {
            return if old.is_empty() {
                Vec::new()
            } else {
                vec![DiffOp::equal(old)]
            };
        }

        let (old_owned, new_owned) = (old.to_string(), new.to_string());
        let task =
            tokio::task::spawn_blocking(move || diff_chunks(&old_owned, &new_owned));

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(ops)) => ops,
            // Deadline expired (the worker finishes in the background and
            // its result is dropped) or the worker died.
            _ => coarse_diff(old, new),
        }
    }
}

/// Run the library diff and coalesce fragments into word-sized chunks.
fn diff_chunks(old: &str, new: &str) -> Vec<DiffOp> {
    let ops = dissimilar::diff(old, new)
        .into_iter()
        .map(|chunk| match chunk {
            Chunk::Equal(text) => DiffOp::equal(text),
            Chunk::Delete(text) => DiffOp::delete(text),
            Chunk::Insert(text) => DiffOp::insert(text),
        })
        .collect();
    coalesce_words(ops)
}

/// Widen substitutions to word boundaries.
///
/// A run of Delete/Insert chunks flanked by Equal text that ends or
/// starts mid-word absorbs the adjacent word fragments into both sides
/// of the substitution, so `100 -> 150` is reported whole rather than as
/// the single differing digit. Runs containing only one tag (pure
/// insertion or deletion) are left alone; widening those would
/// manufacture edits on the untouched side.
fn coalesce_words(ops: Vec<DiffOp>) -> Vec<DiffOp> {
    let mut out: Vec<DiffOp> = Vec::with_capacity(ops.len());
    let mut i = 0;

    while i < ops.len() {
        if ops[i].tag == DiffTag::Equal {
            push_merged(&mut out, ops[i].clone());
            i += 1;
            continue;
        }

        // Collect the whole mutation run.
        let mut deleted = String::new();
        let mut inserted = String::new();
        while i < ops.len() && ops[i].tag != DiffTag::Equal {
            match ops[i].tag {
                DiffTag::Delete => deleted.push_str(&ops[i].text),
                DiffTag::Insert => inserted.push_str(&ops[i].text),
                DiffTag::Equal => unreachable!(),
            }
            i += 1;
        }

        if !deleted.is_empty() && !inserted.is_empty() {
            // Pull the tail of the preceding Equal back to a word boundary.
            if let Some(prev) = out.last_mut() {
                if prev.tag == DiffTag::Equal {
                    let keep = word_boundary_before_end(&prev.text);
                    let tail = prev.text.split_off(keep);
                    if !tail.is_empty() {
                        deleted.insert_str(0, &tail);
                        inserted.insert_str(0, &tail);
                    }
                    if prev.text.is_empty() {
                        out.pop();
                    }
                }
            }
            // Pull the head of the following Equal forward likewise.
            if i < ops.len() && ops[i].tag == DiffTag::Equal {
                let split = word_boundary_after_start(&ops[i].text);
                if split > 0 {
                    let head = &ops[i].text[..split];
                    deleted.push_str(head);
                    inserted.push_str(head);
                    let rest = ops[i].text[split..].to_string();
                    if rest.is_empty() {
                        i += 1;
                    } else {
                        // Replace in place; the loop will emit it next.
                        let mut op = ops[i].clone();
                        op.text = rest;
                        push_merged(&mut out, DiffOp::delete(std::mem::take(&mut deleted)));
                        push_merged(&mut out, DiffOp::insert(std::mem::take(&mut inserted)));
                        push_merged(&mut out, op);
                        i += 1;
                        continue;
                    }
                }
            }
        }

        if !deleted.is_empty() {
            push_merged(&mut out, DiffOp::delete(deleted));
        }
        if !inserted.is_empty() {
            push_merged(&mut out, DiffOp::insert(inserted));
        }
    }

    out
}

/// Append an op, merging with a trailing op of the same tag.
fn push_merged(out: &mut Vec<DiffOp>, op: DiffOp) {
    if op.text.is_empty() {
        return;
    }
    if let Some(last) = out.last_mut() {
        if last.tag == op.tag {
            last.text.push_str(&op.text);
            return;
        }
    }
    out.push(op);
}

/// Byte offset of the word boundary closest to the end of `text`: the
/// position just after the last whitespace character. Returns the full
/// length (no fragment to move) when `text` ends on whitespace, or zero
/// only if the whole text is one unbroken word, in which case the
/// caller absorbs all of it.
fn word_boundary_before_end(text: &str) -> usize {
    match text.char_indices().rev().find(|(_, c)| c.is_whitespace()) {
        Some((idx, c)) => idx + c.len_utf8(),
        None => 0,
    }
}

/// Byte offset of the word boundary closest to the start of `text`: the
/// position of the first whitespace character.
fn word_boundary_after_start(text: &str) -> usize {
    match text.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((idx, _)) => idx,
        None => text.len(),
    }
}

/// Cheap fallback: trim the common prefix and suffix on char boundaries
/// and report the middles as one deletion and one insertion.
fn coarse_diff(old: &str, new: &str) -> Vec<DiffOp> {
    let prefix = common_prefix_len(old, new);
    let suffix = common_suffix_len(&old[prefix..], &new[prefix..]);

    let mut ops = Vec::new();
    if prefix > 0 {
        ops.push(DiffOp::equal(&old[..prefix]));
    }
    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];
    if !old_mid.is_empty() {
        ops.push(DiffOp::delete(old_mid));
    }
    if !new_mid.is_empty() {
        ops.push(DiffOp::insert(new_mid));
    }
    if suffix > 0 {
        ops.push(DiffOp::equal(&old[old.len() - suffix..]));
    }
    ops
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            break;
        }
        len += ca.len_utf8();
    }
    len
}

fn common_suffix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (ca, cb) in a.chars().rev().zip(b.chars().rev()) {
        if ca != cb {
            break;
        }
        len += ca.len_utf8();
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::diff::{mutation_count, new_text, old_text};
    use pretty_assertions::assert_eq;

    fn assert_round_trip(ops: &[DiffOp], old: &str, new: &str) {
        assert_eq!(old_text(ops), old, "old projection must reconstruct old");
        assert_eq!(new_text(ops), new, "new projection must reconstruct new");
    }

    #[tokio::test]
    async fn identical_texts_yield_single_equal() {
        let engine = DiffEngine::default();
        let ops = engine.compare("same", "same").await;
        assert_eq!(ops, vec![DiffOp::equal("same")]);
    }

    #[tokio::test]
    async fn both_empty_yields_empty_sequence() {
        let engine = DiffEngine::default();
        assert!(engine.compare("", "").await.is_empty());
    }

    #[tokio::test]
    async fn empty_old_is_pure_insertion() {
        let engine = DiffEngine::default();
        let ops = engine.compare("", "brand new").await;
        assert_eq!(ops, vec![DiffOp::insert("brand new")]);
    }

    #[tokio::test]
    async fn empty_new_is_pure_deletion() {
        let engine = DiffEngine::default();
        let ops = engine.compare("all gone", "").await;
        assert_eq!(ops, vec![DiffOp::delete("all gone")]);
    }

    #[tokio::test]
    async fn numeric_substitution_widens_to_the_whole_number() {
        let engine = DiffEngine::default();
        let old = "The limit is 100 units.";
        let new = "The limit is 150 units.";
        let ops = engine.compare(old, new).await;

        assert_round_trip(&ops, old, new);
        assert_eq!(
            ops,
            vec![
                DiffOp::equal("The limit is "),
                DiffOp::delete("100"),
                DiffOp::insert("150"),
                DiffOp::equal(" units."),
            ]
        );
    }

    #[tokio::test]
    async fn whitespace_only_changes_are_still_reported() {
        let engine = DiffEngine::default();
        let ops = engine.compare("a b", "a  b").await;
        assert_round_trip(&ops, "a b", "a  b");
        assert!(mutation_count(&ops) > 0);
    }

    #[tokio::test]
    async fn round_trip_holds_for_larger_rewrites() {
        let engine = DiffEngine::default();
        let cases = [
            ("", "added"),
            ("removed", ""),
            ("shared prefix, old tail", "shared prefix, new ending"),
            ("entirely different", "nothing in common here"),
            ("multi\nline\ntext", "multi\nline\nrevised text"),
            ("unicode: naïve café", "unicode: naïve cafés"),
        ];
        for (old, new) in cases {
            let ops = engine.compare(old, new).await;
            assert_round_trip(&ops, old, new);
        }
    }

    #[tokio::test]
    async fn no_adjacent_ops_share_a_tag() {
        let engine = DiffEngine::default();
        let ops = engine
            .compare("alpha beta gamma delta", "alpha BETA gamma DELTA")
            .await;
        for pair in ops.windows(2) {
            assert_ne!(pair[0].tag, pair[1].tag, "ops must be coalesced: {ops:?}");
        }
    }

    #[tokio::test]
    async fn expired_deadline_degrades_to_a_valid_coarse_script() {
        let engine = DiffEngine::new(Duration::ZERO);
        let old = "start middle-old end";
        let new = "start middle-new end";
        let ops = engine.compare(old, new).await;
        assert_round_trip(&ops, old, new);
    }

    #[test]
    fn coarse_diff_trims_prefix_and_suffix() {
        let ops = coarse_diff("abc OLD xyz", "abc NEW xyz");
        assert_eq!(
            ops,
            vec![
                DiffOp::equal("abc "),
                DiffOp::delete("OLD"),
                DiffOp::insert("NEW"),
                DiffOp::equal(" xyz"),
            ]
        );
    }

    #[test]
    fn coarse_diff_handles_containment() {
        let ops = coarse_diff("ab", "axb");
        assert_round_trip(&ops, "ab", "axb");
    }

    #[test]
    fn word_boundaries_respect_utf8() {
        assert_eq!(word_boundary_before_end("café über"), "café ".len());
        assert_eq!(word_boundary_after_start("naïve rest"), "naïve".len());
        assert_eq!(word_boundary_before_end("oneword"), 0);
        assert_eq!(word_boundary_after_start("oneword"), "oneword".len());
    }

    #[test]
    fn coalesce_merges_fragmented_runs() {
        let ops = vec![
            DiffOp::equal("keep "),
            DiffOp::delete("a"),
            DiffOp::insert("b"),
            DiffOp::delete("c"),
            DiffOp::insert("d"),
            DiffOp::equal(" tail"),
        ];
        let merged = coalesce_words(ops);
        assert_eq!(
            merged,
            vec![
                DiffOp::equal("keep "),
                DiffOp::delete("ac"),
                DiffOp::insert("bd"),
                DiffOp::equal(" tail"),
            ]
        );
    }
}
