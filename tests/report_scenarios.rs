//! Scenario tests over the diff-to-report projections: round-trip
//! invariants, view/summary agreement, and budget truncation.

use docdelta::constants::TRUNCATION_MARKER;
use docdelta::diff::DiffEngine;
use docdelta::models::diff::{mutation_count, new_text, old_text};
use docdelta::models::{DiffOp, Side};
use docdelta::render::{highlight, summary};

#[tokio::test]
async fn diff_round_trips_for_arbitrary_revisions() {
    let engine = DiffEngine::default();
    let cases = [
        ("", ""),
        ("", "only new"),
        ("only old", ""),
        ("identical", "identical"),
        (
            "# 1 Scope\n\nThe limit is 100 units.\n\n| Name | Limit |",
            "# 1 Scope\n\nThe limit is 150 units.\n\n| Name | Limit |",
        ),
        ("completely different", "no overlap whatsoever"),
    ];
    for (old, new) in cases {
        let ops = engine.compare(old, new).await;
        assert_eq!(old_text(&ops), old);
        assert_eq!(new_text(&ops), new);
    }
}

#[tokio::test]
async fn identical_documents_produce_no_mutations() {
    let engine = DiffEngine::default();
    let text = "same document body\nwith two lines";
    let ops = engine.compare(text, text).await;
    assert_eq!(mutation_count(&ops), 0);
}

#[tokio::test]
async fn limit_change_scenario_flows_through_summary_and_views() {
    let engine = DiffEngine::default();
    let ops = engine
        .compare("The limit is 100 units.", "The limit is 150 units.")
        .await;

    let ai_input = summary::for_ai(&ops, 3000);
    assert!(ai_input.contains("[content removed]: 100"));
    assert!(ai_input.contains("[content added]: 150"));

    let old_view = highlight::view(&ops, Side::Old);
    let new_view = highlight::view(&ops, Side::New);
    assert!(old_view.contains(r#"<span class="del">100</span>"#));
    assert!(!old_view.contains("150"));
    assert!(new_view.contains(r#"<span class="ins">150</span>"#));
    assert!(!new_view.contains("100"));
}

#[tokio::test]
async fn views_agree_on_equal_content_and_exclude_the_opposite_tag() {
    let engine = DiffEngine::default();
    let ops = engine
        .compare("keep one\nkeep two\nold tail", "keep one\nkeep two\nnew tail")
        .await;

    let old_view = highlight::view(&ops, Side::Old);
    let new_view = highlight::view(&ops, Side::New);

    let strip = |view: &str| {
        view.replace(r#"<span class="del">"#, "")
            .replace(r#"<span class="ins">"#, "")
            .replace("</span>", "")
    };
    // Equal content renders identically; only the highlighted middles differ.
    assert!(strip(&old_view).starts_with("keep one<br>keep two<br>"));
    assert!(strip(&new_view).starts_with("keep one<br>keep two<br>"));
    assert!(!old_view.contains("ins"));
    assert!(!new_view.contains("del"));
}

#[test]
fn tight_budget_truncates_with_the_fixed_marker() {
    let ops = vec![DiffOp::insert("x".repeat(50))];
    let text = summary::for_ai(&ops, 10);
    assert!(text.ends_with(TRUNCATION_MARKER));
    // Nothing past the over-budget chunk is processed.
    assert_eq!(text.matches(summary::ADDED_LABEL).count(), 1);
}
