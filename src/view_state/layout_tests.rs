//! Tests for the row layout cache.

use super::*;
use crate::surface::HeadlessSurface;
use proptest::prelude::*;

// ===== Test Helpers =====

/// 12px font, 2px spacing: 14px rows, 6px per character.
fn style() -> StyleConfig {
    StyleConfig::new("monospace", 12.0, 2.0)
}

fn rows(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

fn surface() -> HeadlessSurface {
    HeadlessSurface::new(200.0, 20.0)
}

/// Rows starting with '#' are headings and take two lines.
fn heading_height(row: &str, style: &StyleConfig) -> f32 {
    if row.starts_with('#') {
        style.line_height() * 2.0
    } else {
        style.line_height()
    }
}

/// Empty rows collapse to nothing.
fn collapse_empty(row: &str, style: &StyleConfig) -> f32 {
    if row.is_empty() {
        0.0
    } else {
        style.line_height()
    }
}

fn built(texts: &[&str]) -> (LayoutCache, Vec<String>, HeadlessSurface) {
    let rows = rows(texts);
    let mut surface = surface();
    let mut cache = LayoutCache::with_height_calculator(style(), heading_height);
    cache.rebuild_all(&rows, &mut surface);
    (cache, rows, surface)
}

fn assert_contiguous(cache: &LayoutCache) {
    assert_eq!(cache.tops().len(), cache.heights().len());
    if let Some(&first) = cache.tops().first() {
        assert_eq!(first, 0.0);
    }
    for i in 1..cache.len() {
        assert_eq!(cache.row_bottom(i - 1), cache.row_top(i), "gap before row {i}");
    }
}

// ===== rebuild_all =====

#[test]
fn rebuild_empty_document_publishes_zero_size() {
    let mut surface = surface();
    let mut cache = LayoutCache::new(style());
    cache.rebuild_all(&[], &mut surface);

    assert!(cache.is_empty());
    assert_eq!(surface.viewport().scroll_width, 0.0);
    assert_eq!(surface.viewport().scroll_height, 0.0);
}

#[test]
fn rebuild_lays_out_rows_contiguously() {
    let (cache, _, _) = built(&["abc", "a", "abcdef"]);

    assert_eq!(cache.tops(), &[0.0, 14.0, 28.0]);
    assert_eq!(cache.heights(), &[14.0, 14.0, 14.0]);
    assert_contiguous(&cache);
}

#[test]
fn rebuild_publishes_max_width_and_total_height() {
    let (cache, _, surface) = built(&["abc", "a", "abcdef"]);

    assert_eq!(cache.document_width(), 36.0);
    assert_eq!(cache.document_height(), 42.0);
    assert_eq!(surface.viewport().scroll_width, 36.0);
    assert_eq!(surface.viewport().scroll_height, 42.0);
}

#[test]
fn rebuild_measures_every_row_once() {
    let (_, _, surface) = built(&["a", "b", "c", "d"]);
    assert_eq!(surface.measure_calls(), 4);
}

#[test]
fn rebuild_truncates_to_new_row_count() {
    let (mut cache, _, mut surface) = built(&["a", "b", "c", "d", "e"]);

    cache.rebuild_all(&rows(&["x", "y"]), &mut surface);

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.document_height(), 28.0);
}

#[test]
fn rebuild_uses_height_calculator() {
    let (cache, _, _) = built(&["# title", "body", "# section", "body"]);

    assert_eq!(cache.heights(), &[28.0, 14.0, 28.0, 14.0]);
    assert_eq!(cache.tops(), &[0.0, 28.0, 42.0, 70.0]);
    assert_eq!(cache.document_height(), 84.0);
}

#[test]
fn negative_heights_are_clamped_to_zero() {
    let mut surface = surface();
    let mut cache = LayoutCache::with_height_calculator(style(), |_, _| -3.0);
    cache.rebuild_all(&rows(&["a", "b"]), &mut surface);

    assert_eq!(cache.heights(), &[0.0, 0.0]);
    assert_eq!(cache.document_height(), 0.0);
}

#[test]
fn unmeasurable_row_counts_as_zero_width() {
    let (cache, _, _) = built(&["ab", "\u{7}bell"]);

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.document_width(), 12.0);
    assert_eq!(cache.row_top(1), 14.0);
}

// ===== patch_from =====

#[test]
fn patch_with_unchanged_height_touches_nothing() {
    let (mut cache, mut rows, mut surface) = built(&["one", "two", "three", "four"]);
    let tops_before = cache.tops().to_vec();
    let heights_before = cache.heights().to_vec();
    surface.reset_measure_calls();

    rows[2] = "THREE".to_string();
    let update = cache.patch_from(2, &rows, &mut surface);

    assert_eq!(update, LayoutUpdate::Unchanged);
    assert_eq!(cache.tops(), tops_before.as_slice());
    assert_eq!(cache.heights(), heights_before.as_slice());
    assert_eq!(surface.measure_calls(), 1, "only the changed row is measured");
}

#[test]
fn patch_widening_row_publishes_new_width() {
    let (mut cache, mut rows, mut surface) = built(&["ab", "cd"]);

    rows[1] = "cdefghij".to_string();
    cache.patch_from(1, &rows, &mut surface);

    assert_eq!(cache.document_width(), 48.0);
    assert_eq!(surface.viewport().scroll_width, 48.0);
    assert_eq!(surface.viewport().scroll_height, 28.0);
}

#[test]
fn patch_narrowing_row_keeps_running_max_width() {
    let (mut cache, mut rows, mut surface) = built(&["abcdef", "x"]);

    rows[0] = "a".to_string();
    cache.patch_from(0, &rows, &mut surface);

    assert_eq!(cache.document_width(), 36.0);
}

#[test]
fn growing_row_one_of_five_shifts_following_tops() {
    let (mut cache, mut rows, mut surface) = built(&["a", "b", "c", "d", "e"]);
    assert_eq!(cache.tops(), &[0.0, 14.0, 28.0, 42.0, 56.0]);

    rows[1] = "# b".to_string();
    let update = cache.patch_from(1, &rows, &mut surface);

    assert_eq!(update, LayoutUpdate::Relaid { from: 1 });
    assert_eq!(cache.tops(), &[0.0, 14.0, 42.0, 56.0, 70.0]);
    assert_eq!(cache.heights(), &[14.0, 28.0, 14.0, 14.0, 14.0]);
    assert_eq!(cache.document_height(), 84.0);
    assert_eq!(surface.viewport().scroll_height, 84.0);
    assert_contiguous(&cache);
}

#[test]
fn relayout_after_height_change_does_not_remeasure() {
    let (mut cache, mut rows, mut surface) = built(&["a", "b", "c", "d", "e"]);
    surface.reset_measure_calls();

    rows[0] = "# a".to_string();
    cache.patch_from(0, &rows, &mut surface);

    assert_eq!(surface.measure_calls(), 1);
    assert_eq!(cache.tops(), &[0.0, 28.0, 42.0, 56.0, 70.0]);
}

#[test]
fn shrinking_last_row_updates_total_height() {
    let (mut cache, mut rows, mut surface) = built(&["a", "# b"]);

    rows[1] = "b".to_string();
    let update = cache.patch_from(1, &rows, &mut surface);

    assert_eq!(update, LayoutUpdate::Relaid { from: 1 });
    assert_eq!(cache.document_height(), 28.0);
}

#[test]
fn patch_with_stale_index_rebuilds() {
    let (mut cache, rows, mut surface) = built(&["a", "b"]);

    let update = cache.patch_from(7, &rows, &mut surface);

    assert_eq!(update, LayoutUpdate::Rebuilt);
    assert_eq!(cache.len(), 2);
}

#[test]
fn patch_with_changed_row_count_rebuilds() {
    let (mut cache, mut rows, mut surface) = built(&["a", "b"]);

    rows.push("c".to_string());
    let update = cache.patch_from(0, &rows, &mut surface);

    assert_eq!(update, LayoutUpdate::Rebuilt);
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.document_height(), 42.0);
}

#[test]
fn apply_routes_events_to_update_paths() {
    let (mut cache, mut rows, mut surface) = built(&["a", "b"]);

    rows[0] = "# a".to_string();
    assert_eq!(
        cache.apply(DocumentEvent::RowChanged(0), &rows, &mut surface),
        LayoutUpdate::Relaid { from: 0 }
    );
    assert_eq!(
        cache.apply(DocumentEvent::StyleChanged, &rows, &mut surface),
        LayoutUpdate::Rebuilt
    );
    rows.push("c".to_string());
    assert_eq!(
        cache.apply(DocumentEvent::TextChanged, &rows, &mut surface),
        LayoutUpdate::Rebuilt
    );
    assert_eq!(cache.len(), 3);
}

// ===== row_at / visible_range =====

#[test]
fn row_at_applies_containment_correction() {
    let (cache, _, _) = built(&["a", "b", "c"]);

    assert_eq!(cache.row_at(0.0), Some(0));
    assert_eq!(cache.row_at(7.0), Some(0));
    assert_eq!(cache.row_at(10.0), Some(0), "nearest top is 14 but row 0 contains 10");
    assert_eq!(cache.row_at(13.9), Some(0));
    assert_eq!(cache.row_at(14.0), Some(1));
    assert_eq!(cache.row_at(21.0), Some(1));
    assert_eq!(cache.row_at(27.0), Some(1));
}

#[test]
fn row_at_clamps_outside_document() {
    let (cache, _, _) = built(&["a", "b", "c"]);
    assert_eq!(cache.row_at(-50.0), Some(0));
    assert_eq!(cache.row_at(5000.0), Some(2));
}

#[test]
fn row_at_empty_cache_is_none() {
    let cache = LayoutCache::new(style());
    assert_eq!(cache.row_at(0.0), None);
    assert!(cache.visible_range(0.0, 100.0).is_empty());
}

#[test]
fn visible_range_regression_fixture() {
    // Three 14px rows, viewport [10, 30): row 2 starts at 28 < 30.
    let (cache, _, _) = built(&["a", "b", "c"]);
    assert_eq!(cache.visible_range(10.0, 20.0), VisibleRange::new(0, 3));
}

#[test]
fn visible_range_excludes_row_starting_at_viewport_bottom() {
    let (cache, _, _) = built(&["a", "b", "c", "d"]);
    assert_eq!(cache.visible_range(14.0, 14.0), VisibleRange::new(1, 2));
    assert_eq!(cache.visible_range(0.0, 28.0), VisibleRange::new(0, 2));
}

#[test]
fn visible_range_past_end_is_empty() {
    let (cache, _, _) = built(&["a", "b"]);
    assert!(cache.visible_range(28.0, 20.0).is_empty());
    assert!(cache.visible_range(500.0, 20.0).is_empty());
}

#[test]
fn visible_range_skips_zero_height_rows_above_viewport() {
    let mut surface = surface();
    let mut cache = LayoutCache::with_height_calculator(style(), collapse_empty);
    cache.rebuild_all(&rows(&["a", "", "b"]), &mut surface);
    assert_eq!(cache.tops(), &[0.0, 14.0, 14.0]);

    assert_eq!(cache.visible_range(14.0, 10.0), VisibleRange::new(2, 3));
}

#[test]
fn row_at_skips_zero_height_rows() {
    let mut surface = surface();
    let mut cache = LayoutCache::with_height_calculator(style(), collapse_empty);
    cache.rebuild_all(&rows(&["aaa", "", "", "bbbb", ""]), &mut surface);
    assert_eq!(cache.tops(), &[0.0, 14.0, 14.0, 14.0, 28.0]);

    assert_eq!(cache.row_at(10.0), Some(0));
    assert_eq!(cache.row_at(14.0), Some(3));
    assert_eq!(cache.row_at(20.0), Some(3));
    assert_eq!(cache.row_at(27.9), Some(3));
    assert_eq!(cache.row_at(28.0), Some(4), "past the end maps to the last row");
    assert_eq!(cache.row_at(20.0), Some(cache.visible_range(20.0, 5.0).start));
}

#[test]
fn row_at_skips_leading_zero_height_rows() {
    let mut surface = surface();
    let mut cache = LayoutCache::with_height_calculator(style(), collapse_empty);
    cache.rebuild_all(&rows(&["", "", "a"]), &mut surface);

    assert_eq!(cache.row_at(0.0), Some(2));
    assert_eq!(cache.row_at(-3.0), Some(0));
    assert_eq!(cache.visible_range(0.0, 14.0), VisibleRange::new(2, 3));
}

#[test]
fn visible_range_of_zero_height_viewport_is_empty() {
    let (cache, _, _) = built(&["a", "b", "c"]);
    assert!(cache.visible_range(20.0, 0.0).is_empty());
    assert!(cache.visible_range(0.0, 0.0).is_empty());
    assert!(cache.visible_range(20.0, -5.0).is_empty());
}

// ===== Property-based tests =====

fn arb_rows() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("#?[a-z ]{0,12}", 0..40)
}

proptest! {
    /// tops[0] == 0, non-decreasing, contiguous; size equals sum/max.
    #[test]
    fn prop_rebuild_invariants(rows in arb_rows()) {
        let mut surface = surface();
        let mut cache = LayoutCache::with_height_calculator(style(), heading_height);
        cache.rebuild_all(&rows, &mut surface);

        prop_assert_eq!(cache.len(), rows.len());
        if !rows.is_empty() {
            prop_assert_eq!(cache.row_top(0), 0.0);
        }
        for i in 1..cache.len() {
            prop_assert!(cache.row_top(i - 1) <= cache.row_top(i));
            prop_assert_eq!(cache.row_bottom(i - 1), cache.row_top(i));
        }
        prop_assert!(cache.heights().iter().all(|&h| h >= 0.0));

        let height_sum: f32 = cache.heights().iter().sum();
        prop_assert_eq!(surface.viewport().scroll_height, height_sum);
        let max_width = rows.iter().map(|r| r.chars().count() as f32 * 6.0).fold(0.0, f32::max);
        prop_assert_eq!(surface.viewport().scroll_width, max_width);
    }

    /// Patching one row yields the same tops/heights as a full rebuild.
    #[test]
    fn prop_patch_matches_rebuild(
        mut rows in prop::collection::vec("#?[a-z ]{0,12}", 1..40),
        pick in any::<prop::sample::Index>(),
        replacement in "#?[a-z ]{0,12}",
    ) {
        let mut surface = surface();
        let mut cache = LayoutCache::with_height_calculator(style(), heading_height);
        cache.rebuild_all(&rows, &mut surface);
        let index = pick.index(rows.len());
        let prefix_before = cache.tops()[..index].to_vec();

        rows[index] = replacement;
        cache.patch_from(index, &rows, &mut surface);

        let mut fresh_surface = HeadlessSurface::new(200.0, 20.0);
        let mut fresh = LayoutCache::with_height_calculator(style(), heading_height);
        fresh.rebuild_all(&rows, &mut fresh_surface);

        prop_assert_eq!(&cache.tops()[..index], prefix_before.as_slice());
        prop_assert_eq!(cache.tops(), fresh.tops());
        prop_assert_eq!(cache.heights(), fresh.heights());
        prop_assert_eq!(cache.document_height(), fresh.document_height());
        prop_assert!(cache.document_width() >= fresh.document_width());
    }
}
