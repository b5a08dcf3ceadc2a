// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios across the view, variants, registry and state.

use std::cell::RefCell;
use std::rc::Rc;

use gobcharts_scene::ShapeKind;
use gobcharts_table::{ChartTable, SelectionModel, TableEvent};
use gobcharts_text::TextStyle;
use kurbo::{Point, Rect};
use peniko::color::palette::css;
use peniko::{Brush, Color};

use crate::graph_items::{companion_id, series_id};
use crate::view::{ChartView, LabelKind, SelectionOutcome, SharedSelection, SharedTable};
use crate::{ChartKind, HAlign};

fn shared_table(rows: &[(&str, &str)]) -> SharedTable {
    let table = ChartTable::new();
    let table = Rc::new(RefCell::new(table));
    for (category, value) in rows {
        table.borrow_mut().push_row(*category, *value);
    }
    table
}

fn view_with(kind: ChartKind, rows: &[(&str, &str)]) -> (ChartView, SharedTable, SharedSelection) {
    let table = shared_table(rows);
    let selection = Rc::new(RefCell::new(SelectionModel::new()));
    let mut view = ChartView::new(kind);
    view.attach_model(Rc::clone(&table));
    view.set_selection_model(Rc::clone(&selection));
    view.set_view_rect(Rect::new(0.0, 0.0, 1000.0, 1000.0));
    (view, table, selection)
}

const MIXED_ROWS: &[(&str, &str)] = &[("A", "10"), ("", "5"), ("B", "-3")];

fn solid(brush: &Brush) -> Color {
    match brush {
        Brush::Solid(colour) => *colour,
        other => panic!("expected a solid brush, got {other:?}"),
    }
}

#[test]
fn mixed_rows_scan_to_the_documented_index() {
    let (view, _table, _sel) = view_with(ChartKind::Bar, MIXED_ROWS);
    assert_eq!(view.valid_rows(), &[0, 1, 2]);
    assert_eq!(view.category(0), "A");
    assert_eq!(view.category(1), "Uncategorised");
    assert_eq!(view.category(2), "B");
    assert_eq!(view.value(2), 0.0);
    assert_eq!(view.total_value(), 15.0);
    assert_eq!(view.max_value(), 10.0);
}

#[test]
fn bar_heights_follow_stripped_fractions() {
    let (view, _table, _sel) = view_with(ChartKind::Bar, MIXED_ROWS);
    // 15% margins of a 1000-unit view leave a 700-unit inner square.
    assert_eq!(view.inner_rect(), Rect::new(150.0, 150.0, 850.0, 850.0));

    let scene = view.scene();
    let bar = |row: usize| match scene.item(series_id(row)).unwrap().shape {
        ShapeKind::Rect(r) => r,
        ref other => panic!("expected a bar rect, got {other:?}"),
    };

    let h0 = bar(0).height();
    let h1 = bar(1).height();
    let h2 = bar(2).height();

    // The tallest bar fills the inner height minus the 5% strip offset.
    assert!((h0 - 0.95 * 700.0).abs() < 1e-9);
    // Headroom stripping is linear in the fraction, so 5/15 draws at half
    // the height of 10/15.
    assert!((h0 - 2.0 * h1).abs() < 1e-9);
    // A zero value still renders a one-pixel sliver.
    assert_eq!(h2, 1.0);
    assert_eq!(bar(2).y1, 850.0);

    // Equal columns: inner width / count, minus the 5-unit gap.
    assert!((bar(0).width() - (700.0 / 3.0 - 5.0)).abs() < 1e-9);
}

#[test]
fn bar_legend_matches_scan_order() {
    let (view, _table, _sel) = view_with(ChartKind::Bar, MIXED_ROWS);
    let texts: Vec<&str> = view.legend().iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, ["A - 10", "Uncategorised - 5", "B - 0"]);
}

#[test]
fn pie_wedges_accumulate_span_angles() {
    let (view, _table, _sel) = view_with(ChartKind::Pie, MIXED_ROWS);
    let scene = view.scene();
    let wedge = |row: usize| match scene.item(series_id(row)).unwrap().shape {
        ShapeKind::Segment {
            start_angle,
            span_angle,
            ..
        } => (start_angle, span_angle),
        ref other => panic!("expected a wedge, got {other:?}"),
    };

    assert_eq!(wedge(0), (0, 3840));
    assert_eq!(wedge(1), (3840, 1920));
    assert_eq!(wedge(2), (5760, 0));
}

#[test]
fn pie_needs_no_grid_bar_does() {
    let (pie, _t1, _s1) = view_with(ChartKind::Pie, MIXED_ROWS);
    // 3 labels + 3 wedges.
    assert_eq!(pie.scene().len(), 6);

    let (bar, _t2, _s2) = view_with(ChartKind::Bar, MIXED_ROWS);
    // 3 labels + 2 axis lines + 3 bars.
    assert_eq!(bar.scene().len(), 8);
}

#[test]
fn range_toggle_keeps_colour_assignment_stable() {
    let rows = &[("A", "10"), ("B", "5"), ("C", "3")];
    let (mut view, _table, _sel) = view_with(ChartKind::Pie, rows);

    let colour_of = |view: &ChartView, row: usize| {
        solid(&view.scene().item(series_id(row)).unwrap().fill)
    };

    let full = [
        colour_of(&view, 0),
        colour_of(&view, 1),
        colour_of(&view, 2),
    ];

    view.set_allowed_range(4.0, 20.0);
    assert!(view.scene().item(series_id(2)).is_none(), "C is filtered out");
    assert_eq!(colour_of(&view, 0), full[0]);
    assert_eq!(colour_of(&view, 1), full[1]);

    view.show_total_range();
    view.set_allowed_range(4.0, 20.0);
    assert_eq!(colour_of(&view, 0), full[0]);
    assert_eq!(colour_of(&view, 1), full[1]);
}

#[test]
fn fixed_colour_applies_to_every_item() {
    let (mut view, _table, _sel) = view_with(ChartKind::Pie, MIXED_ROWS);
    view.set_fixed_colour(css::TOMATO);
    for row in 0..3 {
        assert_eq!(
            solid(&view.scene().item(series_id(row)).unwrap().fill),
            css::TOMATO
        );
    }

    view.use_random_colours();
    assert_ne!(
        solid(&view.scene().item(series_id(0)).unwrap().fill),
        solid(&view.scene().item(series_id(1)).unwrap().fill)
    );
}

#[test]
fn line_chart_first_point_has_no_incoming_segment() {
    let (view, _table, _sel) = view_with(ChartKind::Line, &[("A", "0"), ("B", "10")]);
    let scene = view.scene();

    // Both dots exist, even for the zero value.
    assert!(scene.item(series_id(0)).is_some());
    assert!(scene.item(series_id(1)).is_some());

    // Only the second dot has an incoming segment.
    assert!(scene.item(companion_id(0)).is_none());
    let segment = scene.item(companion_id(1)).expect("connecting segment");
    match segment.shape {
        ShapeKind::Line(line) => {
            // The zero-value dot sits on the axis; the segment starts there.
            assert!((line.p0.y - 850.0).abs() < 1e-9);
        }
        ref other => panic!("expected a line, got {other:?}"),
    }
}

#[test]
fn single_hit_selects_ambiguity_clears() {
    let (mut view, _table, selection) = view_with(ChartKind::Pie, MIXED_ROWS);

    // Inside the first wedge (0..240 degrees, counter-clockwise from 3
    // o'clock), just above the centre-right.
    let outcome = view.select_at(Point::new(700.0, 450.0));
    assert_eq!(
        outcome,
        SelectionOutcome::Selected {
            row: 0,
            legend_text: "A - 10".to_owned()
        }
    );
    assert_eq!(view.scene().item(series_id(0)).unwrap().opacity, 0.65);
    assert_eq!(view.scene().item(series_id(1)).unwrap().opacity, 1.0);
    let range = selection.borrow().range().expect("row selected");
    assert_eq!((range.0.row, range.1.row), (0, 0));

    // A miss clears the highlight but keeps the remembered row selected.
    let outcome = view.select_at(Point::new(10.0, 990.0));
    assert_eq!(outcome, SelectionOutcome::Cleared);
    assert_eq!(view.scene().item(series_id(0)).unwrap().opacity, 1.0);
    assert_eq!(selection.borrow().range().unwrap().0.row, 0);
}

#[test]
fn legend_selection_resolves_to_its_row() {
    let (mut view, _table, selection) = view_with(ChartKind::Pie, MIXED_ROWS);
    assert_eq!(view.legend_item_selected("Uncategorised - 5"), Some(1));
    assert_eq!(view.scene().item(series_id(1)).unwrap().opacity, 0.65);
    assert_eq!(selection.borrow().range().unwrap().0.row, 1);
    assert_eq!(view.legend_item_selected("no such entry"), None);
}

#[test]
fn state_round_trip_restores_an_equivalent_view() {
    let (mut view, _table, _sel) = view_with(ChartKind::Bar, MIXED_ROWS);
    view.set_label(
        LabelKind::Header,
        "My Chart",
        TextStyle::new(14.0),
        css::CRIMSON,
        HAlign::Left,
    );
    view.set_vertical_grid_lines(true, 4);
    view.set_horizontal_grid_lines(true, 3);
    view.set_grid_colour(css::SEA_GREEN);
    view.set_allowed_range(2.0, 12.0);

    let xml = view.state_xml(true);

    let (mut restored, table, _sel2) = view_with(ChartKind::Bar, &[]);
    restored.restore_from_xml(&xml, true).expect("restores");

    assert_eq!(restored.capture_state(true), view.capture_state(true));
    assert_eq!(restored.total_value(), 15.0);
    assert_eq!(table.borrow().row_count(), 3);
    assert!(restored.is_within_allowed_range(5.0));
    assert!(!restored.is_within_allowed_range(1.0));

    let texts: Vec<&str> = restored.legend().iter().map(|e| e.text.as_str()).collect();
    // The range filter hides A (10 is in range; 5 in range; 0 out).
    assert_eq!(texts, ["A - 10", "Uncategorised - 5"]);
}

#[test]
fn restore_without_data_leaves_the_model_alone() {
    let (view, _table, _sel) = view_with(ChartKind::Pie, MIXED_ROWS);
    let xml = view.state_xml(false);

    let (mut restored, table, _sel2) = view_with(ChartKind::Pie, &[("Keep", "1")]);
    restored.restore_from_xml(&xml, false).expect("restores");
    assert_eq!(table.borrow().row_count(), 1);
    assert_eq!(restored.valid_row_count(), 1);
}

#[test]
fn restore_hides_axis_labels_for_gridless_kinds() {
    let (view, _table, _sel) = view_with(ChartKind::Pie, MIXED_ROWS);
    let xml = view.state_xml(true);

    let (mut pie, _t, _s) = view_with(ChartKind::Pie, &[]);
    pie.restore_from_xml(&xml, true).expect("restores");
    // The x/y label scene items are invisible for pie charts.
    let x_label_opacity = pie
        .scene()
        .items()
        .filter_map(|(_, item)| match &item.shape {
            ShapeKind::Text(_) => Some(item.opacity),
            _ => None,
        })
        .filter(|o| *o == 0.0)
        .count();
    assert_eq!(x_label_opacity, 2, "both axis labels are hidden");
}

#[test]
fn live_mode_resumes_after_a_restore() {
    let (mut view, table, _sel) = view_with(ChartKind::Bar, MIXED_ROWS);
    let xml = view.state_xml(true);
    view.restore_from_xml(&xml, true).expect("restores");

    // Subsequent model edits flow through normally.
    let event = table.borrow_mut().set_text(0, gobcharts_table::Column::Value, "20");
    view.model_event(event);
    assert_eq!(view.total_value(), 25.0);
    assert_eq!(view.max_value(), 20.0);
}

#[test]
fn events_extend_and_shrink_the_scanned_extent() {
    let (mut view, table, _sel) = view_with(ChartKind::Bar, MIXED_ROWS);

    let event = table.borrow_mut().push_row("D", "7");
    assert_eq!(event, TableEvent::RowsInserted { first_row: 3, last_row: 3 });
    view.model_event(event);
    assert_eq!(view.valid_row_count(), 4);
    assert_eq!(view.total_value(), 22.0);

    let event = table.borrow_mut().remove_rows(3, 3);
    view.model_event(event);
    assert_eq!(view.valid_row_count(), 3);
    assert_eq!(view.total_value(), 15.0);
}
