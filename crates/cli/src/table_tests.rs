// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn render_to_string(table: &Table) -> String {
    let mut buf = Vec::new();
    table.render(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn empty_table_prints_nothing() {
    let table = Table::plain(vec![Column::left("ID"), Column::left("NAME")]);
    assert_eq!(render_to_string(&table), "");
}

#[test]
fn columns_pad_to_widest_cell_except_the_last() {
    let mut table = Table::plain(vec![
        Column::left("ID"),
        Column::left("WORKSPACE"),
        Column::left("TAG"),
    ]);
    table.row(vec!["demo".into(), "ap-demo".into(), "AP:demo".into()]);
    table.row(vec!["agent-panel".into(), "ap-agent-panel".into(), "AP:agent-panel".into()]);
    let out = render_to_string(&table);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "ID           WORKSPACE       TAG");
    assert_eq!(lines[1], "demo         ap-demo         AP:demo");
    assert_eq!(lines[2], "agent-panel  ap-agent-panel  AP:agent-panel");
}

#[test]
fn header_sets_minimum_width() {
    let mut table = Table::plain(vec![Column::left("WORKSPACE"), Column::left("X")]);
    table.row(vec!["a".into(), "b".into()]);
    let out = render_to_string(&table);
    assert_eq!(out.lines().nth(1), Some("a          b"));
}

#[test]
fn max_width_keeps_the_tail() {
    let mut table = Table::plain(vec![Column::left("PATH").with_max(8), Column::left("ID")]);
    table.row(vec!["/Users/me/src/demo".into(), "demo".into()]);
    let out = render_to_string(&table);
    assert_eq!(out.lines().nth(1), Some("…rc/demo  demo"));
}

#[test]
fn short_values_are_not_truncated() {
    assert_eq!(fit("demo", Some(8)), "demo");
    assert_eq!(fit("demo", None), "demo");
}

#[test]
fn muted_and_status_apply_ansi_when_colored() {
    let mut table = Table::colored(vec![Column::muted("TAG"), Column::status("OPEN")]);
    table.row(vec!["AP:demo".into(), "active".into()]);
    let out = render_to_string(&table);

    assert!(out.contains("\x1b[38;5;240m"), "{out:?}");
    assert!(out.contains("\x1b[32mactive"), "{out:?}");
    assert!(out.contains("\x1b[38;5;74m"), "header color in {out:?}");
}

#[test]
fn no_ansi_when_plain() {
    let mut table = Table::plain(vec![Column::muted("TAG"), Column::status("OPEN")]);
    table.row(vec!["AP:demo".into(), "active".into()]);
    assert!(!render_to_string(&table).contains("\x1b["));
}
