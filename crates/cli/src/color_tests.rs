// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use yare::parameterized;

fn force_color() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");
}

fn disable_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");
}

#[test]
#[serial]
fn header_produces_ansi_when_color_forced() {
    force_color();

    let result = header("foo");
    assert!(result.contains("\x1b[38;5;74m"), "expected ANSI header color");
    assert!(result.contains("foo"));
    assert!(result.contains("\x1b[0m"), "expected ANSI reset");
}

#[test]
#[serial]
fn context_produces_ansi_when_color_forced() {
    force_color();
    assert!(context("baz").contains("\x1b[38;5;245m"));
}

#[test]
#[serial]
fn helpers_plain_when_no_color() {
    disable_color();

    assert_eq!(header("foo"), "foo");
    assert_eq!(context("baz"), "baz");
    assert_eq!(yellow("warn"), "warn");
    assert_eq!(status("missing"), "missing");
}

#[test]
#[serial]
fn should_colorize_respects_no_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::set_var("COLOR", "1");
    assert!(!should_colorize(), "NO_COLOR=1 should override COLOR=1");
}

#[test]
#[serial]
fn should_colorize_respects_color_force() {
    force_color();
    assert!(should_colorize(), "COLOR=1 should force color on");
}

#[parameterized(
    ok = { "ok", "\x1b[32m" },
    restored = { "restored", "\x1b[32m" },
    stale = { "stale entry", "\x1b[33m" },
    fallback = { "fallback", "\x1b[33m" },
    missing = { "missing: --focused", "\x1b[31m" },
    failed = { "failed", "\x1b[31m" },
)]
fn status_colors_by_first_word(text: &str, code: &str) {
    let result = apply_status(text);
    assert!(result.starts_with(code), "{result:?}");
    assert!(result.contains(text));
}

#[test]
fn unknown_status_is_left_alone() {
    assert_eq!(apply_status("pending"), "pending");
}
