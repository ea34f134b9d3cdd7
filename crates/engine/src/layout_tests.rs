// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use yare::parameterized;

const FRAME: Rect = Rect {
    x: 0.0,
    y: 25.0,
    width: 2560.0,
    height: 1415.0,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[parameterized(
    laptop = { 3024, DisplayMode::Compact },
    just_below = { 3839, DisplayMode::Compact },
    at_threshold = { 3840, DisplayMode::Wide },
    five_k = { 5120, DisplayMode::Wide },
    scenario_5000 = { 5000, DisplayMode::Wide },
)]
fn mode_from_pixel_width(width: u32, expected: DisplayMode) {
    assert_eq!(DisplayMode::for_width(width, 3840), expected);
}

#[test]
fn compact_maximizes_every_role() {
    let rects = compute_layout(
        DisplayMode::Compact,
        FRAME,
        &[Role::Browser, Role::Editor],
        &LayoutConfig::default(),
    )
    .unwrap();
    assert_eq!(rects.len(), 2);
    assert!(rects.values().all(|r| *r == NormalizedRect::FULL));
}

#[test]
fn wide_places_editor_then_browser_with_gap() {
    let config = LayoutConfig::default();
    let rects = compute_layout(DisplayMode::Wide, FRAME, &Role::ALL, &config).unwrap();

    let editor = rects[&Role::Editor];
    let browser = rects[&Role::Browser];
    assert!(approx(editor.x, 0.0));
    assert!(approx(editor.width, 0.55));
    assert!(approx(browser.x, 0.56));
    assert!(approx(browser.width, 0.44));
    assert!(approx(browser.x + browser.width, 1.0));
    assert!(approx(editor.height, 1.0));
}

#[test]
fn wide_justify_right_and_center() {
    let mut config = LayoutConfig {
        editor_width: 0.4,
        browser_width: 0.3,
        gap: 0.02,
        ..LayoutConfig::default()
    };
    config.justify = Justify::Right;
    let right = compute_layout(DisplayMode::Wide, FRAME, &Role::ALL, &config).unwrap();
    let browser = right[&Role::Browser];
    assert!(approx(browser.x + browser.width, 1.0));
    assert!(approx(right[&Role::Editor].x, 0.28));

    config.justify = Justify::Center;
    let center = compute_layout(DisplayMode::Wide, FRAME, &Role::ALL, &config).unwrap();
    assert!(approx(center[&Role::Editor].x, 0.14));
}

#[test]
fn oversized_widths_scale_to_fit() {
    let config = LayoutConfig {
        editor_width: 0.8,
        browser_width: 0.8,
        gap: 0.0,
        ..LayoutConfig::default()
    };
    let rects = compute_layout(DisplayMode::Wide, FRAME, &Role::ALL, &config).unwrap();
    assert!(approx(rects[&Role::Editor].width, 0.5));
    assert!(approx(rects[&Role::Browser].x, 0.5));
}

#[test]
fn height_is_centered_vertically() {
    let config = LayoutConfig {
        height: 0.8,
        ..LayoutConfig::default()
    };
    let rects = compute_layout(DisplayMode::Wide, FRAME, &[Role::Editor], &config).unwrap();
    assert!(approx(rects[&Role::Editor].y, 0.1));
}

#[test]
fn empty_frame_is_an_error() {
    let err = compute_layout(
        DisplayMode::Wide,
        Rect::new(0.0, 0.0, 0.0, 900.0),
        &Role::ALL,
        &LayoutConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, LayoutError::EmptyFrame { .. }));
}

#[test]
fn to_frame_offsets_by_visible_origin() {
    let rect = NormalizedRect {
        x: 0.5,
        y: 0.0,
        width: 0.5,
        height: 1.0,
    };
    assert_eq!(rect.to_frame(FRAME), Rect::new(1280.0, 25.0, 1280.0, 1415.0));
}

proptest! {
    #[test]
    fn layout_is_pure(
        width in 100.0f64..8000.0,
        height in 100.0f64..5000.0,
        editor in 0.05f64..1.0,
        browser in 0.05f64..1.0,
        gap in 0.0f64..0.4,
        wide in any::<bool>(),
    ) {
        let frame = Rect::new(0.0, 0.0, width, height);
        let config = LayoutConfig { editor_width: editor, browser_width: browser, gap, ..LayoutConfig::default() };
        let mode = if wide { DisplayMode::Wide } else { DisplayMode::Compact };
        let first = compute_layout(mode, frame, &Role::ALL, &config).unwrap();
        let second = compute_layout(mode, frame, &Role::ALL, &config).unwrap();
        prop_assert_eq!(&first, &second);
        for rect in first.values() {
            prop_assert!(rect.x >= -1e-9 && rect.x + rect.width <= 1.0 + 1e-9);
            prop_assert!(rect.width > 0.0);
        }
    }
}
