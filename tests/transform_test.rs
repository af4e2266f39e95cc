// Event transformation against an in-memory host.
//
// Run with: cargo test --test transform_test

mod common;

use common::{MockEvent, MockSynthesizer, Outcome, outcome};
use mouse_remapper::{
    ActionConfig, ButtonMapping, Config, EventKind, EventTransformer, KeyComboInjector,
    ModifierSet, ScrollDelta,
};
use std::time::Duration;

fn config(reverse_mouse: bool, reverse_trackpad: bool, mappings: Vec<(u32, ActionConfig)>) -> Config {
    Config {
        reverse_mouse_scroll: reverse_mouse,
        reverse_trackpad_scroll: reverse_trackpad,
        button_mappings: mappings
            .into_iter()
            .map(|(button, action)| ButtonMapping { button, action })
            .collect(),
        key_combo_delay_ms: 0,
    }
}

fn run(config: &Config, synth: &MockSynthesizer, event: MockEvent) -> Outcome {
    let transformer = EventTransformer::from_config(config);
    let injector = KeyComboInjector::new(Duration::ZERO);
    let mut event = event;
    let disposition = transformer.transform(&mut event, synth, &injector);
    outcome(event, disposition)
}

#[test]
fn test_wheel_reversed_trackpad_untouched() {
    let config = config(true, false, vec![]);
    let synth = MockSynthesizer::new();

    let wheel = MockEvent::scroll(false, 3, 3.0);
    let Outcome::Delivered(out) = run(&config, &synth, wheel.clone()) else {
        panic!("wheel event should be delivered");
    };
    assert_eq!(out.vertical, ScrollDelta::new(-3, -3.0));

    let trackpad = MockEvent::scroll(true, 3, 3.0);
    assert_eq!(
        run(&config, &synth, trackpad.clone()),
        Outcome::Delivered(trackpad)
    );
    assert!(synth.posted().is_empty());
}

#[test]
fn test_trackpad_only_reversal() {
    let config = config(false, true, vec![]);
    let synth = MockSynthesizer::new();

    let wheel = MockEvent::scroll(false, -1, -0.5);
    assert_eq!(run(&config, &synth, wheel.clone()), Outcome::Delivered(wheel));

    let Outcome::Delivered(out) = run(&config, &synth, MockEvent::scroll(true, -4, -17.25)) else {
        panic!("trackpad event should be delivered");
    };
    assert_eq!(out.vertical, ScrollDelta::new(4, 17.25));
}

#[test]
fn test_reversal_only_touches_vertical_axis() {
    let config = config(true, true, vec![]);
    let synth = MockSynthesizer::new();

    for (continuous, lines, points) in [(false, 1, 0.75), (true, -12, -40.0), (false, 0, 0.0)] {
        let input = MockEvent::scroll(continuous, lines, points);
        let Outcome::Delivered(out) = run(&config, &synth, input.clone()) else {
            panic!("scroll event should be delivered");
        };
        assert_eq!(out.vertical.lines, -lines);
        assert_eq!(out.vertical.points, -points);
        assert_eq!(out.horizontal, input.horizontal);
        assert_eq!(out.location, input.location);
        assert_eq!(out.flags, input.flags);
        assert_eq!(out.kind, input.kind);
        assert_eq!(out.continuous, input.continuous);
    }
}

#[test]
fn test_unmapped_button_passes_through() {
    let config = config(true, false, vec![(3, ActionConfig::mouse(1))]);
    let synth = MockSynthesizer::new();

    let event = MockEvent::press(2);
    assert_eq!(run(&config, &synth, event.clone()), Outcome::Delivered(event));
}

#[test]
fn test_passthrough_action() {
    let config = config(true, false, vec![(0, ActionConfig::passthrough())]);
    let synth = MockSynthesizer::new();

    let event = MockEvent::press(0);
    assert_eq!(run(&config, &synth, event.clone()), Outcome::Delivered(event));
}

#[test]
fn test_remap_other_button_to_right() {
    let config = config(true, false, vec![(2, ActionConfig::mouse(1))]);
    let synth = MockSynthesizer::new();

    let press = MockEvent::press(2).with_flags(0x0002_0000);
    let Outcome::Replaced(down) = run(&config, &synth, press.clone()) else {
        panic!("press should be replaced");
    };
    assert_eq!(down.kind, EventKind::RightMouseDown);
    assert_eq!(down.button, 1);
    assert_eq!(down.location, press.location);
    assert_eq!(down.flags, press.flags);

    let Outcome::Replaced(up) = run(&config, &synth, MockEvent::release(2)) else {
        panic!("release should be replaced");
    };
    assert_eq!(up.kind, EventKind::RightMouseUp);
    assert!(synth.posted().is_empty());
}

#[test]
fn test_remap_to_other_button_stamps_number() {
    let config = config(true, false, vec![(0, ActionConfig::mouse(4))]);
    let synth = MockSynthesizer::new();

    let Outcome::Replaced(down) = run(&config, &synth, MockEvent::press(0)) else {
        panic!("press should be replaced");
    };
    assert_eq!(down.kind, EventKind::OtherMouseDown);
    assert_eq!(down.button, 4);

    let Outcome::Replaced(up) = run(&config, &synth, MockEvent::release(0)) else {
        panic!("release should be replaced");
    };
    assert_eq!(up.kind, EventKind::OtherMouseUp);
    assert_eq!(up.button, 4);
}

#[test]
fn test_remap_falls_back_when_synthesis_refused() {
    let config = config(true, false, vec![(3, ActionConfig::mouse(0))]);
    let synth = MockSynthesizer::refusing_mouse();

    let event = MockEvent::press(3);
    assert_eq!(run(&config, &synth, event.clone()), Outcome::Delivered(event));
}

#[test]
fn test_key_combo_suppresses_both_transitions() {
    let config = config(true, false, vec![(3, ActionConfig::key(124, &["control"]))]);
    let synth = MockSynthesizer::new();

    assert_eq!(run(&config, &synth, MockEvent::press(3)), Outcome::Suppressed);
    assert_eq!(synth.posted().len(), 2);

    assert_eq!(run(&config, &synth, MockEvent::release(3)), Outcome::Suppressed);
    assert_eq!(synth.posted().len(), 2, "release must not inject anything");
}

#[test]
fn test_key_combo_scenario_ctrl_right_arrow() {
    let config = config(true, false, vec![(3, ActionConfig::key(124, &["control"]))]);
    let synth = MockSynthesizer::new();

    assert_eq!(run(&config, &synth, MockEvent::press(3)), Outcome::Suppressed);

    let posted = synth.posted_events();
    assert_eq!(posted.len(), 2);
    assert_eq!(posted[0].kind, EventKind::KeyDown);
    assert_eq!(posted[1].kind, EventKind::KeyUp);
    for event in &posted {
        assert_eq!(event.key, Some(124));
        let flags = ModifierSet::from_bits_truncate(event.flags);
        assert!(flags.contains(ModifierSet::CONTROL));
        assert!(flags.contains(ModifierSet::SECONDARY_FN));
    }
}

#[test]
fn test_non_button_events_pass_through() {
    let config = config(true, true, vec![(0, ActionConfig::mouse(1))]);
    let synth = MockSynthesizer::new();

    for kind in [EventKind::KeyDown, EventKind::Other] {
        let event = MockEvent::new(kind);
        assert_eq!(run(&config, &synth, event.clone()), Outcome::Delivered(event));
    }
}

#[test]
fn test_disablement_events_are_not_transformed() {
    let config = config(true, true, vec![(0, ActionConfig::mouse(1))]);
    let synth = MockSynthesizer::new();

    let event = MockEvent::new(EventKind::TapDisabledByTimeout);
    assert_eq!(run(&config, &synth, event.clone()), Outcome::Delivered(event));
}

#[test]
fn test_negative_button_number_passes_through() {
    let config = config(true, false, vec![(0, ActionConfig::mouse(1))]);
    let synth = MockSynthesizer::new();

    let event = MockEvent::button(EventKind::OtherMouseDown, -1);
    assert_eq!(run(&config, &synth, event.clone()), Outcome::Delivered(event));
}

#[test]
fn test_invalid_entries_leave_buttons_unmapped() {
    let mut broken = ActionConfig::key(0, &[]);
    broken.key_code = None;
    let config = config(true, false, vec![(3, broken)]);
    let synth = MockSynthesizer::new();

    let event = MockEvent::press(3);
    assert_eq!(run(&config, &synth, event.clone()), Outcome::Delivered(event));
    assert!(synth.posted().is_empty());
}
