//! In-memory host used by the integration tests.

#![allow(dead_code)]

use mouse_remapper::{
    Disposition, EventKind, EventSynthesizer, InputEvent, Point, Remapper, Result, ScrollAxis,
    ScrollDelta, TapBackend, TapSwitch,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A host event with every field the engine touches.
#[derive(Debug, Clone, PartialEq)]
pub struct MockEvent {
    pub kind: EventKind,
    pub button: i64,
    pub continuous: bool,
    pub vertical: ScrollDelta,
    pub horizontal: ScrollDelta,
    pub location: Point,
    pub flags: u64,
    pub key: Option<u16>,
}

impl MockEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            button: 0,
            continuous: false,
            vertical: ScrollDelta::default(),
            horizontal: ScrollDelta::default(),
            location: Point::new(0.0, 0.0),
            flags: 0,
            key: None,
        }
    }

    pub fn button(kind: EventKind, button: i64) -> Self {
        Self {
            button,
            location: Point::new(640.5, 360.25),
            ..Self::new(kind)
        }
    }

    pub fn press(button: i64) -> Self {
        Self::button(EventKind::for_button(button as u32, true), button)
    }

    pub fn release(button: i64) -> Self {
        Self::button(EventKind::for_button(button as u32, false), button)
    }

    /// Wheel (`continuous == false`) or trackpad scroll.
    pub fn scroll(continuous: bool, lines: i64, points: f64) -> Self {
        Self {
            continuous,
            vertical: ScrollDelta::new(lines, points),
            horizontal: ScrollDelta::new(2, 7.5),
            location: Point::new(100.0, 200.0),
            flags: 0x0010_0000,
            ..Self::new(EventKind::ScrollWheel)
        }
    }

    pub fn with_flags(mut self, flags: u64) -> Self {
        self.flags = flags;
        self
    }
}

impl InputEvent for MockEvent {
    fn kind(&self) -> EventKind {
        self.kind
    }

    fn button_number(&self) -> i64 {
        self.button
    }

    fn set_button_number(&mut self, button: i64) {
        self.button = button;
    }

    fn is_continuous(&self) -> bool {
        self.continuous
    }

    fn scroll_delta(&self, axis: ScrollAxis) -> ScrollDelta {
        match axis {
            ScrollAxis::Vertical => self.vertical,
            ScrollAxis::Horizontal => self.horizontal,
        }
    }

    fn set_scroll_delta(&mut self, axis: ScrollAxis, delta: ScrollDelta) {
        match axis {
            ScrollAxis::Vertical => self.vertical = delta,
            ScrollAxis::Horizontal => self.horizontal = delta,
        }
    }

    fn location(&self) -> Point {
        self.location
    }

    fn flags(&self) -> u64 {
        self.flags
    }

    fn set_flags(&mut self, flags: u64) {
        self.flags = flags;
    }
}

/// A posted event and when it was posted.
#[derive(Debug, Clone)]
pub struct Posted {
    pub event: MockEvent,
    pub at: Instant,
}

/// Records everything posted. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct MockSynthesizer {
    log: Arc<Mutex<Vec<Posted>>>,
    key_sources: Arc<AtomicUsize>,
    pub refuse_mouse: bool,
    pub refuse_key_down: bool,
    pub refuse_key_up: bool,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing_mouse() -> Self {
        Self {
            refuse_mouse: true,
            ..Self::default()
        }
    }

    pub fn refusing_key_down() -> Self {
        Self {
            refuse_key_down: true,
            ..Self::default()
        }
    }

    pub fn refusing_key_up() -> Self {
        Self {
            refuse_key_up: true,
            ..Self::default()
        }
    }

    pub fn posted(&self) -> Vec<Posted> {
        self.log.lock().unwrap().clone()
    }

    pub fn posted_events(&self) -> Vec<MockEvent> {
        self.posted().into_iter().map(|p| p.event).collect()
    }

    /// How many times a key event pair was requested from the host.
    pub fn key_sources(&self) -> usize {
        self.key_sources.load(Ordering::SeqCst)
    }
}

impl EventSynthesizer for MockSynthesizer {
    type Event = MockEvent;

    fn mouse_event(&self, kind: EventKind, location: Point, button: u32) -> Option<MockEvent> {
        if self.refuse_mouse {
            return None;
        }
        Some(MockEvent {
            location,
            // The host only knows the button class; the number is stamped
            // by the caller.
            button: if button <= 1 { button as i64 } else { 2 },
            ..MockEvent::new(kind)
        })
    }

    fn key_events(&self, key: u16) -> (Option<MockEvent>, Option<MockEvent>) {
        self.key_sources.fetch_add(1, Ordering::SeqCst);
        let make = |kind, refused: bool| {
            (!refused).then(|| MockEvent {
                key: Some(key),
                ..MockEvent::new(kind)
            })
        };
        (
            make(EventKind::KeyDown, self.refuse_key_down),
            make(EventKind::KeyUp, self.refuse_key_up),
        )
    }

    fn post(&self, event: &MockEvent) {
        self.log.lock().unwrap().push(Posted {
            event: event.clone(),
            at: Instant::now(),
        });
    }
}

/// Counts re-enable requests.
#[derive(Debug, Default)]
pub struct CountingSwitch {
    pub count: AtomicUsize,
}

impl TapSwitch for CountingSwitch {
    fn reenable(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// What the host would do with one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The original event (possibly rewritten) continues.
    Delivered(MockEvent),
    Suppressed,
    Replaced(MockEvent),
}

pub fn outcome(event: MockEvent, disposition: Disposition<MockEvent>) -> Outcome {
    match disposition {
        d if d.keeps_original() => Outcome::Delivered(event),
        Disposition::Replace(replacement) => Outcome::Replaced(replacement),
        _ => Outcome::Suppressed,
    }
}

/// One scripted host occurrence.
#[derive(Debug, Clone)]
pub enum Step {
    Event(MockEvent),
    /// The system woke from sleep.
    Wake,
}

impl From<MockEvent> for Step {
    fn from(event: MockEvent) -> Self {
        Step::Event(event)
    }
}

/// Backend that feeds a fixed script through the remapper, then blocks
/// until stopped when `block` is set.
#[derive(Debug, Default)]
pub struct ScriptedTap {
    pub trusted: bool,
    pub block: bool,
    pub script: Mutex<Vec<Step>>,
    pub outcomes: Mutex<Vec<Outcome>>,
    pub reenabled: AtomicUsize,
    pub runs: AtomicUsize,
    pub stops: AtomicUsize,
    pub entered: AtomicBool,
}

impl ScriptedTap {
    pub fn trusted(script: Vec<MockEvent>) -> Self {
        Self::with_steps(script.into_iter().map(Step::from).collect())
    }

    pub fn with_steps(steps: Vec<Step>) -> Self {
        Self {
            trusted: true,
            script: Mutex::new(steps),
            ..Self::default()
        }
    }

    pub fn blocking() -> Self {
        Self {
            trusted: true,
            block: true,
            ..Self::default()
        }
    }

    pub fn untrusted() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl TapSwitch for ScriptedTap {
    fn reenable(&self) {
        self.reenabled.fetch_add(1, Ordering::SeqCst);
    }
}

impl TapBackend for ScriptedTap {
    type Synthesizer = MockSynthesizer;

    fn is_trusted(&self) -> bool {
        self.trusted
    }

    fn run(&self, running: &Arc<AtomicBool>, remapper: Remapper<MockSynthesizer>) -> Result<()> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        self.entered.store(true, Ordering::SeqCst);

        let script: Vec<Step> = self.script.lock().unwrap().drain(..).collect();
        for step in script {
            match step {
                Step::Event(mut event) => {
                    let disposition = remapper.handle(&mut event, self);
                    self.outcomes.lock().unwrap().push(outcome(event, disposition));
                }
                Step::Wake => remapper.wake(self),
            }
        }

        if self.block {
            let deadline = Instant::now() + Duration::from_secs(5);
            while running.load(Ordering::SeqCst) && Instant::now() < deadline {
                std::thread::sleep(Duration::from_millis(1));
            }
        }
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
