//! Fallback backend for hosts without an event tap implementation.
//!
//! Lets the platform-neutral core build and run its tests everywhere;
//! starting interception fails with [`Error::NotSupported`].

use crate::channel::{Remapper, TapBackend, TapSwitch};
use crate::error::{Error, Result};
use crate::event::{EventKind, EventSynthesizer, InputEvent, Point, ScrollAxis, ScrollDelta};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Uninhabited: no events can be synthesized on this platform.
pub enum SyntheticEvent {}

impl InputEvent for SyntheticEvent {
    fn kind(&self) -> EventKind {
        match *self {}
    }

    fn button_number(&self) -> i64 {
        match *self {}
    }

    fn set_button_number(&mut self, _button: i64) {
        match *self {}
    }

    fn is_continuous(&self) -> bool {
        match *self {}
    }

    fn scroll_delta(&self, _axis: ScrollAxis) -> ScrollDelta {
        match *self {}
    }

    fn set_scroll_delta(&mut self, _axis: ScrollAxis, _delta: ScrollDelta) {
        match *self {}
    }

    fn location(&self) -> Point {
        match *self {}
    }

    fn flags(&self) -> u64 {
        match *self {}
    }

    fn set_flags(&mut self, _flags: u64) {
        match *self {}
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSynthesizer;

impl NativeSynthesizer {
    pub fn new() -> Self {
        Self
    }
}

impl EventSynthesizer for NativeSynthesizer {
    type Event = SyntheticEvent;

    fn mouse_event(&self, _kind: EventKind, _location: Point, _button: u32) -> Option<SyntheticEvent> {
        None
    }

    fn key_events(&self, _key: u16) -> (Option<SyntheticEvent>, Option<SyntheticEvent>) {
        (None, None)
    }

    fn post(&self, event: &SyntheticEvent) {
        match *event {}
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeTap;

impl TapSwitch for NativeTap {
    fn reenable(&self) {}
}

impl TapBackend for NativeTap {
    type Synthesizer = NativeSynthesizer;

    fn is_trusted(&self) -> bool {
        is_process_trusted()
    }

    fn run(&self, _running: &Arc<AtomicBool>, _remapper: Remapper<NativeSynthesizer>) -> Result<()> {
        Err(Error::NotSupported(
            "input interception is only implemented for macOS".into(),
        ))
    }

    fn stop(&self) -> Result<()> {
        Ok(())
    }
}

/// There is no permission gate to check here; `run` reports the real problem.
pub fn is_process_trusted() -> bool {
    true
}
