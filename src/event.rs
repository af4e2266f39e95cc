//! Platform-neutral view of intercepted input events.
//!
//! The remapping core never touches host types directly. Each backend wraps
//! its native events in something implementing [`InputEvent`] and provides an
//! [`EventSynthesizer`] for building and posting new ones.

/// The class of an intercepted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    LeftMouseDown,
    LeftMouseUp,
    RightMouseDown,
    RightMouseUp,
    OtherMouseDown,
    OtherMouseUp,
    ScrollWheel,
    KeyDown,
    KeyUp,
    /// The host suspended the tap because the callback was too slow.
    TapDisabledByTimeout,
    /// The host suspended the tap on behalf of user input policy.
    TapDisabledByUserInput,
    /// Anything the engine does not subscribe to.
    Other,
}

impl EventKind {
    /// Mouse button press of any button class.
    pub fn is_button_down(self) -> bool {
        matches!(
            self,
            EventKind::LeftMouseDown | EventKind::RightMouseDown | EventKind::OtherMouseDown
        )
    }

    /// Mouse button press or release of any button class.
    pub fn is_button(self) -> bool {
        self.is_button_down()
            || matches!(
                self,
                EventKind::LeftMouseUp | EventKind::RightMouseUp | EventKind::OtherMouseUp
            )
    }

    /// Host notification that the tap was switched off.
    pub fn is_tap_disabled(self) -> bool {
        matches!(
            self,
            EventKind::TapDisabledByTimeout | EventKind::TapDisabledByUserInput
        )
    }

    /// Down/up kind for a button id: 0 is left, 1 is right, anything else is
    /// an "other" button.
    pub fn for_button(button: u32, down: bool) -> Self {
        match (button, down) {
            (0, true) => EventKind::LeftMouseDown,
            (0, false) => EventKind::LeftMouseUp,
            (1, true) => EventKind::RightMouseDown,
            (1, false) => EventKind::RightMouseUp,
            (_, true) => EventKind::OtherMouseDown,
            (_, false) => EventKind::OtherMouseUp,
        }
    }
}

/// Screen location in global display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Scroll axis. Vertical is the host's primary axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    Vertical,
    Horizontal,
}

/// Scroll delta on one axis: the integer line delta and the sub-pixel point
/// delta reported alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDelta {
    pub lines: i64,
    pub points: f64,
}

impl ScrollDelta {
    pub const fn new(lines: i64, points: f64) -> Self {
        Self { lines, points }
    }

    /// Both components negated.
    pub fn reversed(self) -> Self {
        Self {
            lines: self.lines.wrapping_neg(),
            points: -self.points,
        }
    }
}

/// Fields of an intercepted event the engine reads or rewrites.
pub trait InputEvent {
    fn kind(&self) -> EventKind;

    /// Raw button-number field (0 = left).
    fn button_number(&self) -> i64;
    fn set_button_number(&mut self, button: i64);

    /// Whether a scroll event comes from a continuous (trackpad) source
    /// rather than discrete wheel steps.
    fn is_continuous(&self) -> bool;
    fn scroll_delta(&self, axis: ScrollAxis) -> ScrollDelta;
    fn set_scroll_delta(&mut self, axis: ScrollAxis, delta: ScrollDelta);

    fn location(&self) -> Point;

    /// Raw modifier flag bits, see [`crate::ModifierSet`].
    fn flags(&self) -> u64;
    fn set_flags(&mut self, flags: u64);
}

/// Host-side construction and delivery of synthetic events.
///
/// Construction may fail; callers fall back instead of treating it as an
/// error.
pub trait EventSynthesizer {
    type Event: InputEvent;

    /// A mouse button event of `kind` at `location` for `button`.
    fn mouse_event(&self, kind: EventKind, location: Point, button: u32) -> Option<Self::Event>;

    /// Key-down and key-up events for a virtual key code, built from one
    /// event source. Either half may be refused.
    fn key_events(&self, key: u16) -> (Option<Self::Event>, Option<Self::Event>);

    /// Post an event into the host's input stream.
    fn post(&self, event: &Self::Event);
}

/// What the tap callback hands back to the host for one event.
#[derive(Debug, PartialEq)]
pub enum Disposition<E> {
    /// Deliver the original event untouched.
    PassThrough,
    /// Deliver the original event, which was modified in place.
    Rewritten,
    /// Drop the event; no application sees it.
    Suppress,
    /// Deliver this freshly synthesized event instead of the original.
    Replace(E),
}

impl<E> Disposition<E> {
    /// Whether the original event object continues to the host.
    pub fn keeps_original(&self) -> bool {
        matches!(self, Disposition::PassThrough | Disposition::Rewritten)
    }
}
