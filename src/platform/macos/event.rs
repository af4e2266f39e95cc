//! CGEvent wrappers for the platform-neutral event traits.

#![allow(unused_unsafe)]

use crate::event::{EventKind, EventSynthesizer, InputEvent, Point, ScrollAxis, ScrollDelta};
use objc2_core_foundation::{CFRetained, CGPoint};
use objc2_core_graphics::{
    CGEvent, CGEventField, CGEventFlags, CGEventSource, CGEventSourceStateID, CGEventTapLocation,
    CGEventType, CGMouseButton,
};

/// Map a host event type onto the engine's event classes.
pub(super) fn kind_from_cg(event_type: CGEventType) -> EventKind {
    match event_type {
        CGEventType::LeftMouseDown => EventKind::LeftMouseDown,
        CGEventType::LeftMouseUp => EventKind::LeftMouseUp,
        CGEventType::RightMouseDown => EventKind::RightMouseDown,
        CGEventType::RightMouseUp => EventKind::RightMouseUp,
        CGEventType::OtherMouseDown => EventKind::OtherMouseDown,
        CGEventType::OtherMouseUp => EventKind::OtherMouseUp,
        CGEventType::ScrollWheel => EventKind::ScrollWheel,
        CGEventType::KeyDown => EventKind::KeyDown,
        CGEventType::KeyUp => EventKind::KeyUp,
        CGEventType::TapDisabledByTimeout => EventKind::TapDisabledByTimeout,
        CGEventType::TapDisabledByUserInput => EventKind::TapDisabledByUserInput,
        _ => EventKind::Other,
    }
}

fn mouse_type(kind: EventKind) -> Option<CGEventType> {
    let event_type = match kind {
        EventKind::LeftMouseDown => CGEventType::LeftMouseDown,
        EventKind::LeftMouseUp => CGEventType::LeftMouseUp,
        EventKind::RightMouseDown => CGEventType::RightMouseDown,
        EventKind::RightMouseUp => CGEventType::RightMouseUp,
        EventKind::OtherMouseDown => CGEventType::OtherMouseDown,
        EventKind::OtherMouseUp => CGEventType::OtherMouseUp,
        _ => return None,
    };
    Some(event_type)
}

fn axis_fields(axis: ScrollAxis) -> (CGEventField, CGEventField) {
    match axis {
        ScrollAxis::Vertical => (
            CGEventField::ScrollWheelEventDeltaAxis1,
            CGEventField::ScrollWheelEventPointDeltaAxis1,
        ),
        ScrollAxis::Horizontal => (
            CGEventField::ScrollWheelEventDeltaAxis2,
            CGEventField::ScrollWheelEventPointDeltaAxis2,
        ),
    }
}

/// Implements [`InputEvent`] for a wrapper with `kind` and `cg()`.
macro_rules! impl_input_event {
    ($ty:ty) => {
        impl InputEvent for $ty {
            fn kind(&self) -> EventKind {
                self.kind
            }

            fn button_number(&self) -> i64 {
                unsafe {
                    CGEvent::integer_value_field(
                        Some(self.cg()),
                        CGEventField::MouseEventButtonNumber,
                    )
                }
            }

            fn set_button_number(&mut self, button: i64) {
                unsafe {
                    CGEvent::set_integer_value_field(
                        Some(self.cg()),
                        CGEventField::MouseEventButtonNumber,
                        button,
                    )
                }
            }

            fn is_continuous(&self) -> bool {
                unsafe {
                    CGEvent::integer_value_field(
                        Some(self.cg()),
                        CGEventField::ScrollWheelEventIsContinuous,
                    ) != 0
                }
            }

            fn scroll_delta(&self, axis: ScrollAxis) -> ScrollDelta {
                let (lines_field, points_field) = axis_fields(axis);
                unsafe {
                    ScrollDelta::new(
                        CGEvent::integer_value_field(Some(self.cg()), lines_field),
                        CGEvent::double_value_field(Some(self.cg()), points_field),
                    )
                }
            }

            fn set_scroll_delta(&mut self, axis: ScrollAxis, delta: ScrollDelta) {
                let (lines_field, points_field) = axis_fields(axis);
                unsafe {
                    CGEvent::set_integer_value_field(Some(self.cg()), lines_field, delta.lines);
                    CGEvent::set_double_value_field(Some(self.cg()), points_field, delta.points);
                }
            }

            fn location(&self) -> Point {
                let point = unsafe { CGEvent::location(Some(self.cg())) };
                Point::new(point.x as f64, point.y as f64)
            }

            fn flags(&self) -> u64 {
                unsafe { CGEvent::flags(Some(self.cg())).0 }
            }

            fn set_flags(&mut self, flags: u64) {
                unsafe { CGEvent::set_flags(Some(self.cg()), CGEventFlags(flags)) }
            }
        }
    };
}

/// An event delivered to the tap callback, borrowed for the callback's
/// duration. Writes go straight to the host's event.
pub(super) struct TapEvent<'a> {
    kind: EventKind,
    event: &'a CGEvent,
}

impl<'a> TapEvent<'a> {
    pub(super) fn new(event_type: CGEventType, event: &'a CGEvent) -> Self {
        Self {
            kind: kind_from_cg(event_type),
            event,
        }
    }

    fn cg(&self) -> &CGEvent {
        self.event
    }
}

impl_input_event!(TapEvent<'_>);

/// A freshly constructed event owned by the engine until handed to the host.
pub struct SyntheticEvent {
    kind: EventKind,
    event: CFRetained<CGEvent>,
}

impl SyntheticEvent {
    /// Give up ownership; the host releases the event after delivery.
    pub(super) fn into_raw(self) -> *mut CGEvent {
        CFRetained::into_raw(self.event).as_ptr()
    }

    fn cg(&self) -> &CGEvent {
        &self.event
    }
}

impl_input_event!(SyntheticEvent);

/// Builds and posts CGEvents.
///
/// Both halves of a key chord come from one HID-system-state source,
/// matching what hardware produces. Replacement mouse events are built without a source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSynthesizer;

impl NativeSynthesizer {
    pub fn new() -> Self {
        Self
    }
}

impl EventSynthesizer for NativeSynthesizer {
    type Event = SyntheticEvent;

    fn mouse_event(&self, kind: EventKind, location: Point, button: u32) -> Option<SyntheticEvent> {
        let event_type = mouse_type(kind)?;
        let point = CGPoint {
            x: location.x as _,
            y: location.y as _,
        };
        let event =
            unsafe { CGEvent::new_mouse_event(None, event_type, point, CGMouseButton(button)) }?;
        Some(SyntheticEvent { kind, event })
    }

    fn key_events(&self, key: u16) -> (Option<SyntheticEvent>, Option<SyntheticEvent>) {
        let source = unsafe { CGEventSource::new(CGEventSourceStateID::HIDSystemState) };
        let make = |kind: EventKind, down: bool| {
            let event = unsafe { CGEvent::new_keyboard_event(source.as_deref(), key, down) }?;
            Some(SyntheticEvent { kind, event })
        };
        (make(EventKind::KeyDown, true), make(EventKind::KeyUp, false))
    }

    fn post(&self, event: &SyntheticEvent) {
        unsafe { CGEvent::post(CGEventTapLocation::HIDEventTap, Some(&event.event)) }
    }
}
