//! Per-event remapping decisions.

use crate::action::{Action, ActionTable};
use crate::config::Config;
use crate::event::{Disposition, EventKind, EventSynthesizer, InputEvent, ScrollAxis};
use crate::inject::KeyComboInjector;

/// Which scroll sources get their vertical axis reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollSettings {
    /// Discrete wheel steps.
    pub reverse_mouse: bool,
    /// Continuous (trackpad) scrolling.
    pub reverse_trackpad: bool,
}

impl ScrollSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            reverse_mouse: config.reverse_mouse_scroll,
            reverse_trackpad: config.reverse_trackpad_scroll,
        }
    }

    /// Reverse flag for a scroll source.
    #[inline]
    pub fn should_reverse(&self, continuous: bool) -> bool {
        if continuous {
            self.reverse_trackpad
        } else {
            self.reverse_mouse
        }
    }
}

/// Decides what happens to each intercepted event.
///
/// Holds only read-only state, so one instance can serve every callback
/// invocation without locking.
#[derive(Debug, Clone, Default)]
pub struct EventTransformer {
    table: ActionTable,
    scroll: ScrollSettings,
}

impl EventTransformer {
    pub fn new(table: ActionTable, scroll: ScrollSettings) -> Self {
        Self { table, scroll }
    }

    /// Build the action table from `config`, logging any entry problems.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ActionTable::from_config(config),
            ScrollSettings::from_config(config),
        )
    }

    pub fn table(&self) -> &ActionTable {
        &self.table
    }

    pub fn scroll(&self) -> ScrollSettings {
        self.scroll
    }

    /// Classify and transform one event.
    ///
    /// Scroll events may be rewritten in place. Button events are looked up
    /// by their button number and either passed through, replaced by a
    /// synthesized button event, or swallowed while a key chord is sent on
    /// press. Everything else passes through.
    pub fn transform<E, S>(
        &self,
        event: &mut E,
        synth: &S,
        injector: &KeyComboInjector,
    ) -> Disposition<S::Event>
    where
        E: InputEvent,
        S: EventSynthesizer,
    {
        let kind = event.kind();

        if kind == EventKind::ScrollWheel {
            return self.transform_scroll(event);
        }

        if !kind.is_button() {
            return Disposition::PassThrough;
        }

        let Ok(button) = u32::try_from(event.button_number()) else {
            return Disposition::PassThrough;
        };
        let Some(action) = self.table.get(button) else {
            return Disposition::PassThrough;
        };

        let is_down = kind.is_button_down();
        match *action {
            Action::PassThrough => Disposition::PassThrough,
            Action::RemapToButton(target) => remap_button(event, synth, target, is_down),
            Action::SendKeyCombo { key, modifiers } => {
                if is_down {
                    injector.inject(synth, key, modifiers);
                }
                Disposition::Suppress
            }
        }
    }

    fn transform_scroll<E: InputEvent, T>(&self, event: &mut E) -> Disposition<T> {
        if !self.scroll.should_reverse(event.is_continuous()) {
            return Disposition::PassThrough;
        }
        let delta = event.scroll_delta(ScrollAxis::Vertical);
        event.set_scroll_delta(ScrollAxis::Vertical, delta.reversed());
        Disposition::Rewritten
    }
}

fn remap_button<E, S>(event: &E, synth: &S, target: u32, is_down: bool) -> Disposition<S::Event>
where
    E: InputEvent,
    S: EventSynthesizer,
{
    let kind = EventKind::for_button(target, is_down);
    match synth.mouse_event(kind, event.location(), target) {
        Some(mut replacement) => {
            replacement.set_flags(event.flags());
            replacement.set_button_number(i64::from(target));
            Disposition::Replace(replacement)
        }
        None => {
            log::debug!("Could not synthesize {:?} for button {}, passing original", kind, target);
            Disposition::PassThrough
        }
    }
}
