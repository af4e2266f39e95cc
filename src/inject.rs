//! Synthetic key chords.

use crate::config::DEFAULT_KEY_COMBO_DELAY_MS;
use crate::event::{EventSynthesizer, InputEvent};
use crate::modifier::ModifierSet;
use std::thread;
use std::time::Duration;

/// Sends a key-down/key-up pair with modifier flags.
///
/// The pause between the two halves is the only blocking wait on the event
/// path. It has to be long enough that receiving applications see two
/// distinct events instead of coalescing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyComboInjector {
    delay: Duration,
}

impl Default for KeyComboInjector {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_KEY_COMBO_DELAY_MS))
    }
}

impl KeyComboInjector {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Post `key` down, wait, then post `key` up, both with the same flags.
    ///
    /// A half the host refuses to construct is skipped. Nothing is retried.
    pub fn inject<S: EventSynthesizer>(&self, synth: &S, key: u16, modifiers: ModifierSet) {
        let flags = modifiers.for_delivery().bits();

        let (down, up) = synth.key_events(key);

        match down {
            Some(mut down) => {
                down.set_flags(flags);
                synth.post(&down);
                if !self.delay.is_zero() {
                    thread::sleep(self.delay);
                }
            }
            None => log::debug!("Could not synthesize key-down for key {}", key),
        }

        match up {
            Some(mut up) => {
                up.set_flags(flags);
                synth.post(&up);
            }
            None => log::debug!("Could not synthesize key-up for key {}", key),
        }
    }
}
