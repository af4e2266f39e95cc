//! Interception channel lifecycle.
//!
//! [`InterceptionChannel`] owns the `Stopped`/`Running` state and drives a
//! [`TapBackend`], the platform seam that creates the OS-level tap and runs
//! the host loop. Every delivered event goes through [`Remapper::handle`] and
//! every system wake through [`Remapper::wake`]; both end in the same
//! [`TapSwitch::reenable`].
//!
//! # Example
//!
//! ```no_run
//! use mouse_remapper::{Config, InterceptionChannel, Remapper};
//! use mouse_remapper::platform::{NativeSynthesizer, NativeTap};
//!
//! let config = Config::default();
//! let channel = InterceptionChannel::new(NativeTap);
//! let remapper = Remapper::new(&config, NativeSynthesizer::new());
//!
//! // Blocks until `channel.stop()` is called from another thread.
//! channel.start(remapper).expect("failed to start interception");
//! ```

use crate::config::Config;
use crate::error::{Error, Result};
use crate::event::{Disposition, EventKind, EventSynthesizer, InputEvent};
use crate::inject::KeyComboInjector;
use crate::transform::EventTransformer;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Something that can switch a suspended tap back on.
///
/// Re-enabling is idempotent; calling it on a tap that is already enabled
/// has no effect.
pub trait TapSwitch {
    fn reenable(&self);
}

/// Platform backend owning the OS-level tap handle.
pub trait TapBackend: TapSwitch + Send + Sync {
    type Synthesizer: EventSynthesizer + Send + Sync + 'static;

    /// Whether the process may monitor input.
    fn is_trusted(&self) -> bool;

    /// Create and enable the tap, then block in the host loop until
    /// [`TapBackend::stop`] is called or `running` is cleared.
    ///
    /// Host wake notifications are forwarded to [`Remapper::wake`].
    fn run(&self, running: &Arc<AtomicBool>, remapper: Remapper<Self::Synthesizer>) -> Result<()>;

    /// Disable and release the tap and wake the blocked [`TapBackend::run`].
    ///
    /// May be called from any thread, and while a callback is in flight.
    fn stop(&self) -> Result<()>;
}

/// Everything the tap callback needs, bundled and read-only.
pub struct Remapper<S> {
    transformer: EventTransformer,
    injector: KeyComboInjector,
    synth: S,
}

impl<S: EventSynthesizer> Remapper<S> {
    /// Compile `config` and pair it with the host synthesizer.
    pub fn new(config: &Config, synth: S) -> Self {
        Self::with_parts(
            EventTransformer::from_config(config),
            KeyComboInjector::new(config.key_combo_delay()),
            synth,
        )
    }

    pub fn with_parts(transformer: EventTransformer, injector: KeyComboInjector, synth: S) -> Self {
        Self {
            transformer,
            injector,
            synth,
        }
    }

    pub fn transformer(&self) -> &EventTransformer {
        &self.transformer
    }

    /// Handle one delivered event.
    ///
    /// Disablement notifications re-enable the tap and pass through; all
    /// other events go to the transformer.
    pub fn handle<E, T>(&self, event: &mut E, tap: &T) -> Disposition<S::Event>
    where
        E: InputEvent,
        T: TapSwitch + ?Sized,
    {
        let kind = event.kind();
        if kind.is_tap_disabled() {
            let reason = match kind {
                EventKind::TapDisabledByTimeout => "timeout",
                _ => "user input",
            };
            log::warn!("Event tap was disabled ({}), re-enabling...", reason);
            tap.reenable();
            return Disposition::PassThrough;
        }

        self.transformer.transform(event, &self.synth, &self.injector)
    }

    /// The host woke from sleep. The tap may have been dropped without any
    /// disablement event, so it is forced back on.
    pub fn wake<T: TapSwitch + ?Sized>(&self, tap: &T) {
        log::debug!("System woke from sleep, re-enabling event tap");
        tap.reenable();
    }
}

/// The process-wide input interception channel.
pub struct InterceptionChannel<B: TapBackend> {
    backend: B,
    running: Arc<AtomicBool>,
}

impl<B: TapBackend> InterceptionChannel<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Acquire the tap and block in the host loop until [`Self::stop`].
    ///
    /// Fails without entering the loop when the channel is already running,
    /// when the process lacks input-monitoring permission, or when the host
    /// refuses to create the tap.
    pub fn start(&self, remapper: Remapper<B::Synthesizer>) -> Result<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyRunning);
        }

        if !self.backend.is_trusted() {
            self.running.store(false, Ordering::SeqCst);
            return Err(Error::PermissionDenied(
                "input monitoring is not granted. Allow this program under \
                 System Settings > Privacy & Security > Accessibility"
                    .into(),
            ));
        }

        let result = self.backend.run(&self.running, remapper);

        self.running.store(false, Ordering::SeqCst);
        result
    }

    /// Tear the channel down. Safe to call from another thread and more than
    /// once; stopping a stopped channel is a no-op.
    pub fn stop(&self) -> Result<()> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        self.backend.stop()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: TapBackend> Drop for InterceptionChannel<B> {
    fn drop(&mut self) {
        if self.is_running() {
            let _ = self.stop();
        }
    }
}
