//! # mouse-remapper
//!
//! Mouse button remapping and scroll reversal, applied at the session event
//! tap before input reaches any application.
//!
//! ## Features
//!
//! - Remap any mouse button to another button or to a keyboard shortcut
//! - Reverse wheel and trackpad scrolling independently
//! - Automatic tap recovery after timeouts and system sleep
//! - Declarative JSON configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use mouse_remapper::{Config, InterceptionChannel, Remapper};
//! use mouse_remapper::platform::{NativeSynthesizer, NativeTap};
//!
//! let config = Config::load_or_create(None);
//! let remapper = Remapper::new(&config, NativeSynthesizer::new());
//!
//! for line in remapper.transformer().table().describe() {
//!     println!("{}", line);
//! }
//!
//! InterceptionChannel::new(NativeTap)
//!     .start(remapper)
//!     .expect("failed to start interception");
//! ```
//!
//! ## Architecture
//!
//! The [`Config`] is compiled once into a frozen [`ActionTable`]. The host
//! delivers every subscribed event synchronously to the tap callback, which
//! asks the [`EventTransformer`] for a [`Disposition`]: pass the event on,
//! rewrite it in place, swallow it, or replace it with a synthesized one.
//! Key chords are posted by the [`KeyComboInjector`]. All host specifics sit
//! behind the [`InputEvent`], [`EventSynthesizer`] and [`TapBackend`] traits.

pub mod action;
pub mod channel;
pub mod config;
pub mod error;
pub mod event;
pub mod inject;
pub mod keycode;
pub mod modifier;
pub mod platform;
pub mod transform;

// Re-exports
pub use action::{Action, ActionTable, ConfigIssue};
pub use channel::{InterceptionChannel, Remapper, TapBackend, TapSwitch};
pub use config::{ActionConfig, ButtonMapping, Config};
pub use error::{Error, Result};
pub use event::{
    Disposition, EventKind, EventSynthesizer, InputEvent, Point, ScrollAxis, ScrollDelta,
};
pub use inject::KeyComboInjector;
pub use modifier::ModifierSet;
pub use transform::{EventTransformer, ScrollSettings};
