//! Platform-specific implementations.
//!
//! Each backend exports the same names: [`NativeTap`] (the
//! [`crate::channel::TapBackend`]), [`NativeSynthesizer`], [`SyntheticEvent`]
//! and [`is_process_trusted`].

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
pub use macos::*;

#[cfg(not(target_os = "macos"))]
mod unsupported;
#[cfg(not(target_os = "macos"))]
pub use unsupported::*;
