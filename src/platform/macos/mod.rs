//! macOS backend: CGEventTap interception and CGEvent synthesis.

mod event;
mod listen;
mod power;

pub use event::{NativeSynthesizer, SyntheticEvent};
pub use listen::NativeTap;

#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXIsProcessTrusted() -> bool;
}

/// Whether the process is trusted for accessibility / input monitoring.
pub fn is_process_trusted() -> bool {
    unsafe { AXIsProcessTrusted() }
}
