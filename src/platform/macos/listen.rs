//! Session-level interception using CGEventTap.

#![allow(improper_ctypes_definitions)]
#![allow(unsafe_op_in_unsafe_fn)]

use super::event::{NativeSynthesizer, TapEvent};
use super::power::PowerObserver;
use crate::channel::{Remapper, TapBackend, TapSwitch};
use crate::error::{Error, Result};
use crate::event::Disposition;
use core::ptr::NonNull;
use objc2_core_foundation::{
    CFMachPort, CFRetained, CFRunLoop, CFRunLoopSource, kCFRunLoopCommonModes,
};
use objc2_core_graphics::{
    CGEvent, CGEventMask, CGEventTapCallBack, CGEventTapLocation, CGEventTapOptions,
    CGEventTapPlacement, CGEventTapProxy, CGEventType,
};
use objc2_foundation::NSAutoreleasePool;
use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};
use std::ptr::null_mut;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Remapper consulted by the callback. Installed before the tap exists and
/// cleared after the run loop exits; never written while the tap is live.
static REMAPPER: RwLock<Option<Remapper<NativeSynthesizer>>> = RwLock::new(None);

/// Live tap handle, shared between the run loop thread, wake notifications
/// and whichever thread calls `stop`.
static ACTIVE_TAP: Mutex<Option<ActiveTap>> = Mutex::new(None);

#[link(name = "Cocoa", kind = "framework")]
unsafe extern "C" {}

/// Button down/up for every button class plus the scroll wheel.
///
/// The two tap-disabled notifications have no mask bit; the host delivers
/// them to every active tap.
const EVENT_MASK: CGEventMask = (1 << CGEventType::LeftMouseDown.0)
    | (1 << CGEventType::LeftMouseUp.0)
    | (1 << CGEventType::RightMouseDown.0)
    | (1 << CGEventType::RightMouseUp.0)
    | (1 << CGEventType::OtherMouseDown.0)
    | (1 << CGEventType::OtherMouseUp.0)
    | (1 << CGEventType::ScrollWheel.0);

/// Everything needed to tear the tap down again.
struct ActiveTap {
    tap: CFRetained<CFMachPort>,
    source: CFRetained<CFRunLoopSource>,
    run_loop: CFRetained<CFRunLoop>,
    power: PowerObserver,
}

// Safety: the CF objects here are only used through thread-safe CF calls
// (tap enable, run loop source removal, run loop stop, port invalidation)
// and access is serialized by the ACTIVE_TAP mutex.
unsafe impl Send for ActiveTap {}

impl ActiveTap {
    fn teardown(self) {
        unsafe {
            CGEvent::tap_enable(&self.tap, false);
            self.run_loop
                .remove_source(Some(&self.source), kCFRunLoopCommonModes);
            CFMachPort::invalidate(&self.tap);
        }
        self.power.unregister();
        self.run_loop.stop();
    }
}

fn take_active_tap() -> Option<ActiveTap> {
    match ACTIVE_TAP.lock() {
        Ok(mut guard) => guard.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    }
}

/// The CGEventTap callback.
unsafe extern "C-unwind" fn tap_callback(
    _proxy: CGEventTapProxy,
    event_type: CGEventType,
    cg_event: NonNull<CGEvent>,
    _user_info: *mut c_void,
) -> *mut CGEvent {
    let original = cg_event.as_ptr();

    // A panic must never unwind into the host's dispatch path.
    panic::catch_unwind(AssertUnwindSafe(|| {
        let Ok(guard) = REMAPPER.read() else {
            return original;
        };
        let Some(remapper) = guard.as_ref() else {
            return original;
        };

        let mut event = TapEvent::new(event_type, unsafe { cg_event.as_ref() });
        match remapper.handle(&mut event, &NativeTap) {
            disposition if disposition.keeps_original() => original,
            Disposition::Replace(replacement) => replacement.into_raw(),
            _ => null_mut(),
        }
    }))
    .unwrap_or(original)
}

/// Workspace wake notification handler.
fn on_wake() {
    if let Ok(guard) = REMAPPER.read()
        && let Some(remapper) = guard.as_ref()
    {
        remapper.wake(&NativeTap);
    }
}

/// Create the tap, attach it to the current run loop and block in it.
unsafe fn run_tap_loop(running: &AtomicBool) -> Result<()> {
    let _pool = NSAutoreleasePool::new();

    let callback: CGEventTapCallBack = Some(tap_callback);
    let tap = CGEvent::tap_create(
        CGEventTapLocation::SessionEventTap,
        CGEventTapPlacement::HeadInsertEventTap,
        CGEventTapOptions::Default,
        EVENT_MASK,
        callback,
        null_mut(),
    )
    .ok_or_else(|| {
        Error::TapCreateFailed(
            "the host refused the event tap. Make sure Accessibility permissions are granted."
                .into(),
        )
    })?;

    let source = CFMachPort::new_run_loop_source(None, Some(&tap), 0)
        .ok_or_else(|| Error::RunLoop("failed to create run loop source".into()))?;

    let run_loop = CFRunLoop::current()
        .ok_or_else(|| Error::RunLoop("failed to get current run loop".into()))?;

    run_loop.add_source(Some(&source), kCFRunLoopCommonModes);
    CGEvent::tap_enable(&tap, true);

    let power = PowerObserver::register(on_wake);

    {
        let mut active = ACTIVE_TAP
            .lock()
            .map_err(|_| Error::ThreadError("mutex poisoned".into()))?;
        *active = Some(ActiveTap {
            tap,
            source,
            run_loop,
            power,
        });
    }

    // `stop` may have run before the handle was published.
    if !running.load(Ordering::SeqCst) {
        return Ok(());
    }

    log::info!("Mouse remapper daemon started successfully!");
    CFRunLoop::run();

    Ok(())
}

/// The CGEventTap backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeTap;

impl TapSwitch for NativeTap {
    fn reenable(&self) {
        if let Ok(guard) = ACTIVE_TAP.lock()
            && let Some(ref active) = *guard
        {
            unsafe { CGEvent::tap_enable(&active.tap, true) };
        }
    }
}

impl TapBackend for NativeTap {
    type Synthesizer = NativeSynthesizer;

    fn is_trusted(&self) -> bool {
        super::is_process_trusted()
    }

    fn run(&self, running: &Arc<AtomicBool>, remapper: Remapper<NativeSynthesizer>) -> Result<()> {
        {
            let mut slot = REMAPPER
                .write()
                .map_err(|_| Error::ThreadError("lock poisoned".into()))?;
            *slot = Some(remapper);
        }

        let result = unsafe { run_tap_loop(running) };

        // Clean up
        if let Some(active) = take_active_tap() {
            active.teardown();
        }
        if let Ok(mut slot) = REMAPPER.write() {
            *slot = None;
        }

        result
    }

    fn stop(&self) -> Result<()> {
        if let Some(active) = take_active_tap() {
            active.teardown();
        }
        log::info!("Mouse remapper daemon stopped");
        Ok(())
    }
}
