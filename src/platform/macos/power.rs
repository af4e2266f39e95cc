//! System sleep/wake notifications.
//!
//! Some hosts drop the event tap across sleep without ever sending a
//! disablement event, so the tap is forced back on after every wake.

use block2::RcBlock;
use core::ptr::NonNull;
use objc2::rc::Retained;
use objc2::runtime::{AnyObject, NSObjectProtocol, ProtocolObject};
use objc2_app_kit::{NSWorkspace, NSWorkspaceDidWakeNotification, NSWorkspaceWillSleepNotification};
use objc2_foundation::{NSNotification, NSNotificationCenter};

type ObserverToken = Retained<ProtocolObject<dyn NSObjectProtocol>>;

/// Registered workspace observers; removed again by [`PowerObserver::unregister`].
pub(super) struct PowerObserver {
    center: Retained<NSNotificationCenter>,
    tokens: Vec<ObserverToken>,
}

impl PowerObserver {
    /// Call `on_wake` after every system wake.
    pub(super) fn register(on_wake: fn()) -> Self {
        let center = NSWorkspace::sharedWorkspace().notificationCenter();

        let wake = RcBlock::new(move |_: NonNull<NSNotification>| on_wake());
        let sleep = RcBlock::new(|_: NonNull<NSNotification>| {
            log::debug!("System going to sleep");
        });

        let tokens = unsafe {
            vec![
                center.addObserverForName_object_queue_usingBlock(
                    Some(NSWorkspaceDidWakeNotification),
                    None,
                    None,
                    &wake,
                ),
                center.addObserverForName_object_queue_usingBlock(
                    Some(NSWorkspaceWillSleepNotification),
                    None,
                    None,
                    &sleep,
                ),
            ]
        };

        Self { center, tokens }
    }

    pub(super) fn unregister(self) {
        for token in &self.tokens {
            let observer: &AnyObject = AsRef::<AnyObject>::as_ref(&**token);
            unsafe { self.center.removeObserver(observer) };
        }
    }
}
