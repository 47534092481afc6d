//! `NSPasteboard.changeCount` for the general pasteboard.
//!
//! The counter moves on every copy, including a copy of identical content, and
//! reading it does not touch the clipboard payload.

use cocoa::base::{id, nil};
use cocoa::foundation::NSInteger;
use objc::rc::autoreleasepool;
use objc::{class, msg_send, sel, sel_impl};

/// `None` when the general pasteboard is unavailable.
pub(crate) fn change_count() -> Option<u64> {
    autoreleasepool(|| unsafe {
        let pasteboard: id = msg_send![class!(NSPasteboard), generalPasteboard];
        if pasteboard == nil {
            return None;
        }
        let count: NSInteger = msg_send![pasteboard, changeCount];
        Some(count as u64)
    })
}
