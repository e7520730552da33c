// ── Window message delegate ───────────────────────────────────────────────────
//
// The engine calls `delegate_trampoline` for every raw message of a window it
// created.  The trampoline recovers the window's `Delegate` from the opaque
// `param` pointer and asks the user handler whether it wants the message.
//
// Once the window exists the delegate belongs to it, not to `WindowsWindow`:
// it is freed by the trampoline on WM_NCDESTROY, so dropping the Rust object
// early never leaves the engine holding a dangling `param`.

#![allow(unsafe_code)]

use std::ffi::c_void;
use std::mem;
use std::ptr::NonNull;

use crate::handle::NativeHandle;

use super::WM_NCDESTROY;

/// User override point for raw window messages.
pub trait MessageHandler {
    /// Inspect a window message.
    ///
    /// Return `Some(result)` to mark the message handled and use `result` as
    /// its `LRESULT`; `None` lets the engine and the OS apply default
    /// processing.
    fn on_message(&self, hwnd: NativeHandle, msg: u32, wparam: usize, lparam: isize)
        -> Option<isize>;
}

/// Handler that never claims a message.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHandler;

impl MessageHandler for DefaultHandler {
    fn on_message(&self, _: NativeHandle, _: u32, _: usize, _: isize) -> Option<isize> {
        None
    }
}

impl<F> MessageHandler for F
where
    F: Fn(NativeHandle, u32, usize, isize) -> Option<isize>,
{
    fn on_message(&self, hwnd: NativeHandle, msg: u32, wparam: usize, lparam: isize)
        -> Option<isize>
    {
        self(hwnd, msg, wparam, lparam)
    }
}

/// Outcome of routing one message through a `Delegate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// Default processing applies; the trampoline returns 0.
    Unhandled,
    /// The handler consumed the message and supplied its result.
    Handled(isize),
}

/// Binds one window to its message handler.
pub struct Delegate {
    handler: Box<dyn MessageHandler>,
}

impl Delegate {
    pub fn new(handler: impl MessageHandler + 'static) -> Self {
        Self { handler: Box::new(handler) }
    }

    /// Ask the handler about one message.
    pub fn route(&self, hwnd: NativeHandle, msg: u32, wparam: usize, lparam: isize) -> Routed {
        match self.handler.on_message(hwnd, msg, wparam, lparam) {
            Some(result) => {
                tracing::trace!(?hwnd, msg, result, "message handled by delegate");
                Routed::Handled(result)
            }
            None => Routed::Unhandled,
        }
    }
}

impl std::fmt::Debug for Delegate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delegate").finish_non_exhaustive()
    }
}

// ── Ownership hand-off ────────────────────────────────────────────────────────

/// A `Delegate` on its way to a native window.
///
/// Its address is the engine's `delegate_param`.  Until `commit` the binding
/// owns the delegate; dropping it frees the delegate.
pub(crate) struct Binding {
    delegate: NonNull<Delegate>,
}

impl Binding {
    pub(crate) fn new(delegate: Box<Delegate>) -> Self {
        Self { delegate: NonNull::from(Box::leak(delegate)) }
    }

    pub(crate) fn param(&self) -> *mut c_void {
        self.delegate.as_ptr().cast()
    }

    /// The native window exists.  From here on `delegate_trampoline` owns
    /// the delegate and frees it on WM_NCDESTROY.
    pub(crate) fn commit(self) {
        tracing::trace!(param = ?self.param(), "delegate bound to native window");
        mem::forget(self);
    }

    /// No native window was created; take the delegate back.
    pub(crate) fn cancel(self) -> Box<Delegate> {
        let delegate = self.delegate;
        mem::forget(self);
        // SAFETY: the pointer came from Box::leak in new() and was never
        // committed, so this binding is its only owner.
        unsafe { Box::from_raw(delegate.as_ptr()) }
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        // SAFETY: as in cancel(); commit() and cancel() forget the binding,
        // so drop only runs while it still owns the delegate.
        drop(unsafe { Box::from_raw(self.delegate.as_ptr()) });
    }
}

// ── Native entry point ────────────────────────────────────────────────────────

/// `WindowDelegate` implementation installed by `WindowsWindow::create`.
///
/// Writes 1 to `*handled` and returns the handler's result when the message
/// was claimed, otherwise writes 0 and returns 0.  WM_NCDESTROY is routed
/// like any other message and then frees the delegate.
///
/// # Safety
///
/// `param` must be null or the `param()` of a committed `Binding` whose
/// window has not yet received WM_NCDESTROY; `handled` must be null or
/// valid for a write.
pub(crate) unsafe extern "system" fn delegate_trampoline(
    hwnd: NativeHandle,
    msg: u32,
    wparam: usize,
    lparam: isize,
    param: *mut c_void,
    handled: *mut i32,
) -> isize {
    let routed = if param.is_null() {
        Routed::Unhandled
    } else {
        // SAFETY: param is a committed Binding's delegate, live until this
        // window's WM_NCDESTROY.  Only shared access is taken; the engine
        // calls back on the UI thread.
        let delegate = unsafe { &*(param as *const Delegate) };
        delegate.route(hwnd, msg, wparam, lparam)
    };

    let (flag, result) = match routed {
        Routed::Handled(result) => (1, result),
        Routed::Unhandled => (0, 0),
    };

    if !handled.is_null() {
        // SAFETY: handled points at the engine's BOOL out-parameter for the
        // duration of this call.
        unsafe { *handled = flag };
    }

    if msg == WM_NCDESTROY && !param.is_null() {
        tracing::trace!(?hwnd, "releasing message delegate");
        // SAFETY: WM_NCDESTROY is the window's last message and the borrow
        // taken above has ended; nothing else frees a committed delegate.
        drop(unsafe { Box::from_raw(param.cast::<Delegate>()) });
    }
    result
}
