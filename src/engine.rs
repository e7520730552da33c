// ── Engine window-creation entry point ────────────────────────────────────────
//
// The embedded browser engine is the only thing that creates native windows.
// It is consumed through `WindowFactory`; this crate never defines how the
// engine library is loaded.

use std::ffi::c_void;

use crate::{flags::WindowFlags, handle::NativeHandle, handle::Rect};

/// Native message delegate installed on Windows.
///
/// Signature of the engine's delegate callback: `(hwnd, msg, wparam, lparam,
/// param, *handled) -> LRESULT`.  `param` is the opaque value passed as
/// `delegate_param` at creation time.
pub type WindowDelegate = unsafe extern "system" fn(
    hwnd: NativeHandle,
    msg: u32,
    wparam: usize,
    lparam: isize,
    param: *mut c_void,
    handled: *mut i32,
) -> isize;

/// The engine's window-creation entry point.
pub trait WindowFactory {
    /// Create a native window.
    ///
    /// `delegate` / `delegate_param` are `None` / null where the platform
    /// does not route raw messages through a delegate.  Returns the new
    /// native handle, or null on failure.
    fn create_window(
        &self,
        flags: WindowFlags,
        rect: Option<&Rect>,
        delegate: Option<WindowDelegate>,
        delegate_param: *mut c_void,
        parent: NativeHandle,
    ) -> NativeHandle;
}

impl<F: WindowFactory + ?Sized> WindowFactory for &F {
    fn create_window(
        &self,
        flags: WindowFlags,
        rect: Option<&Rect>,
        delegate: Option<WindowDelegate>,
        delegate_param: *mut c_void,
        parent: NativeHandle,
    ) -> NativeHandle {
        (**self).create_window(flags, rect, delegate, delegate_param, parent)
    }
}

// ── Test double ───────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::*;

    /// One recorded `create_window` call.
    #[derive(Debug, Clone)]
    pub(crate) struct CreateCall {
        pub(crate) flags: WindowFlags,
        pub(crate) rect: Option<Rect>,
        pub(crate) delegate: Option<WindowDelegate>,
        pub(crate) delegate_param: *mut c_void,
        pub(crate) parent: NativeHandle,
    }

    /// Records every creation request and answers with a fixed handle.
    pub(crate) struct FakeEngine {
        pub(crate) answer: NativeHandle,
        pub(crate) calls: RefCell<Vec<CreateCall>>,
    }

    impl FakeEngine {
        pub(crate) fn returning(answer: NativeHandle) -> Self {
            Self { answer, calls: RefCell::new(Vec::new()) }
        }

        pub(crate) fn last_call(&self) -> CreateCall {
            self.calls.borrow().last().cloned().expect("create_window was not called")
        }
    }

    impl WindowFactory for FakeEngine {
        fn create_window(
            &self,
            flags: WindowFlags,
            rect: Option<&Rect>,
            delegate: Option<WindowDelegate>,
            delegate_param: *mut c_void,
            parent: NativeHandle,
        ) -> NativeHandle {
            self.calls.borrow_mut().push(CreateCall {
                flags,
                rect: rect.copied(),
                delegate,
                delegate_param,
                parent,
            });
            self.answer
        }
    }
}
