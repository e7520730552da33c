// ── Window capability contract ────────────────────────────────────────────────
//
// Every platform variant implements `NativeWindow`.  Callers depend only on
// this trait; which variant is compiled in is decided by `platform`.

use std::cell::Cell;

use crate::{
    error::Result,
    flags::WindowFlags,
    handle::{NativeHandle, Rect},
};

// ── Lifecycle state ───────────────────────────────────────────────────────────

/// Last lifecycle state requested through this window object.
///
/// `Closing` is entered by `dismiss()`.  The OS tears the window down
/// asynchronously afterwards; that final transition is not observable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    /// `create` has not been called, or the engine returned a null handle.
    #[default]
    Uninitialized,
    /// A native handle exists but no show/hide request has been made yet.
    Created,
    Visible,
    Hidden,
    Minimized,
    Closing,
}

// ── Capability set ────────────────────────────────────────────────────────────

/// Native window lifecycle control.
///
/// Requests are passed straight to the OS; the request-style methods return
/// `&Self` so calls can be chained:
///
/// ```ignore
/// window.set_title("Inbox").expand(false);
/// ```
pub trait NativeWindow {
    /// Ask the engine for a new native window and remember its handle.
    ///
    /// `flags`, `rect` and `parent` reach the engine unchanged; a null
    /// result is returned as-is.
    fn create(&mut self, flags: WindowFlags, rect: Option<Rect>, parent: NativeHandle)
        -> NativeHandle;

    /// The native handle obtained from `create` (null before that).
    fn handle(&self) -> NativeHandle;

    /// The flags the window was created with.
    fn window_flags(&self) -> WindowFlags;

    fn state(&self) -> WindowState;

    /// Minimize the window, or hide it without minimizing when `hide`.
    fn collapse(&self, hide: bool) -> &Self;

    /// Show or restore the window; maximize it when `maximize`.
    fn expand(&self, maximize: bool) -> &Self;

    /// Request the window to close.  Does not wait for the OS.
    fn dismiss(&self) -> &Self;

    fn set_title(&self, title: &str) -> &Self;

    fn get_title(&self) -> Result<String>;

    /// Dispatch native events on the calling thread until quit is
    /// requested.  Returns the application exit code.
    fn run_app(&self) -> Result<i32>;

    /// Request the running `run_app` loop to finish with `code`.
    fn quit_app(&self, code: i32) -> &Self;
}

// ── Shared per-window bookkeeping ─────────────────────────────────────────────

/// Handle, flags and lifecycle state common to every variant.
#[derive(Debug)]
pub(crate) struct WindowCore {
    handle: NativeHandle,
    flags: WindowFlags,
    state: Cell<WindowState>,
}

impl Default for WindowCore {
    fn default() -> Self {
        Self {
            handle: NativeHandle::NULL,
            flags: WindowFlags::empty(),
            state: Cell::new(WindowState::Uninitialized),
        }
    }
}

impl WindowCore {
    /// `true` once a non-null handle has been attached.
    pub(crate) fn is_created(&self) -> bool {
        !self.handle.is_null()
    }

    /// Record the result of a creation request.
    pub(crate) fn attach(&mut self, handle: NativeHandle, flags: WindowFlags) {
        self.handle = handle;
        self.flags = flags;
        if handle.is_null() {
            tracing::warn!(?flags, "engine returned a null window handle");
            self.state.set(WindowState::Uninitialized);
        } else {
            tracing::debug!(?handle, ?flags, "native window created");
            self.state.set(WindowState::Created);
        }
    }

    pub(crate) fn handle(&self) -> NativeHandle {
        self.handle
    }

    pub(crate) fn flags(&self) -> WindowFlags {
        self.flags
    }

    pub(crate) fn state(&self) -> WindowState {
        self.state.get()
    }

    pub(crate) fn set_state(&self, state: WindowState) {
        tracing::trace!(handle = ?self.handle, from = ?self.state.get(), to = ?state, "window state");
        self.state.set(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_core_is_uninitialized() {
        let core = WindowCore::default();
        assert!(!core.is_created());
        assert_eq!(core.state(), WindowState::Uninitialized);
        assert!(core.flags().is_empty());
    }

    #[test]
    fn attach_non_null_enters_created() {
        let mut core = WindowCore::default();
        core.attach(NativeHandle::from_addr(0x10), WindowFlags::TITLEBAR);
        assert!(core.is_created());
        assert_eq!(core.state(), WindowState::Created);
        assert_eq!(core.flags(), WindowFlags::TITLEBAR);
    }

    #[test]
    fn attach_null_stays_uninitialized() {
        let mut core = WindowCore::default();
        core.attach(NativeHandle::NULL, WindowFlags::main_window());
        assert!(!core.is_created());
        assert_eq!(core.state(), WindowState::Uninitialized);
    }
}
