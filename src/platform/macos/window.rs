// ── AppKit window variant ─────────────────────────────────────────────────────
//
// The engine hands back an NSView; window-level requests go to the NSWindow
// that owns it.  The engine runs its own event dispatch on macOS, so no
// delegate is installed and `run_app` is `-[NSApplication run]`.

use std::cell::Cell;
use std::ffi::c_void;

use crate::{
    engine::WindowFactory,
    error::{FrameError, Result},
    flags::WindowFlags,
    handle::{NativeHandle, Rect},
    window::{NativeWindow, WindowCore, WindowState},
};

use super::runtime::{Arg, Id, ObjcRuntime, ReturnKind};

/// An AppKit window created by the engine.
pub struct MacWindow<E, R> {
    engine: E,
    runtime: R,
    core: WindowCore,
    /// `[NSApplication sharedApplication]`, resolved at construction.
    ns_app: Id,
    /// Code passed to the last `quit_app`, reported by `run_app`.
    exit_code: Cell<i32>,
}

impl<E: WindowFactory, R: ObjcRuntime> MacWindow<E, R> {
    /// Build a window that talks to AppKit through `runtime`.  No native
    /// window exists until `create`.
    pub fn with_runtime(engine: E, runtime: R) -> Self {
        let app_class = runtime.class("NSApplication");
        let ns_app = runtime.send(app_class, "sharedApplication", &[]);
        if ns_app.is_null() {
            tracing::warn!("NSApplication is unavailable");
        }
        Self { engine, runtime, core: WindowCore::default(), ns_app, exit_code: Cell::new(0) }
    }

    /// The shared `NSApplication`.
    pub fn ns_app(&self) -> Id {
        self.ns_app
    }

    /// The `NSWindow` that owns the engine's view.
    pub fn ns_window(&self) -> Id {
        self.window_of(self.core.handle())
    }

    /// The `NSWindow` that owns `view`.
    pub fn window_of(&self, view: Id) -> Id {
        self.runtime.send(view, "window", &[])
    }

    fn send_window(&self, method: &str, args: &[Arg]) {
        let window = self.ns_window();
        self.runtime.call(window, method, args, ReturnKind::Void);
    }
}

#[cfg(target_os = "macos")]
impl<E: WindowFactory> MacWindow<E, super::ObjC> {
    /// A window on the process-wide Objective-C bridge.
    pub fn new(engine: E) -> Self {
        Self::with_runtime(engine, super::ObjC::shared())
    }
}

impl<E: WindowFactory, R: ObjcRuntime> NativeWindow for MacWindow<E, R> {
    fn create(
        &mut self,
        flags: WindowFlags,
        rect: Option<Rect>,
        parent: NativeHandle,
    ) -> NativeHandle {
        if self.core.is_created() {
            tracing::warn!(handle = ?self.core.handle(), "window already created");
            return self.core.handle();
        }

        // No delegate, no delegate parameter: the engine dispatches itself.
        let view = self.engine.create_window(
            flags,
            rect.as_ref(),
            None,
            std::ptr::null_mut::<c_void>(),
            parent,
        );
        self.core.attach(view, flags);
        view
    }

    fn handle(&self) -> NativeHandle {
        self.core.handle()
    }

    fn window_flags(&self) -> WindowFlags {
        self.core.flags()
    }

    fn state(&self) -> WindowState {
        self.core.state()
    }

    fn collapse(&self, hide: bool) -> &Self {
        if hide {
            self.send_window("orderOut:", &[Arg::NIL]);
            self.core.set_state(WindowState::Hidden);
        } else {
            self.send_window("performMiniaturize:", &[Arg::Object(self.core.handle())]);
            self.core.set_state(WindowState::Minimized);
        }
        self
    }

    fn expand(&self, maximize: bool) -> &Self {
        let window = self.ns_window();
        if self.core.flags().has_titlebar() {
            // Raising a window of an inactive app leaves it behind the
            // frontmost app's windows, so activate first.
            self.runtime.call(
                self.ns_app,
                "activateIgnoringOtherApps:",
                &[Arg::Bool(true)],
                ReturnKind::Void,
            );
        }
        self.runtime.call(window, "makeKeyAndOrderFront:", &[Arg::NIL], ReturnKind::Void);
        if maximize {
            self.runtime.call(window, "performZoom:", &[Arg::NIL], ReturnKind::Void);
        }
        self.core.set_state(WindowState::Visible);
        self
    }

    fn dismiss(&self) -> &Self {
        tracing::debug!(handle = ?self.core.handle(), "closing NSWindow");
        self.send_window("close", &[]);
        self.core.set_state(WindowState::Closing);
        self
    }

    fn set_title(&self, title: &str) -> &Self {
        let text = self.runtime.to_ns_string(title);
        self.send_window("setTitle:", &[Arg::Object(text)]);
        // NSWindow copies the title; drop our +1 reference.
        if !text.is_null() {
            self.runtime.call(text, "release", &[], ReturnKind::Void);
        }
        self
    }

    fn get_title(&self) -> Result<String> {
        let title = self.runtime.send(self.ns_window(), "title", &[]);
        self.runtime
            .from_ns_string(title)
            .ok_or(FrameError::StringConversion("-[NSWindow title]"))
    }

    fn run_app(&self) -> Result<i32> {
        tracing::debug!("entering NSApplication run loop");
        self.runtime.call(self.ns_app, "run", &[], ReturnKind::Void);
        let code = self.exit_code.get();
        tracing::debug!(code, "NSApplication run loop finished");
        Ok(code)
    }

    fn quit_app(&self, code: i32) -> &Self {
        self.exit_code.set(code);
        if !self.ns_app.is_null() {
            tracing::debug!(code, "terminating NSApplication");
            self.runtime.call(self.ns_app, "terminate:", &[Arg::Object(self.ns_app)], ReturnKind::Void);
        }
        self
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
