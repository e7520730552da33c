// ── Linux placeholder variant ─────────────────────────────────────────────────
//
// There is no native backend for Linux yet.  `create` still goes through the
// engine so callers get a real handle, but window requests are logged and
// dropped, and the calls that must produce a value report `Unsupported`.

use std::ffi::c_void;

use crate::{
    engine::WindowFactory,
    error::{FrameError, Result},
    flags::WindowFlags,
    handle::{NativeHandle, Rect},
    window::{NativeWindow, WindowCore, WindowState},
};

/// A window whose lifecycle requests are accepted and ignored.
pub struct LinuxWindow<E> {
    engine: E,
    core: WindowCore,
}

impl<E: WindowFactory> LinuxWindow<E> {
    pub fn new(engine: E) -> Self {
        Self { engine, core: WindowCore::default() }
    }

    fn ignore(&self, request: &'static str) {
        tracing::debug!(request, handle = ?self.core.handle(), "no Linux backend; request ignored");
    }
}

impl<E: WindowFactory> NativeWindow for LinuxWindow<E> {
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
        let handle = self.engine.create_window(
            flags,
            rect.as_ref(),
            None,
            std::ptr::null_mut::<c_void>(),
            parent,
        );
        self.core.attach(handle, flags);
        handle
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

    fn collapse(&self, _hide: bool) -> &Self {
        self.ignore("collapse");
        self
    }

    fn expand(&self, _maximize: bool) -> &Self {
        self.ignore("expand");
        self
    }

    fn dismiss(&self) -> &Self {
        self.ignore("dismiss");
        self
    }

    fn set_title(&self, _title: &str) -> &Self {
        self.ignore("set_title");
        self
    }

    fn get_title(&self) -> Result<String> {
        Err(FrameError::Unsupported("get_title"))
    }

    fn run_app(&self) -> Result<i32> {
        Err(FrameError::Unsupported("run_app"))
    }

    fn quit_app(&self, _code: i32) -> &Self {
        self.ignore("quit_app");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::FakeEngine;

    #[test]
    fn create_reaches_engine_without_delegate() {
        let engine = FakeEngine::returning(NativeHandle::from_addr(0x55));
        let mut w = LinuxWindow::new(&engine);
        let rect = Rect::from_origin_size(10, 10, 300, 200);

        assert_eq!(w.create(WindowFlags::TOOL, Some(rect), NativeHandle::NULL), NativeHandle::from_addr(0x55));
        let call = engine.last_call();
        assert_eq!(call.rect, Some(rect));
        assert!(call.delegate.is_none());
        assert!(call.delegate_param.is_null());
        assert_eq!(w.window_flags(), WindowFlags::TOOL);
        assert_eq!(w.state(), WindowState::Created);
    }

    #[test]
    fn requests_are_ignored() {
        let engine = FakeEngine::returning(NativeHandle::from_addr(0x55));
        let mut w = LinuxWindow::new(&engine);
        w.create(WindowFlags::main_window(), None, NativeHandle::NULL);
        w.set_title("ignored").expand(true).collapse(true).dismiss().quit_app(3);
        assert_eq!(w.state(), WindowState::Created);
    }

    #[test]
    fn value_requests_are_unsupported() {
        let engine = FakeEngine::returning(NativeHandle::NULL);
        let w = LinuxWindow::new(&engine);
        let err = w.get_title().expect_err("no title on Linux");
        assert_eq!(err.to_string(), "get_title is not supported on this platform");
        assert!(matches!(w.run_app(), Err(FrameError::Unsupported("run_app"))));
    }
}
