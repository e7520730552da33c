// ── Windows window variant ────────────────────────────────────────────────────
//
// Responsibilities in this file (no unsafe; FFI lives behind `User32`):
//   • Ask the engine for a window with the message delegate installed.
//   • Translate the capability set into ShowWindow / PostMessageW / …
//   • Run the thread's message loop until WM_QUIT.

use crate::{
    engine::WindowFactory,
    error::{FrameError, Result},
    flags::WindowFlags,
    handle::{NativeHandle, Rect},
    window::{NativeWindow, WindowCore, WindowState},
};

use super::{
    delegate::{delegate_trampoline, Binding, Delegate, MessageHandler},
    to_wide, Message, ShowCommand, User32, WM_CLOSE,
};

/// A Win32 top-level window created by the engine.
pub struct WindowsWindow<E, U> {
    engine: E,
    user32: U,
    core: WindowCore,
    /// Owned here until `create` hands it to the native window, which then
    /// keeps it until WM_NCDESTROY.
    delegate: Option<Box<Delegate>>,
}

impl<E: WindowFactory, U: User32> WindowsWindow<E, U> {
    /// Build a window driven through `user32`, routing raw messages to
    /// `handler`.  No native window exists until `create`.
    pub fn with_user32(engine: E, user32: U, handler: impl MessageHandler + 'static) -> Self {
        Self {
            engine,
            user32,
            core: WindowCore::default(),
            delegate: Some(Box::new(Delegate::new(handler))),
        }
    }

    fn show(&self, cmd: ShowCommand) {
        let hwnd = self.core.handle();
        tracing::trace!(?hwnd, ?cmd, "ShowWindow");
        // Return value is the previous visibility, not a success flag.
        let _ = self.user32.show_window(hwnd, cmd);
    }
}

#[cfg(target_os = "windows")]
impl<E: WindowFactory> WindowsWindow<E, super::SystemUser32> {
    /// A window on the real user32 with the default (pass-through) handler.
    pub fn new(engine: E) -> Self {
        Self::with_user32(engine, super::SystemUser32, super::DefaultHandler)
    }

    /// A window on the real user32 routing raw messages to `handler`.
    pub fn with_handler(engine: E, handler: impl MessageHandler + 'static) -> Self {
        Self::with_user32(engine, super::SystemUser32, handler)
    }
}

impl<E: WindowFactory, U: User32> NativeWindow for WindowsWindow<E, U> {
    fn create(
        &mut self,
        flags: WindowFlags,
        rect: Option<Rect>,
        parent: NativeHandle,
    ) -> NativeHandle {
        if self.core.is_created() {
            // The delegate is already bound to the existing window.
            tracing::warn!(handle = ?self.core.handle(), "window already created");
            return self.core.handle();
        }

        let Some(delegate) = self.delegate.take() else {
            tracing::warn!("message delegate already bound to a native window");
            return self.core.handle();
        };

        // The engine requires a rectangle on Windows; all-zero means default.
        let rect = rect.unwrap_or_default();
        let binding = Binding::new(delegate);
        let hwnd = self.engine.create_window(
            flags,
            Some(&rect),
            Some(delegate_trampoline),
            binding.param(),
            parent,
        );
        if hwnd.is_null() {
            // No window will ever call back; keep the delegate for a retry.
            self.delegate = Some(binding.cancel());
        } else {
            binding.commit();
        }
        self.core.attach(hwnd, flags);
        hwnd
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
            self.show(ShowCommand::Hide);
            self.core.set_state(WindowState::Hidden);
        } else {
            self.show(ShowCommand::Minimize);
            self.core.set_state(WindowState::Minimized);
        }
        self
    }

    fn expand(&self, maximize: bool) -> &Self {
        self.show(ShowCommand::Normal);
        if maximize {
            self.show(ShowCommand::Maximize);
        }
        self.core.set_state(WindowState::Visible);
        self
    }

    fn dismiss(&self) -> &Self {
        let hwnd = self.core.handle();
        tracing::debug!(?hwnd, "posting WM_CLOSE");
        if !self.user32.post_message(hwnd, WM_CLOSE, 0, 0) {
            tracing::debug!(?hwnd, code = self.user32.last_error(), "PostMessageW failed");
        }
        self.core.set_state(WindowState::Closing);
        self
    }

    fn set_title(&self, title: &str) -> &Self {
        let hwnd = self.core.handle();
        let wide = to_wide(title);
        if !self.user32.set_window_text(hwnd, &wide) {
            tracing::debug!(?hwnd, code = self.user32.last_error(), "SetWindowTextW failed");
        }
        self
    }

    fn get_title(&self) -> Result<String> {
        let hwnd = self.core.handle();
        let len = self.user32.get_window_text_length(hwnd).max(0) as usize;
        if len == 0 {
            return Ok(String::new());
        }

        let mut buf = vec![0u16; len + 1];
        self.user32.clear_last_error();
        let copied = self.user32.get_window_text(hwnd, &mut buf).max(0) as usize;
        if copied == 0 {
            // An empty copy with a non-zero length is only an error when the
            // OS says so; the title may have been cleared in between.
            let code = self.user32.last_error();
            if code != 0 {
                return Err(FrameError::Win32 { function: "GetWindowTextW", code });
            }
        }

        String::from_utf16(&buf[..copied.min(len)])
            .map_err(|_| FrameError::StringConversion("GetWindowTextW"))
    }

    fn run_app(&self) -> Result<i32> {
        let mut msg = Message::default();
        tracing::debug!(handle = ?self.core.handle(), "entering message loop");

        loop {
            match self.user32.get_message(&mut msg) {
                // GetMessageW returns -1 on error.
                -1 => {
                    return Err(FrameError::Win32 {
                        function: "GetMessageW",
                        code: self.user32.last_error(),
                    })
                }
                // 0 when WM_QUIT is retrieved.
                0 => break,
                _ => {
                    let _ = self.user32.translate_message(&msg);
                    let _ = self.user32.dispatch_message(&msg);
                }
            }
        }

        // WM_QUIT carries the PostQuitMessage exit code in wParam.
        let code = msg.wparam as i32;
        tracing::debug!(code, "message loop finished");
        Ok(code)
    }

    fn quit_app(&self, code: i32) -> &Self {
        tracing::debug!(code, "PostQuitMessage");
        self.user32.post_quit_message(code);
        self
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
