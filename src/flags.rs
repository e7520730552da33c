// ── Window creation flags ─────────────────────────────────────────────────────
//
// Bit values are the engine's window-creation flag set; they are passed to
// the creation entry point verbatim.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Decorations and behaviour requested when a window is created.
    ///
    /// Supplied once to `NativeWindow::create` and read-only afterwards.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct WindowFlags: u32 {
        /// Child window only; if not set the window is top-level.
        const CHILD = 1 << 0;
        /// Toplevel window with a caption.
        const TITLEBAR = 1 << 1;
        /// Has a resizeable frame.
        const RESIZEABLE = 1 << 2;
        /// Tool window.
        const TOOL = 1 << 3;
        /// Has minimize / maximize buttons.
        const CONTROLS = 1 << 4;
        /// Glassy (translucent) frame.
        const GLASSY = 1 << 5;
        /// Transparent window with per-pixel alpha.
        const ALPHA = 1 << 6;
        /// Main window of the application; closing it quits the app.
        const MAIN = 1 << 7;
        /// Popup window.
        const POPUP = 1 << 8;
        /// Allow the engine's inspector to attach.
        const ENABLE_DEBUG = 1 << 9;
        /// The window owns its script VM.
        const OWNS_VM = 1 << 10;
    }
}

impl WindowFlags {
    /// The flag set a typical application main window uses.
    pub const fn main_window() -> Self {
        Self::TITLEBAR
            .union(Self::RESIZEABLE)
            .union(Self::CONTROLS)
            .union(Self::MAIN)
            .union(Self::ENABLE_DEBUG)
    }

    /// Whether the window has a caption, which on macOS decides foreground
    /// activation in `expand`.
    pub fn has_titlebar(self) -> bool {
        self.contains(Self::TITLEBAR)
    }
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self::main_window()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_values_match_engine() {
        assert_eq!(WindowFlags::CHILD.bits(), 0x001);
        assert_eq!(WindowFlags::TITLEBAR.bits(), 0x002);
        assert_eq!(WindowFlags::MAIN.bits(), 0x080);
        assert_eq!(WindowFlags::OWNS_VM.bits(), 0x400);
    }

    #[test]
    fn main_window_has_titlebar() {
        let f = WindowFlags::main_window();
        assert!(f.has_titlebar());
        assert_eq!(f.bits(), 0x2 | 0x4 | 0x10 | 0x80 | 0x200);
        assert!(!WindowFlags::POPUP.has_titlebar());
    }

    #[test]
    fn serializes_as_flag_names() {
        let json = serde_json::to_string(&(WindowFlags::TITLEBAR | WindowFlags::RESIZEABLE))
            .expect("serialize");
        assert_eq!(json, r#""TITLEBAR | RESIZEABLE""#);

        let back: WindowFlags = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, WindowFlags::TITLEBAR | WindowFlags::RESIZEABLE);
    }
}
