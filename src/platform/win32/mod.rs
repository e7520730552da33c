// ── Win32 platform implementation ─────────────────────────────────────────────
//
// `WindowsWindow` drives a window through the `User32` trait, which mirrors
// the handful of user32 entry points it needs.  `SystemUser32` is the real
// implementation (Windows targets only); tests substitute a recording fake,
// so the window logic itself builds and runs on every host.
//
// `unsafe` is permitted only in `delegate` (the native callback) and
// `system` (the user32 FFI).  Every `unsafe` block MUST carry a
// `// SAFETY:` comment.

// ── Sub-modules ───────────────────────────────────────────────────────────────

pub mod delegate;
pub mod window;

#[cfg(target_os = "windows")]
mod system;

#[cfg(target_os = "windows")]
pub use system::SystemUser32;

pub use delegate::{DefaultHandler, Delegate, MessageHandler, Routed};
pub use window::WindowsWindow;

use crate::handle::NativeHandle;

// ── Message identifiers ───────────────────────────────────────────────────────

/// `WM_CLOSE`: asks the window to close.
pub const WM_CLOSE: u32 = 0x0010;
/// `WM_QUIT`: makes `GetMessageW` return 0.
pub const WM_QUIT: u32 = 0x0012;
/// `WM_NCDESTROY`: the last message a window receives.
pub const WM_NCDESTROY: u32 = 0x0082;

// ── ShowWindow commands ───────────────────────────────────────────────────────

/// The `ShowWindow` commands the window uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowCommand {
    /// `SW_HIDE`
    Hide,
    /// `SW_SHOWNORMAL`: activate and restore.
    Normal,
    /// `SW_MAXIMIZE`
    Maximize,
    /// `SW_MINIMIZE`
    Minimize,
}

impl ShowCommand {
    /// The raw `SW_*` value.
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Hide => 0,
            Self::Normal => 1,
            Self::Maximize => 3,
            Self::Minimize => 6,
        }
    }
}

// ── Message record ────────────────────────────────────────────────────────────

/// Portable mirror of the Win32 `MSG` record filled by `GetMessageW`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Message {
    pub hwnd: NativeHandle,
    pub message: u32,
    pub wparam: usize,
    pub lparam: isize,
    pub time: u32,
    pub pt: (i32, i32),
}

// ── user32 surface ────────────────────────────────────────────────────────────

/// The user32 calls a Windows window is driven through.
///
/// Return values follow the Win32 conventions of the mirrored functions.
pub trait User32 {
    /// `ShowWindow`.  Returns the previous visibility.
    fn show_window(&self, hwnd: NativeHandle, cmd: ShowCommand) -> bool;

    /// `PostMessageW`.  Returns `false` if the message could not be queued.
    fn post_message(&self, hwnd: NativeHandle, msg: u32, wparam: usize, lparam: isize) -> bool;

    /// `SetWindowTextW`.  `text` is null-terminated UTF-16.
    fn set_window_text(&self, hwnd: NativeHandle, text: &[u16]) -> bool;

    /// `GetWindowTextLengthW`: length in UTF-16 units, excluding the null.
    fn get_window_text_length(&self, hwnd: NativeHandle) -> i32;

    /// `GetWindowTextW`: copies at most `buf.len() - 1` units plus a null and
    /// returns the number of units copied.
    fn get_window_text(&self, hwnd: NativeHandle, buf: &mut [u16]) -> i32;

    /// `GetMessageW` for all windows of the calling thread: `-1` on error,
    /// `0` when `WM_QUIT` was retrieved, non-zero otherwise.
    fn get_message(&self, msg: &mut Message) -> i32;

    /// `TranslateMessage`
    fn translate_message(&self, msg: &Message) -> bool;

    /// `DispatchMessageW`
    fn dispatch_message(&self, msg: &Message) -> isize;

    /// `PostQuitMessage`
    fn post_quit_message(&self, code: i32);

    /// `GetLastError`
    fn last_error(&self) -> u32;

    /// `SetLastError(0)`.  Needed before calls such as `GetWindowTextW`
    /// that report failure through the last error without resetting it.
    fn clear_last_error(&self);
}

/// Encode `text` as null-terminated UTF-16 for wide-string Win32 calls.
pub(crate) fn to_wide(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_commands_match_win32() {
        assert_eq!(ShowCommand::Hide.as_raw(), 0);
        assert_eq!(ShowCommand::Normal.as_raw(), 1);
        assert_eq!(ShowCommand::Maximize.as_raw(), 3);
        assert_eq!(ShowCommand::Minimize.as_raw(), 6);
    }

    #[test]
    fn wide_string_is_null_terminated() {
        assert_eq!(to_wide("ab"), vec![0x61, 0x62, 0]);
        assert_eq!(to_wide(""), vec![0]);
        // U+1F600 needs a surrogate pair.
        assert_eq!(to_wide("\u{1F600}").len(), 3);
    }
}
