// ── user32 FFI ────────────────────────────────────────────────────────────────
//
// `SystemUser32` forwards every `User32` call to the real user32.dll through
// the `windows` crate.  This is the only file that touches Win32 directly.

#![allow(unsafe_code)]

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{GetLastError, SetLastError, HWND, LPARAM, POINT, WIN32_ERROR, WPARAM},
        UI::WindowsAndMessaging::{
            DispatchMessageW, GetMessageW, GetWindowTextLengthW, GetWindowTextW, PostMessageW,
            PostQuitMessage, SetWindowTextW, ShowWindow, TranslateMessage, MSG,
            SHOW_WINDOW_CMD,
        },
    },
};

use crate::handle::NativeHandle;

use super::{Message, ShowCommand, User32};

/// The real user32.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemUser32;

fn hwnd(handle: NativeHandle) -> HWND {
    HWND(handle.as_raw())
}

fn to_msg(m: &Message) -> MSG {
    MSG {
        hwnd: hwnd(m.hwnd),
        message: m.message,
        wParam: WPARAM(m.wparam),
        lParam: LPARAM(m.lparam),
        time: m.time,
        pt: POINT { x: m.pt.0, y: m.pt.1 },
        ..Default::default()
    }
}

fn from_msg(msg: &MSG) -> Message {
    Message {
        hwnd: NativeHandle::from_raw(msg.hwnd.0),
        message: msg.message,
        wparam: msg.wParam.0,
        lparam: msg.lParam.0,
        time: msg.time,
        pt: (msg.pt.x, msg.pt.y),
    }
}

impl User32 for SystemUser32 {
    fn show_window(&self, handle: NativeHandle, cmd: ShowCommand) -> bool {
        // SAFETY: ShowWindow validates the handle itself and fails harmlessly
        // on a stale or null HWND.
        unsafe { ShowWindow(hwnd(handle), SHOW_WINDOW_CMD(cmd.as_raw())) }.as_bool()
    }

    fn post_message(&self, handle: NativeHandle, msg: u32, wparam: usize, lparam: isize) -> bool {
        // SAFETY: posting only queues the message; no pointers are passed.
        unsafe { PostMessageW(hwnd(handle), msg, WPARAM(wparam), LPARAM(lparam)) }.is_ok()
    }

    fn set_window_text(&self, handle: NativeHandle, text: &[u16]) -> bool {
        debug_assert_eq!(text.last(), Some(&0), "window text must be null-terminated");
        // SAFETY: text is a null-terminated UTF-16 buffer that stays
        // allocated for the duration of the call; user32 copies it.
        unsafe { SetWindowTextW(hwnd(handle), PCWSTR(text.as_ptr())) }.is_ok()
    }

    fn get_window_text_length(&self, handle: NativeHandle) -> i32 {
        // SAFETY: read-only query on a window handle; returns 0 on failure.
        unsafe { GetWindowTextLengthW(hwnd(handle)) }
    }

    fn get_window_text(&self, handle: NativeHandle, buf: &mut [u16]) -> i32 {
        // SAFETY: buf is a valid, writable slice; the windows crate passes its
        // length as nMaxCount so user32 never writes past the end.
        unsafe { GetWindowTextW(hwnd(handle), buf) }
    }

    fn get_message(&self, msg: &mut Message) -> i32 {
        let mut raw = MSG::default();
        // SAFETY: &mut raw is a valid MSG pointer; HWND::default() retrieves
        // messages for all windows on this thread; 0,0 filter accepts all.
        let ret = unsafe { GetMessageW(&mut raw, HWND::default(), 0, 0) };
        *msg = from_msg(&raw);
        ret.0
    }

    fn translate_message(&self, msg: &Message) -> bool {
        let raw = to_msg(msg);
        // SAFETY: raw was rebuilt field-for-field from a GetMessageW result.
        unsafe { TranslateMessage(&raw) }.as_bool()
    }

    fn dispatch_message(&self, msg: &Message) -> isize {
        let raw = to_msg(msg);
        // SAFETY: as above; the window procedure runs synchronously on this
        // thread before DispatchMessageW returns.
        unsafe { DispatchMessageW(&raw) }.0
    }

    fn post_quit_message(&self, code: i32) {
        // SAFETY: PostQuitMessage only flags the calling thread's queue.
        unsafe { PostQuitMessage(code) }
    }

    fn last_error(&self) -> u32 {
        // SAFETY: GetLastError reads thread-local state set by the last Win32
        // call.  It is always safe to call and never fails.
        unsafe { GetLastError() }.0
    }

    fn clear_last_error(&self) {
        // SAFETY: SetLastError only writes the calling thread's error slot.
        unsafe { SetLastError(WIN32_ERROR(0)) }
    }
}
