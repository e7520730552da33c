// ── Native handles and geometry ───────────────────────────────────────────────
//
// Plain-data types shared by every platform variant.  No `unsafe` here: a
// `NativeHandle` is only ever compared and passed back to the OS, never
// dereferenced on the Rust side.

use std::ffi::c_void;

use serde::{Deserialize, Serialize};

/// An opaque native window identifier: an `HWND` on Windows, an `NSView *`
/// on macOS.
///
/// The OS owns the underlying object.  A `NativeHandle` is a non-owning copy
/// that stays meaningful until the OS destroys the window.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(*mut c_void);

impl NativeHandle {
    /// The null handle (no window / `nil`).
    pub const NULL: Self = Self(std::ptr::null_mut());

    /// Wrap a raw handle value received from native code.
    pub const fn from_raw(raw: *mut c_void) -> Self {
        Self(raw)
    }

    /// Build a handle from an integer value (Win32 handles are plain words).
    pub fn from_addr(addr: usize) -> Self {
        Self(addr as *mut c_void)
    }

    /// The raw pointer value, for passing back to native code.
    pub const fn as_raw(self) -> *mut c_void {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl Default for NativeHandle {
    fn default() -> Self {
        Self::NULL
    }
}

/// A window placement rectangle in screen coordinates.
///
/// Field order and `repr(C)` match the Win32 `RECT` the engine's creation
/// entry point expects a pointer to.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// A rectangle at `(x, y)` of the given size.
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// `true` for the all-zero rectangle, which lets the engine pick a
    /// default placement.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_handle_is_default() {
        assert!(NativeHandle::default().is_null());
        assert_eq!(NativeHandle::default(), NativeHandle::NULL);
    }

    #[test]
    fn handle_from_addr_roundtrips() {
        let h = NativeHandle::from_addr(0x1234);
        assert!(!h.is_null());
        assert_eq!(h.as_raw() as usize, 0x1234);
    }

    #[test]
    fn rect_from_origin_size() {
        let r = Rect::from_origin_size(10, 20, 800, 600);
        assert_eq!(r, Rect::new(10, 20, 810, 620));
        assert_eq!(r.width(), 800);
        assert_eq!(r.height(), 600);
        assert!(!r.is_empty());
        assert!(Rect::default().is_empty());
    }

    #[test]
    fn rect_json_shape() {
        let r: Rect = serde_json::from_str(r#"{"left":1,"top":2,"right":3,"bottom":4}"#)
            .expect("deserialize");
        assert_eq!(r, Rect::new(1, 2, 3, 4));
    }
}
