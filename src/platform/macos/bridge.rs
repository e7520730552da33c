// ── Objective-C call bridge ───────────────────────────────────────────────────
//
// `ObjC` implements `ObjcRuntime` on top of libobjc and CoreFoundation.
// Every dynamic message send funnels through `ObjC::send_words`, the single
// place where `objc_msgSend` is cast to a concrete signature.

#![allow(unsafe_code)]

use std::ffi::{c_char, c_void, CStr, CString};
use std::mem;

use core_foundation::base::{kCFAllocatorDefault, CFIndex};
use core_foundation::string::{
    kCFStringEncodingUTF8, CFStringCreateWithCString, CFStringGetCString, CFStringGetLength,
    CFStringGetMaximumSizeForEncoding, CFStringRef,
};
use objc::runtime::{Class, Sel, BOOL, NO};
use once_cell::sync::Lazy;

use crate::handle::NativeHandle;

use super::runtime::{Arg, Id, ObjcRuntime, ReturnKind, Value, NIL_STRING};

/// Most positional arguments `call` sends.
pub const MAX_ARGS: usize = 6;

#[link(name = "objc", kind = "dylib")]
extern "C" {
    // Declared without a signature: it must be cast before every call.
    fn objc_msgSend();
    fn class_respondsToSelector(cls: *const Class, sel: Sel) -> BOOL;
}

// NSApplication and friends live in AppKit.
#[link(name = "AppKit", kind = "framework")]
extern "C" {}

// ── Entry-point table ─────────────────────────────────────────────────────────

/// libobjc entry points bound at link time, captured once per process.
struct EntryPoints {
    msg_send: unsafe extern "C" fn(),
    responds_to: unsafe extern "C" fn(*const Class, Sel) -> BOOL,
}

static ENTRY_POINTS: Lazy<EntryPoints> = Lazy::new(|| {
    tracing::debug!("using linked libobjc entry points");
    EntryPoints { msg_send: objc_msgSend, responds_to: class_respondsToSelector }
});

// ── Bridge ────────────────────────────────────────────────────────────────────

/// The process-wide Objective-C bridge.
#[derive(Clone, Copy)]
pub struct ObjC {
    table: &'static EntryPoints,
}

impl ObjC {
    /// The bridge over the shared entry-point table.
    pub fn shared() -> Self {
        Self { table: &ENTRY_POINTS }
    }

    /// Register (or look up) the interned selector for `name`.
    pub fn selector(&self, name: &str) -> Sel {
        Sel::register(name)
    }

    /// Send `sel` to `receiver` with word-sized arguments.
    ///
    /// # Safety
    ///
    /// `receiver` must be `nil` or a live object, and `R` plus the argument
    /// count must match the real signature of the method `sel` names.
    unsafe fn send_words<R>(&self, receiver: Id, sel: Sel, words: &[usize]) -> R {
        let obj = receiver.as_raw();
        let imp = self.table.msg_send;
        // SAFETY: objc_msgSend forwards its arguments untouched to the
        // method implementation, so casting it to the caller-asserted
        // signature is the documented way to call it.
        unsafe {
            match *words {
                [] => {
                    let f: unsafe extern "C" fn(*mut c_void, Sel) -> R = mem::transmute(imp);
                    f(obj, sel)
                }
                [a] => {
                    let f: unsafe extern "C" fn(*mut c_void, Sel, usize) -> R =
                        mem::transmute(imp);
                    f(obj, sel, a)
                }
                [a, b] => {
                    let f: unsafe extern "C" fn(*mut c_void, Sel, usize, usize) -> R =
                        mem::transmute(imp);
                    f(obj, sel, a, b)
                }
                [a, b, c] => {
                    let f: unsafe extern "C" fn(*mut c_void, Sel, usize, usize, usize) -> R =
                        mem::transmute(imp);
                    f(obj, sel, a, b, c)
                }
                [a, b, c, d] => {
                    let f: unsafe extern "C" fn(*mut c_void, Sel, usize, usize, usize, usize) -> R =
                        mem::transmute(imp);
                    f(obj, sel, a, b, c, d)
                }
                [a, b, c, d, e] => {
                    type Imp<R> =
                        unsafe extern "C" fn(*mut c_void, Sel, usize, usize, usize, usize, usize) -> R;
                    let f: Imp<R> = mem::transmute(imp);
                    f(obj, sel, a, b, c, d, e)
                }
                [a, b, c, d, e, g] => {
                    type Imp<R> = unsafe extern "C" fn(
                        *mut c_void,
                        Sel,
                        usize,
                        usize,
                        usize,
                        usize,
                        usize,
                        usize,
                    ) -> R;
                    let f: Imp<R> = mem::transmute(imp);
                    f(obj, sel, a, b, c, d, e, g)
                }
                _ => unreachable!("argument count checked by ObjC::call"),
            }
        }
    }
}

impl std::fmt::Debug for ObjC {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjC").finish_non_exhaustive()
    }
}

impl ObjcRuntime for ObjC {
    fn class(&self, name: &str) -> Id {
        match Class::get(name) {
            Some(cls) => NativeHandle::from_raw(cls as *const Class as *mut c_void),
            None => {
                tracing::debug!(name, "unknown Objective-C class");
                NativeHandle::NULL
            }
        }
    }

    fn responds_to(&self, class: Id, selector: &str) -> bool {
        if class.is_null() {
            return false;
        }
        let sel = self.selector(selector);
        // SAFETY: class is a non-null class pointer obtained from class();
        // class_respondsToSelector only reads runtime metadata.
        unsafe { (self.table.responds_to)(class.as_raw() as *const Class, sel) != NO }
    }

    /// Sends nothing and returns `Value::zero(ret)` if more than
    /// [`MAX_ARGS`] arguments are given.
    fn call(&self, receiver: Id, method: &str, args: &[Arg], ret: ReturnKind) -> Value {
        if args.len() > MAX_ARGS {
            tracing::warn!(method, count = args.len(), max = MAX_ARGS, "too many arguments; message not sent");
            return Value::zero(ret);
        }

        let sel = self.selector(method);
        let words: Vec<usize> = args.iter().map(|a| a.to_word()).collect();
        tracing::trace!(?receiver, method, ?args, ?ret, "objc_msgSend");

        // SAFETY: the receiver/selector/argument contract is the caller's,
        // as for any objc_msgSend; each arm asks for the requested kind.
        unsafe {
            match ret {
                ReturnKind::Void => {
                    self.send_words::<()>(receiver, sel, &words);
                    Value::Void
                }
                ReturnKind::Object => Value::Object(NativeHandle::from_raw(
                    self.send_words::<*mut c_void>(receiver, sel, &words),
                )),
                ReturnKind::Bool => Value::Bool(self.send_words::<BOOL>(receiver, sel, &words) != NO),
                ReturnKind::Int => Value::Int(self.send_words::<isize>(receiver, sel, &words)),
                ReturnKind::UInt => Value::UInt(self.send_words::<usize>(receiver, sel, &words)),
                ReturnKind::Double => Value::Double(self.send_words::<f64>(receiver, sel, &words)),
            }
        }
    }

    fn to_ns_string(&self, text: &str) -> Id {
        // Like SetWindowTextW, the native string ends at the first NUL.
        let text = text.split('\0').next().unwrap_or_default();
        let Ok(c_text) = CString::new(text) else {
            return NativeHandle::NULL;
        };
        // SAFETY: c_text is a valid NUL-terminated UTF-8 buffer for the call;
        // CoreFoundation copies it into the new string.
        let string = unsafe {
            CFStringCreateWithCString(kCFAllocatorDefault, c_text.as_ptr(), kCFStringEncodingUTF8)
        };
        NativeHandle::from_raw(string as *mut c_void)
    }

    fn from_ns_string(&self, string: Id) -> Option<String> {
        if string.is_null() {
            return Some(NIL_STRING.to_owned());
        }
        let cf = string.as_raw() as CFStringRef;

        // SAFETY: cf is a non-null NSString/CFString (toll-free bridged).
        let len = unsafe { CFStringGetLength(cf) };
        // SAFETY: pure size computation.
        let max = unsafe { CFStringGetMaximumSizeForEncoding(len, kCFStringEncodingUTF8) };
        let cap = usize::try_from(max).ok()? + 1;

        let mut buf = vec![0u8; cap];
        // SAFETY: buf is writable for cap bytes and cap is passed as the
        // buffer size, so CoreFoundation never writes past the end.
        let ok = unsafe {
            CFStringGetCString(
                cf,
                buf.as_mut_ptr() as *mut c_char,
                cap as CFIndex,
                kCFStringEncodingUTF8,
            )
        };
        if ok == 0 {
            tracing::debug!(?string, "CFStringGetCString failed");
            return None;
        }

        let text = CStr::from_bytes_until_nul(&buf).ok()?;
        text.to_str().ok().map(str::to_owned)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
//
// These talk to the real runtime, so they only build on macOS.
