// ── macOS (AppKit) ────────────────────────────────────────────────────────────
//
// Window requests are Objective-C message sends routed through `ObjcRuntime`.
// `runtime` and `window` are portable; only the real bridge links against
// libobjc and CoreFoundation.

pub mod runtime;
pub mod window;

#[cfg(target_os = "macos")]
mod bridge;

#[cfg(target_os = "macos")]
pub use bridge::{ObjC, MAX_ARGS};
pub use runtime::{Arg, Id, ObjcRuntime, ReturnKind, UnknownReturnKind, Value, NIL_STRING};
pub use window::MacWindow;
