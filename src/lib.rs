// native-frame: native window lifecycle for an embedded browser engine.
//
// The engine creates the OS window; this crate drives it afterwards (show,
// hide, minimize, maximize, close, title) and runs the application event
// loop.  One implementation exists per OS, selected at build time.
//
// Module layout:
//   engine    – the engine's window-creation entry point (`WindowFactory`)
//   window    – the `NativeWindow` capability set shared by all variants
//   platform  – Windows / macOS / Linux variants and build-time selection
//   config    – JSON window descriptions
//   logging   – optional `tracing` subscriber setup
//
// `unsafe` is denied crate-wide and allowed only in the modules that cross
// into native code (the Windows delegate, user32 and the Objective-C bridge).

#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod flags;
pub mod handle;
pub mod logging;
pub mod platform;
pub mod window;

pub use config::WindowConfig;
pub use engine::{WindowDelegate, WindowFactory};
pub use error::{FrameError, Result};
pub use flags::WindowFlags;
pub use handle::{NativeHandle, Rect};
pub use platform::{platform_window, PlatformWindow};
pub use window::{NativeWindow, WindowState};
