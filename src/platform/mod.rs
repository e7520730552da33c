// ── Platform abstraction layer ────────────────────────────────────────────────
//
// One `NativeWindow` implementation per OS.  All three are compiled on every
// host so their logic can be tested against fakes; only the backends that
// talk to the real OS (`SystemUser32`, `ObjC`) are gated by target.
// `PlatformWindow` names the one that drives the current target.

pub mod linux;
pub mod macos;
pub mod win32;

use crate::engine::WindowFactory;

#[cfg(target_os = "windows")]
pub type PlatformWindow<E> = win32::WindowsWindow<E, win32::SystemUser32>;

#[cfg(target_os = "macos")]
pub type PlatformWindow<E> = macos::MacWindow<E, macos::ObjC>;

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub type PlatformWindow<E> = linux::LinuxWindow<E>;

/// The native window variant for the current target, bound to `engine`.
pub fn platform_window<E: WindowFactory>(engine: E) -> PlatformWindow<E> {
    tracing::debug!(os = std::env::consts::OS, "selecting native window variant");
    PlatformWindow::new(engine)
}
