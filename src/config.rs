// ── Window configuration ──────────────────────────────────────────────────────
//
// A JSON description of a window to open:
//
//   {
//     "flags": "TITLEBAR | RESIZEABLE | CONTROLS | MAIN",
//     "rect": { "left": 100, "top": 100, "right": 900, "bottom": 700 },
//     "title": "Inbox",
//     "maximize": false
//   }
//
// Every field is optional; missing fields take `WindowConfig::default()`.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    flags::WindowFlags,
    handle::{NativeHandle, Rect},
    window::NativeWindow,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub flags: WindowFlags,
    /// Placement; the engine chooses one when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub maximize: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { flags: WindowFlags::main_window(), rect: None, title: None, maximize: false }
    }
}

impl WindowConfig {
    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading window configuration");
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Create a top-level window from this configuration, title it and
    /// show it.
    ///
    /// Returns the engine's handle.  If creation fails the null handle is
    /// returned and nothing else is sent to the window.
    pub fn open<W: NativeWindow>(&self, window: &mut W) -> NativeHandle {
        let handle = window.create(self.flags, self.rect, NativeHandle::NULL);
        if handle.is_null() {
            return handle;
        }
        if let Some(title) = &self.title {
            window.set_title(title);
        }
        window.expand(self.maximize);
        handle
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::FrameError;
    use crate::window::WindowState;

    #[derive(Default)]
    struct RecordingWindow {
        answer: NativeHandle,
        handle: NativeHandle,
        created: Option<(WindowFlags, Option<Rect>)>,
        requests: RefCell<Vec<String>>,
    }

    impl NativeWindow for RecordingWindow {
        fn create(&mut self, flags: WindowFlags, rect: Option<Rect>, _: NativeHandle) -> NativeHandle {
            self.created = Some((flags, rect));
            self.handle = self.answer;
            self.handle
        }
        fn handle(&self) -> NativeHandle {
            self.handle
        }
        fn window_flags(&self) -> WindowFlags {
            self.created.map(|(f, _)| f).unwrap_or_default()
        }
        fn state(&self) -> WindowState {
            WindowState::Created
        }
        fn collapse(&self, hide: bool) -> &Self {
            self.requests.borrow_mut().push(format!("collapse({hide})"));
            self
        }
        fn expand(&self, maximize: bool) -> &Self {
            self.requests.borrow_mut().push(format!("expand({maximize})"));
            self
        }
        fn dismiss(&self) -> &Self {
            self
        }
        fn set_title(&self, title: &str) -> &Self {
            self.requests.borrow_mut().push(format!("set_title({title})"));
            self
        }
        fn get_title(&self) -> crate::error::Result<String> {
            Err(FrameError::Unsupported("get_title"))
        }
        fn run_app(&self) -> crate::error::Result<i32> {
            Ok(0)
        }
        fn quit_app(&self, _: i32) -> &Self {
            self
        }
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(WindowConfig::from_json("{}").expect("parse"), WindowConfig::default());
    }

    #[test]
    fn parses_every_field() {
        let cfg = WindowConfig::from_json(
            r#"{
                "flags": "TITLEBAR | POPUP",
                "rect": { "left": 1, "top": 2, "right": 301, "bottom": 202 },
                "title": "Inbox",
                "maximize": true
            }"#,
        )
        .expect("parse");
        assert_eq!(cfg.flags, WindowFlags::TITLEBAR | WindowFlags::POPUP);
        assert_eq!(cfg.rect.map(|r| r.width()), Some(300));
        assert_eq!(cfg.title.as_deref(), Some("Inbox"));
        assert!(cfg.maximize);
    }

    #[test]
    fn unknown_flag_is_config_error() {
        let err = WindowConfig::from_json(r#"{ "flags": "TITLEBAR | SPARKLY" }"#).unwrap_err();
        assert!(matches!(err, FrameError::Config(_)));
    }

    #[test]
    fn to_json_reparses() {
        let cfg = WindowConfig { title: Some("café".into()), maximize: true, ..Default::default() };
        let text = cfg.to_json().expect("serialize");
        assert!(!text.contains("rect"));
        assert_eq!(WindowConfig::from_json(&text).expect("parse"), cfg);
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("native-frame-no-such-config.json");
        assert!(matches!(WindowConfig::load(path), Err(FrameError::Io(_))));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!("native-frame-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "title": "From disk" }"#).expect("write");
        let cfg = WindowConfig::load(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(cfg.expect("load").title.as_deref(), Some("From disk"));
    }

    #[test]
    fn open_creates_titles_and_shows() {
        let cfg = WindowConfig {
            rect: Some(Rect::from_origin_size(0, 0, 640, 480)),
            title: Some("Inbox".into()),
            maximize: true,
            ..Default::default()
        };
        let mut w = RecordingWindow { answer: NativeHandle::from_addr(0x42), ..Default::default() };

        assert_eq!(cfg.open(&mut w), NativeHandle::from_addr(0x42));
        assert_eq!(w.created, Some((WindowFlags::main_window(), cfg.rect)));
        assert_eq!(*w.requests.borrow(), ["set_title(Inbox)", "expand(true)"]);
    }

    #[test]
    fn open_stops_when_creation_fails() {
        let cfg = WindowConfig { title: Some("Inbox".into()), ..Default::default() };
        let mut w = RecordingWindow::default();
        assert!(cfg.open(&mut w).is_null());
        assert!(w.requests.borrow().is_empty());
    }
}
