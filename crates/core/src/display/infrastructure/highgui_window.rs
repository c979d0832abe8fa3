use std::time::Duration;

use opencv::highgui;

use crate::display::domain::display_surface::{DisplayMode, DisplaySurface};
use crate::shared::frame::Frame;
use crate::shared::mat_conversion::frame_to_mat;

/// A resizable OpenCV HighGUI window.
///
/// The window is created lazily by the first [`DisplaySurface::show`].
pub struct HighGuiWindow {
    name: String,
    created: bool,
    mode: DisplayMode,
}

impl HighGuiWindow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: false,
            mode: DisplayMode::Windowed,
        }
    }

    fn apply_mode(&self) -> opencv::Result<()> {
        let value = match self.mode {
            DisplayMode::Fullscreen => highgui::WINDOW_FULLSCREEN,
            DisplayMode::Windowed => highgui::WINDOW_NORMAL,
        };
        highgui::set_window_property(&self.name, highgui::WND_PROP_FULLSCREEN, value as f64)
    }
}

impl DisplaySurface for HighGuiWindow {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if !self.created {
            highgui::named_window(&self.name, highgui::WINDOW_NORMAL)?;
            self.created = true;
            if self.mode == DisplayMode::Fullscreen {
                self.apply_mode()?;
            }
        }
        highgui::imshow(&self.name, &frame_to_mat(frame)?)?;
        Ok(())
    }

    fn wait_key(&mut self, timeout: Duration) -> Result<Option<char>, Box<dyn std::error::Error>> {
        // A zero delay would block until a key arrives.
        let delay = timeout.as_millis().clamp(1, i32::MAX as u128) as i32;
        let code = highgui::wait_key(delay)?;
        if code < 0 {
            return Ok(None);
        }
        Ok(Some(char::from((code & 0xFF) as u8)))
    }

    fn set_mode(&mut self, mode: DisplayMode) -> Result<(), Box<dyn std::error::Error>> {
        self.mode = mode;
        if self.created {
            self.apply_mode()?;
        }
        Ok(())
    }

    fn close(&mut self) {
        if !self.created {
            return;
        }
        self.created = false;
        if let Err(e) = highgui::destroy_all_windows() {
            log::warn!("Failed to close display windows: {e}");
        }
    }
}

impl Drop for HighGuiWindow {
    fn drop(&mut self) {
        self.close();
    }
}
