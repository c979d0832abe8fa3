use std::fmt;
use std::time::Duration;

use crate::shared::frame::Frame;

/// Presentation mode of the display window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Windowed,
    Fullscreen,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Windowed => DisplayMode::Fullscreen,
            DisplayMode::Fullscreen => DisplayMode::Windowed,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Windowed => f.write_str("windowed"),
            DisplayMode::Fullscreen => f.write_str("fullscreen"),
        }
    }
}

/// A named on-screen window that shows frames and reports keystrokes.
pub trait DisplaySurface {
    /// Shows `frame`, creating the window on first use.
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Blocks for up to `timeout` waiting for a key. `None` if no key arrived.
    fn wait_key(&mut self, timeout: Duration) -> Result<Option<char>, Box<dyn std::error::Error>>;

    fn set_mode(&mut self, mode: DisplayMode) -> Result<(), Box<dyn std::error::Error>>;

    /// Destroys the window. Safe to call more than once.
    fn close(&mut self);
}
