use crate::display::domain::display_surface::DisplayMode;
use crate::shared::constants::{FULLSCREEN_KEY, QUIT_KEY};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// Action bound to a keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    ToggleFullscreen,
}

impl KeyCommand {
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            QUIT_KEY => Some(KeyCommand::Quit),
            FULLSCREEN_KEY => Some(KeyCommand::ToggleFullscreen),
            _ => None,
        }
    }
}

/// Owns the loop's run state and the window's display mode, and advances
/// both from the key observed at the end of each iteration.
#[derive(Debug)]
pub struct LoopController {
    state: RunState,
    mode: DisplayMode,
}

impl LoopController {
    pub fn new() -> Self {
        Self {
            state: RunState::Running,
            mode: DisplayMode::Windowed,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Applies one polled key. Returns the new display mode when it changed.
    ///
    /// `Stopped` is terminal: keys observed afterwards are ignored.
    pub fn handle_key(&mut self, key: Option<char>) -> Option<DisplayMode> {
        if self.state == RunState::Stopped {
            return None;
        }
        match key.and_then(KeyCommand::from_key)? {
            KeyCommand::Quit => {
                self.state = RunState::Stopped;
                None
            }
            KeyCommand::ToggleFullscreen => {
                self.mode = self.mode.toggled();
                Some(self.mode)
            }
        }
    }
}

impl Default for LoopController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_initial_state() {
        let controller = LoopController::new();
        assert_eq!(controller.state(), RunState::Running);
        assert_eq!(controller.mode(), DisplayMode::Windowed);
        assert!(controller.is_running());
    }

    #[test]
    fn test_quit_key_stops() {
        let mut controller = LoopController::new();
        assert_eq!(controller.handle_key(Some('x')), None);
        assert_eq!(controller.state(), RunState::Stopped);
    }

    #[rstest]
    #[case::no_key(None)]
    #[case::uppercase_x(Some('X'))]
    #[case::q(Some('q'))]
    #[case::escape(Some('\u{1b}'))]
    #[case::space(Some(' '))]
    fn test_other_keys_keep_running(#[case] key: Option<char>) {
        let mut controller = LoopController::new();
        assert_eq!(controller.handle_key(key), None);
        assert!(controller.is_running());
        assert_eq!(controller.mode(), DisplayMode::Windowed);
    }

    #[test]
    fn test_fullscreen_key_toggles_both_ways() {
        let mut controller = LoopController::new();
        assert_eq!(
            controller.handle_key(Some('f')),
            Some(DisplayMode::Fullscreen)
        );
        assert!(controller.is_running());
        assert_eq!(controller.handle_key(Some('f')), Some(DisplayMode::Windowed));
        assert_eq!(controller.mode(), DisplayMode::Windowed);
    }

    #[test]
    fn test_stopped_is_terminal() {
        let mut controller = LoopController::new();
        controller.handle_key(Some('x'));
        assert_eq!(controller.handle_key(Some('f')), None);
        assert_eq!(controller.state(), RunState::Stopped);
        assert_eq!(controller.mode(), DisplayMode::Windowed);
    }

    #[test]
    fn test_key_command_mapping() {
        assert_eq!(KeyCommand::from_key('x'), Some(KeyCommand::Quit));
        assert_eq!(
            KeyCommand::from_key('f'),
            Some(KeyCommand::ToggleFullscreen)
        );
        assert_eq!(KeyCommand::from_key('F'), None);
    }
}
