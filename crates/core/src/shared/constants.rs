use std::time::Duration;

pub const FACE_CASCADE_NAME: &str = "lbpcascade_frontalface.xml";
pub const FACE_CASCADE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/master/data/lbpcascades/lbpcascade_frontalface.xml";

pub const EYE_CASCADE_NAME: &str = "haarcascade_eye.xml";
pub const EYE_CASCADE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/master/data/haarcascades/haarcascade_eye.xml";

pub const WINDOW_NAME: &str = "Face Detection using LBP Cascades";

/// Keyboard wait per frame (1000ms / 25 fps).
pub const KEY_WAIT: Duration = Duration::from_millis(40);

pub const QUIT_KEY: char = 'x';
pub const FULLSCREEN_KEY: char = 'f';

/// Consecutive frame-less iterations before the source counts as exhausted
/// (~1 second at the 40ms key wait).
pub const DEFAULT_MAX_MISSED_FRAMES: usize = 25;

/// Outline colors are BGR, matching the frame byte order.
pub const FACE_COLOR: [u8; 3] = [255, 0, 0];
pub const EYE_COLOR: [u8; 3] = [0, 255, 0];
pub const OUTLINE_THICKNESS: i32 = 2;

/// Download location for the cascade models this tool knows by name.
pub fn known_model_url(file_name: &str) -> Option<&'static str> {
    match file_name {
        FACE_CASCADE_NAME => Some(FACE_CASCADE_URL),
        EYE_CASCADE_NAME => Some(EYE_CASCADE_URL),
        _ => None,
    }
}
