use opencv::core::{Mat, Scalar, CV_8U, CV_8UC1, CV_8UC3};
use opencv::prelude::*;

use crate::shared::frame::Frame;

/// Copies an 8-bit OpenCV matrix into a [`Frame`]; an empty matrix becomes
/// an empty frame.
pub fn mat_to_frame(mat: &Mat, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    if mat.empty() {
        return Ok(Frame::empty(index));
    }
    if mat.depth() != CV_8U {
        return Err(format!("unsupported matrix depth {}, expected 8-bit", mat.depth()).into());
    }

    let compact;
    let source = if mat.is_continuous() {
        mat
    } else {
        compact = mat.try_clone()?;
        &compact
    };

    let data = source.data_bytes()?.to_vec();
    Ok(Frame::new(
        data,
        source.cols() as u32,
        source.rows() as u32,
        source.channels() as u8,
        index,
    ))
}

/// Copies a 1- or 3-channel [`Frame`] into a freshly allocated matrix.
pub fn frame_to_mat(frame: &Frame) -> opencv::Result<Mat> {
    let typ = match frame.channels() {
        1 => CV_8UC1,
        3 => CV_8UC3,
        n => {
            return Err(opencv::Error::new(
                opencv::core::StsBadArg,
                format!("cannot convert {n}-channel frame to a matrix"),
            ))
        }
    };
    let mut mat = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        typ,
        Scalar::all(0.0),
    )?;
    mat.data_bytes_mut()?.copy_from_slice(frame.data());
    Ok(mat)
}
