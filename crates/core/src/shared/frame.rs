use ndarray::{s, ArrayView3, ArrayViewMut3};

use crate::shared::region::Region;

/// A single captured frame: contiguous bytes in row-major order.
///
/// Color frames carry 3 channels in BGR order (as the capture backend
/// delivers them); grayscale frames carry 1 channel. A frame with zero
/// width or height is "empty" and is skipped by the pipeline.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// A zero-sized frame, as delivered by a capture that produced no image.
    pub fn empty(index: usize) -> Self {
        Self::new(Vec::new(), 0, 0, 3, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Copies the part of `region` that lies inside the frame into a new frame.
    ///
    /// Returns `None` when the region and the frame do not overlap.
    pub fn crop(&self, region: &Region) -> Option<Frame> {
        let visible = region.clamp_to(self.width as i32, self.height as i32)?;
        let (x0, y0) = (visible.x as usize, visible.y as usize);
        let (x1, y1) = (x0 + visible.width as usize, y0 + visible.height as usize);
        let data = self
            .as_ndarray()
            .slice(s![y0..y1, x0..x1, ..])
            .iter()
            .copied()
            .collect();
        Some(Frame::new(
            data,
            visible.width as u32,
            visible.height as u32,
            self.channels,
            self.index,
        ))
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
