use ndarray::{ArrayView3, ArrayViewMut3};

use crate::shared::face_box::FaceBox;

/// A single video/image frame: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; everything above the
/// reader/writer layer works on this one representation.
#[derive(Clone, Debug, PartialEq)]
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

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
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

    /// Extracts the pixels covered by `face` into a new frame.
    ///
    /// `face` is already clipped to this frame's bounds, so the copy is a
    /// plain row-by-row slice.
    pub fn crop(&self, face: &FaceBox) -> Frame {
        let ch = self.channels as usize;
        let fw = face.width as usize;
        let fh = face.height as usize;
        let x0 = face.x as usize;
        let y0 = face.y as usize;

        let mut data = Vec::with_capacity(fw * fh * ch);
        for row in 0..fh {
            let start = ((y0 + row) * self.width as usize + x0) * ch;
            data.extend_from_slice(&self.data[start..start + fw * ch]);
        }
        Frame::new(data, face.width, face.height, self.channels, self.index)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_clone_is_independent() {
        let data = vec![100u8; 12];
        let frame = Frame::new(data, 2, 2, 3, 0);
        let mut cloned = frame.clone();
        cloned.data_mut()[0] = 0;
        assert_eq!(frame.data()[0], 100);
        assert_eq!(cloned.data()[0], 0);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Frame::new(data, 2, 2, 3, 0);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let data = vec![0u8; 24]; // 2x4x3
        let frame = Frame::new(data, 4, 2, 3, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 4, 3]); // (height, width, channels)
    }

    #[test]
    fn test_as_ndarray_pixel_access() {
        // 2x2 RGB: set pixel (row=1, col=0) to red
        let mut data = vec![0u8; 12];
        data[6] = 255;
        let frame = Frame::new(data, 2, 2, 3, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr[[1, 0, 0]], 255);
        assert_eq!(arr[[1, 0, 1]], 0);
        assert_eq!(arr[[1, 0, 2]], 0);
    }

    #[test]
    fn test_crop_extracts_region() {
        // 4x4 RGB gradient: pixel (x, y) stores (x, y, 0)
        let mut data = Vec::with_capacity(4 * 4 * 3);
        for y in 0..4u8 {
            for x in 0..4u8 {
                data.extend_from_slice(&[x, y, 0]);
            }
        }
        let frame = Frame::new(data, 4, 4, 3, 7);

        let face = FaceBox {
            x: 1,
            y: 2,
            width: 2,
            height: 2,
        };
        let crop = frame.crop(&face);

        assert_eq!(crop.width(), 2);
        assert_eq!(crop.height(), 2);
        assert_eq!(crop.index(), 7);
        // Top-left of the crop is source pixel (1, 2)
        assert_eq!(&crop.data()[0..3], &[1, 2, 0]);
        // Bottom-right of the crop is source pixel (2, 3)
        assert_eq!(&crop.data()[9..12], &[2, 3, 0]);
    }

    #[test]
    fn test_crop_full_frame_is_identity() {
        let data = vec![42u8; 2 * 3 * 3];
        let frame = Frame::new(data.clone(), 3, 2, 3, 0);
        let face = FaceBox {
            x: 0,
            y: 0,
            width: 3,
            height: 2,
        };
        let crop = frame.crop(&face);
        assert_eq!(crop.data(), &data[..]);
    }
}
