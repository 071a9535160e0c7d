use crate::shared::constants::FACE_PADDING;

/// A face box exactly as the detector reported it, in source-frame pixels.
///
/// May extend past the frame edges or carry negative coordinates; it becomes
/// usable only after padding and clipping into a [`FaceBox`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawFace {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// A padded, clipped face region guaranteed to lie inside its source frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceBox {
    /// Expands `raw` by `padding` pixels on every side, then clips to
    /// `[0, frame_width - 1] x [0, frame_height - 1]`.
    ///
    /// Returns `None` when the clipped region has zero area. Degenerate
    /// detections at frame edges are dropped silently rather than reported;
    /// callers must not treat the absence as an error.
    pub fn padded(raw: &RawFace, padding: u32, frame_width: u32, frame_height: u32) -> Option<Self> {
        if frame_width == 0 || frame_height == 0 {
            return None;
        }
        let pad = padding as i32;
        let x1 = (raw.x - pad).max(0);
        let y1 = (raw.y - pad).max(0);
        let x2 = (raw.x + raw.width + pad).min(frame_width as i32 - 1);
        let y2 = (raw.y + raw.height + pad).min(frame_height as i32 - 1);

        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Self {
            x: x1 as u32,
            y: y1 as u32,
            width: (x2 - x1) as u32,
            height: (y2 - y1) as u32,
        })
    }

    /// Padding-expanded clip with the default margin.
    pub fn from_detection(raw: &RawFace, frame_width: u32, frame_height: u32) -> Option<Self> {
        Self::padded(raw, FACE_PADDING, frame_width, frame_height)
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
