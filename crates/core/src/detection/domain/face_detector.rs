use crate::shared::face_box::RawFace;
use crate::shared::frame::Frame;

/// Domain interface for face detection.
///
/// Returns raw, unordered detector boxes; padding and clipping to frame
/// bounds happen downstream. Implementations own a model session, hence
/// `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<RawFace>, Box<dyn std::error::Error>>;
}
