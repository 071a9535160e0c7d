use crate::classification::domain::labels::FaceLabel;
use crate::shared::frame::Frame;

/// Domain interface for age/gender classification of a cropped face.
///
/// The crop may be any size; implementations normalize internally. A call is
/// deterministic and side-effect-free, so there is no retry path.
pub trait AttributeClassifier: Send {
    fn classify(&mut self, face: &Frame) -> Result<FaceLabel, Box<dyn std::error::Error>>;
}
