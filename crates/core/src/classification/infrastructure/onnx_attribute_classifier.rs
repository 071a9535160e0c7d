//! Age and gender classification using ONNX Runtime via `ort`.
//!
//! Runs two Caffe-lineage GoogLeNet models over the same preprocessed face
//! crop and combines their argmax winners into a single label.

use std::path::Path;

use crate::classification::domain::attribute_classifier::AttributeClassifier;
use crate::classification::domain::labels::{AgeBracket, FaceLabel, Gender};
use crate::shared::constants::{CLASSIFIER_INPUT_SIZE, CLASSIFIER_MEAN_BGR};
use crate::shared::frame::Frame;

/// Attribute classifier backed by two ONNX Runtime sessions.
pub struct OnnxAttributeClassifier {
    age_session: ort::session::Session,
    gender_session: ort::session::Session,
}

impl OnnxAttributeClassifier {
    pub fn new(age_model: &Path, gender_model: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let age_session = ort::session::Session::builder()?.commit_from_file(age_model)?;
        let gender_session = ort::session::Session::builder()?.commit_from_file(gender_model)?;
        Ok(Self {
            age_session,
            gender_session,
        })
    }
}

impl AttributeClassifier for OnnxAttributeClassifier {
    fn classify(&mut self, face: &Frame) -> Result<FaceLabel, Box<dyn std::error::Error>> {
        let input = preprocess(face)?;

        let gender_scores = run_scores(&mut self.gender_session, input.clone())?;
        let gender = gender_from_scores(&gender_scores)?;

        let age_scores = run_scores(&mut self.age_session, input)?;
        let age = age_from_scores(&age_scores)?;

        Ok(FaceLabel::new(gender, age))
    }
}

/// Maps a gender score vector to its label.
///
/// The vector width must equal the label set exactly; a model with a
/// different output head is an error, never a misread label.
fn gender_from_scores(scores: &[f32]) -> Result<Gender, Box<dyn std::error::Error>> {
    if scores.len() != Gender::COUNT {
        return Err(format!(
            "gender model emitted {} scores, expected {}",
            scores.len(),
            Gender::COUNT
        )
        .into());
    }
    Gender::from_index(argmax(scores)).ok_or_else(|| "empty gender score vector".into())
}

fn age_from_scores(scores: &[f32]) -> Result<AgeBracket, Box<dyn std::error::Error>> {
    if scores.len() != AgeBracket::COUNT {
        return Err(format!(
            "age model emitted {} scores, expected {}",
            scores.len(),
            AgeBracket::COUNT
        )
        .into());
    }
    AgeBracket::from_index(argmax(scores)).ok_or_else(|| "empty age score vector".into())
}

fn run_scores(
    session: &mut ort::session::Session,
    input: ndarray::Array4<f32>,
) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let input_value = ort::value::Tensor::from_array(input)?;
    let outputs = session.run(ort::inputs![input_value])?;
    if outputs.len() == 0 {
        return Err("attribute model produced no outputs".into());
    }
    let tensor = outputs[0].try_extract_array::<f32>()?;
    // Output is [1, num_classes] or [num_classes]; either way the flat
    // slice is the score vector.
    let data = tensor.as_slice().ok_or("cannot get tensor slice")?;
    Ok(data.to_vec())
}

/// Builds the classifier input from an RGB face crop.
///
/// Nearest-neighbor resize to the model's square input, then per-channel
/// mean subtraction with channels reordered to BGR. The models were trained
/// on 0-255 BGR input, so there is no /255 scaling here.
///
/// A zero-sized crop cannot be resized and is rejected.
fn preprocess(face: &Frame) -> Result<ndarray::Array4<f32>, Box<dyn std::error::Error>> {
    let src_h = face.height() as usize;
    let src_w = face.width() as usize;
    if src_h == 0 || src_w == 0 {
        return Err("cannot classify an empty face crop".into());
    }

    let size = CLASSIFIER_INPUT_SIZE as usize;
    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, size, size));

    let src = face.as_ndarray(); // [H, W, C] u8, RGB

    for y in 0..size {
        let src_y = (y * src_h / size).min(src_h - 1);
        for x in 0..size {
            let src_x = (x * src_w / size).min(src_w - 1);
            // RGB source channel c maps to BGR plane 2 - c
            for c in 0..3 {
                tensor[[0, 2 - c, y, x]] =
                    src[[src_y, src_x, c]] as f32 - CLASSIFIER_MEAN_BGR[2 - c];
            }
        }
    }

    Ok(tensor)
}

/// Index of the highest score. Ties resolve to the first occurrence.
fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate() {
        if s > scores[best] {
            best = i;
        }
    }
    best
}
