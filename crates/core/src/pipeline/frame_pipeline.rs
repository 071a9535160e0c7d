use crate::annotation::frame_annotator::FrameAnnotator;
use crate::classification::domain::attribute_classifier::AttributeClassifier;
use crate::classification::domain::labels::FaceLabel;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::constants::FACE_PADDING;
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// One labeled face in one processed frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detection {
    pub face_box: FaceBox,
    pub label: FaceLabel,
}

/// All detections for a single frame, in detector order. Possibly empty.
pub type FrameResult = Vec<Detection>;

/// One entry per input frame of a video. Skipped frames carry an empty
/// [`FrameResult`].
pub type VideoResult = Vec<FrameResult>;

/// The per-frame pipeline: detect faces, classify each padded crop, draw
/// boxes and labels.
///
/// Single-image, video, and live-frame callers all go through [`process`];
/// there is no separate fast path.
///
/// [`process`]: FramePipeline::process
pub struct FramePipeline {
    detector: Box<dyn FaceDetector>,
    classifier: Box<dyn AttributeClassifier>,
    annotator: FrameAnnotator,
    padding: u32,
}

impl FramePipeline {
    pub fn new(detector: Box<dyn FaceDetector>, classifier: Box<dyn AttributeClassifier>) -> Self {
        Self::with_padding(detector, classifier, FACE_PADDING)
    }

    pub fn with_padding(
        detector: Box<dyn FaceDetector>,
        classifier: Box<dyn AttributeClassifier>,
        padding: u32,
    ) -> Self {
        Self {
            detector,
            classifier,
            annotator: FrameAnnotator::new(),
            padding,
        }
    }

    /// Runs detection, classification, and annotation over one frame.
    ///
    /// Returns the detections in detector order together with the annotated
    /// copy of the frame. With zero faces the returned frame is
    /// pixel-identical to the input. Faces whose padded region clips to
    /// zero area are dropped without a trace.
    pub fn process(
        &mut self,
        frame: &Frame,
    ) -> Result<(FrameResult, Frame), Box<dyn std::error::Error>> {
        let raw_faces = self.detector.detect(frame)?;

        let mut detections = Vec::with_capacity(raw_faces.len());
        for raw in &raw_faces {
            let face_box = match FaceBox::padded(raw, self.padding, frame.width(), frame.height())
            {
                Some(b) => b,
                None => continue,
            };
            let crop = frame.crop(&face_box);
            let label = self.classifier.classify(&crop)?;
            detections.push(Detection { face_box, label });
        }

        let labeled: Vec<(FaceBox, FaceLabel)> =
            detections.iter().map(|d| (d.face_box, d.label)).collect();
        let annotated = self.annotator.annotate(frame, &labeled);

        Ok((detections, annotated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::domain::labels::{AgeBracket, Gender};
    use crate::shared::face_box::RawFace;

    // --- Stubs ---

    struct StubDetector {
        faces: Vec<RawFace>,
    }

    impl FaceDetector for StubDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<RawFace>, Box<dyn std::error::Error>> {
            Ok(self.faces.clone())
        }
    }

    struct FixedClassifier {
        label: FaceLabel,
        crops_seen: Vec<(u32, u32)>,
    }

    impl FixedClassifier {
        fn new(label: FaceLabel) -> Self {
            Self {
                label,
                crops_seen: Vec::new(),
            }
        }
    }

    impl AttributeClassifier for FixedClassifier {
        fn classify(&mut self, face: &Frame) -> Result<FaceLabel, Box<dyn std::error::Error>> {
            self.crops_seen.push((face.width(), face.height()));
            Ok(self.label)
        }
    }

    struct FailingDetector;

    impl FaceDetector for FailingDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<RawFace>, Box<dyn std::error::Error>> {
            Err("detector error".into())
        }
    }

    // --- Helpers ---

    fn make_frame(w: u32, h: u32) -> Frame {
        Frame::new(vec![128; (w * h * 3) as usize], w, h, 3, 0)
    }

    fn male_adult() -> FaceLabel {
        FaceLabel::new(Gender::Male, AgeBracket::Adult)
    }

    fn pipeline_with(faces: Vec<RawFace>) -> FramePipeline {
        FramePipeline::new(
            Box::new(StubDetector { faces }),
            Box::new(FixedClassifier::new(male_adult())),
        )
    }

    // --- Tests ---

    #[test]
    fn test_zero_faces_yields_empty_result_and_identical_frame() {
        let frame = make_frame(100, 100);
        let mut pipeline = pipeline_with(vec![]);

        let (result, annotated) = pipeline.process(&frame).unwrap();
        assert!(result.is_empty());
        assert_eq!(annotated, frame);
    }

    #[test]
    fn test_detection_boxes_stay_inside_frame() {
        // Detector box hangs over the right/bottom edges
        let frame = make_frame(200, 150);
        let mut pipeline = pipeline_with(vec![RawFace {
            x: 170,
            y: 120,
            width: 60,
            height: 60,
        }]);

        let (result, _) = pipeline.process(&frame).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].face_box.right() <= 199);
        assert!(result[0].face_box.bottom() <= 149);
    }

    #[test]
    fn test_degenerate_face_dropped_silently() {
        // One face fully outside the frame, one valid
        let frame = make_frame(100, 100);
        let mut pipeline = pipeline_with(vec![
            RawFace {
                x: 500,
                y: 500,
                width: 40,
                height: 40,
            },
            RawFace {
                x: 30,
                y: 30,
                width: 40,
                height: 40,
            },
        ]);

        let (result, _) = pipeline.process(&frame).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].face_box.x, 10); // 30 - 20 padding
    }

    #[test]
    fn test_classifier_receives_padded_crop() {
        let frame = make_frame(200, 200);
        let classifier = FixedClassifier::new(male_adult());
        let mut pipeline = FramePipeline::new(
            Box::new(StubDetector {
                faces: vec![RawFace {
                    x: 50,
                    y: 50,
                    width: 40,
                    height: 40,
                }],
            }),
            Box::new(classifier),
        );

        let (result, _) = pipeline.process(&frame).unwrap();
        // 40 + 2*20 padding on each axis
        assert_eq!(result[0].face_box.width, 80);
        assert_eq!(result[0].face_box.height, 80);
    }

    #[test]
    fn test_results_preserve_detector_order() {
        let frame = make_frame(300, 100);
        let mut pipeline = pipeline_with(vec![
            RawFace {
                x: 200,
                y: 30,
                width: 30,
                height: 30,
            },
            RawFace {
                x: 40,
                y: 30,
                width: 30,
                height: 30,
            },
        ]);

        let (result, _) = pipeline.process(&frame).unwrap();
        assert_eq!(result.len(), 2);
        // No sorting: second detection keeps its detector position
        assert!(result[0].face_box.x > result[1].face_box.x);
    }

    #[test]
    fn test_annotated_frame_differs_when_faces_present() {
        let frame = make_frame(100, 100);
        let mut pipeline = pipeline_with(vec![RawFace {
            x: 30,
            y: 30,
            width: 40,
            height: 40,
        }]);

        let (_, annotated) = pipeline.process(&frame).unwrap();
        assert_ne!(annotated, frame);
        assert_eq!(annotated.width(), frame.width());
        assert_eq!(annotated.height(), frame.height());
    }

    #[test]
    fn test_detector_error_propagates() {
        let frame = make_frame(100, 100);
        let mut pipeline = FramePipeline::new(
            Box::new(FailingDetector),
            Box::new(FixedClassifier::new(male_adult())),
        );
        assert!(pipeline.process(&frame).is_err());
    }

    #[test]
    fn test_input_frame_unmodified() {
        let frame = make_frame(100, 100);
        let before = frame.clone();
        let mut pipeline = pipeline_with(vec![RawFace {
            x: 30,
            y: 30,
            width: 40,
            height: 40,
        }]);

        let _ = pipeline.process(&frame).unwrap();
        assert_eq!(frame, before);
    }
}
