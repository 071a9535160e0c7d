use std::path::Path;

use crate::pipeline::frame_pipeline::{FramePipeline, FrameResult};
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_reader::VideoReader;

/// Single-image pipeline: read → detect → classify → annotate → write.
///
/// Also serves live-frame callers, which hand in a decoded still the same
/// way an upload does.
pub struct AnnotateImageUseCase {
    reader: Box<dyn VideoReader>,
    image_writer: Box<dyn ImageWriter>,
    pipeline: FramePipeline,
}

impl AnnotateImageUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        image_writer: Box<dyn ImageWriter>,
        pipeline: FramePipeline,
    ) -> Self {
        Self {
            reader,
            image_writer,
            pipeline,
        }
    }

    /// Reads a single image, annotates it, and writes the result.
    ///
    /// Returns the detections so the caller can persist or summarize them.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<FrameResult, Box<dyn std::error::Error>> {
        let _metadata = self.reader.open(input_path)?;

        let frame = self.reader.frames().next().ok_or("No frames in image")??;
        self.reader.close();

        let (detections, annotated) = self.pipeline.process(&frame)?;
        self.image_writer.write(output_path, &annotated)?;

        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::domain::attribute_classifier::AttributeClassifier;
    use crate::classification::domain::labels::{AgeBracket, FaceLabel, Gender};
    use crate::detection::domain::face_detector::FaceDetector;
    use crate::shared::face_box::RawFace;
    use crate::shared::frame::Frame;
    use crate::shared::video_metadata::VideoMetadata;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubImageReader {
        frame: Option<Frame>,
    }

    impl StubImageReader {
        fn new(frame: Frame) -> Self {
            Self { frame: Some(frame) }
        }
    }

    impl VideoReader for StubImageReader {
        fn open(&mut self, _path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            Ok(VideoMetadata {
                width: self.frame.as_ref().unwrap().width(),
                height: self.frame.as_ref().unwrap().height(),
                fps: 0.0,
                total_frames: 1,
                codec: String::new(),
                source_path: None,
            })
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(self.frame.take().into_iter().map(Ok))
        }

        fn close(&mut self) {
            self.frame = None;
        }
    }

    struct StubImageWriter {
        written: Arc<Mutex<Vec<(std::path::PathBuf, Frame)>>>,
    }

    impl StubImageWriter {
        fn new() -> Self {
            Self {
                written: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl ImageWriter for StubImageWriter {
        fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), frame.clone()));
            Ok(())
        }
    }

    struct StubDetector {
        faces: Vec<RawFace>,
    }

    impl FaceDetector for StubDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<RawFace>, Box<dyn std::error::Error>> {
            Ok(self.faces.clone())
        }
    }

    struct FixedClassifier;

    impl AttributeClassifier for FixedClassifier {
        fn classify(&mut self, _face: &Frame) -> Result<FaceLabel, Box<dyn std::error::Error>> {
            Ok(FaceLabel::new(Gender::Female, AgeBracket::YoungAdult))
        }
    }

    // --- Helpers ---

    fn make_frame(w: u32, h: u32) -> Frame {
        Frame::new(vec![128; (w * h * 3) as usize], w, h, 3, 0)
    }

    fn pipeline_with(faces: Vec<RawFace>) -> FramePipeline {
        FramePipeline::new(Box::new(StubDetector { faces }), Box::new(FixedClassifier))
    }

    // --- Tests ---

    #[test]
    fn test_returns_detections_and_writes_annotated_image() {
        let img_writer = StubImageWriter::new();
        let written = img_writer.written.clone();

        let mut uc = AnnotateImageUseCase::new(
            Box::new(StubImageReader::new(make_frame(100, 100))),
            Box::new(img_writer),
            pipeline_with(vec![RawFace {
                x: 30,
                y: 30,
                width: 40,
                height: 40,
            }]),
        );

        let detections = uc.execute(Path::new("in.png"), Path::new("out.png")).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].label.to_string(), "Female, (25-32)");

        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, Path::new("out.png"));
    }

    #[test]
    fn test_output_dimensions_preserved() {
        let img_writer = StubImageWriter::new();
        let written = img_writer.written.clone();

        let mut uc = AnnotateImageUseCase::new(
            Box::new(StubImageReader::new(make_frame(200, 150))),
            Box::new(img_writer),
            pipeline_with(vec![]),
        );

        uc.execute(Path::new("in.png"), Path::new("out.png")).unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written[0].1.width(), 200);
        assert_eq!(written[0].1.height(), 150);
    }

    #[test]
    fn test_no_faces_still_writes_image() {
        let img_writer = StubImageWriter::new();
        let written = img_writer.written.clone();

        let mut uc = AnnotateImageUseCase::new(
            Box::new(StubImageReader::new(make_frame(100, 100))),
            Box::new(img_writer),
            pipeline_with(vec![]),
        );

        let detections = uc.execute(Path::new("in.png"), Path::new("out.png")).unwrap();
        assert!(detections.is_empty());
        assert_eq!(written.lock().unwrap().len(), 1);
    }
}
