use std::path::Path;
use std::time::Instant;

use crate::pipeline::frame_pipeline::{FramePipeline, VideoResult};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::DEFAULT_SKIP_FRAMES;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

/// Sequence processor: runs the per-frame pipeline over a video with
/// frame-skip decimation.
///
/// Frame `i` goes through the full pipeline when `i % skip_frames == 0`;
/// every other frame re-emits the most recent annotated frame and records
/// an empty result. The output plays at `source_fps / skip_frames`, so
/// decimation cuts both the work and the nominal playback rate.
pub struct AnnotateVideoUseCase {
    reader: Box<dyn VideoReader>,
    writer: Box<dyn VideoWriter>,
    pipeline: FramePipeline,
    skip_frames: usize,
    logger: Box<dyn PipelineLogger>,
}

impl AnnotateVideoUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        writer: Box<dyn VideoWriter>,
        pipeline: FramePipeline,
        skip_frames: Option<usize>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            reader,
            writer,
            pipeline,
            skip_frames: skip_frames.unwrap_or(DEFAULT_SKIP_FRAMES).max(1),
            logger,
        }
    }

    /// Processes the whole input stream and writes the annotated output.
    ///
    /// Returns one result entry per input frame; skipped frames carry an
    /// empty entry. Runs to stream exhaustion; there is no mid-video
    /// cancellation.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<VideoResult, Box<dyn std::error::Error>> {
        let result = self.run(input_path, output_path);

        self.reader.close();
        let close_result = self.writer.close();

        let results = result?;
        close_result?;
        self.logger.summary();
        Ok(results)
    }

    fn run(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<VideoResult, Box<dyn std::error::Error>> {
        let metadata = self.reader.open(input_path)?;
        let output_fps = metadata.fps / self.skip_frames as f64;
        let skip = self.skip_frames;

        let mut results: VideoResult = Vec::new();
        let mut last_annotated: Option<Frame> = None;
        let mut writer_open = false;

        let frames = self.reader.frames();
        for (index, frame) in frames.enumerate() {
            let frame = frame?;

            if index % skip == 0 {
                let started = Instant::now();
                let (detections, annotated) = self.pipeline.process(&frame)?;
                self.logger
                    .timing("process", started.elapsed().as_secs_f64() * 1000.0);
                self.logger.metric("faces", detections.len() as f64);

                // The writer opens from the first decoded frame's dimensions
                // rather than the container's declared size.
                if !writer_open {
                    let output_metadata = VideoMetadata {
                        width: annotated.width(),
                        height: annotated.height(),
                        fps: output_fps,
                        total_frames: metadata.total_frames,
                        codec: metadata.codec.clone(),
                        source_path: metadata.source_path.clone(),
                    };
                    self.writer.open(output_path, &output_metadata)?;
                    writer_open = true;
                }

                self.writer.write(&annotated)?;
                last_annotated = Some(annotated);
                results.push(detections);
            } else {
                // Frame 0 is always processed, so a previous annotated frame
                // exists whenever we skip.
                if let Some(ref previous) = last_annotated {
                    self.writer.write(previous)?;
                }
                results.push(Vec::new());
            }

            self.logger.progress(index + 1, metadata.total_frames);
        }

        Ok(results)
    }
}
