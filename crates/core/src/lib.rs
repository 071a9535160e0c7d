//! Face detection with age and gender annotation.
//!
//! The per-frame pipeline (detect faces, classify each crop, draw boxes and
//! labels) lives in [`pipeline::frame_pipeline::FramePipeline`]; the video
//! sequence processor with frame-skip decimation is
//! [`pipeline::annotate_video_use_case::AnnotateVideoUseCase`]. Domain traits
//! sit under `*/domain`, concrete ONNX/ffmpeg/SQLite adapters under
//! `*/infrastructure`.

pub mod annotation;
pub mod classification;
pub mod detection;
pub mod history;
pub mod pipeline;
pub mod shared;
pub mod video;
