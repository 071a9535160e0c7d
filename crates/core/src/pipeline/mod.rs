pub mod annotate_image_use_case;
pub mod annotate_video_use_case;
pub mod frame_pipeline;
pub mod pipeline_logger;
