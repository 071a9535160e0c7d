use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use agelens_core::classification::infrastructure::onnx_attribute_classifier::OnnxAttributeClassifier;
use agelens_core::detection::infrastructure::model_resolver;
use agelens_core::detection::infrastructure::onnx_face_detector::OnnxFaceDetector;
use agelens_core::history::detection_record::{DetectionRecord, Source};
use agelens_core::history::detection_store::DetectionStore;
use agelens_core::pipeline::annotate_image_use_case::AnnotateImageUseCase;
use agelens_core::pipeline::annotate_video_use_case::AnnotateVideoUseCase;
use agelens_core::pipeline::frame_pipeline::{FramePipeline, FrameResult};
use agelens_core::pipeline::pipeline_logger::LogPipelineLogger;
use agelens_core::shared::constants::{
    AGE_MODEL_NAME, AGE_MODEL_URL, FACE_MODEL_NAME, FACE_MODEL_URL, FACE_PADDING,
    GENDER_MODEL_NAME, GENDER_MODEL_URL, IMAGE_EXTENSIONS,
};
use agelens_core::video::domain::image_writer::ImageWriter;
use agelens_core::video::domain::video_reader::VideoReader;
use agelens_core::video::domain::video_writer::VideoWriter;
use agelens_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use agelens_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;
use agelens_core::video::infrastructure::image_file_reader::ImageFileReader;
use agelens_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// Age and gender annotation for faces in videos and images.
#[derive(Parser)]
#[command(name = "agelens")]
struct Cli {
    /// Input video or image file.
    input: PathBuf,

    /// Output file.
    output: PathBuf,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.5")]
    confidence: f64,

    /// Run the pipeline every Nth video frame (1 = every frame).
    #[arg(long, default_value = "2")]
    skip_frames: usize,

    /// Padding in pixels added around each detected face before
    /// classification.
    #[arg(long, default_value_t = FACE_PADDING)]
    padding: u32,

    /// Directory with pre-downloaded models (skips the download step).
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// SQLite file to append detection history to.
    #[arg(long)]
    history: Option<PathBuf>,

    /// User id recorded with each history row.
    #[arg(long, default_value = "0")]
    user: i64,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let pipeline = build_pipeline(&cli)?;

    let (results, source) = if is_image(&cli.input) {
        let detections = run_image(&cli.input, &cli.output, pipeline)?;
        (vec![detections], Source::Image)
    } else {
        let results = run_video(&cli.input, &cli.output, pipeline, cli.skip_frames)?;
        (results, Source::Video)
    };

    log_summary(&results);

    if let Some(ref db_path) = cli.history {
        let records: Vec<DetectionRecord> = results
            .iter()
            .flatten()
            .map(|d| DetectionRecord::from_face_label(&d.label, source, cli.user))
            .collect();
        let mut store = DetectionStore::open(db_path)?;
        store.insert_all(&records)?;
        log::info!("Recorded {} detections in {}", records.len(), db_path.display());
    }

    Ok(())
}

fn run_image(
    input: &Path,
    output: &Path,
    pipeline: FramePipeline,
) -> Result<FrameResult, Box<dyn std::error::Error>> {
    let reader: Box<dyn VideoReader> = Box::new(ImageFileReader::new());
    let image_writer: Box<dyn ImageWriter> = Box::new(ImageFileWriter::new());

    let mut use_case = AnnotateImageUseCase::new(reader, image_writer, pipeline);
    let detections = use_case.execute(input, output)?;
    log::info!("Output written to {}", output.display());
    Ok(detections)
}

fn run_video(
    input: &Path,
    output: &Path,
    pipeline: FramePipeline,
    skip_frames: usize,
) -> Result<Vec<FrameResult>, Box<dyn std::error::Error>> {
    let reader: Box<dyn VideoReader> = Box::new(FfmpegReader::new());
    let writer: Box<dyn VideoWriter> = Box::new(FfmpegWriter::new());

    let mut use_case = AnnotateVideoUseCase::new(
        reader,
        writer,
        pipeline,
        Some(skip_frames),
        Box::new(LogPipelineLogger::default()),
    );
    let results = use_case.execute(input, output)?;
    log::info!("Output written to {}", output.display());
    Ok(results)
}

fn build_pipeline(cli: &Cli) -> Result<FramePipeline, Box<dyn std::error::Error>> {
    let bundled = cli.models_dir.as_deref();

    log::info!("Resolving model: {FACE_MODEL_NAME}");
    let face_model = model_resolver::resolve(
        FACE_MODEL_NAME,
        FACE_MODEL_URL,
        bundled,
        Some(Box::new(download_progress)),
    )?;
    log::info!("Resolving model: {AGE_MODEL_NAME}");
    let age_model = model_resolver::resolve(
        AGE_MODEL_NAME,
        AGE_MODEL_URL,
        bundled,
        Some(Box::new(download_progress)),
    )?;
    log::info!("Resolving model: {GENDER_MODEL_NAME}");
    let gender_model = model_resolver::resolve(
        GENDER_MODEL_NAME,
        GENDER_MODEL_URL,
        bundled,
        Some(Box::new(download_progress)),
    )?;
    eprintln!();

    let detector = OnnxFaceDetector::new(&face_model, cli.confidence)?;
    let classifier = OnnxAttributeClassifier::new(&age_model, &gender_model)?;

    Ok(FramePipeline::with_padding(
        Box::new(detector),
        Box::new(classifier),
        cli.padding,
    ))
}

/// Logs how often each label occurred, mirroring the per-request summary a
/// caller would render.
fn log_summary(results: &[FrameResult]) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for detection in results.iter().flatten() {
        *counts.entry(detection.label.to_string()).or_default() += 1;
    }

    if counts.is_empty() {
        log::info!("No faces detected");
        return;
    }

    let mut entries: Vec<_> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for (label, count) in entries {
        log::info!("{label}: {count}");
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if cli.skip_frames == 0 {
        return Err("Skip frames must be at least 1".into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading model... {pct}%");
    } else {
        eprint!("\rDownloading model... {downloaded} bytes");
    }
}
