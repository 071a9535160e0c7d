pub const FACE_MODEL_NAME: &str = "yolov8n-face.onnx";
pub const FACE_MODEL_URL: &str =
    "https://github.com/derronqi/yolov8-face/releases/download/v0.0.0/yolov8n-face.onnx";

pub const AGE_MODEL_NAME: &str = "age_net.onnx";
pub const AGE_MODEL_URL: &str =
    "https://github.com/onnx/models/raw/main/validated/vision/body_analysis/age_gender/models/age_googlenet.onnx";

pub const GENDER_MODEL_NAME: &str = "gender_net.onnx";
pub const GENDER_MODEL_URL: &str =
    "https://github.com/onnx/models/raw/main/validated/vision/body_analysis/age_gender/models/gender_googlenet.onnx";

/// Pixels added on every side of a raw detection before classification.
pub const FACE_PADDING: u32 = 20;

/// Square input resolution of both attribute classifiers.
pub const CLASSIFIER_INPUT_SIZE: u32 = 227;

/// Per-channel means subtracted before classification, in the BGR plane
/// order the Caffe-trained models expect.
pub const CLASSIFIER_MEAN_BGR: [f32; 3] = [78.426_34, 87.768_92, 114.895_85];

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Default decimation factor for video processing.
pub const DEFAULT_SKIP_FRAMES: usize = 2;
