use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classification::domain::labels::FaceLabel;

/// Which call site produced a detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Image,
    Video,
    Live,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Image => "image",
            Source::Video => "video",
            Source::Live => "live",
        }
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Source::Image),
            "video" => Ok(Source::Video),
            "live" => Ok(Source::Live),
            other => Err(format!("unknown detection source: {other}")),
        }
    }
}

/// One persisted detection-history row.
///
/// `age` and `gender` come from splitting the rendered label text; a label
/// without the separator degrades to null fields instead of failing the
/// whole request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetectionRecord {
    pub timestamp: DateTime<Utc>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub source: Source,
    pub user_id: i64,
}

impl DetectionRecord {
    /// Derives a record from rendered label text, timestamped now.
    pub fn from_label(label: &str, source: Source, user_id: i64) -> Self {
        let (gender, age) = match label.split_once(',') {
            Some((g, a)) => (Some(g.trim().to_string()), Some(a.trim().to_string())),
            None => (None, None),
        };
        Self {
            timestamp: Utc::now(),
            age,
            gender,
            source,
            user_id,
        }
    }

    pub fn from_face_label(label: &FaceLabel, source: Source, user_id: i64) -> Self {
        Self::from_label(&label.to_string(), source, user_id)
    }
}
