use std::fmt;

/// Output classes of the gender classifier, in model output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const COUNT: usize = 2;

    /// Maps a classifier output index to its label.
    ///
    /// The mapping is exhaustive over the model's output width; an index at
    /// or past `COUNT` means the loaded model does not match this label set
    /// and must surface as an error, not a misread label.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Gender::Male),
            1 => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Output classes of the age classifier: 8 fixed, non-overlapping brackets,
/// in model output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgeBracket {
    Infant,
    Toddler,
    Child,
    Teen,
    YoungAdult,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeBracket {
    pub const COUNT: usize = 8;

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(AgeBracket::Infant),
            1 => Some(AgeBracket::Toddler),
            2 => Some(AgeBracket::Child),
            3 => Some(AgeBracket::Teen),
            4 => Some(AgeBracket::YoungAdult),
            5 => Some(AgeBracket::Adult),
            6 => Some(AgeBracket::MiddleAged),
            7 => Some(AgeBracket::Senior),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBracket::Infant => "(0-2)",
            AgeBracket::Toddler => "(4-6)",
            AgeBracket::Child => "(8-12)",
            AgeBracket::Teen => "(15-20)",
            AgeBracket::YoungAdult => "(25-32)",
            AgeBracket::Adult => "(38-43)",
            AgeBracket::MiddleAged => "(48-53)",
            AgeBracket::Senior => "(60-100)",
        }
    }
}

/// A completed classification for one face. Either both attributes exist or
/// the face produced no label at all; there is no partial form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceLabel {
    pub gender: Gender,
    pub age: AgeBracket,
}

impl FaceLabel {
    pub fn new(gender: Gender, age: AgeBracket) -> Self {
        Self { gender, age }
    }
}

impl fmt::Display for FaceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.gender.as_str(), self.age.as_str())
    }
}
