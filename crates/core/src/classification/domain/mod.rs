pub mod attribute_classifier;
pub mod labels;
