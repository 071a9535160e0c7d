pub mod detection_record;
pub mod detection_store;
