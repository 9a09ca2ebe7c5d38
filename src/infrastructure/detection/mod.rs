//! Language identification backends.

pub mod lingua_detector;

pub use lingua_detector::LinguaDetector;
