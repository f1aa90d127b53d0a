pub mod generation;
pub mod scoring;
