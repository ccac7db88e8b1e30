pub mod annotator;
pub mod fragmentation;
pub mod model;
