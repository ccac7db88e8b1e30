pub mod spectrum;
pub mod utils;
pub mod windows;
