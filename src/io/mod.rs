pub mod hits;
pub mod mgf;
pub mod reader;
