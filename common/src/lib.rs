pub mod base;
pub mod file_tools;
pub mod genome;

extern crate serde;
