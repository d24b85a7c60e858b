//! Configuration sources, in the order they are layered.

pub mod environment;
pub mod root_file;
