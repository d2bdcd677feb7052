//! I/O layer: raw native-endian f32 band files and the ENVI header/data
//! writers built on top of them.
pub mod envi;
pub use envi::{TranscodeError, transcode_file};

pub mod raw;
