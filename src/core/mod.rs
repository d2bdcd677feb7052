//! Core building blocks: the CTL descriptor model and parser, dataset pattern
//! resolution, and the row reordering applied to band data. These are
//! consumed by the high-level `api` module.
pub mod descriptor;
pub mod params;
pub mod parser;
pub mod pattern;
pub mod reorder;
