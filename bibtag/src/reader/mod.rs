// bibtag/src/reader/mod.rs
//! The poll worker and the surface used to drive it.

pub mod builder;
pub mod config;
pub mod control;
pub mod handle;
mod poll;

pub use builder::ReaderBuilder;
pub use config::ReaderConfig;
pub use control::{ReaderHandle, ReaderState};
pub use handle::TagReader;
