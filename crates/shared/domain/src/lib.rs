//! # Domain Models
//!
//! Pure setting names and the typed view over a resolved configuration.
//! Keep it lean: no I/O or loading logic here, that lives in `snakeeyes-kernel`.

pub mod config;
pub mod constants;
