//! ypatch-util - JSON value helpers shared by the ypatch crates.

pub mod json_equal;

pub use json_equal::{deep_equal, number_equal};
