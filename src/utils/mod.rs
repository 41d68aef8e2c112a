//! Small helpers shared by the build and watch code.

pub mod hash;
pub mod minify;
