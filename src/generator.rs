//! Generated files besides the pages themselves.

pub mod sitemap;
