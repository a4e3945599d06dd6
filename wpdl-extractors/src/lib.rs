//! All internal logic for reading posts from a WordPress site and finding the images in them.

extern crate wpdl_common;

pub mod content;
pub mod error;
pub mod extractor_config;
pub mod prelude;
pub mod websites;
