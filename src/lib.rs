//! Palettone - convert images to a fixed palette while keeping their tone
//!
//! The pixel pipeline lives in the `palettone-core` crate. This crate adds
//! the parts around it: configuration, palette files, image decode/encode
//! and batch processing of a directory. It exposes its modules for
//! integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod services;
