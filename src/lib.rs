//! snapcrop library - capture, store and square-crop a photo.
//!
//! This library exposes the capture workflow used by the `snapcrop` CLI so
//! that it can be driven by other hosts and exercised in tests.
//!
//! # Modules
//!
//! - `controller`: The capture screen state machine
//! - `host`: Host environment abstraction (desktop and mock)
//! - `storage`: Timestamped JPEG storage under the app-scoped directory
//! - `image_ops`: JPEG encoding, thumbnails and centre crops
//! - `config`: Configuration file handling
//! - `output`: Output mode abstraction (robot/human)
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod image_ops;
pub mod logging;
pub mod output;
pub mod state;
pub mod storage;
pub mod theme;
