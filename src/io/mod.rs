//! Host-side input/output for the compositing engine
//!
//! Error types live here alongside everything the command-line host needs:
//! PNG layer loading and export, step recording, and progress display.

/// Command-line interface and scene processing
pub mod cli;
/// Host constants and defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// PNG layer loading and composite export
pub mod image;
/// Terminal progress display
pub mod progress;
/// Step-by-step GIF recording
pub mod visualization;
