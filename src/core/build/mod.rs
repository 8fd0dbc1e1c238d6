//! Registration building: from one parsed file to a partial model.
//!
//! Every declaration is visited once, in ascending offset order, so the doc
//! cursor hands each comment to the declaration it was written for. Types
//! are built after their members because property and constructor docs can
//! force a registration the type's own doc does not ask for.

pub mod file_processor;
pub mod registration;

pub use file_processor::{FileOutcome, process_file};
pub use registration::{BuildSettings, DEFAULT_SCOPE, RegistrationBuilder};
