//! fieldmatch - Match field agents to site visits
//!
//! Ranks data collectors for a site visit by overload, proximity and
//! locality, and assigns visits without double-booking.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

mod cli;

use std::process::ExitCode;

use fieldmatch::core::services::AssignmentError;

/// Exit status for general failures
const EXIT_FAILURE: u8 = 1;

/// Exit status when an assignment was refused
const EXIT_ASSIGNMENT: u8 = 2;

/// Main entry point for the fieldmatch CLI
fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if e.downcast_ref::<AssignmentError>().is_some() {
                ExitCode::from(EXIT_ASSIGNMENT)
            } else {
                ExitCode::from(EXIT_FAILURE)
            }
        },
    }
}
