//! Job lifecycle and filtering engine backing the recruitment admin console.
//!
//! The crate is the framework-independent data/state core: commands go in
//! through [`console::jobs::JobConsole::dispatch`], derived views come out.
//! There is no transport and no persistence here; a real backend wraps the
//! engine before anything touches durable storage.

pub mod config;
pub mod console;
pub mod error;
pub mod telemetry;
