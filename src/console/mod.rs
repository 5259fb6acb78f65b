//! Admin-console engines. Only the job surface carries real state today.

pub mod jobs;
