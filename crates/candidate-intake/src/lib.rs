//! Candidate intake for applicant tracking: validates loosely typed candidate
//! submissions and persists them as a candidate with its education, work
//! experience and resume records.

pub mod config;
pub mod error;
pub mod intake;
pub mod telemetry;
