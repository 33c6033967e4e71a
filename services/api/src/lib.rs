//! services/api/src/lib.rs
//!
//! The StudyTrack REST service: configuration, the PostgreSQL adapter and
//! the HTTP transport around the `studytrack_core` use-cases.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
