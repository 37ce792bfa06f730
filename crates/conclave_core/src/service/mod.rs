//! Core use-case services.
//!
//! # Responsibility
//! - Normalize typed console input before it reaches repositories.
//! - Keep the console decoupled from storage details.

pub mod conclave_service;
