//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate registry calls into use-case level APIs.
//! - Keep callers decoupled from index maintenance details.

pub mod employee_service;
