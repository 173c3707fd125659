//! Services orchestrating the providers.

pub mod error;
pub mod issuing_service;
