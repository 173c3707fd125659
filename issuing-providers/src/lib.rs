//! Collaborators and building blocks of the credential issuance pipeline.
//!
//! The modules here are leaves of the pipeline: slot allocation, key handling,
//! credential assembly and ledger anchoring. None of them sequence the full
//! issuance; that is the job of the service layer on top.

pub mod allocation;
pub mod common_models;
pub mod credential_builder;
pub mod crypto;
pub mod jwt;
pub mod key_algorithm;
pub mod kms;
pub mod ledger;
pub mod metadata;
pub mod revocation;
pub mod util;
