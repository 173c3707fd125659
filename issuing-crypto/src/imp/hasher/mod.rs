pub mod keccak256;
pub mod sha256;
