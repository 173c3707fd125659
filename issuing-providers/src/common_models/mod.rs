pub mod did;
pub mod issuer;
pub mod key;
pub mod macros;
