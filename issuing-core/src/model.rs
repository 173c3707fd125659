use strum::{Display, EnumString};

#[derive(Debug, Copy, Clone, Display, EnumString, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyAlgorithmType {
    #[strum(serialize = "SECP256K1")]
    Secp256k1,
    #[strum(serialize = "ES256")]
    Es256,
}

#[derive(Debug, Copy, Clone, Display, EnumString, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignerType {
    #[strum(serialize = "ES256K")]
    Es256k,
    #[strum(serialize = "ES256")]
    Es256,
}

#[derive(Debug, Copy, Clone, Display, EnumString, PartialEq, Eq, PartialOrd, Ord)]
pub enum HasherType {
    #[strum(serialize = "sha-256")]
    Sha256,
    #[strum(serialize = "keccak-256")]
    Keccak256,
}
