use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Could not sign: `{0}`")]
    CouldNotSign(String),
    #[error("Could not format: `{0}`")]
    CouldNotFormat(String),
    #[error("Could not decompose token: `{0}`")]
    CouldNotDecompose(String),
}
