use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::{impl_display, impl_from, impl_into};

/// Reference to a key held by the KMS. The key material itself never leaves it
/// unless explicitly exported.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct KeyId(Uuid);
impl_display!(KeyId);
impl_from!(KeyId; Uuid);
impl_into!(KeyId; Uuid);
