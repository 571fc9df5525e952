//! Resolving a human-readable key (email, product name) to one entity.

use serde::de::DeserializeOwned;
use serverest_core::Resource;

use crate::error::ClientError;
use crate::http::ApiResponse;

/// Outcome of looking an entity up through a filtered list.
///
/// Only an exact single match resolves; zero or several matches are
/// reported rather than guessed at.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// Exactly one entity matched.
    Found(T),
    /// No entity matched.
    Missing,
    /// More than one entity matched.
    Ambiguous(u64),
    /// The list request itself was rejected.
    Failed(ApiResponse),
}

impl<T: Resource + DeserializeOwned> Lookup<T> {
    /// Interpret a list response for resource `T`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Decode` if the single match does not decode.
    pub fn from_list(response: ApiResponse) -> Result<Self, ClientError> {
        if !response.is_success() {
            return Ok(Self::Failed(response));
        }

        let count = response
            .count()
            .unwrap_or(response.items(T::COLLECTION).len() as u64);

        match count {
            0 => Ok(Self::Missing),
            1 => {
                let mut items: Vec<T> = response.decode_items(T::COLLECTION)?;
                items
                    .pop()
                    .map(Self::Found)
                    .ok_or_else(|| ClientError::Decode(format!("empty `{}` list", T::COLLECTION)))
            }
            n => Ok(Self::Ambiguous(n)),
        }
    }
}

impl<T> Lookup<T> {
    /// The matched entity, if exactly one was found.
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(entity) => Some(entity),
            _ => None,
        }
    }

    /// Whether exactly one entity matched.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}
