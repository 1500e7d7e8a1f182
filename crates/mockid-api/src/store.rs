//! # Identity Store
//!
//! [`IdentityStore`] is the seam between the HTTP layer and storage.
//! [`InMemoryIdentityStore`] keeps identities and their verified claims in
//! `DashMap`s for the lifetime of the process. Nothing is persisted and
//! there is no deletion.
//!
//! Concurrent writes to the same individual id are last-writer-wins.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use mockid_core::{
    CoreError, IdentityData, IndividualId, Timestamp, VerifiedClaim, VerifiedClaimRequest,
};
use thiserror::Error;

/// Claim name to recorded claim.
pub type ClaimSet = BTreeMap<String, VerifiedClaim>;

/// Errors raised by store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No identity is stored under this id.
    #[error("identity {0} not found")]
    NotFound(String),

    /// The record key was absent or blank.
    #[error(transparent)]
    InvalidKey(#[from] CoreError),

    /// The backend itself failed.
    #[error("identity store backend failure: {0}")]
    Backend(String),
}

/// Storage operations behind the identity endpoints.
///
/// Implementations must tolerate concurrent calls from many request tasks.
pub trait IdentityStore: Send + Sync {
    /// Insert `identity`, replacing any record with the same id.
    fn add_identity(&self, identity: IdentityData) -> Result<(), StoreError>;

    fn get_identity(&self, individual_id: &str) -> Result<IdentityData, StoreError>;

    /// Replace the record with the same id. The record must already exist.
    fn update_identity(&self, identity: IdentityData) -> Result<(), StoreError>;

    /// Merge the claims of `request` into the identity's claim set.
    ///
    /// Claims named in the request are inserted or overwritten; other claims
    /// already recorded are kept. The identity must already exist.
    fn add_verified_claim(&self, request: VerifiedClaimRequest) -> Result<(), StoreError>;

    fn get_verified_claims(&self, individual_id: &str) -> Result<ClaimSet, StoreError>;

    /// Readiness probe hook.
    fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

struct Inner {
    identities: DashMap<IndividualId, IdentityData>,
    claims: DashMap<IndividualId, ClaimSet>,
}

/// Process-lifetime store backed by `DashMap`.
///
/// Cheaply cloneable via `Arc`; all clones share the same data.
#[derive(Clone)]
pub struct InMemoryIdentityStore {
    inner: Arc<Inner>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                identities: DashMap::new(),
                claims: DashMap::new(),
            }),
        }
    }

    /// Number of stored identities.
    pub fn len(&self) -> usize {
        self.inner.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.identities.is_empty()
    }
}

impl Default for InMemoryIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn add_identity(&self, identity: IdentityData) -> Result<(), StoreError> {
        let key = identity.key()?;
        let replaced = self.inner.identities.insert(key.clone(), identity).is_some();
        tracing::debug!(individual_id = %key, replaced, "identity stored");
        Ok(())
    }

    fn get_identity(&self, individual_id: &str) -> Result<IdentityData, StoreError> {
        self.inner
            .identities
            .get(individual_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(individual_id.to_string()))
    }

    fn update_identity(&self, identity: IdentityData) -> Result<(), StoreError> {
        let key = identity.key()?;
        match self.inner.identities.get_mut(&key) {
            Some(mut entry) => {
                *entry.value_mut() = identity;
                tracing::debug!(individual_id = %key, "identity replaced");
                Ok(())
            }
            None => Err(StoreError::NotFound(key.to_string())),
        }
    }

    fn add_verified_claim(&self, request: VerifiedClaimRequest) -> Result<(), StoreError> {
        let key = IndividualId::new(request.individual_id.unwrap_or_default())?;
        if !self.inner.identities.contains_key(&key) {
            return Err(StoreError::NotFound(key.to_string()));
        }

        let updated_at = Timestamp::now();
        let detail = request.verification_detail.unwrap_or_default();
        let count = detail.len();
        let mut claims = self.inner.claims.entry(key.clone()).or_default();
        for (name, value) in detail {
            claims.insert(
                name,
                VerifiedClaim {
                    active: request.active,
                    detail: value,
                    updated_at,
                },
            );
        }
        tracing::debug!(individual_id = %key, claims = count, "verified claims merged");
        Ok(())
    }

    fn get_verified_claims(&self, individual_id: &str) -> Result<ClaimSet, StoreError> {
        if !self.inner.identities.contains_key(individual_id) {
            return Err(StoreError::NotFound(individual_id.to_string()));
        }
        Ok(self
            .inner
            .claims
            .get(individual_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}
