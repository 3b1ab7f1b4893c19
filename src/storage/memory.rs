//! In-memory credential store
//!
//! Reference implementation for single-process deployments and tests. The
//! email index is the unique constraint: insertion goes through a DashMap
//! entry so concurrent creates for the same email cannot both succeed.

use super::{CredentialStore, StoreError};
use crate::core::models::{normalize_email, Identity, NewIdentity};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

/// DashMap-backed credential store
#[derive(Default)]
pub struct MemoryCredentialStore {
    /// Identities by id
    identities: DashMap<Uuid, Identity>,
    /// Unique index: normalized email -> id
    by_email: DashMap<String, Uuid>,
}

impl MemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let key = normalize_email(email);
        let id = match self.by_email.get(&key) {
            Some(entry) => *entry.value(),
            None => return Ok(None),
        };
        Ok(self.identities.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError> {
        Ok(self.identities.get(&id).map(|e| e.value().clone()))
    }

    async fn create(&self, new: NewIdentity) -> Result<Identity, StoreError> {
        let email = normalize_email(&new.email);
        let id = Uuid::new_v4();

        // The entry holds the shard lock for the email key, so only one of
        // two concurrent creates can claim it.
        match self.by_email.entry(email.clone()) {
            Entry::Occupied(_) => return Err(StoreError::DuplicateEmail),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let identity = Identity {
            id,
            email,
            display_name: new.display_name,
            avatar_url: new.avatar_url,
            role: new.role,
            password_hash: new.password_hash,
            email_verified_at: new.email_verified_at,
            created_at: chrono::Utc::now(),
        };
        self.identities.insert(id, identity.clone());
        Ok(identity)
    }
}
