//! Credential store adapter
//!
//! The gateway treats persistence of user accounts as an external
//! collaborator behind the [`CredentialStore`] trait. Email uniqueness is
//! enforced at the storage layer; callers recover from
//! [`StoreError::DuplicateEmail`] rather than treating it as fatal.

pub mod memory;

pub use memory::MemoryCredentialStore;

use crate::core::models::{Identity, NewIdentity};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by a credential store implementation
#[derive(Error, Debug)]
pub enum StoreError {
    /// The email is already registered; the unique constraint is the source
    /// of truth for idempotent account creation
    #[error("Email already registered")]
    DuplicateEmail,

    /// Backend failure (connection loss, corrupt record, ...)
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Lookup and creation contract for user credential material
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Find an identity by case-normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    /// Find an identity by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError>;

    /// Create a new identity; fails with [`StoreError::DuplicateEmail`] when
    /// the email is taken
    async fn create(&self, new: NewIdentity) -> Result<Identity, StoreError>;
}

impl From<StoreError> for crate::utils::error::GatewayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => {
                crate::utils::error::GatewayError::Conflict("Email already registered".into())
            }
            StoreError::Backend(detail) => crate::utils::error::GatewayError::Store(detail),
        }
    }
}
