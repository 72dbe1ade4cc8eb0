// SPDX-License-Identifier: MPL-2.0

use crate::config::IDENTITY_KEY;
use crate::store::{BoardDb, ChangeEvent, StoreError, now_millis, random_suffix};

/// Anonymous per-installation identity used to track likes
pub struct IdentityStore<'a> {
    db: &'a BoardDb,
}

impl<'a> IdentityStore<'a> {
    pub fn new(db: &'a BoardDb) -> Self {
        Self { db }
    }

    /// Stored identity, generating and persisting one on first call
    pub fn get_or_create(&self) -> Result<String, StoreError> {
        if let Some(existing) = self.db.kv().get(IDENTITY_KEY)? {
            return Ok(existing);
        }

        let identity = format!("user_{}_{}", now_millis(), random_suffix());
        self.db.kv().set(IDENTITY_KEY, &identity)?;
        self.db.notify_change(ChangeEvent::Identity);
        tracing::info!(identity = %identity, "created local identity");
        Ok(identity)
    }
}
