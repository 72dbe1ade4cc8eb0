// SPDX-License-Identifier: MPL-2.0

use crate::config::VIP_KEY;
use crate::model::VipStatus;
use crate::store::{BoardDb, ChangeEvent, StoreError};
use chrono::{Duration, Utc};

/// Client-local VIP membership record.
///
/// Expiry is lazy: any read that finds an expired record deletes it and
/// reports no membership.
pub struct VipStore<'a> {
    db: &'a BoardDb,
}

impl<'a> VipStore<'a> {
    pub fn new(db: &'a BoardDb) -> Self {
        Self { db }
    }

    /// True iff an unexpired, active record exists
    pub fn is_active(&self) -> Result<bool, StoreError> {
        Ok(self.status()?.is_some_and(|vip| vip.is_active))
    }

    /// Current record, or None when absent or expired
    pub fn status(&self) -> Result<Option<VipStatus>, StoreError> {
        let Some(vip) = self.db.load::<VipStatus>(VIP_KEY)? else {
            return Ok(None);
        };

        if vip.is_expired_at(Utc::now()) {
            tracing::debug!(expires_at = ?vip.expires_at, "vip status expired, removing");
            self.db.remove(VIP_KEY, ChangeEvent::Vip)?;
            return Ok(None);
        }

        Ok(Some(vip))
    }

    /// Grant membership for `days` from now, replacing any existing record.
    ///
    /// Fails without writing when the expiry falls outside the timestamp range.
    pub fn activate(&self, days: u32) -> Result<VipStatus, StoreError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(Duration::days(i64::from(days)))
            .ok_or(StoreError::VipDuration { days })?;
        let vip = VipStatus {
            is_active: true,
            activated_at: now,
            expires_at: Some(expires_at),
        };

        self.db.save(VIP_KEY, &vip, ChangeEvent::Vip)?;
        tracing::info!(days, expires_at = ?vip.expires_at, "vip activated");
        Ok(vip)
    }

    pub fn deactivate(&self) -> Result<(), StoreError> {
        self.db.remove(VIP_KEY, ChangeEvent::Vip)?;
        tracing::info!("vip deactivated");
        Ok(())
    }

    /// Drop an expired record without waiting for the next read.
    /// Returns whether anything was removed.
    pub fn sweep_expired(&self) -> Result<bool, StoreError> {
        let expired = self
            .db
            .load::<VipStatus>(VIP_KEY)?
            .is_some_and(|vip| vip.is_expired_at(Utc::now()));
        if expired {
            self.db.remove(VIP_KEY, ChangeEvent::Vip)?;
        }
        Ok(expired)
    }
}
