// SPDX-License-Identifier: MPL-2.0

use crate::store::{
    BannedWords, CommentStore, IdentityStore, KeyValueStore, PostStore, StoreError, VipStore,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};

/// Which collection a write touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    Posts,
    Comments,
    BannedWords,
    Vip,
    Identity,
}

/// Handle to the board's persisted state.
///
/// Cheap to clone; clones share the backend and the subscriber list. Each
/// collection is read and written as one JSON blob, so concurrent writers on
/// separate backends pointing at the same file will overwrite each other.
#[derive(Clone)]
pub struct BoardDb {
    kv: Arc<dyn KeyValueStore>,
    subscribers: Arc<Mutex<Vec<Sender<ChangeEvent>>>>,
}

impl BoardDb {
    pub fn new(kv: impl KeyValueStore + 'static) -> Self {
        Self {
            kv: Arc::new(kv),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn posts(&self) -> PostStore<'_> {
        PostStore::new(self)
    }

    pub fn comments(&self) -> CommentStore<'_> {
        CommentStore::new(self)
    }

    pub fn banned_words(&self) -> BannedWords<'_> {
        BannedWords::new(self)
    }

    pub fn vip(&self) -> VipStore<'_> {
        VipStore::new(self)
    }

    pub fn identity(&self) -> IdentityStore<'_> {
        IdentityStore::new(self)
    }

    /// Raw backend access
    pub fn kv(&self) -> &dyn KeyValueStore {
        self.kv.as_ref()
    }

    /// Receive an event after every write made through this handle or its clones.
    ///
    /// Changes made by other processes are not reported.
    pub fn subscribe(&self) -> Receiver<ChangeEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Read a JSON array stored under `key`; missing means empty
    pub(crate) fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        Ok(self.load(key)?.unwrap_or_default())
    }

    pub(crate) fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.kv.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub(crate) fn save<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        event: ChangeEvent,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.kv.set(key, &json)?;
        self.notify_change(event);
        Ok(())
    }

    pub(crate) fn remove(&self, key: &str, event: ChangeEvent) -> Result<(), StoreError> {
        self.kv.remove(key)?;
        self.notify_change(event);
        Ok(())
    }

    pub(crate) fn notify_change(&self, event: ChangeEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| tx.send(event).is_ok());
    }
}
