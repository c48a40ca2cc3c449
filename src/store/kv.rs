// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{KvStore, StoreError};

#[derive(Debug, Default)]
struct MemoryKvState {
    namespaces: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
    write_count: usize,
    unavailable: bool,
}

/// In-memory `KvStore`, used by tests and by the CLI when no state directory is configured.
#[derive(Debug, Default)]
pub struct MemoryKv {
    state: Mutex<MemoryKvState>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `write` calls so far.
    pub fn write_count(&self) -> usize {
        self.lock().write_count
    }

    /// Makes every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    pub fn get(&self, namespace: &str, key: &str) -> Option<serde_json::Value> {
        self.lock().namespaces.get(namespace).and_then(|entries| entries.get(key)).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryKvState> {
        self.state.lock().expect("memory kv lock poisoned")
    }
}

impl KvStore for MemoryKv {
    fn read_all(&self, namespace: &str) -> Result<BTreeMap<String, serde_json::Value>, StoreError> {
        let state = self.lock();
        if state.unavailable {
            return Err(StoreError::Unavailable { message: format!("read {namespace}") });
        }
        Ok(state.namespaces.get(namespace).cloned().unwrap_or_default())
    }

    fn write(&self, namespace: &str, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        let mut state = self.lock();
        if state.unavailable {
            return Err(StoreError::Unavailable { message: format!("write {namespace}/{key}") });
        }
        state.namespaces.entry(namespace.to_owned()).or_default().insert(key.to_owned(), value);
        state.write_count += 1;
        Ok(())
    }
}
