// Arch Package Search - Response Cache
// Copyright (C) 2025 Akaere Networks
// SPDX-License-Identifier: AGPL-3.0-or-later

//! In-memory TTL cache for upstream search responses
//!
//! Launcher hosts send a query on every keystroke, so the same term is often
//! requested again within seconds (typing, deleting, retyping).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::services::packages::{PackageResult, SourceKind};

struct CacheEntry {
    stored_at: Instant,
    results: Vec<PackageResult>,
}

pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<(SourceKind, String), CacheEntry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    fn key(source: SourceKind, term: &str) -> (SourceKind, String) {
        (source, term.to_lowercase())
    }

    pub fn get(&self, source: SourceKind, term: &str) -> Option<Vec<PackageResult>> {
        if !self.is_enabled() {
            return None;
        }
        let mut entries = self.entries.lock().ok()?;
        let key = Self::key(source, term);

        match entries.get(&key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.results.clone()),
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, source: SourceKind, term: &str, results: Vec<PackageResult>) {
        if !self.is_enabled() {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            let ttl = self.ttl;
            entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
            entries.insert(
                Self::key(source, term),
                CacheEntry {
                    stored_at: Instant::now(),
                    results,
                },
            );
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
