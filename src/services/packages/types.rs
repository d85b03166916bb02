// Arch Package Search - Package result types
// Copyright (C) 2025 Akaere Networks
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which package database a result came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PackageSource {
    /// Official repositories (core, extra, multilib, ...)
    Official { repo: String, arch: String },
    /// Arch User Repository
    Aur,
}

impl PackageSource {
    /// Short repository tag, e.g. `extra` or `aur`
    pub fn tag(&self) -> &str {
        match self {
            PackageSource::Official { repo, .. } => repo,
            PackageSource::Aur => "aur",
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            PackageSource::Official { .. } => SourceKind::Official,
            PackageSource::Aur => SourceKind::Aur,
        }
    }
}

/// Source identity without per-package details; orders official before AUR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Official,
    Aur,
}

impl SourceKind {
    pub fn title(self) -> &'static str {
        match self {
            SourceKind::Official => "Arch Linux Packages",
            SourceKind::Aur => "Archlinux User Repository",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Official => write!(f, "official"),
            SourceKind::Aur => write!(f, "AUR"),
        }
    }
}

/// A single package match, normalized across both sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageResult {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub source: PackageSource,
    /// Upstream project URL
    pub url: Option<String>,
    /// Package page on archlinux.org or aur.archlinux.org
    pub package_url: String,
    pub votes: Option<u32>,
    pub popularity: Option<f64>,
    pub maintainer: Option<String>,
    pub orphaned: bool,
    pub out_of_date: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl PackageResult {
    pub fn kind(&self) -> SourceKind {
        self.source.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_tag() {
        let official = PackageSource::Official {
            repo: "extra".to_string(),
            arch: "x86_64".to_string(),
        };
        assert_eq!(official.tag(), "extra");
        assert_eq!(PackageSource::Aur.tag(), "aur");
    }

    #[test]
    fn test_source_kind_orders_official_first() {
        assert!(SourceKind::Official < SourceKind::Aur);
    }

    #[test]
    fn test_source_serializes_tagged() {
        let json = serde_json::to_string(&PackageSource::Aur).unwrap();
        assert_eq!(json, r#"{"kind":"aur"}"#);
    }
}
