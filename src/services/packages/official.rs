// Arch Linux official repository search client
// Copyright (C) 2025 Akaere Networks
//
// This file is part of Arch Package Search.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

use super::{
    PackageBackend, PackageResult, PackageSource, SourceError, SourceKind, SourceResult,
    build_http_client, read_json, validate_term,
};
use crate::config::ARCH_PACKAGES_URL;
use crate::log_debug;

#[derive(Debug, Deserialize)]
struct OfficialResponse {
    #[serde(default = "default_valid")]
    valid: bool,
    #[serde(default)]
    results: Vec<OfficialPackage>,
}

fn default_valid() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct OfficialPackage {
    pkgname: String,
    repo: String,
    arch: String,
    pkgver: String,
    pkgrel: String,
    #[serde(default)]
    epoch: u32,
    #[serde(default)]
    pkgdesc: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    maintainers: Vec<String>,
    #[serde(default)]
    flag_date: Option<String>,
    #[serde(default)]
    last_update: Option<String>,
}

impl OfficialPackage {
    fn full_version(&self) -> String {
        if self.epoch > 0 {
            format!("{}:{}-{}", self.epoch, self.pkgver, self.pkgrel)
        } else {
            format!("{}-{}", self.pkgver, self.pkgrel)
        }
    }
}

/// Client for the archlinux.org package search JSON endpoint
pub struct OfficialClient {
    search_url: Url,
    http: reqwest::Client,
}

impl OfficialClient {
    pub fn new(search_url: &str, timeout: Duration, user_agent: &str) -> SourceResult<Self> {
        Ok(Self {
            search_url: Url::parse(search_url)?,
            http: build_http_client(timeout, user_agent)?,
        })
    }

    fn query_url(&self, term: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut().append_pair("q", term);
        url
    }
}

#[async_trait]
impl PackageBackend for OfficialClient {
    fn kind(&self) -> SourceKind {
        SourceKind::Official
    }

    async fn search(&self, term: &str) -> SourceResult<Vec<PackageResult>> {
        validate_term(term)?;

        let url = self.query_url(term);
        log_debug!("Querying Arch package search: {}", url);

        let response = self.http.get(url).send().await?;
        let official: OfficialResponse = read_json(response).await?;

        if !official.valid {
            return Err(SourceError::api_error("invalid query"));
        }

        let total = official.results.len();
        let results = filter_by_name(official.results, term);
        log_debug!(
            "Arch package search: {} of {} results match name {}",
            results.len(),
            total,
            term
        );

        Ok(results)
    }
}

/// `q=` also matches descriptions; keep name matches only, first arch wins
fn filter_by_name(packages: Vec<OfficialPackage>, term: &str) -> Vec<PackageResult> {
    let needle = term.to_lowercase();
    let mut seen = HashSet::new();

    packages
        .into_iter()
        .filter(|p| p.pkgname.to_lowercase().contains(&needle))
        .filter(|p| seen.insert(p.pkgname.clone()))
        .map(into_result)
        .collect()
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|d| d.with_timezone(&Utc))
}

fn into_result(package: OfficialPackage) -> PackageResult {
    let version = package.full_version();
    let package_url = format!(
        "{}{}/{}/{}/",
        ARCH_PACKAGES_URL,
        package.repo,
        package.arch,
        urlencoding::encode(&package.pkgname)
    );

    PackageResult {
        out_of_date: parse_timestamp(package.flag_date.as_deref()),
        last_updated: parse_timestamp(package.last_update.as_deref()),
        maintainer: package.maintainers.into_iter().next(),
        description: package.pkgdesc.filter(|d| !d.trim().is_empty()),
        url: package.url.filter(|u| !u.trim().is_empty()),
        source: PackageSource::Official {
            repo: package.repo,
            arch: package.arch,
        },
        name: package.pkgname,
        version,
        package_url,
        votes: None,
        popularity: None,
        orphaned: false,
    }
}
