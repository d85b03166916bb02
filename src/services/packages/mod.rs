// Package database clients for Arch Linux
// Copyright (C) 2025 Akaere Networks
//
// This file is part of Arch Package Search.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

pub mod aur;
pub mod error;
pub mod official;
pub mod types;

#[cfg(test)]
pub(crate) mod stub_server;

use std::time::Duration;

use async_trait::async_trait;

pub use aur::AurClient;
pub use error::{SourceError, SourceResult};
pub use official::OfficialClient;
pub use types::{PackageResult, PackageSource, SourceKind};

/// Longest search term sent upstream
pub const MAX_TERM_LENGTH: usize = 128;

/// A searchable package database
#[async_trait]
pub trait PackageBackend: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Search packages whose name matches `term`
    async fn search(&self, term: &str) -> SourceResult<Vec<PackageResult>>;
}

/// Reject terms the upstream APIs cannot answer meaningfully
pub fn validate_term(term: &str) -> SourceResult<()> {
    if term.chars().count() > MAX_TERM_LENGTH {
        return Err(SourceError::InvalidQuery(format!(
            "query longer than {} characters",
            MAX_TERM_LENGTH
        )));
    }
    if term.chars().any(char::is_control) {
        return Err(SourceError::InvalidQuery(
            "query contains control characters".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn build_http_client(timeout: Duration, user_agent: &str) -> SourceResult<reqwest::Client> {
    let builder = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent);
    // Stub servers listen on loopback; never route them through HTTP_PROXY
    #[cfg(test)]
    let builder = builder.no_proxy();
    Ok(builder.build()?)
}

/// Read a JSON body, mapping non-2xx statuses to `SourceError::Status`
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> SourceResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status(status));
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
