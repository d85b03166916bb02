// AUR (Arch User Repository) package search client
// Copyright (C) 2025 Akaere Networks
//
// This file is part of Arch Package Search.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use url::Url;

use super::{
    PackageBackend, PackageResult, PackageSource, SourceError, SourceKind, SourceResult,
    build_http_client, read_json, validate_term,
};
use crate::config::{AUR_PACKAGES_URL, AUR_RPC_VERSION};
use crate::log_debug;

#[derive(Debug, Deserialize)]
struct AurResponse {
    #[serde(rename = "type")]
    response_type: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    resultcount: u32,
    #[serde(default)]
    results: Vec<AurPackage>,
}

#[derive(Debug, Deserialize)]
struct AurPackage {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Version")]
    version: String,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "URL")]
    url: Option<String>,
    #[serde(rename = "NumVotes", default)]
    num_votes: u32,
    #[serde(rename = "Popularity", default)]
    popularity: f64,
    #[serde(rename = "OutOfDate")]
    out_of_date: Option<i64>,
    #[serde(rename = "Maintainer")]
    maintainer: Option<String>,
    #[serde(rename = "LastModified")]
    last_modified: Option<i64>,
}

/// Client for the AUR RPC search endpoint
pub struct AurClient {
    rpc_url: Url,
    http: reqwest::Client,
}

impl AurClient {
    pub fn new(rpc_url: &str, timeout: Duration, user_agent: &str) -> SourceResult<Self> {
        Ok(Self {
            rpc_url: Url::parse(rpc_url)?,
            http: build_http_client(timeout, user_agent)?,
        })
    }

    fn search_url(&self, term: &str) -> Url {
        let mut url = self.rpc_url.clone();
        url.query_pairs_mut()
            .append_pair("v", AUR_RPC_VERSION)
            .append_pair("type", "search")
            .append_pair("by", "name")
            .append_pair("arg", term);
        url
    }
}

#[async_trait]
impl PackageBackend for AurClient {
    fn kind(&self) -> SourceKind {
        SourceKind::Aur
    }

    async fn search(&self, term: &str) -> SourceResult<Vec<PackageResult>> {
        validate_term(term)?;

        let url = self.search_url(term);
        log_debug!("Querying AUR RPC: {}", url);

        let response = self.http.get(url).send().await?;
        let aur_response: AurResponse = read_json(response).await?;

        if aur_response.response_type == "error" {
            let message = aur_response
                .error
                .unwrap_or_else(|| "Unknown AUR error".to_string());
            return Err(SourceError::api_error(message));
        }

        log_debug!("AUR RPC: {} results for {}", aur_response.resultcount, term);

        Ok(aur_response.results.into_iter().map(into_result).collect())
    }
}

fn into_result(package: AurPackage) -> PackageResult {
    let package_url = format!(
        "{}{}/",
        AUR_PACKAGES_URL,
        urlencoding::encode(&package.name)
    );

    PackageResult {
        orphaned: package.maintainer.is_none(),
        out_of_date: package
            .out_of_date
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        last_updated: package
            .last_modified
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        description: package.description.filter(|d| !d.trim().is_empty()),
        url: package.url.filter(|u| !u.trim().is_empty()),
        votes: Some(package.num_votes),
        popularity: Some(package.popularity),
        maintainer: package.maintainer,
        source: PackageSource::Aur,
        version: package.version,
        name: package.name,
        package_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::packages::stub_server::StubServer;

    const SEARCH_BODY: &str = r#"{
        "resultcount": 2,
        "results": [
            {
                "ID": 1, "Name": "yay", "PackageBaseID": 1, "PackageBase": "yay",
                "Version": "12.3.5-1", "Description": "Yet another yogurt",
                "URL": "https://github.com/Jguer/yay", "NumVotes": 2400,
                "Popularity": 21.5, "OutOfDate": null, "Maintainer": "jguer",
                "FirstSubmitted": 1475688004, "LastModified": 1704067200,
                "URLPath": "/cgit/aur.git/snapshot/yay.tar.gz"
            },
            {
                "ID": 2, "Name": "yay-git", "PackageBaseID": 2, "PackageBase": "yay-git",
                "Version": "12.0.0.r0-1", "Description": null, "URL": "",
                "NumVotes": 40, "Popularity": 0.5, "OutOfDate": 1704067200,
                "Maintainer": null, "FirstSubmitted": 1475688004,
                "LastModified": 1704067200, "URLPath": "/cgit/aur.git/snapshot/yay-git.tar.gz"
            }
        ],
        "type": "search",
        "version": 5
    }"#;

    fn client(base_url: &str) -> AurClient {
        AurClient::new(base_url, Duration::from_secs(5), "arch-pkg-search-test").unwrap()
    }

    #[test]
    fn test_search_url_parameters() {
        let url = client("https://aur.archlinux.org/rpc/").search_url("lib32 gcc");
        assert_eq!(
            url.as_str(),
            "https://aur.archlinux.org/rpc/?v=5&type=search&by=name&arg=lib32+gcc"
        );
    }

    #[tokio::test]
    async fn test_search_maps_packages() {
        let server = StubServer::spawn(200, SEARCH_BODY).await;
        let results = client(&server.base_url).search("yay").await.unwrap();

        assert_eq!(results.len(), 2);
        let yay = &results[0];
        assert_eq!(yay.name, "yay");
        assert_eq!(yay.version, "12.3.5-1");
        assert_eq!(yay.votes, Some(2400));
        assert_eq!(yay.package_url, "https://aur.archlinux.org/packages/yay/");
        assert_eq!(yay.url.as_deref(), Some("https://github.com/Jguer/yay"));
        assert!(!yay.orphaned);
        assert!(yay.out_of_date.is_none());

        let git = &results[1];
        assert!(git.orphaned);
        assert!(git.description.is_none());
        assert!(git.url.is_none());
        assert_eq!(
            git.out_of_date.map(|d| d.format("%F").to_string()).as_deref(),
            Some("2024-01-01")
        );

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].contains("type=search"));
        assert!(requests[0].contains("arg=yay"));
    }

    #[tokio::test]
    async fn test_error_response_becomes_api_error() {
        let body = r#"{"error":"Too many package results.","resultcount":0,"results":[],"type":"error","version":5}"#;
        let server = StubServer::spawn(200, body).await;
        let err = client(&server.base_url).search("a").await.unwrap_err();
        assert!(matches!(err, SourceError::Api(ref msg) if msg == "Too many package results."));
    }

    #[tokio::test]
    async fn test_http_failure_status() {
        let server = StubServer::spawn(503, "{}").await;
        let err = client(&server.base_url).search("yay").await.unwrap_err();
        assert!(matches!(err, SourceError::Status(status) if status.as_u16() == 503));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = StubServer::spawn(200, "<html>maintenance</html>").await;
        let err = client(&server.base_url).search("yay").await.unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
