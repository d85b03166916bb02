/*
 * JSON Output Formatter for launcher hosts
 * Copyright (C) 2025 Akaere Networks
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 */

use serde::{Deserialize, Serialize};

use crate::core::query_processor::QueryOutcome;
use crate::format::item::ResultItem;
use crate::services::packages::PackageResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub query_type: String,
    pub items: Vec<ResultItem>,
    /// Ranked package records behind `items`, with fields items do not show
    #[serde(default)]
    pub packages: Vec<PackageResult>,
    pub errors: Vec<ErrorEntry>,
    pub metadata: ResponseMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub source: String,
    pub message: String,
    pub recoverable: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub timestamp: String,
    pub processing_time_ms: u64,
    pub source: String,
    pub version: String,
}

pub fn build_response(query: &str, outcome: &QueryOutcome, items: Vec<ResultItem>) -> SearchResponse {
    SearchResponse {
        success: outcome.is_success(),
        query: query.to_string(),
        query_type: outcome.query.name().to_string(),
        items,
        packages: outcome.packages.clone(),
        errors: outcome
            .errors
            .iter()
            .map(|failure| ErrorEntry {
                source: failure.origin(),
                message: failure.message.clone(),
                recoverable: failure.recoverable,
            })
            .collect(),
        metadata: ResponseMetadata {
            timestamp: chrono::Utc::now().to_rfc3339(),
            processing_time_ms: outcome.elapsed_ms,
            source: "arch-pkg-search".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    }
}

/// Envelope for a request that could not be processed at all
pub fn build_error_response(query: &str, message: &str) -> SearchResponse {
    SearchResponse {
        success: false,
        query: query.to_string(),
        query_type: "unknown".to_string(),
        items: Vec::new(),
        packages: Vec::new(),
        errors: vec![ErrorEntry {
            source: "arch-pkg-search".to_string(),
            message: message.to_string(),
            recoverable: false,
        }],
        metadata: ResponseMetadata {
            timestamp: chrono::Utc::now().to_rfc3339(),
            processing_time_ms: 0,
            source: "arch-pkg-search".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    }
}
