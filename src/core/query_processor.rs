// Arch Package Search - Query Processor
// Copyright (C) 2025 Akaere Networks
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Runs a dispatched query against the selected package sources
//!
//! Sources are queried concurrently. A failing source is reported in
//! `QueryOutcome::errors` and never discards results from the others.

use std::time::Instant;

use anyhow::{Context, Result};
use futures::future::join_all;
use serde::Serialize;

use crate::config::{Scope, Settings};
use crate::core::cache::ResponseCache;
use crate::core::query::{QueryType, analyze_query};
use crate::services::packages::{
    AurClient, OfficialClient, PackageBackend, PackageResult, SourceError, SourceKind,
    SourceResult, validate_term,
};
use crate::{log_debug, log_warn};

/// A source that could not answer, or a query rejected before any source ran
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFailure {
    /// `None` when the query itself was rejected
    pub source: Option<SourceKind>,
    pub message: String,
    /// Transient failure; the same query may succeed on retry
    pub recoverable: bool,
}

impl SourceFailure {
    pub fn from_source(source: SourceKind, error: &SourceError) -> Self {
        Self {
            source: Some(source),
            message: error.to_string(),
            recoverable: error.is_recoverable(),
        }
    }

    pub fn rejected_query(error: &SourceError) -> Self {
        Self {
            source: None,
            message: error.to_string(),
            recoverable: false,
        }
    }

    /// Label used in error items and envelopes
    pub fn origin(&self) -> String {
        match self.source {
            Some(source) => source.to_string(),
            None => "query".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub query: QueryType,
    pub packages: Vec<PackageResult>,
    pub errors: Vec<SourceFailure>,
    pub sources_queried: Vec<SourceKind>,
    pub elapsed_ms: u64,
}

impl QueryOutcome {
    fn empty(query: QueryType) -> Self {
        Self {
            query,
            packages: Vec::new(),
            errors: Vec::new(),
            sources_queried: Vec::new(),
            elapsed_ms: 0,
        }
    }

    /// An empty term asks for the hint item instead of a search
    pub fn is_hint(&self) -> bool {
        self.query.term().is_some_and(str::is_empty)
    }

    /// False when the query was rejected or every queried source failed
    pub fn is_success(&self) -> bool {
        if self.errors.iter().any(|failure| failure.source.is_none()) {
            return false;
        }
        self.sources_queried.is_empty() || self.errors.len() < self.sources_queried.len()
    }
}

pub struct QueryProcessor {
    settings: Settings,
    backends: Vec<Box<dyn PackageBackend>>,
    cache: ResponseCache,
}

impl QueryProcessor {
    /// Build a processor with the official and AUR clients
    pub fn new(settings: Settings) -> Result<Self> {
        let official = OfficialClient::new(
            &settings.official_search_url,
            settings.timeout(),
            &settings.user_agent,
        )
        .context("Failed to create official repository client")?;
        let aur = AurClient::new(&settings.aur_rpc_url, settings.timeout(), &settings.user_agent)
            .context("Failed to create AUR client")?;

        Ok(Self::with_backends(
            settings,
            vec![Box::new(official), Box::new(aur)],
        ))
    }

    pub fn with_backends(settings: Settings, backends: Vec<Box<dyn PackageBackend>>) -> Self {
        let cache = ResponseCache::new(settings.cache_ttl());
        Self {
            settings,
            backends,
            cache,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Dispatch and run a raw host query
    pub async fn run(&self, input: &str) -> QueryOutcome {
        let query = analyze_query(input, &self.settings);
        self.process(query).await
    }

    pub async fn process(&self, query: QueryType) -> QueryOutcome {
        log_debug!("Processing query: {:?}", query);

        let scope = query.scope();
        let term = query.term().map(str::to_string);
        let (Some(scope), Some(term)) = (scope, term) else {
            return QueryOutcome::empty(query);
        };
        if term.is_empty() {
            return QueryOutcome::empty(query);
        }
        if let Err(e) = validate_term(&term) {
            log_warn!("Rejected query {:?}: {}", term, e);
            let mut outcome = QueryOutcome::empty(query);
            outcome.errors.push(SourceFailure::rejected_query(&e));
            return outcome;
        }

        let start_time = Instant::now();
        let selected: Vec<&dyn PackageBackend> = self
            .backends
            .iter()
            .map(|backend| backend.as_ref())
            .filter(|backend| scope_includes(scope, backend.kind()))
            .collect();

        let responses = join_all(
            selected
                .iter()
                .map(|backend| self.search_backend(*backend, &term)),
        )
        .await;

        let mut outcome = QueryOutcome::empty(query);
        for (backend, response) in selected.iter().zip(responses) {
            let source = backend.kind();
            outcome.sources_queried.push(source);
            match response {
                Ok(results) => outcome.packages.extend(results),
                Err(e) => {
                    log_warn!("{} search failed for {}: {}", source, term, e);
                    outcome.errors.push(SourceFailure::from_source(source, &e));
                }
            }
        }

        rank_packages(&mut outcome.packages);
        if let Some(limit) = self.settings.limit {
            outcome.packages.truncate(limit);
        }

        outcome.elapsed_ms = start_time.elapsed().as_millis() as u64;
        log_debug!(
            "Query {} answered with {} packages, {} errors in {}ms",
            term,
            outcome.packages.len(),
            outcome.errors.len(),
            outcome.elapsed_ms
        );

        outcome
    }

    async fn search_backend(
        &self,
        backend: &dyn PackageBackend,
        term: &str,
    ) -> SourceResult<Vec<PackageResult>> {
        let source = backend.kind();
        if let Some(cached) = self.cache.get(source, term) {
            log_debug!("{} cache hit for {}", source, term);
            return Ok(cached);
        }

        let results = backend.search(term).await?;
        self.cache.insert(source, term, results.clone());
        Ok(results)
    }
}

fn scope_includes(scope: Scope, source: SourceKind) -> bool {
    match scope {
        Scope::Both => true,
        Scope::Official => source == SourceKind::Official,
        Scope::Aur => source == SourceKind::Aur,
    }
}

/// Shortest names first, then alphabetical, official before AUR on ties
pub fn rank_packages(packages: &mut [PackageResult]) {
    packages.sort_by(|a, b| {
        a.name
            .len()
            .cmp(&b.name.len())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.kind().cmp(&b.kind()))
    });
}
