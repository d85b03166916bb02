/*
 * Arch Package Search
 * Copyright (C) 2025 Akaere Networks
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */

use crate::config::{AUR_PACKAGES_URL, ARCH_PACKAGES_URL, Scope, Settings};
use crate::core::query::QueryType;
use crate::core::query_processor::{QueryOutcome, SourceFailure};
use crate::format::item::{ResultItem, UrlAction};
use crate::format::markup::Markup;
use crate::services::help::help_entries;
use crate::services::packages::{PackageResult, PackageSource, SourceKind};

const SEARCH_TITLE: &str = "Arch Linux Package Search";

/// Maps query outcomes to launcher result items
pub struct ItemFormatter {
    markup: Markup,
    settings: Settings,
}

impl ItemFormatter {
    pub fn new(markup: Markup, settings: &Settings) -> Self {
        Self {
            markup,
            settings: settings.clone(),
        }
    }

    pub fn items(&self, outcome: &QueryOutcome) -> Vec<ResultItem> {
        match &outcome.query {
            QueryType::Untriggered(_) => Vec::new(),
            QueryType::Help => self.help_items(),
            query => {
                if outcome.is_hint() {
                    return query.scope().map(|s| vec![self.hint_item(s)]).unwrap_or_default();
                }
                let term = query.term().unwrap_or_default();
                let trigger = query.trigger().unwrap_or_default();

                let mut items: Vec<ResultItem> = outcome
                    .packages
                    .iter()
                    .map(|package| self.package_item(package, term, trigger))
                    .collect();
                items.extend(outcome.errors.iter().map(|e| self.error_item(e)));
                items
            }
        }
    }

    pub fn package_item(&self, package: &PackageResult, term: &str, trigger: &str) -> ResultItem {
        let m = self.markup;
        let name = m.bold(&m.highlight(&package.name, term));
        let version = m.italic(&m.escape(&package.version));

        let text = match &package.source {
            PackageSource::Aur => {
                format!("{} {} ({})", name, version, package.votes.unwrap_or_default())
            }
            PackageSource::Official { repo, .. } => {
                format!("{} {} [{}]", name, version, m.escape(repo))
            }
        };

        let mut actions = vec![match package.source {
            PackageSource::Aur => UrlAction::new("Open AUR website", &package.package_url),
            PackageSource::Official { .. } => {
                UrlAction::new("Open package page", &package.package_url)
            }
        }];
        if let Some(url) = &package.url {
            actions.push(UrlAction::new("Open project website", url));
        }

        ResultItem {
            id: package.kind().title().to_string(),
            icon: self.settings.icon.clone(),
            text,
            subtext: self.subtext(package),
            completion: Some(format!("{}{}", trigger, package.name)),
            actions,
        }
    }

    /// Description with out-of-date and orphan markers, orphan outermost
    fn subtext(&self, package: &PackageResult) -> String {
        let m = self.markup;
        let mut subtext = match &package.description {
            Some(description) => m.escape(description),
            None => "[No description]".to_string(),
        };

        if let Some(flagged) = package.out_of_date {
            let marker = format!("[Out of date: {}]", flagged.format("%F"));
            subtext = format!("{} {}", m.alert(&marker), subtext);
        }
        if package.orphaned {
            subtext = format!("{} {}", m.alert("[Orphan]"), subtext);
        }
        subtext
    }

    pub fn hint_item(&self, scope: Scope) -> ResultItem {
        let (id, subtext, actions) = match scope {
            Scope::Aur => (
                SourceKind::Aur.title(),
                "Enter a query to search the AUR",
                vec![UrlAction::new("Open AUR packages website", AUR_PACKAGES_URL)],
            ),
            Scope::Official => (
                SourceKind::Official.title(),
                "Enter a query to search the official repositories",
                vec![UrlAction::new("Open Arch packages website", ARCH_PACKAGES_URL)],
            ),
            Scope::Both => (
                SEARCH_TITLE,
                "Enter a query to search Arch Linux packages",
                vec![
                    UrlAction::new("Open Arch packages website", ARCH_PACKAGES_URL),
                    UrlAction::new("Open AUR packages website", AUR_PACKAGES_URL),
                ],
            ),
        };

        ResultItem {
            id: id.to_string(),
            icon: self.settings.icon.clone(),
            text: id.to_string(),
            subtext: subtext.to_string(),
            completion: None,
            actions,
        }
    }

    pub fn error_item(&self, failure: &SourceFailure) -> ResultItem {
        ResultItem {
            id: failure
                .source
                .map_or(SEARCH_TITLE, |source| source.title())
                .to_string(),
            icon: self.settings.icon.clone(),
            text: "Error".to_string(),
            subtext: self
                .markup
                .escape(&format!("{}: {}", failure.origin(), failure.message)),
            completion: None,
            actions: Vec::new(),
        }
    }

    pub fn help_items(&self) -> Vec<ResultItem> {
        help_entries(&self.settings)
            .into_iter()
            .map(|entry| ResultItem {
                id: SEARCH_TITLE.to_string(),
                icon: self.settings.icon.clone(),
                text: self.markup.escape(&entry.usage),
                subtext: self.markup.escape(&entry.description),
                completion: (!entry.trigger.is_empty()).then_some(entry.trigger),
                actions: Vec::new(),
            })
            .collect()
    }
}
