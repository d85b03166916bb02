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

use crate::config::Settings;

/// One usage line of the help listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub usage: String,
    pub description: String,
    /// Trigger the host completes to when the entry is selected
    pub trigger: String,
}

pub fn help_entries(settings: &Settings) -> Vec<HelpEntry> {
    let triggers = &settings.triggers;
    vec![
        HelpEntry {
            usage: format!("{}<name>", triggers.aur),
            description: "Search the Arch User Repository".to_string(),
            trigger: triggers.aur.clone(),
        },
        HelpEntry {
            usage: format!("{}<name>", triggers.official),
            description: "Search the official repositories (core, extra, multilib)".to_string(),
            trigger: triggers.official.clone(),
        },
        HelpEntry {
            usage: format!("{}<name>", triggers.both),
            description: "Search official repositories and the AUR".to_string(),
            trigger: triggers.both.clone(),
        },
        HelpEntry {
            usage: "<name>-AUR | <name>-REPO | <name>-PKG".to_string(),
            description: "Suffix forms of the triggers above".to_string(),
            trigger: String::new(),
        },
    ]
}

pub fn generate_help_response(settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str("Arch Package Search - Query Help\n");
    output.push_str("=".repeat(60).as_str());
    output.push('\n');
    output.push('\n');

    output.push_str("Type a package name after a trigger, or add a suffix.\n");
    output.push_str(&format!(
        "Queries without a trigger search: {:?}\n",
        settings.default_scope
    ));
    output.push('\n');

    output.push_str("QUERIES:\n");
    output.push_str("-".repeat(40).as_str());
    output.push('\n');
    for entry in help_entries(settings) {
        output.push_str(&format!("{:<40} - {}\n", entry.usage, entry.description));
    }
    output.push('\n');

    output.push_str("RESULTS:\n");
    output.push_str("-".repeat(40).as_str());
    output.push('\n');
    output.push_str("Shorter names are listed first. AUR results show votes,\n");
    output.push_str("official results show their repository.\n");
    output.push_str("[Orphan] and [Out of date: YYYY-MM-DD] mark packages needing care.\n");

    output
}
