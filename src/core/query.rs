use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{Scope, Settings};

/// `term-AUR`, `term-REPO` and `term-PKG` suffix forms. Uppercase only:
/// lowercase suffixes are part of real package names such as `pamac-aur`.
static SUFFIX_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?s)^(.*)-(AUR|REPO|PKG)$").ok());

// Launcher query types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryType {
    /// Official repositories only
    Official { term: String, trigger: String },
    /// AUR only
    Aur { term: String, trigger: String },
    /// Both sources
    Both { term: String, trigger: String },
    Help,
    /// No trigger present while triggers are required
    Untriggered(String),
}

impl QueryType {
    fn for_scope(scope: Scope, term: String, trigger: String) -> Self {
        match scope {
            Scope::Official => QueryType::Official { term, trigger },
            Scope::Aur => QueryType::Aur { term, trigger },
            Scope::Both => QueryType::Both { term, trigger },
        }
    }

    pub fn term(&self) -> Option<&str> {
        match self {
            QueryType::Official { term, .. }
            | QueryType::Aur { term, .. }
            | QueryType::Both { term, .. } => Some(term),
            _ => None,
        }
    }

    /// Trigger prepended to completions
    pub fn trigger(&self) -> Option<&str> {
        match self {
            QueryType::Official { trigger, .. }
            | QueryType::Aur { trigger, .. }
            | QueryType::Both { trigger, .. } => Some(trigger),
            _ => None,
        }
    }

    pub fn scope(&self) -> Option<Scope> {
        match self {
            QueryType::Official { .. } => Some(Scope::Official),
            QueryType::Aur { .. } => Some(Scope::Aur),
            QueryType::Both { .. } => Some(Scope::Both),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            QueryType::Official { .. } => "official",
            QueryType::Aur { .. } => "aur",
            QueryType::Both { .. } => "both",
            QueryType::Help => "help",
            QueryType::Untriggered(_) => "untriggered",
        }
    }
}

/// Case-insensitive prefix strip that respects char boundaries
fn strip_prefix_ignore_case<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        input.get(prefix.len()..)
    } else {
        None
    }
}

pub fn analyze_query(input: &str, settings: &Settings) -> QueryType {
    let input = input.trim_start();

    if input.trim().eq_ignore_ascii_case("help") {
        return QueryType::Help;
    }

    let triggers = &settings.triggers;
    let mut prefixes = [
        (triggers.aur.as_str(), Scope::Aur),
        (triggers.official.as_str(), Scope::Official),
        (triggers.both.as_str(), Scope::Both),
    ];
    // "pkg " must not shadow a longer trigger such as "pkgs "
    prefixes.sort_by_key(|(trigger, _)| std::cmp::Reverse(trigger.len()));

    for (trigger, scope) in prefixes {
        if trigger.trim().is_empty() {
            continue;
        }
        if let Some(rest) = strip_prefix_ignore_case(input, trigger) {
            return QueryType::for_scope(scope, rest.trim().to_string(), trigger.to_string());
        }
        // The bare trigger word with nothing typed after it yet
        if input.trim().eq_ignore_ascii_case(trigger.trim()) {
            return QueryType::for_scope(scope, String::new(), trigger.to_string());
        }
    }

    if let Some(captures) = SUFFIX_RE.as_ref().and_then(|re| re.captures(input.trim())) {
        let term = captures[1].trim().to_string();
        let scope = match &captures[2] {
            "AUR" => Scope::Aur,
            "REPO" => Scope::Official,
            _ => Scope::Both,
        };
        let trigger = match scope {
            Scope::Aur => &triggers.aur,
            Scope::Official => &triggers.official,
            Scope::Both => &triggers.both,
        };
        return QueryType::for_scope(scope, term, trigger.clone());
    }

    if settings.require_trigger {
        return QueryType::Untriggered(input.to_string());
    }

    QueryType::for_scope(settings.default_scope, input.trim().to_string(), String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn test_prefix_triggers() {
        assert_eq!(
            analyze_query("aur yay", &settings()),
            QueryType::Aur {
                term: "yay".to_string(),
                trigger: "aur ".to_string()
            }
        );
        assert_eq!(
            analyze_query("REPO  firefox ", &settings()),
            QueryType::Official {
                term: "firefox".to_string(),
                trigger: "repo ".to_string()
            }
        );
        assert_eq!(analyze_query("pkg rust", &settings()).scope(), Some(Scope::Both));
    }

    #[test]
    fn test_bare_trigger_gives_empty_term() {
        let query = analyze_query("aur", &settings());
        assert_eq!(query.scope(), Some(Scope::Aur));
        assert_eq!(query.term(), Some(""));

        let query = analyze_query("aur   ", &settings());
        assert_eq!(query.term(), Some(""));
    }

    #[test]
    fn test_suffix_forms() {
        let query = analyze_query("paru-bin-AUR", &settings());
        assert_eq!(query.scope(), Some(Scope::Aur));
        assert_eq!(query.term(), Some("paru-bin"));
        assert_eq!(query.trigger(), Some("aur "));

        let query = analyze_query("linux-REPO", &settings());
        assert_eq!(query.scope(), Some(Scope::Official));
        assert_eq!(query.term(), Some("linux"));

        assert_eq!(analyze_query("neovim-PKG", &settings()).scope(), Some(Scope::Both));
    }

    #[test]
    fn test_lowercase_suffix_is_part_of_the_name() {
        let query = analyze_query("pamac-aur", &settings());
        assert_eq!(query.scope(), Some(Scope::Both));
        assert_eq!(query.term(), Some("pamac-aur"));

        let query = analyze_query("aur pamac-aur", &settings());
        assert_eq!(query.scope(), Some(Scope::Aur));
        assert_eq!(query.term(), Some("pamac-aur"));

        assert_eq!(analyze_query("linux-repo", &settings()).term(), Some("linux-repo"));
    }

    #[test]
    fn test_default_scope_without_trigger() {
        let query = analyze_query("firefox", &settings());
        assert_eq!(
            query,
            QueryType::Both {
                term: "firefox".to_string(),
                trigger: String::new()
            }
        );

        let aur_default = Settings {
            default_scope: Scope::Aur,
            ..Settings::default()
        };
        assert_eq!(analyze_query("firefox", &aur_default).scope(), Some(Scope::Aur));
    }

    #[test]
    fn test_require_trigger() {
        let strict = Settings {
            require_trigger: true,
            ..Settings::default()
        };
        assert_eq!(
            analyze_query("firefox", &strict),
            QueryType::Untriggered("firefox".to_string())
        );
        assert_eq!(analyze_query("aur yay", &strict).scope(), Some(Scope::Aur));
    }

    #[test]
    fn test_help() {
        assert_eq!(analyze_query("HELP", &settings()), QueryType::Help);
        assert_eq!(analyze_query("  help ", &settings()), QueryType::Help);
    }

    #[test]
    fn test_longest_trigger_wins() {
        let mut custom = Settings::default();
        custom.triggers.both = "p ".to_string();
        custom.triggers.official = "pac ".to_string();
        assert_eq!(analyze_query("pac vim", &custom).scope(), Some(Scope::Official));
        assert_eq!(analyze_query("p vim", &custom).scope(), Some(Scope::Both));
    }

    #[test]
    fn test_non_ascii_input_does_not_panic() {
        let query = analyze_query("ä", &settings());
        assert_eq!(query.term(), Some("ä"));
    }
}
