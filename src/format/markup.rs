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

use regex::RegexBuilder;

/// Text markup understood by the consumer of result items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Rich-text subset rendered by launcher hosts
    Html,
    /// Terminal escape sequences
    Ansi,
    Plain,
}

impl Markup {
    /// Escape package-provided text for this markup
    pub fn escape(self, text: &str) -> String {
        match self {
            Markup::Html => text
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;"),
            Markup::Ansi | Markup::Plain => text.to_string(),
        }
    }

    pub fn bold(self, text: &str) -> String {
        match self {
            Markup::Html => format!("<b>{}</b>", text),
            Markup::Ansi => format!("\x1b[1m{}\x1b[22m", text),
            Markup::Plain => text.to_string(),
        }
    }

    pub fn italic(self, text: &str) -> String {
        match self {
            Markup::Html => format!("<i>{}</i>", text),
            Markup::Ansi => format!("\x1b[3m{}\x1b[23m", text),
            Markup::Plain => text.to_string(),
        }
    }

    pub fn underline(self, text: &str) -> String {
        match self {
            Markup::Html => format!("<u>{}</u>", text),
            Markup::Ansi => format!("\x1b[4m{}\x1b[24m", text),
            Markup::Plain => text.to_string(),
        }
    }

    /// Red warning text such as `[Orphan]`
    pub fn alert(self, text: &str) -> String {
        match self {
            Markup::Html => format!("<font color=\"red\">{}</font>", text),
            Markup::Ansi => format!("\x1b[31m{}\x1b[39m", text),
            Markup::Plain => text.to_string(),
        }
    }

    /// Underline every case-insensitive occurrence of `term` in `text`.
    ///
    /// The term is matched literally; regex metacharacters typed into the
    /// launcher (`c++`, `lib*`) are never interpreted.
    pub fn highlight(self, text: &str, term: &str) -> String {
        if term.is_empty() {
            return self.escape(text);
        }

        let Ok(pattern) = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
        else {
            return self.escape(text);
        };

        let mut output = String::new();
        let mut last = 0;
        for found in pattern.find_iter(text) {
            output.push_str(&self.escape(&text[last..found.start()]));
            output.push_str(&self.underline(&self.escape(found.as_str())));
            last = found.end();
        }
        output.push_str(&self.escape(&text[last..]));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_highlight_all_occurrences() {
        assert_eq!(
            Markup::Html.highlight("yay-yay-git", "YAY"),
            "<u>yay</u>-<u>yay</u>-git"
        );
    }

    #[test]
    fn test_highlight_treats_term_literally() {
        assert_eq!(Markup::Html.highlight("c++utilities", "c++"), "<u>c++</u>utilities");
        assert_eq!(Markup::Html.highlight("libfoo", "lib*"), "libfoo");
    }

    #[test]
    fn test_highlight_escapes_html() {
        assert_eq!(
            Markup::Html.highlight("a<b>&gtk", "gtk"),
            "a&lt;b&gt;&amp;<u>gtk</u>"
        );
    }

    #[test]
    fn test_plain_and_empty_term() {
        assert_eq!(Markup::Plain.highlight("firefox", "fire"), "firefox");
        assert_eq!(Markup::Html.highlight("firefox", ""), "firefox");
    }

    #[test]
    fn test_ansi_uses_scoped_resets() {
        let bold = Markup::Ansi.bold(&Markup::Ansi.highlight("paru", "pa"));
        assert_eq!(bold, "\x1b[1m\x1b[4mpa\x1b[24mru\x1b[22m");
    }
}
