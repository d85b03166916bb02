//! # Arch Package Search
//!
//! Search backend for desktop launcher extensions that look up packages in
//! the Arch Linux official repositories and the Arch User Repository (AUR).
//!
//! - Query dispatch by trigger prefix (`aur `, `repo `, `pkg `) or suffix
//!   (`-AUR`, `-REPO`, `-PKG`)
//! - Concurrent async clients for the AUR RPC v5 and archlinux.org JSON APIs
//! - Launcher result items with match highlighting, orphan and
//!   out-of-date markers, and URL actions
//! - A line-delimited JSON mode for long-lived launcher host processes
//!
//! Basic usage:
//! ```no_run
//! use arch_pkg_search::search;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     for item in search("aur yay").await? {
//!         println!("{} - {}", item.text, item.subtext);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod format;
pub mod server;
pub mod services;

pub use crate::config::{Scope, Settings};
pub use crate::core::{QueryOutcome, QueryProcessor, QueryType, analyze_query};
pub use crate::format::{ItemFormatter, Markup, ResultItem, UrlAction};
pub use crate::services::packages::{PackageResult, PackageSource};

/// Search with default settings and HTML item markup
///
/// # Examples
///
/// ```no_run
/// use arch_pkg_search::search;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     // Official repositories and the AUR
///     let items = search("firefox").await?;
///
///     // AUR only, via trigger or suffix
///     let items = search("aur paru").await?;
///     let items = search("paru-AUR").await?;
///
///     Ok(())
/// }
/// ```
pub async fn search(input: &str) -> anyhow::Result<Vec<ResultItem>> {
    search_with(input, Settings::default(), Markup::Html).await
}

/// Search with explicit settings and markup
pub async fn search_with(
    input: &str,
    settings: Settings,
    markup: Markup,
) -> anyhow::Result<Vec<ResultItem>> {
    let formatter = ItemFormatter::new(markup, &settings);
    let processor = QueryProcessor::new(settings)?;
    let outcome = processor.run(input).await;
    Ok(formatter.items(&outcome))
}
