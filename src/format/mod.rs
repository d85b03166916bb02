pub mod formatter;
pub mod item;
pub mod json;
pub mod markup;
pub mod text;

pub use formatter::ItemFormatter;
pub use item::{ResultItem, UrlAction};
pub use json::{SearchResponse, build_error_response, build_response};
pub use markup::Markup;
pub use text::render_items;
