use crate::format::item::ResultItem;

/// Render items as an indented terminal listing
pub fn render_items(items: &[ResultItem]) -> String {
    let mut output = String::new();

    for item in items {
        output.push_str(&item.text);
        output.push('\n');
        if !item.subtext.is_empty() {
            output.push_str(&format!("    {}\n", item.subtext));
        }
        for action in &item.actions {
            output.push_str(&format!("    -> {}\n", action.url));
        }
    }

    output
}
