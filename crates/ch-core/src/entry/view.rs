use super::model::{Entry, EntryContent};

const NEWLINE_MARKER: &str = " ⏎ ";

/// One-line title used by list renderers.
pub fn display_title(entry: &Entry) -> String {
    match &entry.content {
        EntryContent::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                "(empty)".to_string()
            } else {
                trimmed.replace('\n', NEWLINE_MARKER)
            }
        }
        EntryContent::Image(image) => format!("Image {}x{}", image.width, image.height),
    }
}

/// Search filter applied by the presentation layer.
///
/// Empty query matches everything. Text matches by case-insensitive substring;
/// images match when the query is a substring of the word "image".
pub fn matches_query(entry: &Entry, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    match &entry.content {
        EntryContent::Text(text) => text.to_lowercase().contains(&query),
        EntryContent::Image(_) => "image".contains(query.as_str()),
    }
}
