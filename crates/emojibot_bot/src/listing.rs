//! Paging the catalog for the `list` command.

use emojibot_core::CommunityCatalog;

/// Split the catalog, most used first, into pages of at most `budget` bytes.
///
/// Each entry is one `:name: (N uses)` line. A line longer than the budget
/// gets a page of its own. An empty catalog yields one empty page.
pub fn paginate(catalog: &CommunityCatalog, budget: usize) -> Vec<String> {
    let mut pages = Vec::new();
    let mut current = String::new();

    for (name, record) in catalog.ranked() {
        let line = format!("{} ({} uses)\n", name.tag(), record.use_count());
        if !current.is_empty() && current.len() + line.len() > budget {
            pages.push(std::mem::take(&mut current));
        }
        current.push_str(&line);
    }

    pages.push(current);
    pages
}
