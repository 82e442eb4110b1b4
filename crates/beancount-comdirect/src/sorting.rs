use crate::Entry;

/// Order entries chronologically, keeping file order within a day.
///
/// Extraction yields entries newest first; merged output of several sections reads better
/// oldest first.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by_key(|entry| (entry.date(), entry_order(entry)));
}

// balance assertions apply at the start of the day
fn entry_order(entry: &Entry) -> u8 {
    match entry {
        Entry::Balance(_) => 0,
        Entry::Transaction(_) => 1,
    }
}
