//! Client-side filtering over the guest directory.

use shared::{domain::GuestRecord, protocol::GuestEntry};

/// Guests whose display name contains `query`, ignoring case, in directory order.
/// An empty query matches nothing.
pub fn filter_by_name(records: &[GuestRecord], query: &str) -> Vec<GuestRecord> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| record.display_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Rows matching every `(column, needle)` filter. A row without the filtered column is excluded.
pub fn filter_entries<'a>(
    entries: &'a [GuestEntry],
    filters: &[(String, String)],
) -> Vec<&'a GuestEntry> {
    let filters: Vec<(&str, String)> = filters
        .iter()
        .map(|(column, needle)| (column.as_str(), needle.to_lowercase()))
        .collect();

    entries
        .iter()
        .filter(|entry| {
            filters.iter().all(|(column, needle)| {
                entry
                    .column(column)
                    .is_some_and(|value| value.to_lowercase().contains(needle.as_str()))
            })
        })
        .collect()
}
