use crate::models::{poster_url, DiaryEntry, Rating};

/// Read-only view of a single diary entry. Needs no fetch, the entry
/// arrives with the route.
pub struct EntryDetail {
    entry: DiaryEntry,
}

impl EntryDetail {
    pub fn new(entry: DiaryEntry) -> Self {
        Self { entry }
    }

    pub fn entry(&self) -> &DiaryEntry {
        &self.entry
    }

    pub fn rating_label(&self) -> String {
        match self.entry.rating_overall {
            Some(rating) => rating.to_string(),
            None => format!("—/{}", Rating::MAX),
        }
    }

    pub fn remarks(&self) -> Option<&str> {
        self.entry.remarks.as_deref().filter(|r| !r.trim().is_empty())
    }

    /// Log date in long form, e.g. `March 4, 2025`.
    pub fn logged_label(&self) -> String {
        self.entry.date_logged.format("%B %-d, %Y").to_string()
    }

    pub fn poster_url(&self, image_base: &str) -> Option<String> {
        poster_url(image_base, self.entry.poster_path.as_deref())
    }
}
