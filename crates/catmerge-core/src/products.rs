use serde::{Deserialize, Serialize};

/// The best-known version of one product across every merged export.
///
/// The handle is the key the record is stored under, so it is not repeated
/// here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    /// Brand or vendor name as the export spelled it.
    pub vendor: String,
    pub category: String,
    /// Raw description, usually HTML from the export's body column.
    pub description: String,
    pub image_url: String,
    /// Completeness score of the row this record was taken from.
    pub score: u64,
}

impl ProductRecord {
    /// Build a replacement for `previous` from `self`, keeping any of
    /// `previous`'s fields that `self` leaves empty.
    #[must_use]
    pub fn or_fallback(self, previous: &ProductRecord) -> ProductRecord {
        fn pick(own: String, prev: &str) -> String {
            if own.is_empty() {
                prev.to_owned()
            } else {
                own
            }
        }

        ProductRecord {
            title: pick(self.title, &previous.title),
            vendor: pick(self.vendor, &previous.vendor),
            category: pick(self.category, &previous.category),
            description: pick(self.description, &previous.description),
            image_url: pick(self.image_url, &previous.image_url),
            score: self.score,
        }
    }
}
