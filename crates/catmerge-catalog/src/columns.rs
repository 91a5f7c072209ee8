//! Per-file column layout, resolved from header aliases.
//!
//! Each export tool names its columns differently (`Body (HTML)` from the
//! commerce platform, `descriptionHtml` from the scraper, ...). The alias
//! table below maps every logical field to the names seen in the wild, in
//! priority order.

use crate::csv::RawRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Vendor,
    Category,
    Description,
    ImageUrl,
    Url,
    Title,
    Handle,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Vendor,
        Field::Category,
        Field::Description,
        Field::ImageUrl,
        Field::Url,
        Field::Title,
        Field::Handle,
    ];

    /// Lowercase header names accepted for this field, highest priority first.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Vendor => &["brand", "vendor"],
            Field::Category => &["categories/0", "type", "producttype"],
            Field::Description => &["description", "body (html)", "descriptionhtml"],
            Field::ImageUrl => &["medias/0/url", "image src", "src"],
            Field::Url => &["source/canonicalurl", "url", "producturl"],
            Field::Title => &["title"],
            Field::Handle => &["handle"],
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Vendor => "vendor",
            Field::Category => "category",
            Field::Description => "description",
            Field::ImageUrl => "imageUrl",
            Field::Url => "url",
            Field::Title => "title",
            Field::Handle => "handle",
        };
        f.write_str(name)
    }
}

/// Where each logical field lives in one particular file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    pub vendor: Option<usize>,
    pub category: Option<usize>,
    pub description: Option<usize>,
    pub image_url: Option<usize>,
    pub url: Option<usize>,
    pub title: Option<usize>,
    pub handle: Option<usize>,
}

impl ColumnLayout {
    /// Resolves every field against `header`. Header names are trimmed and
    /// compared case-insensitively; the first alias present wins.
    #[must_use]
    pub fn resolve(header: &RawRow) -> Self {
        let normalized: Vec<String> = header
            .cells()
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let find = |field: Field| -> Option<usize> {
            field
                .aliases()
                .iter()
                .find_map(|alias| normalized.iter().position(|h| h == alias))
        };

        Self {
            vendor: find(Field::Vendor),
            category: find(Field::Category),
            description: find(Field::Description),
            image_url: find(Field::ImageUrl),
            url: find(Field::Url),
            title: find(Field::Title),
            handle: find(Field::Handle),
        }
    }

    #[must_use]
    pub fn column(&self, field: Field) -> Option<usize> {
        match field {
            Field::Vendor => self.vendor,
            Field::Category => self.category,
            Field::Description => self.description,
            Field::ImageUrl => self.image_url,
            Field::Url => self.url,
            Field::Title => self.title,
            Field::Handle => self.handle,
        }
    }
}

impl RawRow {
    /// The raw cell for `field` under `layout`, untrimmed.
    #[must_use]
    pub fn field(&self, layout: &ColumnLayout, field: Field) -> Option<&str> {
        self.get(layout.column(field))
    }

    /// Like [`RawRow::field`], but an empty cell counts as absent.
    #[must_use]
    pub fn non_empty(&self, layout: &ColumnLayout, field: Field) -> Option<&str> {
        self.field(layout, field).filter(|v| !v.is_empty())
    }
}
