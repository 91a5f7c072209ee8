use std::sync::LazyLock;

use regex::Regex;

use crate::columns::{ColumnLayout, Field};
use crate::csv::RawRow;

static PRODUCT_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/products/([^/?#]+)").expect("valid regex"));

/// Extracts the storefront slug from a product URL, e.g.
/// `"https://shop.example/products/glow-serum?variant=1"` → `"glow-serum"`.
#[must_use]
pub fn handle_from_url(url: &str) -> Option<&str> {
    PRODUCT_PATH_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Lowercases `title` and collapses every run of characters outside
/// `[a-z0-9]` into a single `-`, with no leading or trailing `-`.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Derives handles for the rows of one file.
///
/// Multi-row variant exports only repeat a product's identity on its first
/// row, so a row without its own handle inherits the last one seen. Create a
/// fresh resolver per file.
#[derive(Debug, Default)]
pub struct HandleResolver {
    current: Option<String>,
}

impl HandleResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `row`, or `None` if nothing usable is present.
    ///
    /// Priority: explicit handle column, `/products/{slug}` in the URL
    /// column, the previous row's handle, then a slug of the title.
    pub fn resolve(&mut self, row: &RawRow, layout: &ColumnLayout) -> Option<String> {
        if let Some(own) = own_handle(row, layout) {
            self.current = Some(own.clone());
            return Some(own);
        }

        if let Some(inherited) = &self.current {
            return Some(inherited.clone());
        }

        let slug = row
            .non_empty(layout, Field::Title)
            .map(slugify)
            .filter(|s| !s.is_empty())?;
        self.current = Some(slug.clone());
        Some(slug)
    }
}

fn own_handle(row: &RawRow, layout: &ColumnLayout) -> Option<String> {
    if let Some(explicit) = row
        .field(layout, Field::Handle)
        .map(str::trim)
        .filter(|h| !h.is_empty())
    {
        return Some(explicit.to_owned());
    }

    row.non_empty(layout, Field::Url)
        .and_then(handle_from_url)
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(names: &[&str]) -> ColumnLayout {
        ColumnLayout::resolve(&row(names))
    }

    fn row(cells: &[&str]) -> RawRow {
        RawRow::new(cells.iter().map(|s| (*s).to_string()).collect())
    }

    #[test]
    fn handle_from_url_extracts_slug() {
        assert_eq!(
            handle_from_url("https://shop.example/products/glow-serum"),
            Some("glow-serum")
        );
    }

    #[test]
    fn handle_from_url_stops_at_query_fragment_and_slash() {
        assert_eq!(
            handle_from_url("https://shop.example/products/glow-serum?variant=42"),
            Some("glow-serum")
        );
        assert_eq!(
            handle_from_url("https://shop.example/products/glow-serum#reviews"),
            Some("glow-serum")
        );
        assert_eq!(
            handle_from_url("https://shop.example/collections/all/products/glow-serum/"),
            Some("glow-serum")
        );
    }

    #[test]
    fn handle_from_url_none_without_products_segment() {
        assert_eq!(handle_from_url("https://shop.example/collections/serums"), None);
        assert_eq!(handle_from_url("https://shop.example/products/"), None);
    }

    #[test]
    fn slugify_collapses_punctuation_runs() {
        assert_eq!(
            slugify("La Roche-Posay  Effaclar Duo (+) 40ml"),
            "la-roche-posay-effaclar-duo-40ml"
        );
    }

    #[test]
    fn slugify_strips_leading_and_trailing_dashes() {
        assert_eq!(slugify("  **Glow Serum!** "), "glow-serum");
    }

    #[test]
    fn slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Crème Visage"), "cr-me-visage");
    }

    #[test]
    fn slugify_all_punctuation_is_empty() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn explicit_handle_is_trimmed() {
        let layout = layout(&["handle", "title"]);
        let mut resolver = HandleResolver::new();
        assert_eq!(
            resolver.resolve(&row(&["  glow-serum ", "Glow"]), &layout),
            Some("glow-serum".to_string())
        );
    }

    #[test]
    fn url_used_when_handle_blank() {
        let layout = layout(&["handle", "url", "title"]);
        let mut resolver = HandleResolver::new();
        let handle = resolver.resolve(
            &row(&["  ", "https://shop.example/products/night-cream", "Night Cream"]),
            &layout,
        );
        assert_eq!(handle.as_deref(), Some("night-cream"));
    }

    #[test]
    fn variant_row_inherits_previous_handle() {
        let layout = layout(&["handle", "title"]);
        let mut resolver = HandleResolver::new();
        assert_eq!(
            resolver.resolve(&row(&["glow-serum", "Glow Serum"]), &layout).as_deref(),
            Some("glow-serum")
        );
        assert_eq!(
            resolver.resolve(&row(&["", ""]), &layout).as_deref(),
            Some("glow-serum")
        );
    }

    #[test]
    fn inheritance_beats_title_slug() {
        let layout = layout(&["handle", "title"]);
        let mut resolver = HandleResolver::new();
        resolver.resolve(&row(&["glow-serum", "Glow Serum"]), &layout);
        assert_eq!(
            resolver.resolve(&row(&["", "Glow Serum 50ml"]), &layout).as_deref(),
            Some("glow-serum")
        );
    }

    #[test]
    fn title_slug_used_when_nothing_else() {
        let layout = layout(&["title"]);
        let mut resolver = HandleResolver::new();
        assert_eq!(
            resolver.resolve(&row(&["Hydra Boost Gel"]), &layout).as_deref(),
            Some("hydra-boost-gel")
        );
    }

    #[test]
    fn title_slug_becomes_inherited_handle() {
        let layout = layout(&["title", "vendor"]);
        let mut resolver = HandleResolver::new();
        resolver.resolve(&row(&["Hydra Boost Gel", "Neutrogena"]), &layout);
        assert_eq!(
            resolver.resolve(&row(&["", "Neutrogena"]), &layout).as_deref(),
            Some("hydra-boost-gel")
        );
    }

    #[test]
    fn new_own_handle_replaces_inherited_one() {
        let layout = layout(&["handle"]);
        let mut resolver = HandleResolver::new();
        resolver.resolve(&row(&["first"]), &layout);
        resolver.resolve(&row(&["second"]), &layout);
        assert_eq!(resolver.resolve(&row(&[""]), &layout).as_deref(), Some("second"));
    }

    #[test]
    fn unresolvable_row_is_none() {
        let layout = layout(&["handle", "title"]);
        let mut resolver = HandleResolver::new();
        assert_eq!(resolver.resolve(&row(&["", "???"]), &layout), None);
        assert_eq!(resolver.resolve(&row(&[]), &layout), None);
    }

    #[test]
    fn same_row_resolves_identically_each_time() {
        let layout = layout(&["handle", "url", "title"]);
        let r = row(&["", "https://shop.example/products/aqua-mist", "Aqua Mist"]);
        let first = HandleResolver::new().resolve(&r, &layout);
        let second = HandleResolver::new().resolve(&r, &layout);
        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Some("aqua-mist"));
    }
}
