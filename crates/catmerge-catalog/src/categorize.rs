//! Keyword-based category fallback for records whose exports carried none.

use crate::merge::Catalog;

/// Category used when no keyword matches.
pub const DEFAULT_CATEGORY: &str = "skin-care";

/// Checked in order; the first category with a keyword in the title wins.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "skin-care",
        &[
            "cleanser",
            "toner",
            "serum",
            "moisturizer",
            "cream",
            "face",
            "facial",
            "skin",
        ],
    ),
    (
        "hair-care",
        &[
            "hair",
            "shampoo",
            "conditioner",
            "treatment",
            "oil",
            "mask",
            "scalp",
        ],
    ),
    (
        "make-up",
        &[
            "mascara",
            "lipstick",
            "foundation",
            "eyeshadow",
            "blush",
            "concealer",
        ],
    ),
    ("body-care", &["body", "lotion", "scrub", "wash", "soap", "hand"]),
    (
        "fragrances",
        &["perfume", "fragrance", "cologne", "mist", "eau de"],
    ),
];

/// Picks a category slug for a product title by substring keyword match.
#[must_use]
pub fn categorize_title(title: &str) -> &'static str {
    let lower = title.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map_or(DEFAULT_CATEGORY, |(slug, _)| *slug)
}

/// Fills in a category for every record whose category is missing or too
/// short to be real (under two characters, whitespace included). Scores
/// are left as they were.
///
/// Returns the number of records changed.
pub fn auto_categorize(catalog: &mut Catalog) -> usize {
    let mut filled = 0;
    for record in catalog.records_mut() {
        if record.category.chars().count() < 2 {
            record.category = categorize_title(&record.title).to_owned();
            filled += 1;
        }
    }
    filled
}
