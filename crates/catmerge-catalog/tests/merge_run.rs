//! End-to-end merge runs over temporary export directories.

use std::fs;
use std::path::Path;

use catmerge_catalog::{run_merge, tokenize, writer::OUTPUT_HEADER};
use catmerge_core::{CatalogConfig, ScoreWeights};

fn config(dirs: &[&Path], output: &Path) -> CatalogConfig {
    CatalogConfig {
        input_dirs: dirs.iter().map(|d| d.to_path_buf()).collect(),
        output_path: output.to_path_buf(),
        auto_categorize: false,
        score: ScoreWeights::default(),
    }
}

fn output_rows(path: &Path) -> Vec<Vec<String>> {
    let text = fs::read_to_string(path).expect("output should exist");
    tokenize(&text)
        .into_iter()
        .map(|r| r.cells().to_vec())
        .collect()
}

#[test]
fn empty_inputs_write_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out").join("catalog.csv");

    let report = run_merge(&config(&[dir.path().join("nothing-here").as_path()], &output)).unwrap();

    assert_eq!(report.unique_handles, 0);
    assert_eq!(report.stats.files_scanned, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), format!("{OUTPUT_HEADER}\n"));
}

#[test]
fn merges_heterogeneous_exports_across_directories() {
    let root = tempfile::tempdir().unwrap();
    let apify = root.path().join("apify");
    let shop = root.path().join("shop");
    fs::create_dir_all(&apify).unwrap();
    fs::create_dir_all(&shop).unwrap();

    fs::write(
        apify.join("scrape.csv"),
        "title,brand,categories/0,description,medias/0/url,source/canonicalUrl\n\
         Glow Serum,Asper,Skin Care,Short,,https://shop.example/products/glow-serum\n\
         Night Cream,Vichy,,A rich night cream,https://cdn.example/night.jpg,https://shop.example/products/night-cream\n",
    )
    .unwrap();
    let long_body = "x".repeat(1000);
    fs::write(
        shop.join("export.csv"),
        format!(
            "Handle,Title,Vendor,Type,Body (HTML),Image Src\r\n\
             glow-serum,,,,\"<p>Brand \"\"Deluxe\"\", 50ml</p>{long_body}\",https://cdn.example/glow.jpg\r\n\
             ,,,,,https://cdn.example/glow-2.jpg\r\n"
        ),
    )
    .unwrap();

    let output = root.path().join("merged.csv");
    let report = run_merge(&config(&[apify.as_path(), shop.as_path()], &output)).unwrap();

    assert_eq!(report.stats.files_scanned, 2);
    assert_eq!(report.stats.rows_processed, 4);
    assert_eq!(report.unique_handles, 2);

    let rows = output_rows(&output);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].join(","), OUTPUT_HEADER);

    // First-seen order: glow-serum came first in the apify file.
    let glow = &rows[1];
    assert_eq!(glow[0], "glow-serum");
    // The shop row scores higher (image + longer description) but has no
    // title, vendor, or category, so those come from the scrape.
    assert_eq!(glow[1], "Glow Serum");
    assert_eq!(glow[2], "Asper");
    assert_eq!(glow[3], "Skin Care");
    assert_eq!(glow[4], format!("<p>Brand \"Deluxe\", 50ml</p>{long_body}"));
    assert_eq!(glow[5], "https://cdn.example/glow.jpg");
    assert_eq!(glow[6], "2027");

    let night = &rows[2];
    assert_eq!(night[0], "night-cream");
    assert_eq!(night[6], "1018");
}

#[test]
fn rerun_does_not_ingest_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("vendor.csv"), "Handle,Title\nglow,Glow\n").unwrap();
    let output = dir.path().join("merged.csv");
    let cfg = config(&[dir.path()], &output);

    let first = run_merge(&cfg).unwrap();
    let second = run_merge(&cfg).unwrap();

    assert_eq!(first.stats.files_scanned, 1);
    assert_eq!(second.stats.files_scanned, 1);
    assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 2);
}

#[test]
fn non_utf8_export_is_merged_not_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("vendor.csv"),
        b"Handle,Title\ncreme-visage,Cr\xE8me Visage\nglow,Glow\n",
    )
    .unwrap();
    let output = dir.path().join("out.csv");

    let report = run_merge(&config(&[dir.path()], &output)).unwrap();

    assert_eq!(report.stats.files_skipped, 0);
    assert_eq!(report.stats.files_scanned, 1);
    assert_eq!(report.unique_handles, 2);

    let rows = output_rows(&output);
    assert_eq!(rows[1][0], "creme-visage");
    assert_eq!(rows[1][1], "Cr\u{FFFD}me Visage");
    assert_eq!(rows[2][0], "glow");
}

#[test]
fn auto_categorize_fills_missing_categories() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("vendor.csv"),
        "Handle,Title,Type\nshampoo,Repair Shampoo,\nserum,Glow Serum,Serums\n",
    )
    .unwrap();
    let output = dir.path().join("out.csv");
    let mut cfg = config(&[dir.path()], &output);
    cfg.auto_categorize = true;

    let report = run_merge(&cfg).unwrap();
    assert_eq!(report.categorized, 1);

    let rows = output_rows(&output);
    assert_eq!(rows[1][3], "hair-care");
    assert_eq!(rows[2][3], "Serums");
}

#[test]
fn output_write_failure_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let result = run_merge(&config(&[dir.path()], &blocker.join("out.csv")));
    assert!(result.is_err());
}
