use std::path::{Path, PathBuf};

/// Lists the `*.csv` files to merge, directory by directory in the order
/// given, sorted by file name within each directory.
///
/// Directories that do not exist or cannot be listed are skipped. `exclude`
/// (the run's own output file) is never returned, so a re-run does not
/// ingest its previous result.
#[must_use]
pub fn discover_csv_files(dirs: &[PathBuf], exclude: &Path) -> Vec<PathBuf> {
    let excluded_canonical = exclude.canonicalize().ok();
    let is_excluded = |path: &Path| {
        path == exclude
            || excluded_canonical
                .as_deref()
                .is_some_and(|target| path.canonicalize().is_ok_and(|p| p == target))
    };

    let mut found = Vec::new();

    for dir in dirs {
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "input directory not found, skipping");
            continue;
        }

        tracing::info!(dir = %dir.display(), "scanning directory");

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "could not list directory, skipping");
                continue;
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| is_csv_name(path) && path.is_file())
            .filter(|path| {
                if is_excluded(path.as_path()) {
                    tracing::debug!(file = %path.display(), "skipping output file");
                    false
                } else {
                    true
                }
            })
            .collect();

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        found.extend(files);
    }

    found
}

fn is_csv_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".csv"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(path: &Path) {
        fs::write(path, "Handle\n").unwrap();
    }

    #[test]
    fn lists_csv_files_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.csv"));
        touch(&dir.path().join("a.csv"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("upper.CSV"));

        let files = discover_csv_files(&[dir.path().to_path_buf()], Path::new("/nonexistent.csv"));
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn skips_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.csv"));

        let files = discover_csv_files(
            &[dir.path().join("missing"), dir.path().to_path_buf()],
            Path::new("/nonexistent.csv"),
        );
        assert_eq!(files, vec![dir.path().join("a.csv")]);
    }

    #[test]
    fn excludes_output_file_by_exact_path() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("merged.csv");
        touch(&output);
        touch(&dir.path().join("vendor.csv"));

        let files = discover_csv_files(&[dir.path().to_path_buf()], &output);
        assert_eq!(files, vec![dir.path().join("vendor.csv")]);
    }

    #[test]
    fn excludes_output_file_reached_through_another_path() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("exports");
        fs::create_dir(&sub).unwrap();
        touch(&sub.join("merged.csv"));
        touch(&sub.join("vendor.csv"));

        let indirect = sub.join("..").join("exports").join("merged.csv");
        let files = discover_csv_files(&[sub.clone()], &indirect);
        assert_eq!(files, vec![sub.join("vendor.csv")]);
    }

    #[test]
    fn ignores_directories_named_like_csv() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("archive.csv")).unwrap();

        let files = discover_csv_files(&[dir.path().to_path_buf()], Path::new("/nonexistent.csv"));
        assert!(files.is_empty());
    }
}
