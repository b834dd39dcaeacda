//! Loader and report tests against review trees on disk

use std::fs;
use std::path::Path;

use hotel_catalog::loader::{discover_review_files, load_hotels, load_reviews, parse_review_file};
use hotel_catalog::{load_catalog, write_report, Catalog, CatalogConfig, ErrorKind};
use tempfile::TempDir;

const HOTELS_JSON: &str = r#"{"sr": [
    {"id": "25622", "f": "Hilton San Francisco Union Square", "ci": "San Francisco",
     "pr": "CA", "ad": "55 Cyril Magnin St", "ll": {"lat": "37.78", "lng": "-122.4"}},
    {"id": "10323", "f": "Hotel Nikko", "ci": "San Francisco",
     "pr": "CA", "ad": "222 Mason St", "ll": {"lat": "37.786", "lng": "-122.409"}}
]}"#;

fn review_json(reviews: &[(&str, &str, i64, &str, &str)]) -> String {
    let entries: Vec<serde_json::Value> = reviews
        .iter()
        .map(|(hotel_id, review_id, rating, date, user)| {
            serde_json::json!({
                "hotelId": hotel_id,
                "reviewId": review_id,
                "ratingOverall": rating,
                "title": format!("Title {}", review_id),
                "reviewText": format!("Text {}", review_id),
                "isRecommended": "YES",
                "reviewSubmissionTime": date,
                "userNickname": user,
            })
        })
        .collect();

    serde_json::json!({
        "reviewDetails": {
            "numberOfReviewsInThisPage": entries.len(),
            "reviewCollection": { "review": entries }
        }
    })
    .to_string()
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// hotels.json plus a nested review tree:
///
/// ```text
/// reviews/
///   a/chris.json            Chris (25622)
///   a/b/alicia.json         Alicia (25622), Nikko review
///   c/xiaofeng.json         Xiaofeng (25622), one unknown hotel, one rating 9
///   c/broken.json           not JSON
///   c/.hidden.json          ignored
///   notes.txt               ignored
/// ```
fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(&root.join("hotels.json"), HOTELS_JSON);
    write(
        &root.join("reviews/a/chris.json"),
        &review_json(&[("25622", "23d7", 5, "2014-09-05T05:00:45", "Chris")]),
    );
    write(
        &root.join("reviews/a/b/alicia.json"),
        &review_json(&[
            ("25622", "92rl", 4, "2014-09-05T05:00:45", "Alicia"),
            ("10323", "n001", 3, "2016-06-29T17:50:37", "Sam"),
        ]),
    );
    write(
        &root.join("reviews/c/xiaofeng.json"),
        &review_json(&[
            ("25622", "57b7", 4, "2015-03-04T10:10:16", "Xiaofeng"),
            ("99999", "zzzz", 4, "2015-03-04T10:10:16", "Ghost"),
            ("25622", "bad9", 9, "2015-03-04T10:10:16", "Nine"),
        ]),
    );
    write(&root.join("reviews/c/broken.json"), "{ this is not json");
    write(
        &root.join("reviews/c/.hidden.json"),
        &review_json(&[("25622", "hide", 1, "2020-01-01T00:00:00", "Hidden")]),
    );
    write(&root.join("reviews/notes.txt"), "not a review file");

    dir
}

#[test]
fn discovery_is_recursive_and_sorted() {
    let dir = fixture();
    let root = dir.path().join("reviews");

    let files = discover_review_files(&root).unwrap();
    let relative: Vec<String> = files
        .iter()
        .map(|p| {
            p.strip_prefix(&root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    assert_eq!(
        relative,
        vec![
            "a/b/alicia.json",
            "a/chris.json",
            "c/broken.json",
            "c/xiaofeng.json",
        ]
    );
}

#[test]
fn discovery_missing_root() {
    let dir = TempDir::new().unwrap();
    let err = discover_review_files(&dir.path().join("nope")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::IO);
}

#[test]
fn parse_rejects_other_schemas() {
    let dir = fixture();
    let err = parse_review_file(&dir.path().join("hotels.json")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Serialization);
}

#[test]
fn reviews_from_many_files_merge_in_order() {
    let dir = fixture();
    let mut catalog = Catalog::new();
    load_hotels(&mut catalog, &dir.path().join("hotels.json")).unwrap();

    let summary = load_reviews(&mut catalog, &dir.path().join("reviews"), false).unwrap();

    assert_eq!(summary.files_parsed, 3);
    assert_eq!(summary.files_skipped, 1);
    assert_eq!(summary.reviews_added, 4);
    assert_eq!(summary.duplicates, 0);
    assert_eq!(summary.rejected, 2);

    let users: Vec<&str> = catalog
        .reviews("25622")
        .map(|r| r.username.as_str())
        .collect();
    assert_eq!(users, vec!["Xiaofeng", "Alicia", "Chris"]);
    assert_eq!(catalog.reviews("10323").count(), 1);
    assert!((catalog.average_rating("25622") - 13.0 / 3.0).abs() < 1e-12);
}

#[test]
fn parallel_and_sequential_loads_agree() {
    let dir = fixture();

    let mut sequential = Catalog::new();
    load_hotels(&mut sequential, &dir.path().join("hotels.json")).unwrap();
    let seq_summary = load_reviews(&mut sequential, &dir.path().join("reviews"), false).unwrap();

    let mut parallel = Catalog::new();
    load_hotels(&mut parallel, &dir.path().join("hotels.json")).unwrap();
    let par_summary = load_reviews(&mut parallel, &dir.path().join("reviews"), true).unwrap();

    assert_eq!(seq_summary, par_summary);
    assert_eq!(sequential.render_all(), parallel.render_all());
}

#[test]
fn reloading_same_tree_only_adds_duplicates() {
    let dir = fixture();
    let mut catalog = Catalog::new();
    load_hotels(&mut catalog, &dir.path().join("hotels.json")).unwrap();
    load_reviews(&mut catalog, &dir.path().join("reviews"), true).unwrap();

    let again = load_reviews(&mut catalog, &dir.path().join("reviews"), true).unwrap();
    assert_eq!(again.reviews_added, 0);
    assert_eq!(again.duplicates, 4);
    assert_eq!(catalog.review_count(), 4);
}

#[test]
fn load_catalog_and_write_report() {
    let dir = fixture();
    let output = dir.path().join("output/results.txt");
    let config = CatalogConfig::default()
        .hotels_file(dir.path().join("hotels.json"))
        .reviews_dir(dir.path().join("reviews"))
        .output_file(&output);

    let (catalog, summary) = load_catalog(&config).unwrap();
    assert_eq!(catalog.hotel_count(), 2);
    assert_eq!(summary.reviews_added, 4);

    assert!(write_report(&catalog, &config.output_file).unwrap());

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.starts_with("\n********************\nHotel Nikko: 10323\n"));

    let nikko = report.find("Hotel Nikko: 10323").unwrap();
    let hilton = report.find("Hilton San Francisco Union Square: 25622").unwrap();
    assert!(nikko < hilton);

    let xiaofeng = report.find("Review by Xiaofeng").unwrap();
    let alicia = report.find("Review by Alicia").unwrap();
    let chris = report.find("Review by Chris").unwrap();
    assert!(hilton < xiaofeng && xiaofeng < alicia && alicia < chris);
    assert!(!report.contains("Hidden"));
    assert!(!report.contains("Ghost"));
}

#[test]
fn load_catalog_missing_hotel_file() {
    let dir = fixture();
    let config = CatalogConfig::default()
        .hotels_file(dir.path().join("missing.json"))
        .reviews_dir(dir.path().join("reviews"));

    let err = load_catalog(&config).unwrap_err();
    assert_eq!(err.kind, ErrorKind::IO);
}
