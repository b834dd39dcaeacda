//! Review file discovery and loading
//!
//! Every `*.json` file below the review root is a review document:
//!
//! ```json
//! {"reviewDetails": {"reviewCollection": {"review": [
//!     {"hotelId": "25622", "reviewId": "57b717a44751ca0b791823b2",
//!      "ratingOverall": 4, "title": "Room too small",
//!      "reviewText": "Great location, but the room is too small",
//!      "isRecommended": "YES", "reviewSubmissionTime": "2015-03-04T10:10:16",
//!      "userNickname": "Xiaofeng"}]}}}
//! ```
//!
//! Files are parsed on the rayon pool when `parallel` is set. Insertion into
//! the catalog always happens afterwards on the calling thread, in sorted path
//! order.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{JsonScalar, LoadSummary};
use crate::catalog::AddOutcome;
use crate::domain::ReviewDraft;
use crate::{Catalog, CatalogError, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewDocument {
    review_details: ReviewDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewDetails {
    review_collection: ReviewCollection,
}

#[derive(Debug, Deserialize)]
struct ReviewCollection {
    #[serde(default)]
    review: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewEntry {
    hotel_id: JsonScalar,
    review_id: JsonScalar,
    rating_overall: JsonScalar,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    review_text: Option<String>,
    #[serde(default)]
    is_recommended: Option<JsonScalar>,
    review_submission_time: String,
    #[serde(default)]
    user_nickname: Option<String>,
}

impl ReviewEntry {
    fn into_draft(self) -> Result<ReviewDraft> {
        let rating = self.rating_overall.as_i64().ok_or_else(|| {
            CatalogError::serialization(format!(
                "ratingOverall is not an integer: {:?}",
                self.rating_overall
            ))
        })?;

        Ok(ReviewDraft {
            hotel_id: self.hotel_id.into_string(),
            review_id: self.review_id.into_string(),
            rating,
            title: self.title.unwrap_or_default(),
            text: self.review_text.unwrap_or_default(),
            is_recommended: is_recommended(self.is_recommended.as_ref()),
            submitted_at: self.review_submission_time,
            username: self.user_nickname.unwrap_or_default(),
        })
    }
}

/// `false` only for `"NO"` (any case) or JSON `false`
fn is_recommended(value: Option<&JsonScalar>) -> bool {
    match value {
        Some(JsonScalar::Text(text)) => !text.trim().eq_ignore_ascii_case("no"),
        Some(JsonScalar::Bool(flag)) => *flag,
        Some(JsonScalar::Number(_)) | None => true,
    }
}

/// Reviews read from one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReviews {
    pub drafts: Vec<ReviewDraft>,
    /// Entries that did not match the review schema
    pub malformed: usize,
}

/// Parse one review document
///
/// # Errors
///
/// - `IO` if the file cannot be read
/// - `Serialization` if it is not a review document
pub fn parse_review_file(path: &Path) -> Result<ParsedReviews> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        CatalogError::io(format!("Could not read review file {}", path.display())).with_source(err)
    })?;
    let document: ReviewDocument = serde_json::from_str(&content)?;

    let entries = document.review_details.review_collection.review;
    let mut parsed = ParsedReviews {
        drafts: Vec::with_capacity(entries.len()),
        malformed: 0,
    };

    for value in entries {
        let draft = serde_json::from_value::<ReviewEntry>(value)
            .map_err(CatalogError::from)
            .and_then(ReviewEntry::into_draft);
        match draft {
            Ok(draft) => parsed.drafts.push(draft),
            Err(err) => {
                warn!("Malformed review in {}: {}", path.display(), err);
                parsed.malformed += 1;
            }
        }
    }
    Ok(parsed)
}

/// Find review files below `root`, sorted by path
///
/// Hidden files and directories are skipped, symlinks are not followed.
///
/// # Errors
///
/// `IO` if `root` does not exist or is not a directory.
pub fn discover_review_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(CatalogError::io(format!(
            "Review directory not found: {}",
            root.display()
        )));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Walk error below {}: {}", root.display(), err);
                continue;
            }
        };

        if entry.file_type().is_file()
            && entry.file_name().to_string_lossy().ends_with(".json")
        {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Load every review file below `root` into the catalog
pub fn load_reviews(catalog: &mut Catalog, root: &Path, parallel: bool) -> Result<LoadSummary> {
    let files = discover_review_files(root)?;
    debug!("Discovered {} review files below {}", files.len(), root.display());

    // Indexed collect keeps path order regardless of scheduling
    let parsed: Vec<Result<ParsedReviews>> = if parallel {
        files.par_iter().map(|path| parse_review_file(path)).collect()
    } else {
        files.iter().map(|path| parse_review_file(path)).collect()
    };

    let mut summary = LoadSummary::default();
    for (path, result) in files.iter().zip(parsed) {
        let reviews = match result {
            Ok(reviews) => reviews,
            Err(err) => {
                warn!("Skipping {}: {}", path.display(), err);
                summary.files_skipped += 1;
                continue;
            }
        };

        summary.files_parsed += 1;
        summary.rejected += reviews.malformed;
        for draft in reviews.drafts {
            match catalog.add_review(draft) {
                AddOutcome::Added => summary.reviews_added += 1,
                AddOutcome::Duplicate => summary.duplicates += 1,
                AddOutcome::Rejected(_) => summary.rejected += 1,
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_recommended() {
        let text = |s: &str| JsonScalar::Text(s.to_string());

        assert!(!is_recommended(Some(&text("NO"))));
        assert!(!is_recommended(Some(&text("no"))));
        assert!(is_recommended(Some(&text("YES"))));
        assert!(is_recommended(Some(&text(""))));
        assert!(!is_recommended(Some(&JsonScalar::Bool(false))));
        assert!(is_recommended(None));
    }

    #[test]
    fn test_entry_into_draft() {
        let entry: ReviewEntry = serde_json::from_str(
            r#"{"hotelId": 25622, "reviewId": "abc", "ratingOverall": "4",
                "title": "Overpriced", "reviewText": "Good location",
                "isRecommended": "NO", "reviewSubmissionTime": "2014-09-05T05:00:45",
                "userNickname": "Alicia", "reviewStatus": "APPROVED"}"#,
        )
        .unwrap();

        let draft = entry.into_draft().unwrap();
        assert_eq!(draft.hotel_id, "25622");
        assert_eq!(draft.rating, 4);
        assert!(!draft.is_recommended);
        assert_eq!(draft.username, "Alicia");
    }

    #[test]
    fn test_entry_missing_optional_fields() {
        let entry: ReviewEntry = serde_json::from_str(
            r#"{"hotelId": "1", "reviewId": "r", "ratingOverall": 3,
                "title": null, "reviewSubmissionTime": "2014-09-05T05:00:45"}"#,
        )
        .unwrap();

        let draft = entry.into_draft().unwrap();
        assert_eq!(draft.title, "");
        assert_eq!(draft.text, "");
        assert_eq!(draft.username, "");
        assert!(draft.is_recommended);
    }

    #[test]
    fn test_entry_non_numeric_rating() {
        let entry: ReviewEntry = serde_json::from_str(
            r#"{"hotelId": "1", "reviewId": "r", "ratingOverall": "five",
                "reviewSubmissionTime": "2014-09-05T05:00:45"}"#,
        )
        .unwrap();

        assert!(entry.into_draft().is_err());
    }
}
