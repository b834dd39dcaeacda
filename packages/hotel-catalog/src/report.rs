//! Report writer

use std::path::Path;

use tracing::info;

use crate::{Catalog, CatalogError, Result};

/// Write `catalog.render_all()` to `path`
///
/// Parent directories are created as needed. Nothing is written for an empty
/// catalog; the return value says whether a file was written.
pub fn write_report(catalog: &Catalog, path: &Path) -> Result<bool> {
    if catalog.hotel_count() == 0 {
        info!("No hotels loaded, skipping report {}", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| {
            CatalogError::io(format!("Could not create {}", parent.display())).with_source(err)
        })?;
    }

    let mut report = catalog.render_all();
    report.push('\n');

    std::fs::write(path, report).map_err(|err| {
        CatalogError::io(format!("Could not write report {}", path.display())).with_source(err)
    })?;

    info!(
        "Wrote report for {} hotels to {}",
        catalog.hotel_count(),
        path.display()
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReviewDraft;
    use crate::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_empty_catalog_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.txt");

        assert!(!write_report(&Catalog::new(), &path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_report_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("results.txt");

        let mut catalog = Catalog::new();
        catalog.add_hotel("2", "Second", "Oakland", "CA", "1 Broadway", 0.0, 0.0);
        catalog.add_hotel("1", "First", "Berkeley", "CA", "2 Telegraph Ave", 0.0, 0.0);
        catalog.add_review(ReviewDraft::new(
            "1",
            "r1",
            3,
            "Fine",
            "It was fine",
            true,
            "2016-06-29T17:50:37",
            "Sam",
        ));

        assert!(write_report(&catalog, &path).unwrap());

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "\n********************\n\
             First: 1\n\
             2 Telegraph Ave\n\
             Berkeley, CA\n\
             --------------------\n\
             Review by Sam on Wed Jun 29 17:50:37 2016\n\
             Rating: 3\n\
             Fine\n\
             It was fine\n\
             \n********************\n\
             Second: 2\n\
             1 Broadway\n\
             Oakland, CA\n\
             \n"
        );
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        let mut catalog = Catalog::new();
        catalog.add_hotel("1", "First", "Berkeley", "CA", "2 Telegraph Ave", 0.0, 0.0);

        // A directory cannot be overwritten with a file
        let err = write_report(&catalog, dir.path()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IO);
    }
}
