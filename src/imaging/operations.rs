//! High-level image operations.
//!
//! These functions turn a size spec into concrete [`ResizeParams`], call the
//! backend, and persist the result next to the original.

use super::backend::{BackendError, ImageBackend};
use super::params::ResizeParams;
use crate::config::SizeSpec;
use crate::naming::derived_filename;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Path of the variant of `original` for `size`: same directory, derived name.
pub fn target_path(original: &Path, size: &SizeSpec) -> PathBuf {
    original.with_file_name(derived_filename(original, size))
}

/// Plan a resize without executing it.
///
/// Zero dimensions are dropped here, so the backend only ever sees real
/// sizes. Fit and position default to `cover` and `center` through
/// [`SizeSpec`]'s defaults.
pub fn plan_variant(original: &Path, size: &SizeSpec) -> ResizeParams {
    ResizeParams {
        source: original.to_path_buf(),
        output: target_path(original, size),
        width: size.width(),
        height: size.height(),
        fit: size.fit,
        position: size.position,
    }
}

/// Hidden sibling the variant is staged in before it takes its final name.
///
/// Hidden files are never discovered, so a leftover is neither resized nor
/// mistaken for a finished variant.
fn staging_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(output.file_name().unwrap_or_default());
    name.push(".tmp");
    output.with_file_name(name)
}

/// Resize through the backend and write the bytes to `params.output`.
///
/// The target only appears once it is complete: the bytes go to a staging
/// file that is renamed into place. On failure nothing is left at
/// `params.output`, so the next run tries again instead of skipping.
pub fn write_variant(backend: &impl ImageBackend, params: &ResizeParams) -> Result<()> {
    let bytes = backend.resize(params)?;
    let staged = staging_path(&params.output);

    let written = std::fs::write(&staged, bytes)
        .and_then(|()| std::fs::rename(&staged, &params.output));
    if let Err(err) = written {
        let _ = std::fs::remove_file(&staged);
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::touch;
    use crate::types::{Fit, Position};
    use tempfile::TempDir;

    fn size(width: Option<u32>, height: Option<u32>) -> SizeSpec {
        SizeSpec {
            name: "test".to_string(),
            width,
            height,
            ..SizeSpec::default()
        }
    }

    #[test]
    fn target_path_stays_next_to_original() {
        let path = target_path(Path::new("/img/slides/cat.jpg"), &size(Some(200), Some(200)));
        assert_eq!(path, PathBuf::from("/img/slides/cat-200x200.jpg"));
    }

    #[test]
    fn plan_variant_applies_defaults() {
        let params = plan_variant(Path::new("/img/dog.png"), &size(Some(800), None));
        assert_eq!(params.output, PathBuf::from("/img/dog-w800.png"));
        assert_eq!(params.width, Some(800));
        assert_eq!(params.height, None);
        assert_eq!(params.fit, Fit::Cover);
        assert_eq!(params.position, Position::Center);
    }

    #[test]
    fn plan_variant_drops_zero_dimension() {
        let params = plan_variant(Path::new("/img/dog.png"), &size(Some(0), Some(300)));
        assert_eq!(params.width, None);
        assert_eq!(params.height, Some(300));
        assert_eq!(params.output, PathBuf::from("/img/dog-h300.png"));
    }

    #[test]
    fn plan_variant_passes_fit_and_position() {
        let spec = SizeSpec {
            fit: Fit::Contain,
            position: Position::RightTop,
            ..size(Some(10), Some(20))
        };
        let params = plan_variant(Path::new("/img/a.gif"), &spec);
        assert_eq!(params.fit, Fit::Contain);
        assert_eq!(params.position, Position::RightTop);
    }

    #[test]
    fn write_variant_persists_backend_bytes() {
        let tmp = TempDir::new().unwrap();
        let original = tmp.path().join("cat.jpg");
        let params = plan_variant(&original, &size(Some(200), Some(200)));
        let backend = MockBackend::new();

        write_variant(&backend, &params).unwrap();

        assert_eq!(std::fs::read(&params.output).unwrap(), b"resized");
        assert!(matches!(
            &backend.get_operations()[0],
            RecordedOp::Resize { width: Some(200), height: Some(200), .. }
        ));
    }

    #[test]
    fn write_variant_writes_nothing_on_failure() {
        let tmp = TempDir::new().unwrap();
        let original = tmp.path().join("cat.jpg");
        let params = plan_variant(&original, &size(Some(200), None));
        let backend = MockBackend::failing_on(&["cat.jpg"]);

        assert!(write_variant(&backend, &params).is_err());
        assert!(!params.output.exists());
    }

    #[test]
    fn staging_path_is_hidden_sibling() {
        assert_eq!(
            staging_path(Path::new("/img/cat-w10.jpg")),
            PathBuf::from("/img/.cat-w10.jpg.tmp")
        );
    }

    #[test]
    fn write_variant_leaves_no_staging_file() {
        let tmp = TempDir::new().unwrap();
        let params = plan_variant(&tmp.path().join("cat.jpg"), &size(Some(10), None));

        write_variant(&MockBackend::new(), &params).unwrap();

        let names: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![OsString::from("cat-w10.jpg")]);
    }

    #[test]
    fn failed_write_leaves_no_target() {
        let tmp = TempDir::new().unwrap();
        let params = plan_variant(&tmp.path().join("cat.jpg"), &size(Some(10), None));
        // A directory in the staging slot makes the write fail after resizing
        std::fs::create_dir(staging_path(&params.output)).unwrap();

        let result = write_variant(&MockBackend::new(), &params);

        assert!(matches!(result, Err(BackendError::Io(_))));
        assert!(!params.output.exists());
    }

    #[test]
    fn failed_rename_leaves_no_staging_file() {
        let tmp = TempDir::new().unwrap();
        let params = plan_variant(&tmp.path().join("cat.jpg"), &size(Some(10), None));
        // A non-empty directory at the target cannot be replaced by a file
        touch(&params.output.join("keep"));

        let result = write_variant(&MockBackend::new(), &params);

        assert!(matches!(result, Err(BackendError::Io(_))));
        assert!(!staging_path(&params.output).exists());
    }

    #[test]
    fn write_variant_reports_write_failure() {
        let tmp = TempDir::new().unwrap();
        // Parent directory does not exist
        let original = tmp.path().join("missing/cat.jpg");
        let params = plan_variant(&original, &size(Some(200), None));

        let result = write_variant(&MockBackend::new(), &params);
        assert!(matches!(result, Err(BackendError::Io(_))));
    }
}
