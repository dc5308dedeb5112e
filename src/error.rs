use thiserror::Error;

/// Errors surfaced by the table skeleton reconstruction engine.
///
/// Most failure modes described in the spec (degenerate geometry, missing
/// titles, unmatched continuations, page explosion) are not fatal and are
/// instead recorded in [`crate::reconcile::RunResult::skipped`]. This enum
/// covers the subset that genuinely prevents progress: malformed input the
/// engine cannot recover from, and I/O failures from the serialisation
/// adapters.
#[derive(Error, Debug)]
pub enum SkeletonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(String),

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

pub type Result<T> = std::result::Result<T, SkeletonError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn display_messages() {
        assert_eq!(
            SkeletonError::DegenerateGeometry("zero skeleton points".into()).to_string(),
            "degenerate geometry: zero skeleton points"
        );
        assert_eq!(
            SkeletonError::Xlsx("workbook has no default sheet".into()).to_string(),
            "XLSX error: workbook has no default sheet"
        );
    }

    #[test]
    fn io_error_preserved() {
        let io_err = IoError::new(ErrorKind::NotFound, "missing file");
        let err: SkeletonError = io_err.into();
        match err {
            SkeletonError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SkeletonError>();
    }
}
