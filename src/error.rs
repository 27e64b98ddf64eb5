use thiserror::Error;

/// Errors raised while normalizing wide-format input into the schema store.
///
/// Validation and conflict errors abort the load before anything is
/// committed; callers can downcast from `anyhow::Error` to branch on the
/// variant.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing required column '{0}' in header")]
    MissingColumn(String),

    #[error("row {row}: {reason}")]
    Validation { row: usize, reason: String },

    #[error("subject '{subject_id}' appears with conflicting attributes")]
    SubjectConflict { subject_id: String },

    #[error("sample '{sample_id}' appears with conflicting attributes or counts")]
    SampleConflict { sample_id: String },

    #[error("sample '{sample_id}' references unknown subject '{subject_id}'")]
    UnknownSubject {
        sample_id: String,
        subject_id: String,
    },
}
