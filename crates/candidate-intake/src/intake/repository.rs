use async_trait::async_trait;

use super::domain::{
    CandidateId, CandidateRecord, EducationRecord, NewCandidate, NewEducation, NewResume,
    NewWorkExperience, ResumeRecord, WorkExperienceRecord,
};

/// Error code storage adapters attach to unique constraint failures.
pub const UNIQUE_CONSTRAINT_CODE: &str = "P2002";
/// Error code storage adapters attach to foreign key failures.
pub const FOREIGN_KEY_CODE: &str = "P2003";

pub type StorageResult<T> = Result<T, StorageError>;

/// Failures reported by repository adapters.
///
/// Only the unique constraint code is interpreted by intake; every other
/// variant is surfaced with its own message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("unique constraint failed on {target}")]
    UniqueViolation { target: String },
    #[error("foreign key constraint failed on {target}")]
    ForeignKeyViolation { target: String },
    #[error("{message}")]
    Database {
        code: Option<String>,
        message: String,
    },
    #[error("{0}")]
    Unavailable(String),
}

impl StorageError {
    /// Map a driver error code onto the matching variant.
    pub fn from_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        let message = message.into();
        match code.as_str() {
            UNIQUE_CONSTRAINT_CODE => Self::UniqueViolation { target: message },
            FOREIGN_KEY_CODE => Self::ForeignKeyViolation { target: message },
            _ => Self::Database {
                code: Some(code),
                message,
            },
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            StorageError::UniqueViolation { .. } => Some(UNIQUE_CONSTRAINT_CODE),
            StorageError::ForeignKeyViolation { .. } => Some(FOREIGN_KEY_CODE),
            StorageError::Database { code, .. } => code.as_deref(),
            StorageError::Unavailable(_) => None,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.code() == Some(UNIQUE_CONSTRAINT_CODE)
    }
}

/// Candidate persistence. Email uniqueness is enforced here.
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    async fn save(&self, candidate: NewCandidate) -> StorageResult<CandidateRecord>;
    async fn find(&self, id: CandidateId) -> StorageResult<Option<CandidateRecord>>;
}

#[async_trait]
pub trait EducationRepository: Send + Sync {
    async fn save(&self, education: NewEducation) -> StorageResult<EducationRecord>;
    async fn for_candidate(&self, id: CandidateId) -> StorageResult<Vec<EducationRecord>>;
}

#[async_trait]
pub trait WorkExperienceRepository: Send + Sync {
    async fn save(&self, experience: NewWorkExperience) -> StorageResult<WorkExperienceRecord>;
    async fn for_candidate(&self, id: CandidateId) -> StorageResult<Vec<WorkExperienceRecord>>;
}

#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn save(&self, resume: NewResume) -> StorageResult<ResumeRecord>;
    async fn for_candidate(&self, id: CandidateId) -> StorageResult<Option<ResumeRecord>>;
}
