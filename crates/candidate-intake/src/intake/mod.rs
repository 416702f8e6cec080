//! Candidate intake: submission validation, the persistence orchestrator, and
//! the HTTP routes in front of it.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod store;
pub mod validator;

#[cfg(test)]
mod tests;

pub use domain::{
    CandidateId, CandidateProfile, CandidateRecord, CandidateSubmission, EducationDraft,
    EducationEntry, EducationRecord, NewCandidate, NewEducation, NewResume, NewWorkExperience,
    RecordId, ResumeAttachment, ResumeRecord, WorkExperienceDraft, WorkExperienceEntry,
    WorkExperienceRecord,
};
pub use repository::{
    CandidateRepository, EducationRepository, ResumeRepository, StorageError, StorageResult,
    WorkExperienceRepository, FOREIGN_KEY_CODE, UNIQUE_CONSTRAINT_CODE,
};
pub use router::candidate_router;
pub use service::{
    CandidateIntakeService, IntakeError, IntakeRepositories, DUPLICATE_EMAIL_MESSAGE,
};
pub use store::InMemoryIntakeStore;
pub use validator::{CandidateValidator, SubmissionValidator, ValidationError, ValidationPolicy};
