use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{
    CandidateId, CandidateProfile, CandidateRecord, CandidateSubmission, EducationDraft,
    NewCandidate, NewResume, WorkExperienceDraft,
};
use super::repository::{
    CandidateRepository, EducationRepository, ResumeRepository, StorageError,
    WorkExperienceRepository,
};
use super::validator::{
    CandidateValidator, SubmissionValidator, ValidationError, ValidationPolicy,
};

pub const DUPLICATE_EMAIL_MESSAGE: &str = "The email already exists in the database";

/// The four collaborators a candidate aggregate is written through.
#[derive(Clone)]
pub struct IntakeRepositories {
    pub candidates: Arc<dyn CandidateRepository>,
    pub educations: Arc<dyn EducationRepository>,
    pub work_experiences: Arc<dyn WorkExperienceRepository>,
    pub resumes: Arc<dyn ResumeRepository>,
}

impl IntakeRepositories {
    /// Use one backend for every record type.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: CandidateRepository
            + EducationRepository
            + WorkExperienceRepository
            + ResumeRepository
            + 'static,
    {
        Self {
            candidates: store.clone(),
            educations: store.clone(),
            work_experiences: store.clone(),
            resumes: store,
        }
    }
}

/// Service validating submissions and writing the candidate aggregate.
pub struct CandidateIntakeService {
    validator: Arc<dyn SubmissionValidator>,
    repositories: IntakeRepositories,
}

impl CandidateIntakeService {
    pub fn new(repositories: IntakeRepositories, policy: ValidationPolicy) -> Self {
        Self::with_validator(
            Arc::new(CandidateValidator::with_policy(policy)),
            repositories,
        )
    }

    pub fn with_validator(
        validator: Arc<dyn SubmissionValidator>,
        repositories: IntakeRepositories,
    ) -> Self {
        Self {
            validator,
            repositories,
        }
    }

    /// Validate a submission and persist the candidate, then its education,
    /// work experience and resume records in that order.
    ///
    /// Every record is built from the submission before the first write, so
    /// nothing after validation can reject the payload. Nested records are
    /// only written once the candidate exists. A failure after the candidate
    /// is stored leaves the rows written so far in place.
    pub async fn add_candidate(
        &self,
        submission: CandidateSubmission,
    ) -> Result<CandidateRecord, IntakeError> {
        self.validator.validate(&submission)?;
        debug!(
            educations = submission.educations().len(),
            work_experiences = submission.work_experiences().len(),
            has_cv = submission.cv.is_some(),
            "candidate submission accepted"
        );

        let candidate = NewCandidate::from_submission(&submission);
        let educations: Vec<EducationDraft> = submission
            .educations()
            .iter()
            .map(EducationDraft::from_entry)
            .collect();
        let work_experiences: Vec<WorkExperienceDraft> = submission
            .work_experiences()
            .iter()
            .map(WorkExperienceDraft::from_entry)
            .collect();

        let stored = match self.repositories.candidates.save(candidate).await {
            Ok(record) => record,
            Err(err) if err.is_unique_violation() => {
                warn!(error = %err, "candidate email already registered");
                return Err(IntakeError::DuplicateEmail);
            }
            Err(err) => return Err(err.into()),
        };

        let education_count = educations.len();
        for draft in educations {
            let education = draft.for_candidate(stored.id);
            self.repositories.educations.save(education).await?;
        }

        let work_experience_count = work_experiences.len();
        for draft in work_experiences {
            let experience = draft.for_candidate(stored.id);
            self.repositories.work_experiences.save(experience).await?;
        }

        if let Some(cv) = &submission.cv {
            let resume = NewResume::from_attachment(stored.id, cv, Utc::now());
            self.repositories.resumes.save(resume).await?;
        }

        info!(
            candidate_id = %stored.id,
            educations = education_count,
            work_experiences = work_experience_count,
            "candidate stored"
        );
        Ok(stored)
    }

    /// Load a candidate with every record it owns.
    pub async fn get_candidate(&self, id: CandidateId) -> Result<CandidateProfile, IntakeError> {
        let candidate = self
            .repositories
            .candidates
            .find(id)
            .await?
            .ok_or(IntakeError::CandidateNotFound(id))?;

        let educations = self.repositories.educations.for_candidate(id).await?;
        let work_experiences = self.repositories.work_experiences.for_candidate(id).await?;
        let resume = self.repositories.resumes.for_candidate(id).await?;

        Ok(CandidateProfile {
            candidate,
            educations,
            work_experiences,
            resume,
        })
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{}", DUPLICATE_EMAIL_MESSAGE)]
    DuplicateEmail,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("candidate {0} not found")]
    CandidateNotFound(CandidateId),
}
