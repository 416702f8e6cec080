use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::intake::domain::{
    CandidateId, CandidateRecord, CandidateSubmission, EducationEntry, EducationRecord,
    NewCandidate, NewEducation, NewResume, NewWorkExperience, RecordId, ResumeAttachment,
    ResumeRecord, WorkExperienceEntry, WorkExperienceRecord,
};
use crate::intake::repository::{
    CandidateRepository, EducationRepository, ResumeRepository, StorageError, StorageResult,
    WorkExperienceRepository,
};
use crate::intake::service::{CandidateIntakeService, IntakeRepositories};
use crate::intake::validator::{SubmissionValidator, ValidationError};

pub(super) fn submission() -> CandidateSubmission {
    CandidateSubmission {
        first_name: Some("John".to_string()),
        last_name: Some("Doe".to_string()),
        email: Some("john.doe@example.com".to_string()),
        phone: Some("612345678".to_string()),
        address: Some("123 Main St".to_string()),
        educations: Some(vec![EducationEntry {
            institution: Some("University".to_string()),
            title: Some("BSc".to_string()),
            start_date: Some("2020-01-01".to_string()),
            ..EducationEntry::default()
        }]),
        work_experiences: Some(vec![WorkExperienceEntry {
            company: Some("Company".to_string()),
            position: Some("Developer".to_string()),
            start_date: Some("2021-01-01".to_string()),
            ..WorkExperienceEntry::default()
        }]),
        cv: Some(ResumeAttachment {
            file_path: Some("resume.pdf".to_string()),
            file_type: Some("application/pdf".to_string()),
            ..ResumeAttachment::default()
        }),
        ..CandidateSubmission::default()
    }
}

pub(super) fn combined_name_submission() -> CandidateSubmission {
    CandidateSubmission {
        name: Some("John Doe".to_string()),
        first_name: None,
        last_name: None,
        ..submission()
    }
}

pub(super) fn minimal_submission() -> CandidateSubmission {
    CandidateSubmission {
        name: Some("Jane Doe".to_string()),
        email: Some("jane.doe@example.com".to_string()),
        ..CandidateSubmission::default()
    }
}

/// Validator double recording every payload it is asked about.
#[derive(Default)]
pub(super) struct RecordingValidator {
    seen: Mutex<Vec<CandidateSubmission>>,
    failure: Option<ValidationError>,
}

impl RecordingValidator {
    pub(super) fn failing(error: ValidationError) -> Self {
        Self {
            seen: Mutex::default(),
            failure: Some(error),
        }
    }

    pub(super) fn seen(&self) -> Vec<CandidateSubmission> {
        self.seen.lock().expect("validator mutex poisoned").clone()
    }
}

impl SubmissionValidator for RecordingValidator {
    fn validate(&self, submission: &CandidateSubmission) -> Result<(), ValidationError> {
        self.seen
            .lock()
            .expect("validator mutex poisoned")
            .push(submission.clone());
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Repository double logging each write in call order.
#[derive(Default)]
pub(super) struct RecordingStore {
    events: Mutex<Vec<String>>,
    candidate_failure: Option<StorageError>,
    education_failure: Option<StorageError>,
    work_experience_failure: Option<StorageError>,
    resume_failure: Option<StorageError>,
}

impl RecordingStore {
    pub(super) fn failing_candidates(error: StorageError) -> Self {
        Self {
            candidate_failure: Some(error),
            ..Self::default()
        }
    }

    pub(super) fn failing_educations(error: StorageError) -> Self {
        Self {
            education_failure: Some(error),
            ..Self::default()
        }
    }

    pub(super) fn failing_work_experiences(error: StorageError) -> Self {
        Self {
            work_experience_failure: Some(error),
            ..Self::default()
        }
    }

    pub(super) fn failing_resumes(error: StorageError) -> Self {
        Self {
            resume_failure: Some(error),
            ..Self::default()
        }
    }

    pub(super) fn events(&self) -> Vec<String> {
        self.events.lock().expect("events mutex poisoned").clone()
    }

    fn record(&self, event: String) {
        self.events
            .lock()
            .expect("events mutex poisoned")
            .push(event);
    }
}

pub(super) const STORED_CANDIDATE_ID: CandidateId = CandidateId(123);

#[async_trait]
impl CandidateRepository for RecordingStore {
    async fn save(&self, candidate: NewCandidate) -> StorageResult<CandidateRecord> {
        if let Some(error) = &self.candidate_failure {
            return Err(error.clone());
        }
        self.record(format!("candidate:{}", candidate.email));
        Ok(CandidateRecord::from_new(STORED_CANDIDATE_ID, candidate))
    }

    async fn find(&self, id: CandidateId) -> StorageResult<Option<CandidateRecord>> {
        Ok((id == STORED_CANDIDATE_ID).then(|| CandidateRecord {
            id,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: None,
            address: None,
        }))
    }
}

#[async_trait]
impl EducationRepository for RecordingStore {
    async fn save(&self, education: NewEducation) -> StorageResult<EducationRecord> {
        if let Some(error) = &self.education_failure {
            return Err(error.clone());
        }
        self.record(format!(
            "education:{}:{}",
            education.candidate_id, education.institution
        ));
        Ok(EducationRecord::from_new(RecordId(2), education))
    }

    async fn for_candidate(&self, _id: CandidateId) -> StorageResult<Vec<EducationRecord>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl WorkExperienceRepository for RecordingStore {
    async fn save(&self, experience: NewWorkExperience) -> StorageResult<WorkExperienceRecord> {
        if let Some(error) = &self.work_experience_failure {
            return Err(error.clone());
        }
        self.record(format!(
            "work_experience:{}:{}",
            experience.candidate_id, experience.company
        ));
        Ok(WorkExperienceRecord::from_new(RecordId(3), experience))
    }

    async fn for_candidate(&self, _id: CandidateId) -> StorageResult<Vec<WorkExperienceRecord>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl ResumeRepository for RecordingStore {
    async fn save(&self, resume: NewResume) -> StorageResult<ResumeRecord> {
        if let Some(error) = &self.resume_failure {
            return Err(error.clone());
        }
        self.record(format!("resume:{}:{}", resume.candidate_id, resume.file_path));
        Ok(ResumeRecord::from_new(RecordId(4), resume))
    }

    async fn for_candidate(&self, _id: CandidateId) -> StorageResult<Option<ResumeRecord>> {
        Ok(None)
    }
}

pub(super) fn build_service(
    store: RecordingStore,
) -> (
    CandidateIntakeService,
    Arc<RecordingStore>,
    Arc<RecordingValidator>,
) {
    build_service_with(store, RecordingValidator::default())
}

pub(super) fn build_service_with(
    store: RecordingStore,
    validator: RecordingValidator,
) -> (
    CandidateIntakeService,
    Arc<RecordingStore>,
    Arc<RecordingValidator>,
) {
    let store = Arc::new(store);
    let validator = Arc::new(validator);
    let service = CandidateIntakeService::with_validator(
        validator.clone(),
        IntakeRepositories::from_store(store.clone()),
    );
    (service, store, validator)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
