use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::domain::{
    CandidateId, CandidateRecord, EducationRecord, NewCandidate, NewEducation, NewResume,
    NewWorkExperience, RecordId, ResumeRecord, WorkExperienceRecord,
};
use super::repository::{
    CandidateRepository, EducationRepository, ResumeRepository, StorageError, StorageResult,
    WorkExperienceRepository,
};

#[derive(Debug, Default)]
struct StoreState {
    last_candidate_id: u64,
    last_record_id: u64,
    candidates: BTreeMap<CandidateId, CandidateRecord>,
    emails: HashSet<String>,
    educations: Vec<EducationRecord>,
    work_experiences: Vec<WorkExperienceRecord>,
    resumes: Vec<ResumeRecord>,
}

impl StoreState {
    fn next_record_id(&mut self) -> RecordId {
        self.last_record_id += 1;
        RecordId(self.last_record_id)
    }

    fn ensure_candidate(&self, id: CandidateId, target: &str) -> StorageResult<()> {
        if self.candidates.contains_key(&id) {
            Ok(())
        } else {
            Err(StorageError::ForeignKeyViolation {
                target: target.to_string(),
            })
        }
    }
}

/// Process-local backend for all four intake repositories.
///
/// Emails are unique case-insensitively, nested records must reference an
/// existing candidate, and a candidate owns at most one resume.
#[derive(Debug, Default, Clone)]
pub struct InMemoryIntakeStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryIntakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|_| StorageError::Unavailable("intake store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CandidateRepository for InMemoryIntakeStore {
    async fn save(&self, candidate: NewCandidate) -> StorageResult<CandidateRecord> {
        let mut state = self.lock()?;
        let email_key = candidate.email.to_lowercase();
        if state.emails.contains(&email_key) {
            return Err(StorageError::UniqueViolation {
                target: "Candidate.email".to_string(),
            });
        }

        state.last_candidate_id += 1;
        let record = CandidateRecord::from_new(CandidateId(state.last_candidate_id), candidate);
        state.emails.insert(email_key);
        state.candidates.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find(&self, id: CandidateId) -> StorageResult<Option<CandidateRecord>> {
        let state = self.lock()?;
        Ok(state.candidates.get(&id).cloned())
    }
}

#[async_trait]
impl EducationRepository for InMemoryIntakeStore {
    async fn save(&self, education: NewEducation) -> StorageResult<EducationRecord> {
        let mut state = self.lock()?;
        state.ensure_candidate(education.candidate_id, "Education.candidateId")?;
        let record = EducationRecord::from_new(state.next_record_id(), education);
        state.educations.push(record.clone());
        Ok(record)
    }

    async fn for_candidate(&self, id: CandidateId) -> StorageResult<Vec<EducationRecord>> {
        let state = self.lock()?;
        Ok(state
            .educations
            .iter()
            .filter(|record| record.candidate_id == id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl WorkExperienceRepository for InMemoryIntakeStore {
    async fn save(&self, experience: NewWorkExperience) -> StorageResult<WorkExperienceRecord> {
        let mut state = self.lock()?;
        state.ensure_candidate(experience.candidate_id, "WorkExperience.candidateId")?;
        let record = WorkExperienceRecord::from_new(state.next_record_id(), experience);
        state.work_experiences.push(record.clone());
        Ok(record)
    }

    async fn for_candidate(&self, id: CandidateId) -> StorageResult<Vec<WorkExperienceRecord>> {
        let state = self.lock()?;
        Ok(state
            .work_experiences
            .iter()
            .filter(|record| record.candidate_id == id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ResumeRepository for InMemoryIntakeStore {
    async fn save(&self, resume: NewResume) -> StorageResult<ResumeRecord> {
        let mut state = self.lock()?;
        state.ensure_candidate(resume.candidate_id, "Resume.candidateId")?;
        if state
            .resumes
            .iter()
            .any(|record| record.candidate_id == resume.candidate_id)
        {
            return Err(StorageError::UniqueViolation {
                target: "Resume.candidateId".to_string(),
            });
        }

        let record = ResumeRecord::from_new(state.next_record_id(), resume);
        state.resumes.push(record.clone());
        Ok(record)
    }

    async fn for_candidate(&self, id: CandidateId) -> StorageResult<Option<ResumeRecord>> {
        let state = self.lock()?;
        Ok(state
            .resumes
            .iter()
            .find(|record| record.candidate_id == id)
            .cloned())
    }
}
