use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::validator::parse_date;

/// Identity generated by the candidate repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub u64);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity generated for education, work experience and resume records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

/// Inbound candidate payload.
///
/// Every field is optional at the boundary so that missing values are
/// reported by the validator with a domain message rather than by serde.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub educations: Option<Vec<EducationEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_experiences: Option<Vec<WorkExperienceEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv: Option<ResumeAttachment>,
}

impl CandidateSubmission {
    /// Education entries, treating an absent list as empty.
    pub fn educations(&self) -> &[EducationEntry] {
        self.educations.as_deref().unwrap_or_default()
    }

    /// Work experience entries, treating an absent list as empty.
    pub fn work_experiences(&self) -> &[WorkExperienceEntry] {
        self.work_experiences.as_deref().unwrap_or_default()
    }

    /// First and last name, splitting a combined `name` at its first whitespace run.
    pub fn split_name(&self) -> (String, String) {
        if self.first_name.is_some() || self.last_name.is_some() {
            let first = self.first_name.as_deref().unwrap_or_default().trim();
            let last = self.last_name.as_deref().unwrap_or_default().trim();
            return (first.to_string(), last.to_string());
        }

        let full = self.name.as_deref().unwrap_or_default().trim();
        match full.split_once(char::is_whitespace) {
            Some((first, last)) => (first.to_string(), last.trim().to_string()),
            None => (full.to_string(), String::new()),
        }
    }
}

/// Education entry as submitted. `degree` is accepted as a legacy spelling
/// of `title`; when both are sent `title` wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl EducationEntry {
    pub fn title(&self) -> Option<&str> {
        first_present(&[self.title.as_deref(), self.degree.as_deref()])
    }
}

/// Work experience entry as submitted. `title` is accepted for `position`;
/// when both are sent `position` wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceEntry {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WorkExperienceEntry {
    pub fn position(&self) -> Option<&str> {
        first_present(&[self.position.as_deref(), self.title.as_deref()])
    }
}

fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// CV descriptor; binary content stays opaque to intake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAttachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_content: Option<String>,
}

impl ResumeAttachment {
    /// Storage location, falling back to the file name when no path was sent.
    pub fn location(&self) -> &str {
        first_present(&[self.file_path.as_deref(), self.file_name.as_deref()]).unwrap_or_default()
    }

    pub fn file_type(&self) -> &str {
        self.file_type.as_deref().unwrap_or_default().trim()
    }
}

/// Candidate row ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCandidate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl NewCandidate {
    pub fn from_submission(submission: &CandidateSubmission) -> Self {
        let (first_name, last_name) = submission.split_name();
        Self {
            first_name,
            last_name,
            email: submission
                .email
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            phone: non_empty(submission.phone.as_deref()),
            address: non_empty(submission.address.as_deref()),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CandidateRecord {
    pub fn from_new(id: CandidateId, candidate: NewCandidate) -> Self {
        Self {
            id,
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            email: candidate.email,
            phone: candidate.phone,
            address: candidate.address,
        }
    }
}

/// Education values taken from an accepted submission, waiting for the
/// identity of the candidate that owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationDraft {
    pub institution: String,
    pub title: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EducationDraft {
    /// Dates that do not parse are kept as `None`; rejecting them is the
    /// validator's job.
    pub fn from_entry(entry: &EducationEntry) -> Self {
        Self {
            institution: trimmed(entry.institution.as_deref()),
            title: entry.title().unwrap_or_default().to_string(),
            start_date: lenient_date(entry.start_date.as_deref()),
            end_date: lenient_date(entry.end_date.as_deref()),
        }
    }

    pub fn for_candidate(self, candidate_id: CandidateId) -> NewEducation {
        NewEducation {
            candidate_id,
            institution: self.institution,
            title: self.title,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEducation {
    pub candidate_id: CandidateId,
    pub institution: String,
    pub title: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

fn trimmed(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_string()
}

fn lenient_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(parse_date)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationRecord {
    pub id: RecordId,
    pub candidate_id: CandidateId,
    pub institution: String,
    pub title: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EducationRecord {
    pub fn from_new(id: RecordId, education: NewEducation) -> Self {
        Self {
            id,
            candidate_id: education.candidate_id,
            institution: education.institution,
            title: education.title,
            start_date: education.start_date,
            end_date: education.end_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkExperienceDraft {
    pub company: String,
    pub position: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl WorkExperienceDraft {
    pub fn from_entry(entry: &WorkExperienceEntry) -> Self {
        Self {
            company: trimmed(entry.company.as_deref()),
            position: entry.position().unwrap_or_default().to_string(),
            description: non_empty(entry.description.as_deref()),
            start_date: lenient_date(entry.start_date.as_deref()),
            end_date: lenient_date(entry.end_date.as_deref()),
        }
    }

    pub fn for_candidate(self, candidate_id: CandidateId) -> NewWorkExperience {
        NewWorkExperience {
            candidate_id,
            company: self.company,
            position: self.position,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkExperience {
    pub candidate_id: CandidateId,
    pub company: String,
    pub position: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceRecord {
    pub id: RecordId,
    pub candidate_id: CandidateId,
    pub company: String,
    pub position: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl WorkExperienceRecord {
    pub fn from_new(id: RecordId, experience: NewWorkExperience) -> Self {
        Self {
            id,
            candidate_id: experience.candidate_id,
            company: experience.company,
            position: experience.position,
            description: experience.description,
            start_date: experience.start_date,
            end_date: experience.end_date,
        }
    }
}

/// Resume row ready to be written. `file_content` is handed to the
/// repository untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResume {
    pub candidate_id: CandidateId,
    pub file_path: String,
    pub file_name: Option<String>,
    pub file_type: String,
    pub file_content: Option<String>,
    pub upload_date: DateTime<Utc>,
}

impl NewResume {
    pub fn from_attachment(
        candidate_id: CandidateId,
        attachment: &ResumeAttachment,
        upload_date: DateTime<Utc>,
    ) -> Self {
        Self {
            candidate_id,
            file_path: attachment.location().to_string(),
            file_name: non_empty(attachment.file_name.as_deref()),
            file_type: attachment.file_type().to_string(),
            file_content: attachment.file_content.clone(),
            upload_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: RecordId,
    pub candidate_id: CandidateId,
    pub file_path: String,
    pub file_name: Option<String>,
    pub file_type: String,
    pub upload_date: DateTime<Utc>,
}

impl ResumeRecord {
    pub fn from_new(id: RecordId, resume: NewResume) -> Self {
        Self {
            id,
            candidate_id: resume.candidate_id,
            file_path: resume.file_path,
            file_name: resume.file_name,
            file_type: resume.file_type,
            upload_date: resume.upload_date,
        }
    }
}

/// A candidate together with the records it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    #[serde(flatten)]
    pub candidate: CandidateRecord,
    pub educations: Vec<EducationRecord>,
    pub work_experiences: Vec<WorkExperienceRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<ResumeRecord>,
}
