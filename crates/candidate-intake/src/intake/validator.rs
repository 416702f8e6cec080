use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

use super::domain::{CandidateSubmission, EducationEntry, ResumeAttachment, WorkExperienceEntry};
use crate::config::IntakeConfig;

/// First rule a submission violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid name: expected between {min} and {max} characters")]
    InvalidName { min: usize, max: usize },
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Invalid phone: expected 9 digits starting with 6, 7 or 9")]
    InvalidPhone,
    #[error("Invalid address: longer than {max} characters")]
    InvalidAddress { max: usize },
    #[error("Invalid institution for education entry {index}")]
    InvalidInstitution { index: usize },
    #[error("Invalid company for work experience entry {index}")]
    InvalidCompany { index: usize },
    #[error("Invalid date in {field}: '{value}'")]
    InvalidDate { field: String, value: String },
    #[error("Invalid CV data: file path and file type are required")]
    InvalidCv,
}

impl ValidationError {
    /// Path of the offending payload field.
    pub fn field(&self) -> String {
        match self {
            ValidationError::InvalidName { .. } => "name".to_string(),
            ValidationError::InvalidEmail => "email".to_string(),
            ValidationError::InvalidPhone => "phone".to_string(),
            ValidationError::InvalidAddress { .. } => "address".to_string(),
            ValidationError::InvalidInstitution { index } => {
                format!("educations[{index}].institution")
            }
            ValidationError::InvalidCompany { index } => {
                format!("workExperiences[{index}].company")
            }
            ValidationError::InvalidDate { field, .. } => field.clone(),
            ValidationError::InvalidCv => "cv".to_string(),
        }
    }
}

const DEFAULT_MIN_NAME_LENGTH: usize = 2;
const DEFAULT_MAX_NAME_LENGTH: usize = 100;
const DEFAULT_MAX_ADDRESS_LENGTH: usize = 100;

/// Length limits enforced by [`CandidateValidator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    min_name_length: usize,
    max_name_length: usize,
    max_address_length: usize,
}

impl ValidationPolicy {
    pub fn new(min_name_length: usize, max_name_length: usize, max_address_length: usize) -> Self {
        let (min_name_length, max_name_length) =
            if min_name_length > 0 && min_name_length <= max_name_length {
                (min_name_length, max_name_length)
            } else {
                (DEFAULT_MIN_NAME_LENGTH, DEFAULT_MAX_NAME_LENGTH)
            };

        let max_address_length = if max_address_length > 0 {
            max_address_length
        } else {
            DEFAULT_MAX_ADDRESS_LENGTH
        };

        Self {
            min_name_length,
            max_name_length,
            max_address_length,
        }
    }

    pub fn min_name_length(&self) -> usize {
        self.min_name_length
    }

    pub fn max_name_length(&self) -> usize {
        self.max_name_length
    }

    pub fn max_address_length(&self) -> usize {
        self.max_address_length
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MIN_NAME_LENGTH,
            DEFAULT_MAX_NAME_LENGTH,
            DEFAULT_MAX_ADDRESS_LENGTH,
        )
    }
}

impl From<&IntakeConfig> for ValidationPolicy {
    fn from(config: &IntakeConfig) -> Self {
        Self::new(
            config.min_name_length,
            config.max_name_length,
            config.max_address_length,
        )
    }
}

/// Seam between the intake service and the rules it enforces.
pub trait SubmissionValidator: Send + Sync {
    fn validate(&self, submission: &CandidateSubmission) -> Result<(), ValidationError>;
}

/// Field rules applied to every submission, in a fixed order so that the
/// reported error is deterministic.
#[derive(Debug, Clone, Default)]
pub struct CandidateValidator {
    policy: ValidationPolicy,
}

impl CandidateValidator {
    pub fn with_policy(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    fn validate_name(&self, submission: &CandidateSubmission) -> Result<(), ValidationError> {
        let parts = if submission.first_name.is_some() || submission.last_name.is_some() {
            vec![
                submission.first_name.as_deref(),
                submission.last_name.as_deref(),
            ]
        } else {
            vec![submission.name.as_deref()]
        };

        let min = self.policy.min_name_length;
        let max = self.policy.max_name_length;
        let valid = parts.into_iter().all(|part| {
            part.map(|value| value.trim().chars().count())
                .is_some_and(|len| (min..=max).contains(&len))
        });

        if valid {
            Ok(())
        } else {
            Err(ValidationError::InvalidName { min, max })
        }
    }

    fn validate_address(&self, address: Option<&str>) -> Result<(), ValidationError> {
        let max = self.policy.max_address_length;
        match address {
            Some(value) if value.chars().count() > max => {
                Err(ValidationError::InvalidAddress { max })
            }
            _ => Ok(()),
        }
    }
}

impl SubmissionValidator for CandidateValidator {
    fn validate(&self, submission: &CandidateSubmission) -> Result<(), ValidationError> {
        self.validate_name(submission)?;
        validate_email(submission.email.as_deref())?;
        validate_phone(submission.phone.as_deref())?;
        self.validate_address(submission.address.as_deref())?;

        for (index, education) in submission.educations().iter().enumerate() {
            validate_education(index, education)?;
        }

        for (index, experience) in submission.work_experiences().iter().enumerate() {
            validate_work_experience(index, experience)?;
        }

        if let Some(cv) = &submission.cv {
            validate_cv(cv)?;
        }

        Ok(())
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[679]\d{8}$").expect("phone pattern"))
}

fn validate_email(email: Option<&str>) -> Result<(), ValidationError> {
    match email {
        Some(value) if email_pattern().is_match(value.trim()) => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

fn validate_phone(phone: Option<&str>) -> Result<(), ValidationError> {
    match phone.map(str::trim) {
        None | Some("") => Ok(()),
        Some(value) if phone_pattern().is_match(value) => Ok(()),
        Some(_) => Err(ValidationError::InvalidPhone),
    }
}

fn validate_education(index: usize, education: &EducationEntry) -> Result<(), ValidationError> {
    if is_blank(education.institution.as_deref()) {
        return Err(ValidationError::InvalidInstitution { index });
    }

    let prefix = format!("educations[{index}]");
    required_date(&prefix, "startDate", education.start_date.as_deref())?;
    optional_date(&prefix, "endDate", education.end_date.as_deref())?;
    Ok(())
}

fn validate_work_experience(
    index: usize,
    experience: &WorkExperienceEntry,
) -> Result<(), ValidationError> {
    if is_blank(experience.company.as_deref()) {
        return Err(ValidationError::InvalidCompany { index });
    }

    let prefix = format!("workExperiences[{index}]");
    required_date(&prefix, "startDate", experience.start_date.as_deref())?;
    optional_date(&prefix, "endDate", experience.end_date.as_deref())?;
    Ok(())
}

fn validate_cv(cv: &ResumeAttachment) -> Result<(), ValidationError> {
    if cv.location().is_empty() || cv.file_type().is_empty() {
        return Err(ValidationError::InvalidCv);
    }
    Ok(())
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |value| value.trim().is_empty())
}

fn required_date(
    prefix: &str,
    name: &str,
    raw: Option<&str>,
) -> Result<NaiveDate, ValidationError> {
    let raw = raw.unwrap_or_default();
    parse_date(raw).ok_or_else(|| ValidationError::InvalidDate {
        field: format!("{prefix}.{name}"),
        value: raw.to_string(),
    })
}

/// An absent or blank end date means the period is still open.
fn optional_date(
    prefix: &str,
    name: &str,
    raw: Option<&str>,
) -> Result<Option<NaiveDate>, ValidationError> {
    if is_blank(raw) {
        return Ok(None);
    }
    required_date(prefix, name, raw).map(Some)
}
