use std::path::{Path, PathBuf};

use candidate_intake::config::AppConfig;
use candidate_intake::error::AppError;
use candidate_intake::intake::{
    CandidateSubmission, CandidateValidator, IntakeError, SubmissionValidator, ValidationPolicy,
};
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Path to a candidate submission JSON document
    pub(crate) path: PathBuf,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let validator = CandidateValidator::with_policy(ValidationPolicy::from(&config.intake));
    let submission = check_file(&validator, &args.path)?;

    println!(
        "{}: valid ({} education, {} work experience, cv {})",
        args.path.display(),
        submission.educations().len(),
        submission.work_experiences().len(),
        if submission.cv.is_some() {
            "attached"
        } else {
            "missing"
        }
    );
    Ok(())
}

pub(crate) fn check_file(
    validator: &dyn SubmissionValidator,
    path: &Path,
) -> Result<CandidateSubmission, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let submission: CandidateSubmission = serde_json::from_str(&raw)?;
    validator
        .validate(&submission)
        .map_err(IntakeError::from)?;
    Ok(submission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use candidate_intake::intake::ValidationError;
    use std::io::Write;

    fn write_payload(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "candidate-intake-{}-{name}.json",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).expect("temp file");
        file.write_all(contents.as_bytes()).expect("write payload");
        path
    }

    #[test]
    fn accepts_valid_file() {
        let path = write_payload(
            "valid",
            r#"{"name": "John Doe", "email": "john.doe@example.com", "phone": "612345678"}"#,
        );
        let submission =
            check_file(&CandidateValidator::default(), &path).expect("submission accepted");
        assert_eq!(submission.phone.as_deref(), Some("612345678"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn reports_first_violated_rule() {
        let path = write_payload(
            "invalid",
            r#"{"name": "John Doe", "email": "john.doe@example.com", "phone": "12345"}"#,
        );
        match check_file(&CandidateValidator::default(), &path) {
            Err(AppError::Intake(IntakeError::Validation(ValidationError::InvalidPhone))) => {}
            other => panic!("expected invalid phone, got {other:?}"),
        }
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn reports_malformed_json() {
        let path = write_payload("malformed", "{ not json");
        assert!(matches!(
            check_file(&CandidateValidator::default(), &path),
            Err(AppError::Payload(_))
        ));
        std::fs::remove_file(path).ok();
    }
}
