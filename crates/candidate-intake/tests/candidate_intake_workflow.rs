use std::sync::Arc;

use candidate_intake::config::IntakeConfig;
use candidate_intake::intake::{
    CandidateId, CandidateIntakeService, CandidateRepository, CandidateSubmission,
    InMemoryIntakeStore, IntakeError, IntakeRepositories, ValidationPolicy,
};
use chrono::NaiveDate;
use serde_json::json;

fn service_with_store() -> (CandidateIntakeService, Arc<InMemoryIntakeStore>) {
    let store = Arc::new(InMemoryIntakeStore::new());
    let policy = ValidationPolicy::from(&IntakeConfig::default());
    let service =
        CandidateIntakeService::new(IntakeRepositories::from_store(store.clone()), policy);
    (service, store)
}

fn submission(payload: serde_json::Value) -> CandidateSubmission {
    serde_json::from_value(payload).expect("payload deserializes")
}

#[tokio::test]
async fn intake_persists_the_whole_aggregate() {
    let (service, _) = service_with_store();
    let candidate = submission(json!({
        "name": "John Doe",
        "email": "john.doe@example.com",
        "phone": "612345678",
        "address": "123 Main St",
        "educations": [
            {
                "institution": "University",
                "title": "BSc",
                "startDate": "2014-09-01",
                "endDate": "2018-06-30"
            },
            { "institution": "Business School", "title": "MBA", "startDate": "2019-09-01" }
        ],
        "workExperiences": [
            {
                "company": "Company",
                "position": "Developer",
                "startDate": "2018-07-01T00:00:00Z",
                "description": "Backend services"
            }
        ],
        "cv": {
            "fileName": "resume.pdf",
            "fileType": "application/pdf",
            "fileContent": "JVBERi0xLjQK"
        }
    }));

    let record = service
        .add_candidate(candidate)
        .await
        .expect("candidate stored");
    assert_eq!(record.first_name, "John");
    assert_eq!(record.last_name, "Doe");

    let profile = service
        .get_candidate(record.id)
        .await
        .expect("profile loads");

    assert_eq!(profile.candidate, record);
    assert_eq!(profile.educations.len(), 2);
    assert_eq!(profile.educations[0].institution, "University");
    assert_eq!(
        profile.educations[0].end_date,
        NaiveDate::from_ymd_opt(2018, 6, 30)
    );
    assert_eq!(profile.educations[1].end_date, None);
    assert_eq!(profile.work_experiences.len(), 1);
    assert_eq!(
        profile.work_experiences[0].start_date,
        NaiveDate::from_ymd_opt(2018, 7, 1)
    );
    assert_eq!(
        profile.work_experiences[0].description.as_deref(),
        Some("Backend services")
    );

    let resume = profile.resume.expect("resume stored");
    assert_eq!(resume.file_path, "resume.pdf");
    assert_eq!(resume.file_type, "application/pdf");
    assert_eq!(resume.candidate_id, record.id);
    assert!(profile
        .educations
        .iter()
        .all(|education| education.candidate_id == record.id));
}

#[tokio::test]
async fn duplicate_email_is_reported_and_not_stored_twice() {
    let (service, store) = service_with_store();
    let payload = json!({ "name": "Jane Doe", "email": "jane.doe@example.com" });

    let first = service
        .add_candidate(submission(payload.clone()))
        .await
        .expect("first intake");

    let err = service
        .add_candidate(submission(payload))
        .await
        .expect_err("second intake rejected");
    assert!(matches!(err, IntakeError::DuplicateEmail));
    assert_eq!(err.to_string(), "The email already exists in the database");

    assert!(store.find(first.id).await.expect("lookup").is_some());
    assert!(store
        .find(CandidateId(first.id.0 + 1))
        .await
        .expect("lookup")
        .is_none());
}

#[tokio::test]
async fn invalid_submissions_never_reach_storage() {
    let (service, store) = service_with_store();
    let err = service
        .add_candidate(submission(json!({
            "name": "John Doe",
            "email": "invalid-email"
        })))
        .await
        .expect_err("rejected");

    assert!(err.to_string().contains("Invalid email"));
    assert!(store.find(CandidateId(1)).await.expect("lookup").is_none());
}
