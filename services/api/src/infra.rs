use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use candidate_intake::config::IntakeConfig;
use candidate_intake::intake::{
    CandidateIntakeService, InMemoryIntakeStore, IntakeRepositories, ValidationPolicy,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Intake service backed by the process-local store.
pub(crate) fn in_memory_service(config: &IntakeConfig) -> Arc<CandidateIntakeService> {
    let store = Arc::new(InMemoryIntakeStore::new());
    Arc::new(CandidateIntakeService::new(
        IntakeRepositories::from_store(store),
        ValidationPolicy::from(config),
    ))
}
