use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use workload_core::{
    TrainerWorkloadRequest, TrainerWorkloadResponse, WorkloadRepository, WorkloadService,
};

use crate::report;
use crate::transaction;

pub fn read_requests(path: &Path) -> Result<Vec<TrainerWorkloadRequest>> {
    let file = File::open(path)
        .with_context(|| format!("Could not open events file {}", path.display()))?;
    let reader = BufReader::new(file);
    let requests = serde_json::from_reader(reader)
        .with_context(|| format!("Invalid events file {}", path.display()))?;
    Ok(requests)
}

/// Applies every request in order. Rejected requests are logged and skipped.
pub fn apply_all<R: WorkloadRepository>(
    service: &WorkloadService<R>,
    requests: Vec<TrainerWorkloadRequest>,
) -> Vec<TrainerWorkloadResponse> {
    let mut responses = Vec::with_capacity(requests.len());

    for (index, request) in requests.into_iter().enumerate() {
        match transaction::run("record_session", || service.record_session(request)) {
            Ok(response) => responses.push(response),
            Err(e) => warn!(index, error = %e, "skipping rejected event"),
        }
    }
    responses
}

pub fn run<R: WorkloadRepository>(service: &WorkloadService<R>, path: &Path) -> Result<()> {
    let requests = read_requests(path)?;
    let total = requests.len();
    info!(total, path = %path.display(), "replaying events");

    let responses = apply_all(service, requests);
    if responses.is_empty() {
        println!("No events applied.");
        return Ok(());
    }

    println!("Applied {} of {} events", responses.len(), total);
    println!("{}", report::responses_table(&responses));

    let summaries = service.summaries()?;
    println!("\n\x1b[1;36mMonthly totals\x1b[0m");
    println!("{}", report::summaries_table(&summaries));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use workload_core::InMemoryWorkloadStore;

    #[test]
    fn test_replay_file_applies_events_in_order() {
        let path = std::env::temp_dir().join(format!("workload-events-{}.json", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            write!(
                file,
                r#"[
                {{"trainerUsername":"bob.wilson","trainerFirstName":"Bob","trainerLastName":"Wilson","isActive":true,"trainingDate":"2024-04-10","trainingDuration":180,"actionType":"ADD"}},
                {{"trainerUsername":"","isActive":true,"trainingDate":"2024-04-12","trainingDuration":30,"actionType":"ADD"}},
                {{"trainerUsername":"bob.wilson","trainerFirstName":"Bob","trainerLastName":"Wilson","isActive":true,"trainingDate":"2024-04-15","trainingDuration":60,"actionType":"DELETE"}}
            ]"#
            )
            .unwrap();
        }

        let requests = read_requests(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(requests.len(), 3);

        let service = WorkloadService::new(InMemoryWorkloadStore::default());
        let responses = apply_all(&service, requests);

        // The event with an empty username is rejected
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].working_hours, 3.0);
        assert_eq!(responses[1].working_hours, 2.0);
        assert_eq!(responses[1].month, "APRIL");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("workload-events-does-not-exist.json");
        assert!(read_requests(&path).is_err());
    }
}
