use dashmap::DashMap;
use tracing::debug;

use crate::config::MonthKeyStyle;
use crate::error::{WorkloadError, WorkloadResult};
use crate::model::{BucketTotal, SessionEvent, TrainerWorkload};
use crate::repository::traits::WorkloadRepository;
use crate::time::{month_key, year_key};

/// Concurrent in-memory store of trainer workloads.
///
/// Each update holds the write lock of the trainer's shard for the whole
/// read-modify-write, so two sessions for the same trainer never lose an
/// update while trainers on other shards proceed in parallel. Nothing is
/// ever evicted.
#[derive(Debug, Default)]
pub struct InMemoryWorkloadStore {
    trainers: DashMap<String, TrainerWorkload>,
    month_key: MonthKeyStyle,
}

impl InMemoryWorkloadStore {
    pub fn new(month_key: MonthKeyStyle) -> Self {
        Self {
            trainers: DashMap::new(),
            month_key,
        }
    }

    pub fn len(&self) -> usize {
        self.trainers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trainers.is_empty()
    }
}

impl WorkloadRepository for InMemoryWorkloadStore {
    fn record(&self, event: &SessionEvent) -> BucketTotal {
        let year = year_key(event.session_date);
        let month = month_key(event.session_date, self.month_key);
        let delta = event.delta_hours();

        // Descriptive fields are captured on creation only
        let mut trainer = self
            .trainers
            .entry(event.username.clone())
            .or_insert_with(|| {
                debug!(username = %event.username, "creating trainer record");
                TrainerWorkload::new(
                    event.username.clone(),
                    event.first_name.clone(),
                    event.last_name.clone(),
                    event.active,
                )
            });
        let hours = trainer.apply(&year, &month, delta);

        BucketTotal { year, month, hours }
    }

    fn hours(&self, username: &str, year: &str, month: &str) -> WorkloadResult<f64> {
        let trainer = self
            .trainers
            .get(username)
            .ok_or_else(|| WorkloadError::TrainerNotFound(username.to_string()))?;

        trainer
            .hours(year, month)
            .ok_or_else(|| WorkloadError::PeriodNotFound {
                username: username.to_string(),
                year: year.to_string(),
                month: month.to_string(),
            })
    }

    fn get(&self, username: &str) -> WorkloadResult<TrainerWorkload> {
        self.trainers
            .get(username)
            .map(|t| t.value().clone())
            .ok_or_else(|| WorkloadError::TrainerNotFound(username.to_string()))
    }

    fn usernames(&self) -> Vec<String> {
        let mut names: Vec<String> = self.trainers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}
