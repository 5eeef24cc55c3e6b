use std::sync::Arc;

use crate::error::WorkloadResult;
use crate::model::{BucketTotal, SessionEvent, TrainerWorkload};

pub trait WorkloadRepository {
    /// Applies one session to its trainer's (year, month) bucket atomically
    /// and returns the bucket's new total.
    fn record(&self, event: &SessionEvent) -> BucketTotal;
    fn hours(&self, username: &str, year: &str, month: &str) -> WorkloadResult<f64>;
    fn get(&self, username: &str) -> WorkloadResult<TrainerWorkload>;
    fn usernames(&self) -> Vec<String>;
}

impl<T: WorkloadRepository + ?Sized> WorkloadRepository for Arc<T> {
    fn record(&self, event: &SessionEvent) -> BucketTotal {
        (**self).record(event)
    }

    fn hours(&self, username: &str, year: &str, month: &str) -> WorkloadResult<f64> {
        (**self).hours(username, year, month)
    }

    fn get(&self, username: &str) -> WorkloadResult<TrainerWorkload> {
        (**self).get(username)
    }

    fn usernames(&self) -> Vec<String> {
        (**self).usernames()
    }
}
