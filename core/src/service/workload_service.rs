use crate::error::WorkloadResult;
use crate::repository::WorkloadRepository;
use crate::service::dto::{
    TrainerSummary, TrainerWorkloadRequest, TrainerWorkloadResponse, WorkingHoursQuery,
};
use tracing::{info, instrument};

pub struct WorkloadService<R: WorkloadRepository> {
    repo: R,
}

impl<R: WorkloadRepository> WorkloadService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    #[instrument(skip_all, fields(trainer = %request.trainer_username))]
    pub fn record_session(&self, request: TrainerWorkloadRequest) -> WorkloadResult<TrainerWorkloadResponse> {
        info!(?request, "operation started: record_session");

        let event = request.into_event()?;
        let total = self.repo.record(&event);

        let response = TrainerWorkloadResponse {
            trainer_username: event.username,
            year: total.year,
            month: total.month,
            working_hours: total.hours,
        };
        info!(?response, "operation finished: record_session");
        Ok(response)
    }

    #[instrument(skip_all)]
    pub fn get_working_hours(&self, query: &WorkingHoursQuery) -> WorkloadResult<TrainerWorkloadResponse> {
        info!(?query, "operation started: get_working_hours");

        let (username, year, month) = query.validate()?;
        let hours = self.repo.hours(username, year, month)?;

        let response = TrainerWorkloadResponse {
            trainer_username: username.to_string(),
            year: year.to_string(),
            month: month.to_string(),
            working_hours: hours,
        };
        info!(?response, "operation finished: get_working_hours");
        Ok(response)
    }

    #[instrument(skip(self))]
    pub fn trainer_summary(&self, username: &str) -> WorkloadResult<TrainerSummary> {
        let trainer = self.repo.get(username)?;
        Ok(TrainerSummary::from_entity(trainer))
    }

    pub fn summaries(&self) -> WorkloadResult<Vec<TrainerSummary>> {
        self.repo
            .usernames()
            .iter()
            .map(|u| self.trainer_summary(u))
            .collect()
    }
}
