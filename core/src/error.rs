use thiserror::Error;

/// Errors raised by the workload store and service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkloadError {
    #[error("Trainer not found: {0}")]
    TrainerNotFound(String),

    #[error("No data found for year {year} and month {month} (trainer {username})")]
    PeriodNotFound {
        username: String,
        year: String,
        month: String,
    },

    /// A required request parameter was absent or empty.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

impl WorkloadError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WorkloadError::TrainerNotFound(_) | WorkloadError::PeriodNotFound { .. }
        )
    }
}

pub type WorkloadResult<T> = Result<T, WorkloadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(WorkloadError::TrainerNotFound("x".to_string()).is_not_found());
        assert!(WorkloadError::PeriodNotFound {
            username: "x".to_string(),
            year: "2024".to_string(),
            month: "APRIL".to_string(),
        }
        .is_not_found());
        assert!(!WorkloadError::MissingParameter("year").is_not_found());
    }

    #[test]
    fn test_period_message_names_year_and_month() {
        let err = WorkloadError::PeriodNotFound {
            username: "grace.martinez".to_string(),
            year: "2024".to_string(),
            month: "APRIL".to_string(),
        };
        assert!(err.to_string().contains("No data found for year 2024 and month APRIL"));
    }
}
