use serde::{Deserialize, Deserializer, Serialize};
use chrono::NaiveDate;
use crate::error::{WorkloadError, WorkloadResult};
use crate::model::{ActionType, SessionEvent, TrainerWorkload};
use crate::time::parse_training_date;

/// Session event as sent by the scheduling system.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainerWorkloadRequest {
    pub trainer_username: String,
    #[serde(default)]
    pub trainer_first_name: String,
    #[serde(default)]
    pub trainer_last_name: String,
    pub is_active: bool,
    #[serde(deserialize_with = "deserialize_training_date")]
    pub training_date: NaiveDate,
    /// In minutes.
    pub training_duration: i64,
    pub action_type: ActionType,
}

impl TrainerWorkloadRequest {
    pub fn into_event(self) -> WorkloadResult<SessionEvent> {
        if self.trainer_username.trim().is_empty() {
            return Err(WorkloadError::MissingParameter("trainerUsername"));
        }

        Ok(SessionEvent {
            username: self.trainer_username,
            first_name: self.trainer_first_name,
            last_name: self.trainer_last_name,
            active: self.is_active,
            session_date: self.training_date,
            duration_minutes: self.training_duration,
            action: self.action_type,
        })
    }
}

fn deserialize_training_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_training_date(&raw).map_err(serde::de::Error::custom)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainerWorkloadResponse {
    pub trainer_username: String,
    pub year: String,
    pub month: String,
    pub working_hours: f64,
}

/// Read query. Every field is optional on the wire so that a missing one is
/// reported as a validation error instead of a decoding error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursQuery {
    pub trainer_username: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

impl WorkingHoursQuery {
    pub fn new(username: &str, year: &str, month: &str) -> Self {
        Self {
            trainer_username: Some(username.to_string()),
            year: Some(year.to_string()),
            month: Some(month.to_string()),
        }
    }

    /// Returns `(username, year, month)` once all three are present.
    pub fn validate(&self) -> WorkloadResult<(&str, &str, &str)> {
        let username = required(&self.trainer_username, "trainerUsername")?;
        let year = required(&self.year, "year")?;
        let month = required(&self.month, "month")?;
        Ok((username, year, month))
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> WorkloadResult<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(WorkloadError::MissingParameter(name)),
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursEntry {
    pub year: String,
    pub month: String,
    pub working_hours: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSummary {
    pub trainer_username: String,
    pub trainer_first_name: String,
    pub trainer_last_name: String,
    pub is_active: bool,
    pub entries: Vec<WorkingHoursEntry>,
}

impl TrainerSummary {
    pub fn from_entity(trainer: TrainerWorkload) -> Self {
        let entries = trainer
            .years
            .iter()
            .flat_map(|y| {
                y.months.iter().map(move |m| WorkingHoursEntry {
                    year: y.year.clone(),
                    month: m.month.clone(),
                    working_hours: m.hours,
                })
            })
            .collect();

        Self {
            trainer_username: trainer.username,
            trainer_first_name: trainer.first_name,
            trainer_last_name: trainer.last_name,
            is_active: trainer.active,
            entries,
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.entries.iter().map(|e| e.working_hours).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_wire_json() {
        let json = r#"{
            "trainerUsername": "john.doe",
            "trainerFirstName": "John",
            "trainerLastName": "Doe",
            "isActive": true,
            "trainingDate": "2024-03-15",
            "trainingDuration": 120,
            "actionType": "ADD"
        }"#;
        let request: TrainerWorkloadRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.trainer_username, "john.doe");
        assert_eq!(request.training_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(request.training_duration, 120);
        assert_eq!(request.action_type, ActionType::Add);
    }

    #[test]
    fn test_request_rejects_unknown_action() {
        let json = r#"{"trainerUsername":"a","isActive":true,"trainingDate":"2024-03-15","trainingDuration":1,"actionType":"MOVE"}"#;
        assert!(serde_json::from_str::<TrainerWorkloadRequest>(json).is_err());
    }

    #[test]
    fn test_request_rejects_bad_date() {
        let json = r#"{"trainerUsername":"a","isActive":true,"trainingDate":"yesterday","trainingDuration":1,"actionType":"ADD"}"#;
        assert!(serde_json::from_str::<TrainerWorkloadRequest>(json).is_err());
    }

    #[test]
    fn test_empty_username_is_missing_parameter() {
        let json = r#"{"trainerUsername":" ","isActive":true,"trainingDate":"2024-03-15","trainingDuration":1,"actionType":"ADD"}"#;
        let request: TrainerWorkloadRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.into_event().unwrap_err(),
            WorkloadError::MissingParameter("trainerUsername")
        );
    }

    #[test]
    fn test_response_wire_names() {
        let response = TrainerWorkloadResponse {
            trainer_username: "john.doe".to_string(),
            year: "2024".to_string(),
            month: "MARCH".to_string(),
            working_hours: 2.0,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["trainerUsername"], "john.doe");
        assert_eq!(value["workingHours"], 2.0);
    }

    #[test]
    fn test_query_validation() {
        assert!(WorkingHoursQuery::new("a", "2024", "MARCH").validate().is_ok());

        let query = WorkingHoursQuery {
            trainer_username: Some("a".to_string()),
            year: None,
            month: Some("MARCH".to_string()),
        };
        assert_eq!(query.validate().unwrap_err(), WorkloadError::MissingParameter("year"));

        let query = WorkingHoursQuery::new("a", "2024", "");
        assert_eq!(query.validate().unwrap_err(), WorkloadError::MissingParameter("month"));
    }

    #[test]
    fn test_summary_flattens_in_first_seen_order() {
        let mut trainer = TrainerWorkload::new("t".to_string(), "T".to_string(), "R".to_string(), true);
        trainer.apply("2024", "MAY", 1.0);
        trainer.apply("2023", "DECEMBER", 2.0);
        trainer.apply("2024", "JANUARY", 0.5);

        let summary = TrainerSummary::from_entity(trainer);
        let keys: Vec<(&str, &str)> = summary
            .entries
            .iter()
            .map(|e| (e.year.as_str(), e.month.as_str()))
            .collect();
        assert_eq!(keys, vec![("2024", "MAY"), ("2024", "JANUARY"), ("2023", "DECEMBER")]);
        assert_eq!(summary.total_hours(), 3.5);
    }
}
