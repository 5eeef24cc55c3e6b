use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionType {
    Add,
    Delete,
}

impl Default for ActionType {
    fn default() -> Self {
        ActionType::Add
    }
}

/// A single training session, already normalized to a calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEvent {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
    pub session_date: NaiveDate,
    pub duration_minutes: i64,
    pub action: ActionType,
}

impl SessionEvent {
    /// Signed contribution of this session in hours.
    ///
    /// Inactive trainers always subtract, whatever the stated action.
    pub fn delta_hours(&self) -> f64 {
        let raw = self.duration_minutes as f64 / 60.0;
        if self.action == ActionType::Delete || !self.active {
            -raw
        } else {
            raw
        }
    }
}
