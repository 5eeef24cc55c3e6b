pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use config::{MonthKeyStyle, WorkloadConfig};
pub use error::{WorkloadError, WorkloadResult};
pub use model::{ActionType, BucketTotal, SessionEvent, TrainerWorkload};
pub use repository::{InMemoryWorkloadStore, WorkloadRepository};
pub use input::{parse_line, expand_key, expand_metadata, parse_bool, ParsedInput, RECORD_KEYS};
pub use time::{parse_duration, parse_training_date};
pub use service::workload_service::WorkloadService;
pub use service::dto::{
    TrainerSummary, TrainerWorkloadRequest, TrainerWorkloadResponse, WorkingHoursEntry,
    WorkingHoursQuery,
};
