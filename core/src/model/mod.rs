pub mod session;
pub mod workload;

pub use session::{ActionType, SessionEvent};
pub use workload::{BucketTotal, MonthBucket, TrainerWorkload, YearBucket};
