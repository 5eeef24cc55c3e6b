use std::fmt::Display;

use tracing::{info, info_span, warn};
use uuid::Uuid;

/// Runs one adapter request inside a span tagged with a fresh transaction id.
pub fn run<T, E, F>(operation: &str, f: F) -> Result<T, E>
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    let transaction_id = Uuid::new_v4();
    let span = info_span!("transaction", %transaction_id, operation);
    let _guard = span.enter();

    info!("transaction start");
    let result = f();
    match &result {
        Ok(_) => info!(status = "ok", "transaction end"),
        Err(e) => warn!(status = "error", error = %e, "transaction end"),
    }
    result
}
