use std::io::{BufRead, Write};

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use workload_core::{
    TrainerWorkloadRequest, TrainerWorkloadResponse, WorkingHoursQuery, WorkloadError,
    WorkloadRepository, WorkloadService,
};

use crate::transaction;

// A line carrying any of these fields is a session event; otherwise a query.
const WRITE_MARKERS: &[&str] = &["actionType", "trainingDate", "trainingDuration"];

#[derive(Debug, PartialEq)]
pub enum Envelope {
    Write(TrainerWorkloadRequest),
    Read(WorkingHoursQuery),
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ErrorLine {
    pub status: &'static str,
    pub message: String,
}

impl ErrorLine {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: "BAD_REQUEST",
            message: message.into(),
        }
    }
}

impl From<WorkloadError> for ErrorLine {
    fn from(e: WorkloadError) -> Self {
        let status = if e.is_not_found() { "NOT_FOUND" } else { "BAD_REQUEST" };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

pub fn parse_envelope(line: &str) -> Result<Envelope, ErrorLine> {
    let value: Value = serde_json::from_str(line)
        .map_err(|e| ErrorLine::bad_request(format!("Malformed JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| ErrorLine::bad_request("Expected a JSON object"))?;

    if WRITE_MARKERS.iter().any(|k| object.contains_key(*k)) {
        serde_json::from_value(value)
            .map(Envelope::Write)
            .map_err(|e| ErrorLine::bad_request(format!("Invalid session event: {}", e)))
    } else {
        serde_json::from_value(value)
            .map(Envelope::Read)
            .map_err(|e| ErrorLine::bad_request(format!("Invalid query: {}", e)))
    }
}

fn dispatch<R: WorkloadRepository>(
    service: &WorkloadService<R>,
    line: &str,
) -> Result<TrainerWorkloadResponse, ErrorLine> {
    match parse_envelope(line)? {
        Envelope::Write(request) => transaction::run("record_session", || {
            service.record_session(request)
        })
        .map_err(ErrorLine::from),
        Envelope::Read(query) => transaction::run("get_working_hours", || {
            service.get_working_hours(&query)
        })
        .map_err(ErrorLine::from),
    }
}

/// Handles one NDJSON line and returns the JSON line to write back.
pub fn handle_line<R: WorkloadRepository>(service: &WorkloadService<R>, line: &str) -> Result<String> {
    let out = match dispatch(service, line) {
        Ok(response) => serde_json::to_string(&response)?,
        Err(error) => serde_json::to_string(&error)?,
    };
    Ok(out)
}

pub fn run<R, I, O>(service: &WorkloadService<R>, input: I, mut output: O) -> Result<()>
where
    R: WorkloadRepository,
    I: BufRead,
    O: Write,
{
    let mut handled = 0usize;
    for raw in input.split(b'\n') {
        let raw = raw?;
        let out = match String::from_utf8(raw) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handle_line(service, &line)?,
            Err(_) => serde_json::to_string(&ErrorLine::bad_request("Invalid UTF-8"))?,
        };
        writeln!(output, "{}", out)?;
        output.flush()?;
        handled += 1;
    }
    debug!(handled, "input stream closed");
    Ok(())
}
