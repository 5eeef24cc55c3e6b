use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Context, Result};
use workload_core::{
    expand_metadata, parse_bool, parse_duration, parse_line, parse_training_date, ActionType,
    ParsedInput, TrainerWorkloadRequest, WorkingHoursQuery, WorkloadRepository, WorkloadService,
    RECORD_KEYS,
};

use crate::report;
use crate::transaction;

const HELP: &str = "\
Commands:
  record <user> date:<date> duration:<90|90m|2h> [action:add|delete] [active:true|false] [first:<name>] [last:<name>]
  hours <user> <year> <month>
  show <user>
  list
  help
  quit";

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Print(String),
    Quit,
}

fn parse_action(value: &str) -> Result<ActionType> {
    match value.to_lowercase().as_str() {
        "add" | "a" => Ok(ActionType::Add),
        "delete" | "del" | "d" => Ok(ActionType::Delete),
        _ => Err(anyhow!("Unknown action: '{}'", value)),
    }
}

pub fn build_request(parsed: &ParsedInput) -> Result<TrainerWorkloadRequest> {
    let username = parsed
        .word(1)
        .ok_or_else(|| anyhow!("Trainer username is required"))?;
    let meta = expand_metadata(parsed, RECORD_KEYS)?;

    let date = meta.get("date").ok_or_else(|| anyhow!("date:<date> is required"))?;
    let duration = meta
        .get("duration")
        .ok_or_else(|| anyhow!("duration:<duration> is required"))?;

    let action = match meta.get("action") {
        Some(a) => parse_action(a)?,
        None => ActionType::default(),
    };
    let is_active = match meta.get("active") {
        Some(a) => parse_bool(a)?,
        None => true,
    };

    Ok(TrainerWorkloadRequest {
        trainer_username: username.to_string(),
        trainer_first_name: meta.get("first").cloned().unwrap_or_default(),
        trainer_last_name: meta.get("last").cloned().unwrap_or_default(),
        is_active,
        training_date: parse_training_date(date)?,
        training_duration: parse_duration(duration)
            .with_context(|| format!("Invalid duration '{}'", duration))?
            .num_minutes(),
        action_type: action,
    })
}

pub fn execute<R: WorkloadRepository>(service: &WorkloadService<R>, line: &str) -> Result<Outcome> {
    let parsed = parse_line(line);

    let out = match parsed.word(0) {
        None => String::new(),
        Some("record") => {
            let request = build_request(&parsed)?;
            let response = transaction::run("record_session", || service.record_session(request))?;
            format!(
                "{} {} {}: {:.2}h",
                response.trainer_username, response.year, response.month, response.working_hours
            )
        }
        Some("hours") => {
            let query = WorkingHoursQuery {
                trainer_username: parsed.word(1).map(str::to_string),
                year: parsed.word(2).map(str::to_string),
                month: parsed.word(3).map(str::to_string),
            };
            let response = transaction::run("get_working_hours", || service.get_working_hours(&query))?;
            format!("{:.2}", response.working_hours)
        }
        Some("show") => {
            let username = parsed
                .word(1)
                .ok_or_else(|| anyhow!("Trainer username is required"))?;
            let summary = transaction::run("trainer_summary", || service.trainer_summary(username))?;
            report::summaries_table(&[summary])
        }
        Some("list") => {
            let names = service.repository().usernames();
            if names.is_empty() {
                "No trainers recorded.".to_string()
            } else {
                names.join("\n")
            }
        }
        Some("help") => HELP.to_string(),
        Some("quit") | Some("exit") => return Ok(Outcome::Quit),
        Some(other) => return Err(anyhow!("Unknown command: '{}' (try 'help')", other)),
    };
    Ok(Outcome::Print(out))
}

fn read_command(raw: Vec<u8>) -> Result<String> {
    String::from_utf8(raw).map_err(|_| anyhow!("Input is not valid UTF-8"))
}

pub fn run<R: WorkloadRepository>(service: &WorkloadService<R>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Trainer workload shell. Type 'help' for commands.");
    loop {
        print!("> ");
        stdout.flush()?;

        let mut raw = Vec::new();
        if stdin.lock().read_until(b'\n', &mut raw)? == 0 {
            break;
        }

        match read_command(raw).and_then(|line| execute(service, &line)) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Print(out)) if out.is_empty() => {}
            Ok(Outcome::Print(out)) => println!("{}", out),
            Err(e) => println!("Error: {}", e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use workload_core::InMemoryWorkloadStore;

    #[test]
    fn test_build_request_with_prefixes() {
        let parsed = parse_line("record bob.wilson da:2024-04-15 dur:1h actio:del first:Bob");
        let request = build_request(&parsed).unwrap();

        assert_eq!(request.trainer_username, "bob.wilson");
        assert_eq!(request.training_date, NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());
        assert_eq!(request.training_duration, 60);
        assert_eq!(request.action_type, ActionType::Delete);
        assert!(request.is_active);
        assert_eq!(request.trainer_first_name, "Bob");
        assert_eq!(request.trainer_last_name, "");
    }

    #[test]
    fn test_build_request_requires_date_and_duration() {
        assert!(build_request(&parse_line("record a duration:60")).is_err());
        assert!(build_request(&parse_line("record a date:2024-01-01")).is_err());
        assert!(build_request(&parse_line("record date:2024-01-01 duration:60")).is_err());
        assert!(build_request(&parse_line("record a date:2024-01-01 duration:60")).is_ok());
    }

    #[test]
    fn test_session_commands() {
        let service = WorkloadService::new(InMemoryWorkloadStore::default());

        let out = execute(&service, "record alice.brown date:2024-05-05 duration:2h").unwrap();
        assert_eq!(out, Outcome::Print("alice.brown 2024 MAY: 2.00h".to_string()));

        let out = execute(&service, "record alice.brown date:2024-05-10 duration:60 active:false").unwrap();
        assert_eq!(out, Outcome::Print("alice.brown 2024 MAY: 1.00h".to_string()));

        let out = execute(&service, "hours alice.brown 2024 MAY").unwrap();
        assert_eq!(out, Outcome::Print("1.00".to_string()));

        assert!(execute(&service, "hours alice.brown 2024 JUNE").is_err());
        assert!(execute(&service, "hours alice.brown 2024").is_err());

        let out = execute(&service, "list").unwrap();
        assert_eq!(out, Outcome::Print("alice.brown".to_string()));

        assert_eq!(execute(&service, "quit").unwrap(), Outcome::Quit);
        assert!(execute(&service, "frobnicate").is_err());
    }

    #[test]
    fn test_bad_duration_is_an_error() {
        let service = WorkloadService::new(InMemoryWorkloadStore::default());

        assert!(execute(&service, "record a date:2024-03-15 duration:2é").is_err());
        assert!(execute(&service, "record a date:2024-03-15 duration:9999999999999999h").is_err());
        assert_eq!(execute(&service, "list").unwrap(), Outcome::Print("No trainers recorded.".to_string()));
    }

    #[test]
    fn test_read_command_rejects_invalid_utf8() {
        assert!(read_command(b"list\xff\n".to_vec()).is_err());
        assert_eq!(read_command(b"list\n".to_vec()).unwrap(), "list\n");
    }
}
