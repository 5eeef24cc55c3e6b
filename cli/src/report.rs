use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use workload_core::{TrainerSummary, TrainerWorkloadResponse};

#[derive(Tabled)]
struct ResponseRow {
    #[tabled(rename = "Trainer")]
    trainer: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Hours")]
    hours: String,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Trainer")]
    trainer: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Hours")]
    hours: String,
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

pub fn responses_table(responses: &[TrainerWorkloadResponse]) -> String {
    let rows = responses.iter().map(|r| ResponseRow {
        trainer: r.trainer_username.clone(),
        year: r.year.clone(),
        month: r.month.clone(),
        hours: format!("{:.2}", r.working_hours),
    });
    styled(Table::new(rows))
}

pub fn summaries_table(summaries: &[TrainerSummary]) -> String {
    let mut rows = Vec::new();

    for summary in summaries {
        let name = format!("{} {}", summary.trainer_first_name, summary.trainer_last_name)
            .trim()
            .to_string();

        // Trainer columns only on the first row of each group
        for (i, entry) in summary.entries.iter().enumerate() {
            let first = i == 0;
            rows.push(SummaryRow {
                trainer: if first { summary.trainer_username.clone() } else { String::new() },
                name: if first { name.clone() } else { String::new() },
                active: if first { summary.is_active.to_string() } else { String::new() },
                year: entry.year.clone(),
                month: entry.month.clone(),
                hours: format!("{:.2}", entry.working_hours),
            });
        }
    }

    styled(Table::new(rows))
}
