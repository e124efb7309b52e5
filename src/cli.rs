use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
};

use anyhow::Context;
use chrono::{Local, NaiveDate};

use weekplan::{
    schedule::{WeekId, WeekSnapshot},
    storage::{config::Config, SqliteWeekStore, WeekStore},
};

const USAGE: &str = "Usage: weekplan [--week [YYYY-MM-DD]]";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CliMode {
    Interactive,
    Week(NaiveDate),
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1), Local::now().date_naive())
}

fn parse_args(args: impl IntoIterator<Item = String>, today: NaiveDate) -> Result<CliMode, String> {
    let mut mode = CliMode::Interactive;
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--week" => {
                let date = match args.next_if(|next| !next.starts_with("--")) {
                    Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                        .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD.", date_str))?,
                    None => today,
                };
                mode = CliMode::Week(date);
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(mode)
}

pub fn usage() -> &'static str {
    USAGE
}

/// Prints the stored week containing `date`. Never creates a week.
pub async fn run_week_mode(config: &Config, date: NaiveDate) -> anyhow::Result<()> {
    let week_id = WeekId::for_date(date);
    let store = SqliteWeekStore::shared(&config.storage.database_path);

    let snapshot = store
        .get(&week_id)
        .await
        .with_context(|| format!("Failed to read week {}", week_id))?;

    let text = format_week_text(
        &week_id,
        snapshot.as_ref(),
        Local::now().timestamp_millis(),
        config.recency_window_ms(),
    );
    display_with_pager(&text).context("Failed to display week")
}

fn format_week_text(
    week_id: &WeekId,
    snapshot: Option<&WeekSnapshot>,
    now_ms: i64,
    window_ms: i64,
) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Week of {}", week_id));
    lines.push(String::new());

    let Some(snapshot) = snapshot else {
        lines.push("No schedule stored for this week.".to_string());
        return lines.join("\n");
    };

    for day in &snapshot.days {
        lines.push(format!("{} {}", day.day_of_week, day.date));
        if day.events.is_empty() {
            lines.push("  (no events)".to_string());
        }
        for event in &day.events {
            let badge = if event.is_recently_changed(now_ms, window_ms) { " [NEW]" } else { "" };
            let online = if event.is_online() { " (online)" } else { "" };
            lines.push(format!("- {:<13} {}{}", event.time, event.content, badge));
            lines.push(format!("    @ {}{}", event.location, online));
            lines.push(format!("    Host: {} | Participants: {}", event.host, event.participants));
            if !event.preparation.is_empty() {
                lines.push(format!("    Preparation: {}", event.preparation));
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            print!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            print!("{text}");
        }
    }

    Ok(())
}
