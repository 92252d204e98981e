//! `nexus-cli` — terminal query client for the data-plane read API.
//!
//! # Usage
//!
//! ```text
//! nexus-cli list
//! nexus-cli list --priority High
//! nexus-cli get 550e8400-e29b-41d4-a716-446655440000
//! nexus-cli health
//! ```
//!
//! The base URL comes from `API_URL` (default `http://localhost:8081`).
//! Exits 0 on success, 1 on any error including not-found.

mod client;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use nexus_domain::Signal;

use client::ApiClient;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";

#[derive(Parser, Debug)]
#[command(name = "nexus-cli", about = "Query client for the nexus data plane")]
struct Cli {
    /// Base URL of the data-plane read API.
    #[arg(long, env = "API_URL", default_value = "http://localhost:8081")]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List signals, newest first.
    List {
        /// Filter by priority (Low, Medium, High).
        #[arg(long)]
        priority: Option<String>,
    },
    /// Show a single signal by ID.
    Get {
        /// The signal ID.
        id: String,
    },
    /// Check data-plane health.
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url)?;

    match cli.command {
        Command::List { priority } => run_list(&client, priority.as_deref()).await,
        Command::Get { id } => run_get(&client, &id).await,
        Command::Health => run_health(&client).await,
    }
}

async fn run_list(client: &ApiClient, priority: Option<&str>) -> Result<()> {
    let signals = client.list_signals(priority).await?;
    if signals.is_empty() {
        println!("No signals found.");
        return Ok(());
    }
    print_signal_table(&signals);
    Ok(())
}

async fn run_get(client: &ApiClient, id: &str) -> Result<()> {
    match client.get_signal(id).await? {
        Some(signal) => {
            print_signal_detail(&signal);
            Ok(())
        }
        None => bail!("signal {id:?} not found"),
    }
}

async fn run_health(client: &ApiClient) -> Result<()> {
    if let Err(err) = client.health().await {
        bail!("{RED}✗ data plane is unreachable{RESET}: {err}");
    }
    println!("{GREEN}✓ data plane is healthy{RESET}");
    Ok(())
}

fn print_signal_table(signals: &[Signal]) {
    let id_width = column_width(signals.iter().map(|s| s.id.len()), "ID".len());
    let author_width = column_width(signals.iter().map(|s| s.author.len()), "AUTHOR".len());

    println!(
        "{BOLD}{:<id_width$}  {:<8}  {:<author_width$}  {:<40}  CREATED{RESET}",
        "ID", "PRIORITY", "AUTHOR", "TITLE",
    );
    for signal in signals {
        let color = priority_color(&signal.priority);
        println!(
            "{:<id_width$}  {color}{:<8}{RESET}  {:<author_width$}  {:<40}  {}",
            signal.id,
            signal.priority,
            signal.author,
            truncate(&signal.title, 40),
            format_time(&signal.created_at),
        );
    }
}

fn print_signal_detail(signal: &Signal) {
    let color = priority_color(&signal.priority);
    println!("{BOLD}ID:{RESET}        {}", signal.id);
    println!("{BOLD}Title:{RESET}     {}", signal.title);
    println!("{BOLD}Content:{RESET}   {}", signal.content);
    println!("{BOLD}Priority:{RESET}  {color}{}{RESET}", signal.priority);
    println!("{BOLD}Author:{RESET}    {}", signal.author);
    println!("{BOLD}Created:{RESET}   {}", signal.created_at);
    println!("{BOLD}Updated:{RESET}   {}", signal.updated_at);
}

fn column_width(lengths: impl Iterator<Item = usize>, header: usize) -> usize {
    lengths.max().unwrap_or(0).max(header)
}

fn priority_color(priority: &str) -> &'static str {
    match priority {
        "High" => RED,
        "Medium" => YELLOW,
        "Low" => GREEN,
        _ => RESET,
    }
}

/// Renders an RFC 3339 timestamp as `YYYY-MM-DD HH:MM`, falling back to the
/// raw string when it does not parse.
fn format_time(value: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(value) {
        Ok(parsed) => parsed.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => value.to_string(),
    }
}

fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let head: String = text.chars().take(max_length - 1).collect();
    format!("{head}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate("short", 40), "short");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        let long = "a".repeat(50);
        let truncated = truncate(&long, 40);
        assert_eq!(truncated.chars().count(), 40);
        assert!(truncated.ends_with('…'));
    }

    #[test]
    fn format_time_renders_parseable_timestamps() {
        assert_eq!(
            format_time("2026-02-23T15:00:00-03:00"),
            "2026-02-23 15:00"
        );
    }

    #[test]
    fn format_time_passes_through_garbage() {
        assert_eq!(format_time("whenever"), "whenever");
    }

    #[test]
    fn priority_colors() {
        assert_eq!(priority_color("High"), RED);
        assert_eq!(priority_color("Medium"), YELLOW);
        assert_eq!(priority_color("Low"), GREEN);
        assert_eq!(priority_color("Other"), RESET);
    }
}
