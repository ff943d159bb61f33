//! Command-line front end
//!
//! Reads the script once per invocation so text and cursor form a consistent
//! snapshot, then resolves the statement under the cursor or lists every
//! statement in the script.

use std::io::Read;

use clap::Parser;
use colorful::Color;
use colorful::Colorful;

use crate::models::QueryInfo;
use crate::query_detect::{extract_all_queries, find_current_query_in_text, line_column_to_offset};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("io error: {0}")] Io(#[from] std::io::Error),
    #[error("json error: {0}")] Json(#[from] serde_json::Error),
    #[error("invalid arguments: {0}")] Args(&'static str),
}

#[derive(Parser, Debug)]
#[command(
    name = "querydetect",
    version,
    about = "Find the SQL statement under a cursor, or list every statement in a script"
)]
pub struct Cli {
    /// SQL script to inspect; use "-" to read stdin
    pub file: String,

    /// Cursor position as a byte offset into the script
    #[arg(long, conflicts_with_all = ["line", "column", "all"])]
    pub cursor: Option<usize>,

    /// Cursor line, 1-based (together with --column)
    #[arg(long, requires = "column", conflicts_with = "all")]
    pub line: Option<usize>,

    /// Cursor column, 1-based (together with --line)
    #[arg(long, requires = "line")]
    pub column: Option<usize>,

    /// List every statement in the script instead of resolving a cursor
    #[arg(long)]
    pub all: bool,

    /// Emit JSON instead of colored text
    #[arg(long)]
    pub json: bool,
}

pub fn run() -> Result<(), CliError> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<(), CliError> {
    let text = read_input(&cli.file)?;

    if cli.all {
        let queries = extract_all_queries(&text);
        log::info!("found {} statement(s)", queries.len());
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&queries)?);
        } else if queries.is_empty() {
            println!("{}", "no statements found".color(Color::Yellow));
        } else {
            for query in &queries {
                print_query(query);
            }
        }
        return Ok(());
    }

    let cursor = match (cli.cursor, cli.line, cli.column) {
        (Some(offset), _, _) => offset,
        (None, Some(line), Some(column)) => line_column_to_offset(&text, line, column),
        _ => return Err(CliError::Args("pass --cursor, --line/--column, or --all")),
    };

    match find_current_query_in_text(&text, cursor) {
        Some(query) if cli.json => println!("{}", serde_json::to_string_pretty(&query)?),
        Some(query) => print_query(&query),
        // "nothing under the cursor" is an ordinary outcome, not an error
        None if cli.json => println!("null"),
        None => println!("{}", "no query at cursor".color(Color::Yellow)),
    }

    Ok(())
}

fn print_query(query: &QueryInfo) {
    let range = format!(
        "[{}..{}] lines {}-{}",
        query.start_position, query.end_position, query.start_line, query.end_line
    );
    println!("{}", range.color(Color::Cyan));
    println!("{}", query.text.as_str().color(Color::Green));
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
