//! Command line front end for the `pathcomplete` library.
//!
//! Indexes the requested directories, runs one query (or lists everything
//! indexed), and prints the result. Directory-open failures are logged and
//! skipped so one bad argument does not abort the run.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pathcomplete::{CompletionError, DirectoryIndex, SearchReport};

/// Autocomplete filenames from a set of indexed directories.
#[derive(Debug, Parser)]
#[command(name = "pathcomplete", version, about)]
struct Cli {
    /// Directory whose immediate entries are indexed (repeatable).
    #[arg(short = 'd', long = "dir", value_name = "PATH", required = true)]
    dirs: Vec<PathBuf>,

    /// Partial filename to complete against every indexed directory.
    #[arg(value_name = "QUERY", required_unless_present = "list")]
    query: Option<String>,

    /// Print every indexed path instead of searching.
    #[arg(long)]
    list: bool,

    /// Emit the result as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut index = DirectoryIndex::new();
    for dir in &cli.dirs {
        match index.index_directory(dir) {
            Ok(_) => {}
            Err(error @ CompletionError::DirectoryUnavailable { .. }) => {
                // Skip and carry on; previously indexed directories stay
                // queryable.
                log::warn!("{error}");
            }
            Err(error) => {
                eprintln!("pathcomplete: {error}");
                return ExitCode::from(2);
            }
        }
    }

    let stats = index.stats();
    log::info!(
        "ready directories={} entries={} skipped={}",
        stats.directories,
        stats.indexed_entries,
        stats.skipped_entries
    );

    if cli.list {
        return print_paths(&index.indexed_paths(), cli.json);
    }

    let Some(query) = cli.query.as_deref() else {
        // clap's required_unless_present guarantees a query when --list
        // is absent.
        return ExitCode::from(2);
    };
    run_search(&index, query, cli.json)
}

fn run_search(index: &DirectoryIndex, query: &str, json: bool) -> ExitCode {
    let matches = match index.search(query) {
        Ok(matches) => matches,
        Err(error) => {
            eprintln!("pathcomplete: {error}");
            return ExitCode::from(2);
        }
    };

    let report = SearchReport {
        query: query.to_string(),
        matches,
    };
    if json {
        print_json(&report)
    } else {
        print!("{}", render_report(&report));
        ExitCode::SUCCESS
    }
}

fn print_paths(paths: &[String], json: bool) -> ExitCode {
    if json {
        print_json(&paths)
    } else {
        for path in paths {
            println!("{path}");
        }
        ExitCode::SUCCESS
    }
}

fn print_json<T: serde::Serialize>(payload: &T) -> ExitCode {
    match serde_json::to_string_pretty(payload) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("pathcomplete: {error}");
            ExitCode::from(2)
        }
    }
}

/// Renders the console report: no match, one match, or the full list.
fn render_report(report: &SearchReport) -> String {
    match report.matches.as_slice() {
        [] => format!("No match found for: {}\n", report.query),
        [only] => format!("Match found: {only}\n"),
        matches => {
            let mut out = String::from("Multiple matches found:\n");
            for matched in matches {
                out.push_str(matched);
                out.push('\n');
            }
            out
        }
    }
}
