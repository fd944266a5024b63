use chrono::Utc;
use tracing::info;

use crate::config::Config;
use crate::data::search_state::SearchStateStore;
use crate::data::species::{find_by_number, load_species, Species};
use crate::data::validate::validate_species_file;
use crate::gallery::{export_to_path, filter_species, render_text, Card, Detail};
use crate::parallel::WorkerPool;
use crate::server::{self, AppState};

const USAGE: &str = "usage: pogodex <list|show|search|export|validate|serve>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Show,
    Search,
    Export,
    Validate,
    Serve,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("list") => Some(Command::List),
        Some("show") => Some(Command::Show),
        Some("search") => Some(Command::Search),
        Some("export") => Some(Command::Export),
        Some("validate") => Some(Command::Validate),
        Some("serve") => Some(Command::Serve),
        _ => None,
    }
}

pub fn run_with_args(args: &[String], config: &Config) -> i32 {
    match parse_command(args) {
        Some(Command::List) => handle_list(args, config),
        Some(Command::Show) => handle_show(args, config),
        Some(Command::Search) => handle_search(args, config),
        Some(Command::Export) => handle_export(args, config),
        Some(Command::Validate) => handle_validate(args, config),
        Some(Command::Serve) => handle_serve(config),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn load_dataset(config: &Config) -> Option<Vec<Species>> {
    match load_species(&config.data_path) {
        Ok(species) => Some(species),
        Err(err) => {
            eprintln!("error: {err}");
            None
        }
    }
}

fn print_cards(species: &[Species], term: &str) {
    for entry in filter_species(species, term) {
        let card = Card::from_species(entry);
        println!("{}\t{}", card.label, card.name);
    }
}

fn handle_list(args: &[String], config: &Config) -> i32 {
    let Some(species) = load_dataset(config) else {
        return 1;
    };
    let term = match args.get(2) {
        Some(term) => term.clone(),
        None => SearchStateStore::new(&config.search_state_path).load(),
    };
    print_cards(&species, &term);
    0
}

fn handle_show(args: &[String], config: &Config) -> i32 {
    let Some(raw) = args.get(2) else {
        eprintln!("usage: pogodex show <number> [--json]");
        return 2;
    };
    let Ok(number) = raw.trim().parse::<u32>() else {
        eprintln!("invalid species number '{raw}'");
        return 2;
    };
    let as_json = args.iter().any(|arg| arg == "--json");

    let Some(species) = load_dataset(config) else {
        return 1;
    };
    let Some(entry) = find_by_number(&species, number) else {
        eprintln!("species #{number} not found");
        return 1;
    };

    let detail = Detail::build(entry, Utc::now());
    if as_json {
        match serde_json::to_string_pretty(&detail) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize detail: {err}");
                return 1;
            }
        }
    } else {
        print!("{}", render_text(&detail));
    }
    0
}

fn handle_search(args: &[String], config: &Config) -> i32 {
    let Some(term) = args.get(2) else {
        eprintln!("usage: pogodex search <term>");
        return 2;
    };
    let store = SearchStateStore::new(&config.search_state_path);
    let stored = match store.save(term) {
        Ok(stored) => stored,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };
    let Some(species) = load_dataset(config) else {
        return 1;
    };
    print_cards(&species, &stored);
    0
}

fn handle_export(args: &[String], config: &Config) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: pogodex export <path.csv>");
        return 2;
    };
    let Some(species) = load_dataset(config) else {
        return 1;
    };
    let pool = WorkerPool::with_workers(config.workers);
    match export_to_path(path, &species, Utc::now(), &pool) {
        Ok(count) => {
            println!("export complete: rows={count}, path='{path}'");
            0
        }
        Err(err) => {
            eprintln!("export failed: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String], config: &Config) -> i32 {
    let path = args
        .get(2)
        .map(String::as_str)
        .unwrap_or(config.data_path.as_str());

    let report = match validate_species_file(path) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };
    for diagnostic in &report.diagnostics {
        eprintln!("- {diagnostic}");
    }
    if report.has_errors() {
        eprintln!("validation failed: {} issue(s)", report.diagnostics.len());
        1
    } else {
        println!("validation passed: {path} ({} records)", report.record_count);
        0
    }
}

fn handle_serve(config: &Config) -> i32 {
    let Some(species) = load_dataset(config) else {
        return 1;
    };
    let state = AppState::new(species, SearchStateStore::new(&config.search_state_path));
    info!(bind_addr = %config.bind_addr, "starting server");
    match server::run_server(&config.bind_addr, &state) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}
