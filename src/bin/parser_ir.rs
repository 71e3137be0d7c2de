//! Command-line interface for parser IR documents.
//!
//! Usage:
//!   parser-ir validate `<ir.json>`                        - Validate a wire document
//!   parser-ir export `<grammars.yaml>` [--source-id `<id>`] - Export grammar declarations to IR

use clap::{Arg, Command};

use parser_ir::ir::export;
use parser_ir::ir::grammar::GrammarDecl;
use parser_ir::ir::validate;

const EXIT_VALIDATION_ERROR: i32 = 3;
const EXIT_IO_ERROR: i32 = 4;

fn main() {
    let matches = Command::new("parser-ir")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validate and produce parser IR documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("validate")
                .about("Validate a parser IR JSON document")
                .arg(
                    Arg::new("path")
                        .help("Path to the IR JSON file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export grammar declarations to parser IR")
                .arg(
                    Arg::new("path")
                        .help("Path to a YAML or JSON grammar declaration file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("source-id")
                        .long("source-id")
                        .help("Source identifier recorded in the document"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("validate", validate_matches)) => {
            let path = validate_matches.get_one::<String>("path").unwrap();
            handle_validate_command(path);
        }
        Some(("export", export_matches)) => {
            let path = export_matches.get_one::<String>("path").unwrap();
            let source_id = export_matches.get_one::<String>("source-id");
            handle_export_command(path, source_id.map(String::as_str));
        }
        _ => unreachable!(),
    }
}

/// Handle the validate command
fn handle_validate_command(path: &str) {
    let payload = read_file(path);
    match validate::validate_json(&payload) {
        Ok(_) => println!("OK: {path}"),
        Err(e) => {
            eprintln!("invalid parser IR: {e}");
            std::process::exit(EXIT_VALIDATION_ERROR);
        }
    }
}

/// Handle the export command
fn handle_export_command(path: &str, source_id: Option<&str>) {
    let payload = read_file(path);
    let grammars = parse_grammars(path, &payload);

    let source_id = source_id
        .map(str::to_string)
        .unwrap_or_else(|| format!("file://{path}"));
    let document = export::export_all(&grammars, &source_id)
        .and_then(|document| validate::validate(&document).map(|_| document))
        .unwrap_or_else(|e| {
            eprintln!("export failed: {e}");
            std::process::exit(EXIT_VALIDATION_ERROR);
        });

    println!("{}", document.to_json());
}

fn parse_grammars(path: &str, payload: &str) -> Vec<GrammarDecl> {
    let parsed = if path.ends_with(".json") {
        serde_json::from_str(payload).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(payload).map_err(|e| e.to_string())
    };
    parsed.unwrap_or_else(|e| {
        eprintln!("invalid grammar declarations: {e}");
        std::process::exit(EXIT_VALIDATION_ERROR);
    })
}

fn read_file(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {e}");
        std::process::exit(EXIT_IO_ERROR);
    })
}
