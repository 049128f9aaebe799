//! Command-line interface for aslex
//! This binary classifies AngelScript sources and prints the tokens in one of the registered formats.
//!
//! Usage:
//!   aslex tokens `<path>` [--lang `<alias>`] [--format `<format>`]  - Tokenize a file (`-` reads stdin)
//!   aslex list-lexers                                           - List lexers and their aliases
//!   aslex list-formats                                          - List output formats
//!   aslex docs-config                                           - Print the resolved docs build settings

use aslex::config::{AslexConfig, Loader};
use aslex::formats::{FormatError, FormatRegistry};
use aslex::LexerRegistry;
use clap::{Arg, Command};
use std::io::Read;
use std::path::Path;
use tracing::{debug, Level};

fn main() {
    let matches = Command::new("aslex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Classify AngelScript code samples for syntax highlighting")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log level written to stderr")
                .value_parser(["trace", "debug", "info", "warn", "error"])
                .default_value("warn"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("tokens")
                .about("Tokenize a source file")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file, or '-' for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("lang")
                        .long("lang")
                        .short('l')
                        .help("Lexer alias (default: detected from the file extension)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'tag', 'json', 'yaml', 'html')"),
                ),
        )
        .subcommand(Command::new("list-lexers").about("List registered lexers and aliases"))
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .subcommand(
            Command::new("docs-config").about("Print the resolved documentation build settings"),
        )
        .get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn");
    init_logging(level);

    let config = load_config(matches.get_one::<String>("config").map(String::as_str));
    let mut lexers = LexerRegistry::with_defaults();
    if let Err(e) = config.highlight.apply(&mut lexers) {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    match matches.subcommand() {
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches
                .get_one::<String>("path")
                .expect("path is required");
            let lang = tokens_matches.get_one::<String>("lang").map(String::as_str);
            let format = tokens_matches
                .get_one::<String>("format")
                .map(String::as_str)
                .unwrap_or(config.highlight.format.as_str());
            handle_tokens_command(&lexers, &config, path, lang, format);
        }
        Some(("list-lexers", _)) => handle_list_lexers_command(&lexers),
        Some(("list-formats", _)) => handle_list_formats_command(),
        Some(("docs-config", _)) => handle_docs_config_command(&config),
        _ => unreachable!(),
    }
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        _ => Level::ERROR,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> AslexConfig {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader.with_env().build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

fn read_source(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        std::fs::read_to_string(path)
    }
}

/// Handle the tokens command
fn handle_tokens_command(
    lexers: &LexerRegistry,
    config: &AslexConfig,
    path: &str,
    lang: Option<&str>,
    format: &str,
) {
    let source = read_source(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });

    let lexer = match lang {
        Some(alias) => lexers.get(alias),
        None => lexers
            .for_filename(Path::new(path))
            .map(Ok)
            .unwrap_or_else(|| lexers.get(&config.highlight.default_language)),
    }
    .unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("\nAvailable lexers: {}", lexers.list_lexers().join(", "));
        std::process::exit(1);
    });
    debug!(lexer = lexer.name(), path, format, "tokenizing");

    let tokens = lexer.tokenize(&source);
    let output = FormatRegistry::with_defaults()
        .serialize(&tokens, format)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            if let FormatError::FormatNotFound { available, .. } = &e {
                eprintln!("\nAvailable formats: {}", available.join(", "));
            }
            std::process::exit(1);
        });

    print!("{}", output);
}

/// Handle the list-lexers command
fn handle_list_lexers_command(lexers: &LexerRegistry) {
    println!("Available lexers:\n");
    for name in lexers.list_lexers() {
        let aliases: Vec<String> = lexers
            .aliases()
            .into_iter()
            .filter(|(_, lexer)| *lexer == name)
            .map(|(alias, _)| alias)
            .collect();
        println!("  {}", name);
        println!("    aliases: {}", aliases.join(", "));
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(formatter) = registry.get(&name) {
            println!("  {}", name);
            println!("    {}", formatter.description());
        }
    }
}

/// Handle the docs-config command
fn handle_docs_config_command(config: &AslexConfig) {
    let plan = config.docs.doxygen.resolve_from_env();
    let output = serde_json::json!({
        "docs": &config.docs,
        "doxygen": plan,
        "highlight": &config.highlight,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            std::process::exit(1);
        }
    }
}
