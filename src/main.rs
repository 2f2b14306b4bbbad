//! Design Context CLI
//!
//! Usage:
//!   design-context [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>  Configuration file (TOML format)
//!   -t, --tree           Print the component tree instead of the template
//!   -v, --verbose        Increase log verbosity (repeatable)
//!   -h, --help           Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use design_context::design::{self, describe_tree};
use design_context::{DesignConfig, DesignContext, DesignError};

#[derive(Parser)]
#[command(name = "design-context")]
#[command(about = "Read a component template and write it back normalized")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the component tree instead of the template
    #[arg(short, long)]
    tree: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => match DesignConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => DesignConfig::default(),
    };

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let context = DesignContext::new().with_config(&config);
    let mut context = match design::read_with_context(&source, context) {
        Ok(context) => context,
        Err(DesignError::Parse(errors)) => {
            for error in &errors {
                eprint!("{}", error.format(&source, &filename));
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.tree {
        print!("{}", describe_tree(&context));
        return;
    }

    match design::write_with_context(&mut context, &config) {
        Ok(html) => print!("{}", html),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
