use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(name = "srcindex", about, version(VERSION))]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,
    #[arg(
        long,
        global(true),
        value_name("LevelFilter"),
        help("Log level for the command line tool"),
        default_value("warn")
    )]
    pub log: LevelFilter,
    #[arg(
        long,
        global(true),
        value_name("LevelFilter"),
        help("Log level for the index parser and database"),
        default_value("off")
    )]
    pub parser_log: LevelFilter,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse an index document and report its number of entries.
    Check {
        index: PathBuf,
    },
    /// Print every entry of an index document.
    Entries {
        index: PathBuf,
    },
    /// Resolve partially qualified names against a generated documentation directory.
    Resolve {
        #[arg(long, value_name("DIR"), help("Generated documentation directory"))]
        gen_dir: PathBuf,
        #[arg(required(true), value_name("PQN"))]
        pqns: Vec<String>,
    },
}
