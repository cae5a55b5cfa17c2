//! Command-line arguments.

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use waffice_listview::SortKey;

use crate::models::{ACCESS_RIGHT_OPTIONS, AFFILIATION_OPTIONS, ROLE_OPTIONS};
use crate::output::OutputMode;

/// Search, sort and page through roster snapshots.
#[derive(Debug, Parser)]
#[command(name = "waffice", version, about)]
pub struct Cli {
    /// YAML file with per-screen settings
    #[arg(long, global = true, env = "WAFFICE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// How to render the page
    #[arg(long, global = true, value_enum, default_value_t = OutputMode::Auto)]
    pub output: OutputMode,

    /// Write the rendered page to a file instead of stdout
    #[arg(long, global = true, value_name = "FILE")]
    pub out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List club members
    Members(MemberArgs),
    /// List membership applications
    Applications(ApplicationArgs),
}

/// Arguments shared by every list screen.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// JSON file holding an array of records
    #[arg(long, value_name = "FILE")]
    pub data: PathBuf,

    /// Case-insensitive text to look for in the search fields
    #[arg(long, default_value = "")]
    pub search: String,

    /// Sort key as FIELD or FIELD:asc|desc; repeat for tie-breakers
    #[arg(long, value_name = "FIELD[:DIR]")]
    pub sort: Vec<SortKey>,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,

    /// Rows per page, overriding the config file
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Field the search looks at; repeat for several, overriding the config file
    #[arg(long = "search-field", value_name = "FIELD")]
    pub search_fields: Vec<String>,

    /// Mark a record as selected
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<i64>,

    /// Select every record on the shown page
    #[arg(long)]
    pub select_page: bool,
}

#[derive(Debug, Clone, Args)]
pub struct MemberArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Only members with this role (absent roles count as 활동회원)
    #[arg(long, value_parser = PossibleValuesParser::new(ROLE_OPTIONS))]
    pub role: Option<String>,

    /// Only members with this affiliation (absent affiliations count as 학부생)
    #[arg(long, value_parser = PossibleValuesParser::new(AFFILIATION_OPTIONS))]
    pub affiliation: Option<String>,

    /// Only members holding this access right; repeat to require several
    #[arg(
        long = "access-right",
        value_name = "RIGHT",
        value_parser = PossibleValuesParser::new(ACCESS_RIGHT_OPTIONS)
    )]
    pub access_rights: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ApplicationArgs {
    #[command(flatten)]
    pub list: ListArgs,
}
