#![warn(missing_docs)]

//! A CLI for looking at hierarchy ids.
//!
//! ## Usage
//! ```shell
//! hid parse /1/2/3/4/
//! # /1/2/3/4/  depth=4  bytes=8ca740
//! hid encode /1/2/
//! # 8c80
//! hid decode 8c80
//! # /1/2/
//! hid ancestors /1/2/3/
//! # /
//! # /1/
//! # /1/2/
//! hid sort /2/ /1/10/ /1/ /
//! # /
//! # /1/
//! # /1/10/
//! # /2/
//! hid column-type --dialect sqlite
//! # BLOB
//! ```
//!
//! `column-type` reads `hid.yaml` from the working directory, or the file
//! given with `--config`, and `--dialect` overrides what the file says.
//! Logging goes to stderr and is filtered by `--log` or `RUST_LOG`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use hierarchy_id::{decode, encode, format, parse, HierarchyId};

pub mod config;
pub mod trace;

/// Inspect hierarchy ids and their binary encoding.
#[derive(Debug, Parser)]
#[command(name = "hid", version, about)]
pub struct HidCli {
    /// Tracing filter directives, e.g. `hierarchy_id=trace`.
    #[arg(long, global = true, env = "HID_LOG")]
    pub log: Option<String>,

    /// Path to a YAML storage config.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: HidCmd,
}

/// The `hid` subcommands.
#[derive(Debug, Subcommand)]
pub enum HidCmd {
    /// Check a path and show its depth and encoding.
    Parse {
        /// A path like `/1/2/3/`
        path: String,
    },
    /// Print the hex encoding of a path.
    Encode {
        /// A path like `/1/2/3/`
        path: String,
    },
    /// Print the path a hex encoding stands for.
    Decode {
        /// Hex bytes, e.g. `8ca740`
        hex: String,
    },
    /// Print every ancestor of a path, root first.
    Ancestors {
        /// A path like `/1/2/3/`
        path: String,
    },
    /// Sort paths by their encoded bytes.
    Sort {
        /// Paths to sort
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print the column type to declare for the configured dialect.
    ColumnType {
        /// sqlite, sqlserver, postgres or mysql
        #[arg(long)]
        dialect: Option<String>,
    },
}

impl HidCli {
    /// Run the command, returning the lines to print.
    pub fn run(&self) -> anyhow::Result<Vec<String>> {
        self.command.run(self.config.as_deref())
    }
}

impl HidCmd {
    /// Run this command, returning the lines to print.
    pub fn run(&self, config: Option<&std::path::Path>) -> anyhow::Result<Vec<String>> {
        let lines = match self {
            HidCmd::Parse { path } => {
                let id = parse_arg(path)?;
                vec![format!(
                    "{}  depth={}  bytes={}",
                    format(&id),
                    id.depth(),
                    hex::encode(encode(&id))
                )]
            }
            HidCmd::Encode { path } => vec![hex::encode(encode(&parse_arg(path)?))],
            HidCmd::Decode { hex: input } => {
                let bytes = hex::decode(input.trim())
                    .with_context(|| format!("{:?} is not hex", input))?;
                let id = decode(&bytes)
                    .with_context(|| format!("cannot decode {}", input))?;
                vec![format(&id)]
            }
            HidCmd::Ancestors { path } => parse_arg(path)?
                .ancestors_iter()
                .map(|a| format(&a))
                .collect(),
            HidCmd::Sort { paths } => {
                let mut encoded = paths
                    .iter()
                    .map(|p| parse_arg(p).map(|id| (encode(&id), id)))
                    .collect::<anyhow::Result<Vec<(Vec<u8>, HierarchyId)>>>()?;
                encoded.sort();
                tracing::debug!(count = encoded.len(), "sorted by encoded bytes");
                encoded.into_iter().map(|(_, id)| format(&id)).collect()
            }
            HidCmd::ColumnType { dialect } => {
                let config = config::load_config(config)?;
                let config = config::with_dialect(config, dialect.as_deref())?;
                tracing::debug!(dialect = %config.dialect, "resolving column type");
                vec![config.column_type()?.to_string()]
            }
        };
        Ok(lines)
    }
}

fn parse_arg(path: &str) -> anyhow::Result<HierarchyId> {
    parse(path).with_context(|| format!("invalid path argument {:?}", path))
}
