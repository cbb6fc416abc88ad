use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use itertools::Itertools;

use crate::{
    merge::apply,
    model::{Anchor, Restroom},
    utils::{read_json, write_json},
};

mod check;
mod distribute;
mod merge;
mod model;
mod utils;

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

#[derive(Debug, Parser)]
struct Cli {
    /// Directory containing linker.json and cs.json
    #[arg(long, default_value = DATA_DIR)]
    data: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Spread each building's restrooms around its center (default)
    Distribute {
        /// Report what would change without writing cs.json
        #[arg(long)]
        dry_run: bool,
    },
    /// List restrooms lying outside their building's radius
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let linker = cli.data.join("linker.json");
    let cs = cli.data.join("cs.json");

    match cli.command.unwrap_or(Command::Distribute { dry_run: false }) {
        Command::Distribute { dry_run } => {
            update(&linker, &cs, dry_run)?;
        }
        Command::Check => {
            let anchors = Anchor::load(&linker)?;
            let restrooms: Vec<Restroom> = read_json(&cs)?;
            let report = check::run(&anchors, &restrooms);
            for x in &report.findings {
                println!("{x}");
            }
            println!(
                "{} placed restrooms checked, {} findings",
                report.checked,
                report.findings.len()
            );
        }
    }

    Ok(())
}

/// Loads both files, places restrooms and writes cs.json back if anything
/// changed. Returns the number of records placed.
fn update(linker: &Path, cs: &Path, dry_run: bool) -> Result<usize> {
    let anchors = Anchor::load(linker)?;
    let mut restrooms: Vec<Restroom> = read_json(cs)?;

    let summary = apply(&anchors, &mut restrooms);
    if !summary.unmatched.is_empty() {
        eprintln!(
            "No center for {} buildings: {}",
            summary.unmatched.len(),
            summary
                .unmatched
                .iter()
                .map(|(building, n)| format!("{building} ({n})"))
                .join(", ")
        );
    }
    if summary.unlabelled > 0 {
        eprintln!("{} restrooms have no building", summary.unlabelled);
    }

    if summary.modified == 0 {
        println!("No updates made (no matching buildings found or no restrooms).");
    } else if dry_run {
        println!(
            "Would update {} restroom coordinates in {}",
            summary.modified,
            cs.display()
        );
    } else {
        write_json(cs, &restrooms)?;
        println!(
            "Updated {} restroom coordinates in {}",
            summary.modified,
            cs.display()
        );
    }

    Ok(summary.modified)
}
