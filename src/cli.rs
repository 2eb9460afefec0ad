use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use crate::data::loader::load_file;
use crate::data::model::CohortFilter;

/// Query a pipe-delimited cohort roster
#[derive(Parser, Debug)]
#[command(name = "cohort-roster", version)]
#[command(about = "Query houses, cohorts and housemates in a roster file", long_about = None)]
pub struct Cli {
    /// Roster file (first|last|house|advisor|cohort per line)
    #[arg(short, long, env = "COHORT_DATA", default_value = "cohort_data.txt", global = true)]
    pub file: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every parsed record
    Records,
    /// List every house name
    Houses,
    /// List students, optionally restricted to one cohort
    Students {
        /// Exact cohort label, or "All" for every house member
        #[arg(short, long, default_value = "All")]
        cohort: String,
    },
    /// Print sorted rosters for each house, ghosts and instructors
    Rosters,
    /// Look up the cohort of a person
    Cohort {
        /// Full name, e.g. "Harry Potter"
        name: String,
    },
    /// List last names shared by more than one person
    DupedLastNames,
    /// List people sharing both house and cohort with a person
    Housemates {
        /// Full name, e.g. "Hermione Granger"
        name: String,
    },
}

impl Cli {
    /// Log filter implied by the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Load the roster and write the requested query result to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let data = load_file(&cli.file)
        .with_context(|| format!("loading roster from {}", cli.file.display()))?;
    info!("{} records in {}", data.len(), cli.file.display());

    match &cli.command {
        Commands::Records => {
            if cli.json {
                emit_json(out, &data.people)?;
            } else {
                for p in &data.people {
                    writeln!(out, "{}|{}|{}|{}", p.full_name, p.house, p.advisor, p.cohort)?;
                }
            }
        }
        Commands::Houses => emit_names(out, cli.json, data.houses())?,
        Commands::Students { cohort } => {
            let filter = CohortFilter::from(cohort.as_str());
            emit_names(out, cli.json, data.students_by_cohort(&filter))?;
        }
        Commands::Rosters => {
            let rosters = data.names_by_house();
            if cli.json {
                emit_json(out, &rosters)?;
            } else {
                for (cat, names) in rosters.iter() {
                    writeln!(out, "{cat}:")?;
                    for name in names {
                        writeln!(out, "  {name}")?;
                    }
                }
            }
        }
        Commands::Cohort { name } => {
            let cohort = data.cohort_for(name);
            if cli.json {
                emit_json(out, &cohort)?;
            } else {
                writeln!(out, "{}", cohort.unwrap_or("not found"))?;
            }
        }
        Commands::DupedLastNames => emit_names(out, cli.json, data.duped_last_names())?,
        Commands::Housemates { name } => {
            emit_names(out, cli.json, data.housemates_for(name))?
        }
    }
    Ok(())
}

// -- output helpers --

fn emit_names<W, I>(out: &mut W, json: bool, names: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = String>,
{
    let names: Vec<String> = names.into_iter().collect();
    if json {
        return emit_json(out, &names);
    }
    for name in &names {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn emit_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("writing JSON")?;
    writeln!(out)?;
    Ok(())
}
