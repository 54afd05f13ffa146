//! CLI for the ODB devotional viewer.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use odb_core::config;
use std::path::PathBuf;

use commands::{run_completions, run_locate, run_save, run_today, LocateTarget};

/// Top-level CLI for the ODB devotional viewer.
#[derive(Debug, Parser)]
#[command(name = "odb")]
#[command(about = "Our Daily Bread: today's devotional and its audio", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show today's devotional and its audio URL.
    Today {
        /// RSS feed to read instead of the configured one.
        #[arg(long, value_name = "URL")]
        feed_url: Option<String>,
    },

    /// Find the audio URL on a devotional page.
    Locate {
        /// Page URL, or a saved HTML file with --file.
        target: String,
        /// Treat TARGET as a local HTML file (no network, no playlist JSON fetch).
        #[arg(long)]
        file: bool,
        /// Also print which strategy found the URL.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Download today's devotional audio.
    Save {
        /// Exact output file.
        #[arg(long, short, value_name = "PATH", conflicts_with = "output_dir")]
        output: Option<PathBuf>,
        /// Directory for the file (name taken from the audio URL).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// RSS feed to read instead of the configured one.
        #[arg(long, value_name = "URL")]
        feed_url: Option<String>,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Completions need no config (and must not create one).
        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Today { feed_url } => run_today(&cfg, feed_url.as_deref())?,
            CliCommand::Locate {
                target,
                file,
                verbose,
            } => {
                let target = if file {
                    LocateTarget::File(PathBuf::from(target))
                } else {
                    LocateTarget::Url(target)
                };
                run_locate(&cfg, &target, verbose)?;
            }
            CliCommand::Save {
                output,
                output_dir,
                feed_url,
            } => run_save(&cfg, output, output_dir, feed_url.as_deref())?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
