use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use codesim::config::Config;
use codesim::output::{self, terminal, Report, ReportFormat};
use codesim::pipeline;
use codesim::source::{self, loader, SourceFile};

/// codesim: similarity analysis for source code files.
///
/// Scores every pair of files with three independent metrics: cosine
/// similarity, Jaccard index and token-level Levenshtein ratio.
#[derive(Parser)]
#[command(name = "codesim", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare source files pairwise and write a report
    Compare {
        /// Source files to compare (at least 2)
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Minimum similarity on any metric for a pair to be reported (0.0-1.0)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Report format
        #[arg(short, long, value_enum)]
        format: Option<ReportFormat>,

        /// Report base name, without extension
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Decimal digits for scores in the report
        #[arg(long)]
        precision: Option<usize>,

        /// Don't print statistics to the terminal
        #[arg(long)]
        no_stats: bool,
    },

    /// Show the tokens extracted from a single file
    Tokens {
        /// The file to tokenize
        file: PathBuf,

        /// Only print the first N tokens
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("codesim=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            files,
            threshold,
            format,
            output,
            precision,
            no_stats,
        } => {
            let mut config = Config::load()?;
            if let Some(threshold) = threshold {
                config.threshold = threshold;
            }
            if let Some(format) = format {
                config.format = format;
            }
            if let Some(output) = output {
                config.output = output;
            }
            if let Some(precision) = precision {
                config.precision = precision;
            }
            config.validate()?;

            run_compare(&files, &config, !no_stats).await?;
        }

        Commands::Tokens { file, limit } => {
            let input = loader::load_file(&file)?;
            let file = SourceFile::from(input);
            terminal::display_tokens(&file, limit);
        }
    }

    Ok(())
}

async fn run_compare(paths: &[PathBuf], config: &Config, show_stats: bool) -> Result<()> {
    terminal::display_banner();
    println!("Analyzing source files...\n");

    let inputs = loader::load_all(paths);
    let files = source::prepare(inputs);
    let summaries: Vec<_> = files.iter().map(SourceFile::summary).collect();
    for summary in &summaries {
        terminal::display_file(summary);
    }

    let pair_count = files.len() * files.len().saturating_sub(1) / 2;
    println!("\nComparing {} files ({} pairs)...", files.len(), pair_count);

    let pb = ProgressBar::new(pair_count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Pairs [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );
    let result = pipeline::aggregate_with_progress(&files, config.threshold, || pb.inc(1));
    pb.finish_and_clear();
    let comparison = result?;

    terminal::display_comparisons(&comparison);
    if show_stats {
        terminal::display_statistics(comparison.statistics());
    }

    let report = Report::new(&summaries, &comparison, config.precision);
    let written =
        output::write_report(&report, config.format, &config.output, &config.pandoc).await?;

    info!(
        path = %written.path.display(),
        format = %written.format,
        "Report written"
    );
    if written.format != config.format {
        println!(
            "\n{} {} report unavailable, wrote {} instead",
            "Warning:".yellow(),
            config.format,
            written.path.display()
        );
    } else {
        println!(
            "\n{} {}",
            "Report written:".bold(),
            written.path.display()
        );
    }

    if comparison.is_empty() {
        println!("No significant similarities found.");
    } else {
        println!("{}", "Analysis complete.".bold());
    }

    Ok(())
}
