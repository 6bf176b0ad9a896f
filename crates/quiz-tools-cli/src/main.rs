mod catalog;
mod logger;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use quiz_layout::{
    DistributionStrategy, LayoutEngine, PlacementStrategyKind, QuestionDistributor, QuizOptions,
};
use std::path::PathBuf;

use crate::logger::CliLogger;

#[derive(Parser)]
#[command(name = "qzt", about = "Quiz distribution and layout CLI", version)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distribute a selection into rounds and lay it out on pages
    Layout {
        /// Quiz configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Replace the configured selection with a CSV file
        /// (columns: category, subcategory, requested_count)
        #[arg(short, long)]
        selection: Option<PathBuf>,

        /// Override the distribution strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Override the placement strategy
        #[arg(long, value_enum)]
        placement: Option<PlacementArg>,

        /// Seed for the random strategy
        #[arg(long)]
        seed: Option<u64>,

        /// Show statistics only, don't list placements
        #[arg(long)]
        stats_only: bool,

        /// Print an occupancy map of every page
        #[arg(long)]
        preview: bool,
    },

    /// Write a starter configuration using the demo catalog
    InitConfig {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Balanced,
    Random,
    DifficultySorted,
}

#[derive(Clone, Copy, ValueEnum)]
enum PlacementArg {
    TopLeft,
    Compact,
}

impl From<StrategyArg> for DistributionStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Balanced => Self::BalancedRotation,
            StrategyArg::Random => Self::Random,
            StrategyArg::DifficultySorted => Self::DifficultySorted,
        }
    }
}

impl From<PlacementArg> for PlacementStrategyKind {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::TopLeft => Self::TopLeft,
            PlacementArg::Compact => Self::Compact,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    CliLogger::new(CliLogger::level_for(cli.verbose, cli.quiet)).init()?;

    match cli.command {
        Commands::Layout {
            config,
            selection,
            strategy,
            placement,
            seed,
            stats_only,
            preview,
        } => {
            let mut options = QuizOptions::load(&config)
                .await
                .with_context(|| format!("Failed to load {}", config.display()))?;

            if let Some(path) = selection {
                options.selection = quiz_layout::load_selection_csv(&path)
                    .await
                    .with_context(|| format!("Failed to read selection {}", path.display()))?;
            }
            if let Some(strategy) = strategy {
                options.strategy = strategy.into();
            }
            if let Some(placement) = placement {
                options.placement = placement.into();
            }
            if seed.is_some() {
                options.seed = seed;
            }
            options.validate()?;

            let mut distributor =
                QuestionDistributor::from_options(catalog::demo_registry(), &options);
            let distribution = distributor.distribute_options(&options)?;

            for error in &distribution.validation_errors {
                println!("Rejected: {}", error);
            }
            for failed in &distribution.failed_slots {
                match failed.round_index {
                    Some(round) => println!(
                        "Dropped: {}/{} in round {}: {}",
                        failed.category,
                        failed.subcategory,
                        round + 1,
                        failed.reason
                    ),
                    None => println!(
                        "Dropped: {}/{}: {}",
                        failed.category, failed.subcategory, failed.reason
                    ),
                }
            }

            let engine = LayoutEngine::from_options(&options);
            let outcome = engine.layout(distribution.records)?;

            let stats = quiz_layout::calculate_statistics(&outcome, &options.grid);
            println!("Layout Statistics:");
            println!("  Strategy: {}", engine.strategy_name());
            println!("  Questions placed: {}", stats.placed_items);
            println!("  Rounds: {}", stats.rounds);
            println!("  Pages: {}", stats.total_pages);
            for (round, pages) in stats.pages_per_round.iter().enumerate() {
                println!("    Round {}: {} page(s)", round + 1, pages);
            }
            println!(
                "  Cells used: {}/{} ({:.0}%)",
                stats.cells_used,
                stats.cells_available,
                stats.utilization * 100.0
            );

            if stats_only {
                return Ok(());
            }

            println!();
            for placement in &outcome.placements {
                let record = &placement.question_record;
                println!(
                    "  #{:<3} round {} page {} row {} col {} ({}x{}) {}",
                    record.sequence_index,
                    record.round_index + 1,
                    placement.page_index + 1,
                    placement.row,
                    placement.col,
                    placement.width_cells,
                    placement.height_cells,
                    record.payload
                );
            }

            if preview {
                for page in 0..outcome.total_pages {
                    if let Some(map) = quiz_layout::render_page_map(&outcome, &options.grid, page)
                    {
                        println!("\nPage {}:\n{}", page + 1, map);
                    }
                }
            }
        }

        Commands::InitConfig { output } => {
            let options = QuizOptions {
                selection: catalog::sample_selection(),
                rounds: 3,
                questions_per_round: 8,
                ..Default::default()
            };
            options.save(&output).await?;
            println!("Wrote default configuration → {}", output.display());
        }
    }

    Ok(())
}
