use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod chart;
mod db;
mod models;
mod slides;
mod stats;
mod style;

#[derive(Parser)]
#[command(name = "poop-wrapped")]
#[command(about = "Render year-in-review images from a poop tracker database", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the yearly per-user bar chart
    Chart {
        /// Path to the tracker SQLite database
        #[arg(long)]
        db: PathBuf,
        /// Target calendar year
        #[arg(long)]
        year: i32,
        /// Output image path (defaults to poop_wrapped_<year>.png)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render the five personal wrapped slides from a stats JSON file
    Slides {
        /// Path to a user_<id>_stats.json file
        stats_file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chart { db, year, out } => {
            let out = out.unwrap_or_else(|| PathBuf::from(format!("poop_wrapped_{year}.png")));
            let pool = db::connect(&db).await?;
            let events = db::fetch_year_events(&pool, year).await?;
            let counts = stats::aggregate_counts(&events);

            if counts.is_empty() {
                println!("No poops recorded for {year}; nothing to chart.");
                return Ok(());
            }

            chart::render_wrapped_chart(&counts, year, &out, &style::ChartStyle::default())?;
            println!("Wrapped chart for {year} saved to {}.", out.display());
        }
        Commands::Slides { stats_file } => {
            let personal = models::load_stats(&stats_file)?;
            // Derived before rendering so a misnamed stats file fails with
            // nothing written.
            let manifest = slides::manifest_path(&stats_file)?;
            let out_dir = slides::slides_dir(&stats_file, &personal.user_id);

            let paths =
                slides::generate_slides(&personal, &out_dir, &style::SlideStyle::default())?;
            slides::write_manifest(&paths, &manifest)?;
            println!("Generated {} slides", paths.len());
        }
    }

    Ok(())
}
