// fieldglass entry point.
//
// Startup sequence:
// 1. Parse the command line
// 2. Load config (copying defaults on first run)
// 3. Initialize tracing (log to file, stdout is for rendered output)
// 4. Pick the data source (HTTP service or fixtures directory)
// 5. Run the subcommand and print its view

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use fieldglass_app::config::{self, Config};
use fieldglass_app::export::export_stats;
use fieldglass_app::session::{PlayerSession, PlayerSnapshot};
use fieldglass_app::source::{FixtureSource, HttpSource, PlayerSource};
use fieldglass_app::view;
use fieldglass_core::directory::filter_players;
use fieldglass_core::LevelFilter;

#[derive(Parser)]
#[command(name = "fieldglass")]
#[command(about = "Baseball prospect stats, ratings and predictions", long_about = None)]
struct Cli {
    /// Read JSON fixtures from this directory instead of the HTTP service
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List players, optionally filtered
    Players {
        /// Case-insensitive match on name or team
        #[arg(long, default_value = "")]
        search: String,
        /// all, MLB, AAA, AA, A, Rookie, HS or NCAA
        #[arg(long)]
        level: Option<LevelFilter>,
    },
    /// Lifetime batting, pitching and fielding tables
    Stats {
        id: i64,
        #[arg(long)]
        level: Option<LevelFilter>,
        /// Also write the three tables as CSV into this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Scouting grades
    Ratings { id: i64 },
    /// Overall rating by season
    Trends { id: i64 },
    /// Career outcome prediction
    Prediction { id: i64 },
    /// Most similar MLB players
    Comps { id: i64 },
    /// Side-by-side comparison of two players
    Compare {
        id1: i64,
        id2: i64,
        #[arg(long)]
        level: Option<LevelFilter>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::load_config().context("failed to load configuration")?;

    init_tracing(&config)?;
    info!(
        "Config loaded: api={}, timeout={}s, default level={}",
        config.api.base_url, config.api.timeout_secs, config.display.default_level
    );

    match cli.fixtures {
        Some(ref dir) => {
            info!("Reading fixtures from {}", dir.display());
            run(FixtureSource::new(dir), cli.command, &config).await
        }
        None => {
            let source = HttpSource::new(
                &config.api.base_url,
                Duration::from_secs(config.api.timeout_secs),
            )
            .context("failed to create HTTP client")?;
            run(source, cli.command, &config).await
        }
    }
}

async fn run<S: PlayerSource>(source: S, command: Commands, config: &Config) -> anyhow::Result<()> {
    let default_level = config.display.default_level;
    let mut session = PlayerSession::new(source);

    let output = match command {
        Commands::Players { search, level } => {
            let players = session
                .source()
                .players()
                .await
                .context("failed to fetch player list")?;
            let matches = filter_players(&players, &search, level.unwrap_or(default_level));
            view::render_players(&matches)
        }
        Commands::Stats { id, level, export } => {
            let snapshot = select(&mut session, id).await?;
            let stats = view::stats_view(snapshot, level.unwrap_or(default_level));
            if let Some(dir) = export {
                let written = export_stats(&dir, id, &stats)
                    .with_context(|| format!("failed to export stats for player {id}"))?;
                for path in &written {
                    eprintln!("wrote {}", path.display());
                }
            }
            format!("{}\n{}", snapshot.display_name(), view::render_stats(&stats))
        }
        Commands::Ratings { id } => {
            let snapshot = select(&mut session, id).await?;
            view::render_ratings(snapshot.ratings.as_ref())
        }
        Commands::Trends { id } => {
            let snapshot = select(&mut session, id).await?;
            view::render_trends(&view::trend_chart(snapshot))
        }
        Commands::Prediction { id } => {
            let snapshot = select(&mut session, id).await?;
            view::render_prediction(snapshot.prediction.as_ref())
        }
        Commands::Comps { id } => {
            let snapshot = select(&mut session, id).await?;
            view::render_comps(&snapshot.comps)
        }
        Commands::Compare { id1, id2, level } => {
            let (left, right) = tokio::join!(
                PlayerSnapshot::load(session.source(), id1),
                PlayerSnapshot::load(session.source(), id2),
            );
            let comparison = view::comparison_view(&left, &right, level.unwrap_or(default_level));
            view::render_comparison(
                &comparison,
                (&left.display_name(), &right.display_name()),
                config.display.compare_table_width,
            )
        }
    };

    print!("{output}");
    Ok(())
}

async fn select<S: PlayerSource>(session: &mut PlayerSession<S>, id: i64) -> anyhow::Result<&PlayerSnapshot> {
    session
        .select(id)
        .await
        .with_context(|| format!("no data loaded for player {id}"))
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("fieldglass.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fieldglass=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
