use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use campusnav_cli::output::{render_paths, render_route, render_routes, OutputFormat};
use campusnav_cli::walkway::WalkwayArg;
use campusnav_lib::{
    load_campus, AccessibilityPolicy, AssumeAccessible, Error as LibError, RouteEngine,
    SegmentAccessibility, DATA_PATH_ENV, DEFAULT_MAX_ROUTES,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Campus walking directions")]
struct Cli {
    /// Campus dataset JSON file.
    #[arg(long, global = true, env = DATA_PATH_ENV, default_value = "campus.json")]
    data: PathBuf,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest walking route between two locations.
    Route {
        /// Starting location id.
        #[arg(long = "from")]
        from: String,
        /// Destination location id.
        #[arg(long = "to")]
        to: String,
        /// Prefer wheelchair-accessible walkways.
        #[arg(long)]
        accessible: bool,
        /// How walkway accessibility is decided.
        #[arg(long, value_enum, default_value_t = PolicyArg::Assume)]
        policy: PolicyArg,
        /// Close the walkway between two locations before routing (FROM:TO).
        #[arg(long = "close", value_name = "FROM:TO")]
        close: Vec<WalkwayArg>,
        /// Open the walkway between two locations before routing (FROM:TO).
        #[arg(long = "open", value_name = "FROM:TO")]
        open: Vec<WalkwayArg>,
    },
    /// List candidate routes between two locations.
    Alternatives {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        /// Maximum number of routes to return.
        #[arg(long = "max", default_value_t = DEFAULT_MAX_ROUTES)]
        max: usize,
    },
    /// List walkways and their status.
    Paths,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Treat every walkway as accessible.
    Assume,
    /// Use each walkway's `isAccessible` flag.
    Segments,
}

impl PolicyArg {
    fn policy(self) -> Arc<dyn AccessibilityPolicy> {
        match self {
            PolicyArg::Assume => Arc::new(AssumeAccessible),
            PolicyArg::Segments => Arc::new(SegmentAccessibility),
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let output = match cli.command {
        Command::Route {
            from,
            to,
            accessible,
            policy,
            close,
            open,
        } => {
            let mut engine = load_engine(&cli.data, policy.policy())?;
            apply_walkways(&mut engine, &close, false)?;
            apply_walkways(&mut engine, &open, true)?;
            ensure_locations(&engine, &[from.as_str(), to.as_str()])?;

            let route = engine
                .find_shortest_path(&from, &to, accessible)
                .ok_or_else(|| LibError::RouteNotFound {
                    start: from.clone(),
                    goal: to.clone(),
                })?;
            render_route(&engine, &route, cli.format)?
        }
        Command::Alternatives { from, to, max } => {
            let engine = load_engine(&cli.data, Arc::new(AssumeAccessible))?;
            ensure_locations(&engine, &[from.as_str(), to.as_str()])?;
            let routes = engine.find_alternative_routes(&from, &to, max);
            render_routes(&engine, &routes, cli.format)?
        }
        Command::Paths => {
            let engine = load_engine(&cli.data, Arc::new(AssumeAccessible))?;
            render_paths(engine.segments(), cli.format)?
        }
    };

    print!("{}", output);
    Ok(())
}

fn load_engine(path: &Path, policy: Arc<dyn AccessibilityPolicy>) -> Result<RouteEngine> {
    let campus = load_campus(path)
        .with_context(|| format!("failed to load campus dataset from {}", path.display()))?;
    RouteEngine::from_campus_with_policy(&campus, policy)
        .with_context(|| format!("invalid campus dataset in {}", path.display()))
}

fn apply_walkways(engine: &mut RouteEngine, walkways: &[WalkwayArg], available: bool) -> Result<()> {
    for walkway in walkways {
        if !engine.update_path_status(&walkway.from, &walkway.to, available) {
            bail!("no walkway connects '{}' and '{}'", walkway.from, walkway.to);
        }
    }
    Ok(())
}

fn ensure_locations(engine: &RouteEngine, ids: &[&str]) -> Result<()> {
    for &id in ids {
        if !engine.contains(id) {
            return Err(LibError::UnknownLocation {
                id: id.to_string(),
                suggestions: engine.suggest_locations(id, 3),
            }
            .into());
        }
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
