use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uptl::config::{self, DEFAULT_HOST, DEFAULT_PORT, EXAMPLE_QUERIES};
use uptl::{FacilityTable, LocationResolver, ResolutionResult};

/// Usable Public Toilet Locator — nearest public toilet to a bus stand.
///
/// Understands free-text requests, picks the bus stand they mention, and
/// prints the closest public toilet with a walking-directions link.
///
/// Examples:
///   uptl "I need a washroom near Connaught Place"
///   uptl --data stops.csv Where is the nearest toilet to Karol Bagh
///   uptl --demo
///   uptl --serve --port 8501
#[derive(Debug, Parser)]
#[command(name = "uptl", version, about, long_about = None)]
struct Cli {
    /// Free-text query (words are joined with spaces).
    #[arg(
        index = 1,
        num_args = 1..,
        required_unless_present_any = ["demo", "serve"],
        conflicts_with_all = ["demo", "serve"]
    )]
    query: Vec<String>,

    /// CSV reference table. Defaults to ~/.uptl/facilities.csv, then the
    /// built-in sample.
    #[arg(long, env = "DATA_PATH")]
    data: Option<PathBuf>,

    /// Print the result as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Run the built-in example queries.
    #[arg(long, conflicts_with = "serve")]
    demo: bool,

    /// Start the web dashboard instead of answering a query.
    #[arg(long)]
    serve: bool,

    /// Dashboard bind address.
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Dashboard port.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    // ── Load reference table ────────────────────────────────────

    let source = config::data_source(cli.data.as_deref());
    let table = match FacilityTable::open(&source) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(%source, rows = table.len(), stops = table.stop_names().len(), "reference table loaded");

    let resolver = LocationResolver::new(table);

    // ── Dashboard ───────────────────────────────────────────────

    if cli.serve {
        return serve(resolver, &cli.host, cli.port);
    }

    // ── Demo run ────────────────────────────────────────────────

    if cli.demo {
        let results: Vec<(&str, ResolutionResult)> = EXAMPLE_QUERIES
            .iter()
            .map(|q| (*q, resolver.resolve(q)))
            .collect();

        for (query, result) in &results {
            eprintln!("Query: {}", query);
            eprintln!("Response: {}", result.message);
            if let Some(ref link) = result.maps_link {
                eprintln!("Directions: {}", link);
            }
            eprintln!("---");
        }
        if cli.json {
            let all: Vec<&ResolutionResult> = results.iter().map(|(_, r)| r).collect();
            if !print_json(&all) {
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    // ── Single query ────────────────────────────────────────────

    let query = cli.query.join(" ");
    if query.trim().is_empty() {
        Cli::command()
            .error(ErrorKind::InvalidValue, "the query must contain at least one word")
            .exit();
    }

    let result = resolver.resolve(&query);
    eprintln!("  {}", result.display_lines());
    if result.success {
        eprintln!("  {}", result.message);
    }

    if cli.json && !print_json(&result) {
        return ExitCode::FAILURE;
    }

    if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "uptl=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn serve(resolver: LocationResolver, host: &str, port: u16) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: Cannot start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(uptl::server::start(resolver, host, port)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: Cannot serve on {}:{}: {}", host, port, e);
            ExitCode::FAILURE
        }
    }
}

/// JSON to stdout. Returns false if encoding failed.
fn print_json<T: serde::Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            eprintln!("Error: Cannot encode result: {}", e);
            false
        }
    }
}
