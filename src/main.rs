use clap::Parser;
use medimap::controller::{SearchController, SearchTrigger};
use medimap::geo::Coordinate;
use medimap::location::{LocationProvider, ResolvedOrigin};
use medimap::map::ascii::AsciiBackend;
use medimap::map::MapView;
use medimap::poi::{
    discover::DEFAULT_LIMIT, BackendClient, DiscoverClient, PoiError, PointOfInterest,
    SearchPoints,
};
use medimap::server;

/// MediMap — find hospitals near a location.
///
/// Resolves an origin from a free-text query, device (IP) geolocation, or
/// raw coordinates, then fetches and maps nearby hospitals.
///
/// Examples:
///   medimap "San Francisco"
///   medimap --auto
///   medimap --lat 37.7749 --lon -122.4194
///   medimap "Berlin" --backend http://localhost:8000
///   medimap --serve --port 8000
#[derive(Parser)]
#[command(name = "medimap", version, about, long_about = None)]
struct Cli {
    /// Address or place to search near (positional).
    #[arg(index = 1)]
    query: Option<String>,

    /// Auto-detect the origin via device (IP) geolocation.
    #[arg(long, short = 'a')]
    auto: bool,

    /// Latitude (-90 to 90). Manual origin.
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude (-180 to 180). Manual origin.
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Fetch hospitals through a running MediMap backend instead of the
    /// upstream discover API (e.g. http://localhost:8000).
    #[arg(long)]
    backend: Option<String>,

    /// HERE API key for the discover API. Falls back to $HERE_API_KEY.
    #[arg(long)]
    api_key: Option<String>,

    /// Maximum number of hospitals to fetch.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: u8,

    /// Run the backend server instead of a one-shot search.
    #[arg(long)]
    serve: bool,

    /// Server bind host.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server bind port.
    #[arg(long, default_value_t = 8000)]
    port: u16,
}

/// Either of the two ways to reach the hospital search.
enum PoiSource {
    Backend(BackendClient),
    Discover(DiscoverClient),
}

impl SearchPoints for PoiSource {
    async fn search(&self, center: Coordinate) -> Result<Vec<PointOfInterest>, PoiError> {
        match self {
            Self::Backend(c) => c.search(center).await,
            Self::Discover(c) => c.search(center).await,
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let http = reqwest::Client::new();

    if cli.serve {
        let discover = DiscoverClient::new(http, require_api_key(&cli), cli.limit);
        server::start(&cli.host, cli.port, discover).await;
        return;
    }

    let poi = match &cli.backend {
        Some(base_url) => PoiSource::Backend(BackendClient::new(http.clone(), base_url.clone())),
        None => PoiSource::Discover(DiscoverClient::new(
            http.clone(),
            require_api_key(&cli),
            cli.limit,
        )),
    };

    let provider = LocationProvider::new(http);
    let map = MapView::new(AsciiBackend::new());
    let mut controller = SearchController::new(provider, poi, map);

    let trigger = search_trigger(&cli);
    let report = match controller.run(trigger).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // ── Origin banner and map viewport ──────────────────────────

    eprintln!(
        "  \u{1F4CD} {} ({}) — {}",
        report.origin.label, report.origin.source, report.origin.coordinate
    );
    eprint!("{}", controller.map().backend().render());

    // ── Result list ─────────────────────────────────────────────

    if report.points.is_empty() {
        if report.poi_error.is_some() {
            eprintln!("  Hospital lookup unavailable; showing origin only.");
        } else {
            eprintln!("  No hospitals found nearby.");
        }
    } else {
        let mut letter = b'A';
        for point in &report.points {
            match point.position {
                Some(position) => {
                    eprintln!("  {} {} — {}", letter as char, point.title, position);
                    letter += 1;
                }
                None => eprintln!("  · {} (no position)", point.title),
            }
        }
    }

    // JSON report to stdout
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
}

fn search_trigger(cli: &Cli) -> SearchTrigger {
    // Priority: positional query > --auto > --lat/--lon > error

    if let Some(ref query) = cli.query {
        if query.trim().is_empty() {
            eprintln!("Error: Please enter a location to search.");
            std::process::exit(1);
        }
        return SearchTrigger::Query(query.clone());
    }

    if cli.auto {
        return SearchTrigger::Device;
    }

    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        match Coordinate::new(lat, lon) {
            Ok(coordinate) => return SearchTrigger::Manual(ResolvedOrigin::manual(coordinate)),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    eprintln!("Error: No location specified.");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  medimap \"San Francisco\"");
    eprintln!("  medimap --auto");
    eprintln!("  medimap --lat 37.7749 --lon -122.4194");
    eprintln!("  medimap --serve --port 8000");
    std::process::exit(1);
}

fn require_api_key(cli: &Cli) -> String {
    cli.api_key
        .clone()
        .or_else(|| std::env::var("HERE_API_KEY").ok())
        .unwrap_or_else(|| {
            eprintln!("Error: HERE API key required (--api-key or $HERE_API_KEY).");
            std::process::exit(1);
        })
}
