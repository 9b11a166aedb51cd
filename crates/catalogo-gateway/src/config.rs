//! Gateway configuration.

use std::path::PathBuf;

use catalogo_core::snapshot::DEFAULT_RESULTS_PATH;
use catalogo_core::{ParamDefaults, StoreLocation};
use clap::Parser;

/// Catalog HTTP/JSON gateway command line arguments.
#[derive(Debug, Parser)]
#[command(name = "catalogo-gateway")]
#[command(about = "HTTP/JSON gateway for the suppliers/parts catalog queries")]
#[command(version)]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Relation store DSN (`sqlite:<path>`, `sqlite::memory:` or a bare path).
    #[arg(long, env = "DB_DSN", default_value = "sqlite:database.sqlite")]
    pub database: String,

    /// File the snapshot bundle is written to.
    #[arg(long, env = "RESULTS_JSON_PATH", default_value = DEFAULT_RESULTS_PATH)]
    pub results_path: PathBuf,

    /// Serve the built-in demo dataset from an in-memory database.
    #[arg(long, default_value_t = false)]
    pub demo: bool,

    /// Default color for q3 and q7.
    #[arg(long, default_value = "rosso")]
    pub default_colore: String,

    /// Default supplier name for q4.
    #[arg(long, default_value = "Acme")]
    pub default_fornitore: String,

    /// Default first color for q8 and q9.
    #[arg(long, default_value = "rosso")]
    pub default_colore1: String,

    /// Default second color for q8 and q9.
    #[arg(long, default_value = "verde")]
    pub default_colore2: String,

    /// Default supplier threshold for q10 (never below 2).
    #[arg(long, default_value_t = 2)]
    pub default_min_fornitori: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Page size bounds for the `/api/qN` endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Page size when the caller gives none.
    pub default_page_size: usize,
    /// Largest page size a caller may request.
    pub max_page_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 50,
            max_page_size: 100,
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to listen on for HTTP requests.
    pub listen_addr: String,
    /// Relation store location.
    pub store: StoreLocation,
    /// Snapshot file path.
    pub results_path: PathBuf,
    /// Whether to serve the demo dataset.
    pub demo: bool,
    /// Defaults for omitted query parameters.
    pub defaults: ParamDefaults,
    /// Pagination bounds.
    pub pages: PageLimits,
}

impl From<&Args> for GatewayConfig {
    fn from(args: &Args) -> Self {
        let store = if args.demo {
            StoreLocation::Memory
        } else {
            StoreLocation::from_dsn(&args.database)
        };

        Self {
            listen_addr: args.listen.clone(),
            store,
            results_path: args.results_path.clone(),
            demo: args.demo,
            defaults: ParamDefaults {
                colore: args.default_colore.clone(),
                fornitore: args.default_fornitore.clone(),
                colore1: args.default_colore1.clone(),
                colore2: args.default_colore2.clone(),
                min_fornitori: args.default_min_fornitori,
            },
            pages: PageLimits::default(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            store: StoreLocation::from_dsn("sqlite:database.sqlite"),
            results_path: PathBuf::from(DEFAULT_RESULTS_PATH),
            demo: false,
            defaults: ParamDefaults::default(),
            pages: PageLimits::default(),
        }
    }
}
