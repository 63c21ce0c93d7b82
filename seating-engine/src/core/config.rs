//! Engine configuration
//!
//! All values can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | ALLOC_TXN_TIMEOUT_MS | 30000 | Transaction budget for allocation runs |
//! | CANVAS_WIDTH | 1200 | Layout canvas width |
//! | CANVAS_HEIGHT | 800 | Layout canvas height |
//! | CANVAS_MARGIN | 40 | Canvas edge margin |
//! | MIN_TABLE_SPACING | 40 | Minimum gap between placed tables |
//! | OVERFLOW_ALLOWANCE | true | Admit a lone oversized party into an empty table |

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Transaction timeout for allocation runs (milliseconds).
    ///
    /// Allocation rewrites many rows at once, so it gets a materially
    /// longer budget than simple CRUD operations.
    pub txn_timeout_ms: u64,
    /// Layout canvas width
    pub canvas_width: f64,
    /// Layout canvas height
    pub canvas_height: f64,
    /// Margin kept clear around the canvas edges
    pub canvas_margin: f64,
    /// Minimum gap between placed tables
    pub min_table_spacing: f64,
    /// A single party larger than the table size still gets its own table
    pub overflow_allowance: bool,
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            txn_timeout_ms: env_parse("ALLOC_TXN_TIMEOUT_MS", defaults.txn_timeout_ms),
            canvas_width: env_parse("CANVAS_WIDTH", defaults.canvas_width),
            canvas_height: env_parse("CANVAS_HEIGHT", defaults.canvas_height),
            canvas_margin: env_parse("CANVAS_MARGIN", defaults.canvas_margin),
            min_table_spacing: env_parse("MIN_TABLE_SPACING", defaults.min_table_spacing),
            overflow_allowance: env_parse("OVERFLOW_ALLOWANCE", defaults.overflow_allowance),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            txn_timeout_ms: 30_000,
            canvas_width: 1200.0,
            canvas_height: 800.0,
            canvas_margin: 40.0,
            min_table_spacing: 40.0,
            overflow_allowance: true,
        }
    }
}
