//! Configuration for loading and preprocessing event data.

/// Default batch size for Parquet and CSV reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Environment variable overriding the batch size
pub const BATCH_SIZE_ENV: &str = "PARQUET_BATCH_SIZE";

/// Helper function to get batch size from environment
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    std::env::var(BATCH_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|size| *size > 0)
}

/// Column layout of the composer nationality lookup table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationalityTableConfig {
    /// Column holding the composer URI or identifier
    pub composer_column: String,
    /// Column holding one nationality label
    pub nationality_column: String,
}

impl Default for NationalityTableConfig {
    fn default() -> Self {
        Self {
            composer_column: "composer".to_string(),
            nationality_column: "nationality".to_string(),
        }
    }
}

/// Configuration for dataset IO and preprocessing
#[derive(Debug, Clone)]
pub struct TrendsConfig {
    /// Rows per record batch when reading files
    pub batch_size: usize,
    /// Read the shards of a dataset directory in parallel
    pub parallel_load: bool,
    /// Show progress bars for long-running steps
    pub show_progress: bool,
    /// Field delimiter of raw CSV exports
    pub csv_delimiter: u8,
    /// Layout of the nationality lookup table
    pub nationality_table: NationalityTableConfig,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_load: true,
            show_progress: false,
            csv_delimiter: b',',
            nationality_table: NationalityTableConfig::default(),
        }
    }
}

impl TrendsConfig {
    /// Default configuration with the batch size taken from `PARQUET_BATCH_SIZE` when set
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            batch_size: get_batch_size().unwrap_or(DEFAULT_BATCH_SIZE),
            ..Self::default()
        }
    }
}
