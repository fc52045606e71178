//! Site configuration.
//!
//! An optional `config.toml` next to the catalog JSON tunes the build. All
//! keys are optional — user files are sparse overrides on top of stock
//! defaults, and unknown keys are rejected to catch typos early.
//!
//! ```toml
//! [listing]
//! page_size = 50        # Works per paginated catalog page
//!
//! [home]
//! max_works = 100       # Newest works shown on the home page
//!
//! [related]
//! limit = 12            # Related works shown on a work page
//!
//! [templates]
//! list_fallback = "index"  # Template used when "list" does not resolve
//!
//! [processing]
//! max_processes = 4     # Max parallel page writers (omit for auto = CPU cores)
//! ```

use crate::paginate::DEFAULT_PAGE_SIZE;
use crate::related::DEFAULT_RELATED_LIMIT;
use crate::render::TPL_LISTING;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build configuration loaded from `config.toml`.
///
/// All fields have sensible defaults; user files only specify overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Paginated catalog listing settings.
    pub listing: ListingConfig,
    /// Home page settings.
    pub home: HomeConfig,
    /// Related-works resolution settings.
    pub related: RelatedConfig,
    /// Template resolution settings.
    pub templates: TemplatesConfig,
    /// Parallel emission settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listing.page_size == 0 {
            return Err(ConfigError::Validation(
                "listing.page_size must be at least 1".into(),
            ));
        }
        if self.home.max_works == 0 {
            return Err(ConfigError::Validation(
                "home.max_works must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Paginated catalog listing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Works per page in the paginated full-catalog listing.
    pub page_size: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Home page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeConfig {
    /// Cap on the number of newest works shown on the home page. When the
    /// catalog exceeds it, the page carries a notice pointing at the full
    /// paginated listing.
    pub max_works: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self { max_works: 100 }
    }
}

/// Related-works resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelatedConfig {
    /// Maximum related works shown on a work page. Zero disables the section.
    pub limit: usize,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RELATED_LIMIT,
        }
    }
}

/// Template resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Template substituted when the key-index template (`list`) does not
    /// resolve. Set to an empty string to disable the fallback and make
    /// resolution failures fatal.
    pub list_fallback: Option<String>,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            list_fallback: Some(TPL_LISTING.to_string()),
        }
    }
}

/// Parallel emission settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page writers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load config from `config.toml` in the given directory.
///
/// A missing file means stock defaults. Present files are parsed as sparse
/// overrides, reject unknown keys, and are validated.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Workshelf Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file next to the catalog
# JSON (the --source file). Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Paginated catalog listing (pages/1/, pages/2/, ...)
# ---------------------------------------------------------------------------
[listing]
# Works per page.
page_size = 50

# ---------------------------------------------------------------------------
# Home page
# ---------------------------------------------------------------------------
[home]
# Newest works shown on the home page. When the catalog is larger, the page
# carries a notice pointing at the full paginated listing.
max_works = 100

# ---------------------------------------------------------------------------
# Related works
# ---------------------------------------------------------------------------
[related]
# Maximum related works shown on a work page. 0 disables the section.
limit = 12

# ---------------------------------------------------------------------------
# Templates
# ---------------------------------------------------------------------------
[templates]
# Template substituted when the key-index template ("list") does not resolve.
# Set to "" to make resolution failures fatal.
list_fallback = "index"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page writers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
