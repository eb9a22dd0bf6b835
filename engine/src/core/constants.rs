// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "sideseat_filter";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "sideseat-filter.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "SIDESEAT_FILTER_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "SIDESEAT_FILTER_LOG";

/// Environment variable for the maximum number of filters per request
pub const ENV_MAX_FILTERS: &str = "SIDESEAT_FILTER_MAX_FILTERS";

/// Environment variable for the maximum filter JSON size in bytes
pub const ENV_MAX_FILTER_JSON_BYTES: &str = "SIDESEAT_FILTER_MAX_JSON_BYTES";

// =============================================================================
// Filter Limits
// =============================================================================

/// Maximum number of filters allowed
pub const DEFAULT_MAX_FILTERS: usize = 50;

/// Maximum size of filter JSON in bytes (64KB)
pub const DEFAULT_MAX_FILTER_JSON_BYTES: usize = 64 * 1024;
