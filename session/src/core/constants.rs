// =============================================================================
// Application Identity
// =============================================================================

/// Binary name (for display)
pub const APP_NAME: &str = "ormer-session";

/// Crate target name (for log filters)
pub const APP_NAME_LOWER: &str = "ormer_session";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".ormer";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "ormer.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "ORMER_CONFIG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "ORMER_LOG";

// =============================================================================
// Environment Variables - Database
// =============================================================================

/// Environment variable for the SQL backend (mysql, sqlite, postgres)
pub const ENV_BACKEND: &str = "ORMER_BACKEND";

/// Environment variable for the table-name prefix
pub const ENV_TABLE_NAME_PREFIX: &str = "ORMER_TABLE_NAME_PREFIX";

// =============================================================================
// Database Defaults
// =============================================================================

/// Default table-name prefix (none)
pub const DEFAULT_TABLE_NAME_PREFIX: &str = "";

// =============================================================================
// Configuration Keys (ConfigSource lookups beyond the table-name prefix)
// =============================================================================

/// Key for the backend name
pub const KEY_BACKEND: &str = "backend";
