/// Mailveil system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Placeholder inserted for redacted email addresses.
pub const EMAIL_PLACEHOLDER: &str = "[email]";

/// Placeholder inserted for redacted location entities.
pub const LOCATION_PLACEHOLDER: &str = "[location]";

/// Placeholder inserted for redacted organization entities.
pub const ORGANIZATION_PLACEHOLDER: &str = "[organization]";

/// Placeholder inserted for redacted miscellaneous entities.
pub const MISC_PLACEHOLDER: &str = "[misc]";

/// Placeholder inserted for redacted digit runs.
pub const NUMBER_PLACEHOLDER: &str = "[number]";

/// Universal fallback language when no per-language resource exists.
pub const DEFAULT_LANGUAGE: &str = "de";

/// Sentinel model identifier resolved through the per-language default map.
pub const DEFAULT_MODEL: &str = "default";
