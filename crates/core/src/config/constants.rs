//! Constants for Strand

/// Base URL used when building share links
pub const SHARE_BASE_URL: &str = "https://strand.app/";

/// Fragment key carrying an encoded pipeline in a share link
pub const SHARE_FRAGMENT_KEY: &str = "config=";

/// Share links longer than this are not emitted
pub const MAX_SHARE_URL_LEN: usize = 8000;

/// Upper bound on the inflated size of an encoded pipeline
pub const MAX_DECODED_BYTES: u64 = 16 * 1024 * 1024;

/// Marker written to nodes skipped after an earlier failure
pub const UPSTREAM_ERROR_MESSAGE: &str = "Upstream error";

/// Used when a transform fails without a message
pub const FALLBACK_ERROR_MESSAGE: &str = "Transform failed";

/// Default delay between the last trigger and a debounced run
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Storage path for saved pipelines
pub const SAVED_PIPELINES_FILE: &str = "strand-pipelines.json";

/// Directory (next to the executable) holding log files
pub const LOG_DIR: &str = "logs";
