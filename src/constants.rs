//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the BlogSphere REST API
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Posts requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Log file written in the working directory
pub const DEFAULT_LOG_FILE: &str = "blogsphere.log";

/// Directory under $HOME holding config and the session token
pub const CONFIG_DIR_NAME: &str = ".blogsphere";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Token file name inside the config directory
pub const TOKEN_FILE_NAME: &str = "token";

/// Pseudo category id of the "All Posts" tab
pub const ALL_CATEGORIES_KEY: &str = "all";

/// Maximum excerpt length in characters
pub const EXCERPT_MAX_CHARS: usize = 200;

/// Application name
pub const APP_NAME: &str = "Blog Sphere";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
