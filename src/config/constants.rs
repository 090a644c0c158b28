use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const API_URL_ENV: &str = "GPULAB_API_URL";

pub const CONFIG_DIR_NAME: &str = "gpulab";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const TOKEN_FILE_NAME: &str = "tokens.json";

// Token store keys
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

// Portal endpoints
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const CURRENT_USER_PATH: &str = "/api/auth/me";
pub const RESOURCE_GROUPS_PATH: &str = "/api/resource-groups";
pub const IMAGES_PATH: &str = "/api/images";
pub const GROUPS_PATH: &str = "/api/groups";
pub const REQUESTS_PATH: &str = "/api/requests";
pub const MY_REQUESTS_PATH: &str = "/api/requests/my";
pub const CHANGE_REQUESTS_PATH: &str = "/api/change-requests";
pub const MY_CHANGE_REQUESTS_PATH: &str = "/api/change-requests/my";
pub const ADMIN_REQUESTS_PATH: &str = "/api/admin/requests";
pub const ADMIN_CHANGE_REQUESTS_PATH: &str = "/api/admin/change-requests";

// Validation bounds
pub const MIN_VOLUME_SIZE_GIB: u32 = 10;
pub const MAX_VOLUME_SIZE_GIB: u32 = 2000;
pub const MIN_JUSTIFICATION_CHARS: usize = 10;
pub const MIN_PORT: u16 = 1;
pub const MAX_PORT: u16 = 65535;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn timeout_duration(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}

pub fn change_request_path(request_id: i64) -> String {
    format!("{}/{}", CHANGE_REQUESTS_PATH, request_id)
}

/// Label used when a port is added without a purpose.
pub fn default_port_purpose(port: u16) -> String {
    format!("포트 {}", port)
}
