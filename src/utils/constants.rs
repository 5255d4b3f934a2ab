/// Backend base URL.
/// Set at compile time:
/// - Development: http://localhost:5000 (default)
/// - Production: via the BACKEND_URL env var (or `.env`, see build.rs)
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:5000",
};

// Local storage keys
pub const STORAGE_KEY_ADMIN_MEDIUM: &str = "adminSelectedMedium";
pub const STORAGE_KEY_ADMIN_YEAR: &str = "adminSelectedYear";
pub const STORAGE_KEY_PARENT_TOKEN: &str = "parentToken";

// Endpoints
pub const ADMIN_VERIFY_PATH: &str = "/api/admin/verify";
pub const ADMIN_LOGIN_PATH: &str = "/api/admin/login";
pub const ADMIN_LOGOUT_PATH: &str = "/api/admin/logout";
pub const PARENT_VERIFY_PATH: &str = "/api/parents/verify";
pub const PARENT_LOGIN_PATH: &str = "/api/parents/login";
pub const PARENT_LOGOUT_PATH: &str = "/api/parents/logout";
pub const PAYMENT_SCREENSHOT_PATH: &str = "/api/payments/upload-screenshot";

/// Academic years the admin dashboard may be scoped to (inclusive).
pub const MIN_ACADEMIC_YEAR: i32 = 2020;
pub const MAX_ACADEMIC_YEAR: i32 = 2030;

/// Upper bound for payment screenshots (5 MB).
pub const MAX_SCREENSHOT_BYTES: usize = 5 * 1024 * 1024;
