use std::env;

/// Environment-derived configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: String,
    /// Clerk JWKS endpoint, e.g. `https://PROJECT.clerk.accounts.dev/.well-known/jwks.json`.
    pub clerk_jwks_url: String,
    /// The single back-office admin is identified by email.
    pub admin_email: String,
    pub paychangu_api_key: String,
    pub paychangu_base_url: String,
    /// Public base URL of this service, used for the payment callback.
    pub backend_url: String,
}

impl Config {
    /// Read all required variables, panicking with a named message when one
    /// is missing. Called once from `main` after `dotenv()`.
    pub fn from_env() -> Self {
        Self {
            database_url: require("DATABASE_URL"),
            port: env::var("PORT").unwrap_or_else(|_| "8080".to_string()),
            clerk_jwks_url: require("CLERK_JWKS_URL"),
            admin_email: require("ADMIN_EMAIL"),
            paychangu_api_key: require("PAYCHANGU_API_KEY"),
            paychangu_base_url: env::var("PAYCHANGU_BASE_URL")
                .unwrap_or_else(|_| "https://api.paychangu.com/v1".to_string()),
            backend_url: require("BACKEND_URL"),
        }
    }
}

fn require(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("{name} must be set"))
}
