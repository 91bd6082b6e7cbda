use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::parse("http://localhost:3000,http://localhost:5173")
    }
}

impl CorsConfig {
    /// Reads the comma separated `ALLOWED_ORIGINS` list.
    pub fn from_env() -> Self {
        match env::var("ALLOWED_ORIGINS") {
            Ok(origins) => Self::parse(&origins),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(origins: &str) -> Self {
        let allowed_origins = origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}
