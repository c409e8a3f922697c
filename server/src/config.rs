use anyhow::{anyhow, Context, Result};
use platform_authn::{AuthConfig, DEFAULT_TOKEN_TTL_MINUTES};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    /// Registrations whose email ends in `@<domain>` become HR accounts.
    pub hr_email_domain: String,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET missing")?;
        if jwt_secret.trim().len() < 16 {
            return Err(anyhow!("JWT_SECRET must be at least 16 characters"));
        }

        let token_ttl_minutes = match std::env::var("TOKEN_TTL_MINUTES") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| anyhow!("invalid TOKEN_TTL_MINUTES {}", raw))?,
            Err(_) => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let hr_email_domain = std::env::var("HR_EMAIL_DOMAIN")
            .unwrap_or_else(|_| "company.ba".into())
            .trim_start_matches('@')
            .to_string();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Ok(Self {
            jwt_secret,
            token_ttl_minutes,
            hr_email_domain,
            cors_allowed_origins,
        })
    }

    pub fn auth(&self) -> AuthConfig {
        AuthConfig::new(self.jwt_secret.clone()).with_ttl_minutes(self.token_ttl_minutes)
    }

    pub fn is_hr_email(&self, email: &str) -> bool {
        email.ends_with(&format!("@{}", self.hr_email_domain))
    }
}
