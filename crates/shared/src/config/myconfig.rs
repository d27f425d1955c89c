use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub run_migrations: bool,
    pub port: u16,
    pub otlp_endpoint: Option<String>,
    pub otel_stdout: bool,
    pub cookie_secure: bool,
    /// Email and password of the administrator created at startup when missing.
    pub bootstrap_admin: Option<(String, String)>,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;

        let run_migrations_str = std::env::var("RUN_MIGRATIONS")
            .context("Missing environment variable: RUN_MIGRATIONS")?;

        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;

        let run_migrations = parse_bool("RUN_MIGRATIONS", &run_migrations_str)?;

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let otlp_endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let otel_stdout = match std::env::var("OTEL_STDOUT") {
            Ok(v) => parse_bool("OTEL_STDOUT", &v)?,
            Err(_) => false,
        };

        let cookie_secure = match std::env::var("COOKIE_SECURE") {
            Ok(v) => parse_bool("COOKIE_SECURE", &v)?,
            Err(_) => false,
        };

        let bootstrap_admin = admin_pair(
            std::env::var("ADMIN_EMAIL").ok(),
            std::env::var("ADMIN_PASSWORD").ok(),
        )?;

        Ok(Self {
            database_url,
            jwt_secret,
            run_migrations,
            port,
            otlp_endpoint,
            otel_stdout,
            cookie_secure,
            bootstrap_admin,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(anyhow!("{name} must be 'true' or 'false', got '{other}'")),
    }
}

fn admin_pair(email: Option<String>, password: Option<String>) -> Result<Option<(String, String)>> {
    let email = email.filter(|v| !v.trim().is_empty());
    let password = password.filter(|v| !v.is_empty());

    match (email, password) {
        (Some(email), Some(password)) => Ok(Some((email.trim().to_string(), password))),
        (None, None) => Ok(None),
        _ => Err(anyhow!(
            "ADMIN_EMAIL and ADMIN_PASSWORD must be set together"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{admin_pair, parse_bool};

    #[test]
    fn parse_bool_accepts_only_literals() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(!parse_bool("X", "false").unwrap());

        let err = parse_bool("RUN_MIGRATIONS", "yes").unwrap_err();
        assert!(err.to_string().contains("RUN_MIGRATIONS"));
    }

    #[test]
    fn admin_pair_needs_both_values() {
        assert!(admin_pair(None, None).unwrap().is_none());
        assert!(admin_pair(Some("  ".into()), None).unwrap().is_none());

        let pair = admin_pair(Some(" root@example.com ".into()), Some("changeme123".into()))
            .unwrap()
            .unwrap();
        assert_eq!(pair, ("root@example.com".to_string(), "changeme123".to_string()));

        let err = admin_pair(Some("root@example.com".into()), None).unwrap_err();
        assert!(err.to_string().contains("ADMIN_PASSWORD"));
    }
}
