use std::env;

/// How many wrong OTP entries a user gets, how long a code lives, and how
/// long they must wait between resends. `max_verify_attempts: None` disables
/// the lockout entirely.
#[derive(Debug, Clone)]
pub struct OtpPolicy {
    pub max_verify_attempts: Option<u32>,
    pub code_ttl_secs: i64,
    pub resend_cooldown_secs: i64,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        OtpPolicy {
            max_verify_attempts: Some(5),
            code_ttl_secs: 300,
            resend_cooldown_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// No network; the OTP is the fixed demo sentinel.
    Demo,
    /// External phone-auth provider, numbers dialed as `{country_code}{mobile}`.
    Phone,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub mode: AuthMode,
    pub country_code: String,
    pub otp: OtpPolicy,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let mode = match env::var("AUTH_MODE").as_deref() {
            Ok("phone") => AuthMode::Phone,
            Ok("demo") | Err(_) => AuthMode::Demo,
            Ok(other) => {
                log::warn!("unknown AUTH_MODE '{other}', falling back to demo");
                AuthMode::Demo
            }
        };

        let defaults = OtpPolicy::default();
        let otp = OtpPolicy {
            max_verify_attempts: match env_i64("OTP_MAX_ATTEMPTS") {
                Some(0) => None,
                Some(n) if n > 0 => Some(n as u32),
                _ => defaults.max_verify_attempts,
            },
            code_ttl_secs: env_i64("OTP_CODE_TTL_SECS").unwrap_or(defaults.code_ttl_secs),
            resend_cooldown_secs: env_i64("OTP_RESEND_COOLDOWN_SECS")
                .unwrap_or(defaults.resend_cooldown_secs),
        };

        let country_code = env::var("COUNTRY_CODE").unwrap_or_else(|_| "+91".to_string());

        AppConfig {
            api_base_url,
            auth: AuthConfig { mode, country_code, otp },
        }
    }
}

fn env_i64(key: &str) -> Option<i64> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("invalid {key} value '{raw}', using default");
            None
        }
    }
}
