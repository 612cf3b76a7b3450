// ===============================
// src/config.rs
// ===============================
/*
=============================================================================
Project : yunxin_rust — async client for the NetEase YunXin IM server API
Module  : config.rs
Version : 0.1.0
License : MIT (see LICENSE)

Summary : Signs every request (AppKey/Nonce/CurTime/CheckSum), posts
          form-encoded parameters to chatroom/history actions, classifies
          transport, decode and business errors, and exposes Prometheus
          counters per action.

(c) 2025 yunxin_rust contributors.
=============================================================================
*/
use std::env;
use std::fmt;
use std::time::Duration;

use dotenvy::dotenv;

use crate::error::{Result, YunxinError};

pub const DEFAULT_BASE_URL: &str = "https://api.netease.im/nimserver/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// AppKey + AppSecret + base URL. Immutable setelah dibuat.
#[derive(Clone)]
pub struct Credentials {
    app_key: String,
    app_secret: String,
    base_url: String,
}

impl Credentials {
    pub fn new(
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let app_key = app_key.into();
        let app_secret = app_secret.into();
        let base_url = base_url.into();

        if app_key.trim().is_empty() {
            return Err(YunxinError::Config("app key is empty".to_string()));
        }
        if app_secret.trim().is_empty() {
            return Err(YunxinError::Config("app secret is empty".to_string()));
        }
        if base_url.trim().is_empty() {
            return Err(YunxinError::Config("base url is empty".to_string()));
        }

        Ok(Self {
            app_key,
            app_secret,
            base_url,
        })
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn app_secret(&self) -> &str {
        &self.app_secret
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// AppSecret jangan sampai ke log
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_key", &self.app_key)
            .field("app_secret", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Per-client settings (bukan per-call).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(YunxinError::Config("timeout must be > 0".to_string()));
        }
        Ok(Self { timeout })
    }
}

/// Baca konfigurasi dari ENV (dan `.env` kalau ada).
///
/// ```text
/// YUNXIN_APP_KEY=...          (wajib)
/// YUNXIN_APP_SECRET=...       (wajib)
/// YUNXIN_BASE_URL=https://api.netease.im/nimserver/
/// YUNXIN_TIMEOUT_SECS=3
/// ```
pub fn load() -> Result<(Credentials, ClientConfig)> {
    let _ = dotenv();

    let app_key = env::var("YUNXIN_APP_KEY")
        .map_err(|_| YunxinError::Config("YUNXIN_APP_KEY missing".to_string()))?;
    let app_secret = env::var("YUNXIN_APP_SECRET")
        .map_err(|_| YunxinError::Config("YUNXIN_APP_SECRET missing".to_string()))?;
    let base_url = env::var("YUNXIN_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    let timeout_secs = match env::var("YUNXIN_TIMEOUT_SECS") {
        Ok(s) => s.trim().parse::<u64>().map_err(|e| {
            YunxinError::Config(format!("YUNXIN_TIMEOUT_SECS={s:?}: {e}"))
        })?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };

    let creds = Credentials::new(app_key, app_secret, base_url)?;
    let cfg = ClientConfig::with_timeout(Duration::from_secs(timeout_secs))?;
    Ok((creds, cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_reject_empty() {
        assert!(matches!(
            Credentials::new("", "s", DEFAULT_BASE_URL),
            Err(YunxinError::Config(_))
        ));
        assert!(matches!(
            Credentials::new("k", "  ", DEFAULT_BASE_URL),
            Err(YunxinError::Config(_))
        ));
        assert!(matches!(
            Credentials::new("k", "s", ""),
            Err(YunxinError::Config(_))
        ));
    }

    #[test]
    fn test_debug_hides_secret() {
        let c = Credentials::new("key", "topsecret", DEFAULT_BASE_URL).unwrap();
        let dbg = format!("{c:?}");
        assert!(dbg.contains("key"));
        assert!(!dbg.contains("topsecret"));
    }

    #[test]
    fn test_client_config_timeout() {
        assert_eq!(ClientConfig::default().timeout, Duration::from_secs(3));
        assert!(ClientConfig::with_timeout(Duration::ZERO).is_err());
        assert_eq!(
            ClientConfig::with_timeout(Duration::from_millis(250))
                .unwrap()
                .timeout,
            Duration::from_millis(250)
        );
    }
}
