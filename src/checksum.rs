// ===============================
// src/checksum.rs
// ===============================
//
// Header auth YunXin per request:
//   AppKey, Nonce, CurTime, CheckSum = sha1(AppSecret + Nonce + CurTime) (hex lowercase)
//
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use sha1::{Digest, Sha1};

use crate::config::Credentials;

pub const HEADER_APP_KEY: &str = "AppKey";
pub const HEADER_NONCE: &str = "Nonce";
pub const HEADER_CUR_TIME: &str = "CurTime";
pub const HEADER_CHECKSUM: &str = "CheckSum";

const NONCE_LEN: usize = 32;

/// Unix time dalam detik.
pub fn cur_time() -> i64 {
    Utc::now().timestamp()
}

pub fn gen_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

pub fn checksum(app_secret: &str, nonce: &str, cur_time: i64) -> String {
    let mut hasher = Sha1::new();
    hasher.update(app_secret.as_bytes());
    hasher.update(nonce.as_bytes());
    hasher.update(cur_time.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// One request's worth of signature material. Never reused across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub app_key: String,
    pub nonce: String,
    pub cur_time: i64,
    pub checksum: String,
}

impl AuthHeaders {
    pub fn generate(creds: &Credentials) -> Self {
        Self::with_parts(creds, gen_nonce(), cur_time())
    }

    pub fn with_parts(creds: &Credentials, nonce: String, cur_time: i64) -> Self {
        let checksum = checksum(creds.app_secret(), &nonce, cur_time);
        Self {
            app_key: creds.app_key().to_string(),
            nonce,
            cur_time,
            checksum,
        }
    }

    pub fn pairs(&self) -> [(&'static str, String); 4] {
        [
            (HEADER_APP_KEY, self.app_key.clone()),
            (HEADER_NONCE, self.nonce.clone()),
            (HEADER_CUR_TIME, self.cur_time.to_string()),
            (HEADER_CHECKSUM, self.checksum.clone()),
        ]
    }
}
