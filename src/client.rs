// ===============================
// src/client.rs
// ===============================
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::api::{History, Room};
use crate::config::{self, ClientConfig, Credentials};
use crate::error::Result;
use crate::metrics;
use crate::params::{compose, ParameterSet};
use crate::response::{validate, ResponseEnvelope};
use crate::transport::Dispatcher;

/// Entry point for every YunXin server call.
///
/// Holds only immutable state, so it can be shared across tasks (`Arc<YunxinClient>`).
/// Each [`call`](Self::call) signs with its own nonce/CurTime pair.
pub struct YunxinClient {
    creds: Credentials,
    dispatcher: Dispatcher,
}

impl YunxinClient {
    pub fn new(creds: Credentials, cfg: ClientConfig) -> Result<Self> {
        metrics::init();
        let dispatcher = Dispatcher::new(&cfg)?;
        info!(app_key = %creds.app_key(), base_url = %creds.base_url(), timeout = ?cfg.timeout, "yunxin client ready");
        Ok(Self { creds, dispatcher })
    }

    /// Build from `YUNXIN_*` env vars (see [`config::load`]).
    pub fn from_env() -> Result<Self> {
        let (creds, cfg) = config::load()?;
        Self::new(creds, cfg)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.creds
    }

    pub fn timeout(&self) -> Duration {
        self.dispatcher.timeout()
    }

    /// Compose -> dispatch -> validate. Required fields win over optional ones.
    pub async fn call(
        &self,
        action: &str,
        required: ParameterSet,
        optional: ParameterSet,
    ) -> Result<ResponseEnvelope> {
        let params = compose(required, optional);
        let started = Instant::now();

        let result = match self.dispatcher.dispatch(&self.creds, action, &params).await {
            Ok(raw) => validate(raw.status, &raw.body),
            Err(e) => Err(e),
        };

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind().as_str(),
        };
        metrics::record_call(action, outcome, elapsed_ms);

        if let Err(e) = &result {
            warn!(%action, outcome, error = %e, "yunxin call failed");
        }
        result
    }

    pub fn room(&self) -> Room<'_> {
        Room::new(self)
    }

    pub fn history(&self) -> History<'_> {
        History::new(self)
    }
}
