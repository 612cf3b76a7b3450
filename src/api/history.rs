// ===============================
// src/api/history.rs
// ===============================
use crate::client::YunxinClient;
use crate::error::Result;
use crate::params::ParameterSet;
use crate::response::ResponseEnvelope;

/// `history/*.action` queries.
///
/// `begintime` / `endtime` are ms timestamps passed as strings, `limit` <= 100.
/// Optional: `reverse` (1 asc, 2 desc), `type` ("0,1,2"), and for team queries
/// `checkTeamValid`.
pub struct History<'a> {
    client: &'a YunxinClient,
}

impl<'a> History<'a> {
    pub(crate) fn new(client: &'a YunxinClient) -> Self {
        Self { client }
    }

    pub async fn query_session_msg(
        &self,
        from: &str,
        to: &str,
        begintime: &str,
        endtime: &str,
        limit: u32,
        options: ParameterSet,
    ) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("from", from)
            .with("to", to)
            .with("begintime", begintime)
            .with("endtime", endtime)
            .with("limit", limit);
        self.client
            .call("history/querySessionMsg.action", required, options)
            .await
    }

    pub async fn query_team_msg(
        &self,
        tid: &str,
        accid: &str,
        begintime: &str,
        endtime: &str,
        limit: u32,
        options: ParameterSet,
    ) -> Result<ResponseEnvelope> {
        let required = ParameterSet::new()
            .with("tid", tid)
            .with("accid", accid)
            .with("begintime", begintime)
            .with("endtime", endtime)
            .with("limit", limit);
        self.client
            .call("history/queryTeamMsg.action", required, options)
            .await
    }
}
