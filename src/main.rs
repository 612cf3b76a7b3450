// ===============================
// src/main.rs
// ===============================
/*
=============================================================================
Project : yunxin_rust — async client for the NetEase YunXin IM server API
Module  : main.rs
Version : 0.1.0
License : MIT (see LICENSE)

Summary : Signs every request (AppKey/Nonce/CurTime/CheckSum), posts
          form-encoded parameters to chatroom/history actions, classifies
          transport, decode and business errors, and exposes Prometheus
          counters per action.

(c) 2025 yunxin_rust contributors.
=============================================================================
*/
// contoh pemakaian (.env berisi YUNXIN_APP_KEY / YUNXIN_APP_SECRET):
//   cargo run -- room-info 66 --online
//   cargo run -- call chatroom/queryUserRoomIds.action -p creator=alice
//   cargo run -- session-history alice bob 1700000000000 1700000600000 --limit 20
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use yunxin_rust::{ParameterSet, ResponseEnvelope, YunxinClient};

#[derive(Parser, Debug)]
#[command(name = "yunxin_rust", about = "YunXin IM server API client")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Raw signed call: action path + key=value params
    Call {
        action: String,
        #[arg(short = 'p', long = "param", value_parser = parse_kv)]
        params: Vec<(String, String)>,
    },
    /// chatroom/get.action
    RoomInfo {
        roomid: i64,
        #[arg(long)]
        online: bool,
    },
    /// history/querySessionMsg.action
    SessionHistory {
        from: String,
        to: String,
        begintime: String,
        endtime: String,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
}

fn parse_kv(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {s:?}"))?;
    if k.is_empty() {
        return Err(format!("empty key in {s:?}"));
    }
    Ok((k.to_string(), v.to_string()))
}

#[tokio::main]
async fn main() -> ExitCode {
    // ---- Logging ----
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // ---- Config (.env / ENV) ----
    let client = match YunxinClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "config load failed");
            return ExitCode::from(2);
        }
    };

    let result = match cli.cmd {
        Cmd::Call { action, params } => {
            info!(%action, params = params.len(), "raw call");
            let required: ParameterSet = params.into_iter().collect();
            client.call(&action, required, ParameterSet::new()).await
        }
        Cmd::RoomInfo { roomid, online } => client.room().get(roomid, online).await,
        Cmd::SessionHistory {
            from,
            to,
            begintime,
            endtime,
            limit,
        } => {
            client
                .history()
                .query_session_msg(&from, &to, &begintime, &endtime, limit, ParameterSet::new())
                .await
        }
    };

    match result {
        Ok(env) => {
            print_envelope(&env);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(kind = e.kind().as_str(), error = %e, "call failed");
            ExitCode::FAILURE
        }
    }
}

fn print_envelope(env: &ResponseEnvelope) {
    match serde_json::to_string_pretty(env.as_map()) {
        Ok(s) => println!("{s}"),
        Err(e) => error!(?e, "pretty print failed"),
    }
}
