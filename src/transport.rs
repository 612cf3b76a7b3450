// ===============================
// src/transport.rs
// ===============================
//
// Satu request = satu POST form-encoded ke baseUrl + actionPath.
// Tidak ada retry / backoff, timeout fixed per client.
//
use std::time::Duration;

use reqwest::header;
use tracing::{debug, warn};

use crate::checksum::AuthHeaders;
use crate::config::{ClientConfig, Credentials};
use crate::error::{Result, TransportError, YunxinError};
use crate::params::ParameterSet;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=utf-8";

/// Status + body as received, before any classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

pub struct Dispatcher {
    http: reqwest::Client,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(cfg: &ClientConfig) -> Result<Self> {
        // pool_max_idle_per_host(0): tiap call buka koneksi baru, tidak ada state antar call
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(YunxinError::Http)?;

        Ok(Self {
            http,
            timeout: cfg.timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn dispatch(
        &self,
        creds: &Credentials,
        action: &str,
        params: &ParameterSet,
    ) -> Result<RawResponse> {
        let url = build_url(creds.base_url(), action);
        let auth = AuthHeaders::generate(creds);

        let mut req = self
            .http
            .post(&url)
            .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE);
        for (name, value) in auth.pairs() {
            req = req.header(name, value);
        }

        debug!(%action, params = params.len(), cur_time = auth.cur_time, "POST (signed)");

        let rsp = req
            .body(params.to_form_body())
            .send()
            .await
            .map_err(|e| self.classify(action, e))?;

        let status = rsp.status().as_u16();
        let body = rsp.text().await.map_err(|e| self.classify(action, e))?;

        debug!(%action, status, bytes = body.len(), "response received");
        Ok(RawResponse { status, body })
    }

    fn classify(&self, action: &str, e: reqwest::Error) -> YunxinError {
        if e.is_timeout() {
            warn!(%action, timeout = ?self.timeout, "request timed out");
            TransportError::Timeout {
                after: self.timeout,
            }
            .into()
        } else if e.is_connect() || e.is_request() || e.is_body() {
            // refused / reset / ditutup di tengah jalan: semua kegagalan jaringan
            warn!(%action, error = %e, "connection failed");
            TransportError::Connect {
                reason: e.to_string(),
            }
            .into()
        } else {
            YunxinError::Http(e)
        }
    }
}

/// `base + action` dengan tepat satu '/' di sambungan.
pub fn build_url(base: &str, action: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        action.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::checksum;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn creds(base: &str) -> Credentials {
        Credentials::new("key", "secret", base).unwrap()
    }

    fn find_header_end(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n")
    }

    /// Accepts one connection, captures the raw request, answers with `response`.
    async fn capture_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = sock.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = find_header_end(&buf) {
                    let head = String::from_utf8_lossy(&buf[..pos]).to_ascii_lowercase();
                    let len = head
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if buf.len() >= pos + 4 + len {
                        break;
                    }
                }
            }
            sock.write_all(response.as_bytes()).await.unwrap();
            let _ = sock.shutdown().await;
            String::from_utf8_lossy(&buf).to_string()
        });
        (format!("http://{addr}/"), handle)
    }

    fn header_value<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
        raw.lines().find_map(|l| {
            let (k, v) = l.split_once(':')?;
            k.trim().eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }

    #[test]
    fn test_build_url_single_slash() {
        assert_eq!(
            build_url("https://api.netease.im/nimserver/", "chatroom/create.action"),
            "https://api.netease.im/nimserver/chatroom/create.action"
        );
        assert_eq!(
            build_url("https://api.netease.im/nimserver", "chatroom/create.action"),
            "https://api.netease.im/nimserver/chatroom/create.action"
        );
        assert_eq!(
            build_url("https://api.netease.im/nimserver/", "/history/queryTeamMsg.action"),
            "https://api.netease.im/nimserver/history/queryTeamMsg.action"
        );
    }

    #[tokio::test]
    async fn test_dispatch_wire_contract() {
        let (base, server) = capture_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 12\r\nConnection: close\r\n\r\n{\"code\":200}",
        )
        .await;
        let dispatcher = Dispatcher::new(&ClientConfig::default()).unwrap();
        let params = ParameterSet::new()
            .with("roomid", 1001i64)
            .with("name", "room one");

        let raw = dispatcher
            .dispatch(&creds(&base), "chatroom/update.action", &params)
            .await
            .unwrap();
        assert_eq!(raw.status, 200);
        assert_eq!(raw.body, r#"{"code":200}"#);

        let req = server.await.unwrap();
        assert!(req.starts_with("POST /chatroom/update.action HTTP/1.1"));
        assert_eq!(header_value(&req, "AppKey"), Some("key"));
        assert!(header_value(&req, "Content-Type")
            .unwrap()
            .starts_with("application/x-www-form-urlencoded"));

        let nonce = header_value(&req, "Nonce").unwrap();
        let cur_time: i64 = header_value(&req, "CurTime").unwrap().parse().unwrap();
        let sum = header_value(&req, "CheckSum").unwrap();
        assert_eq!(sum, checksum("secret", nonce, cur_time));
        assert!((cur_time - crate::checksum::cur_time()).abs() < 60);

        assert!(req.ends_with("roomid=1001&name=room%20one"));
    }

    #[tokio::test]
    async fn test_dispatch_passes_non_200_through() {
        let (base, server) = capture_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\noops",
        )
        .await;
        let dispatcher = Dispatcher::new(&ClientConfig::default()).unwrap();
        let raw = dispatcher
            .dispatch(&creds(&base), "chatroom/get.action", &ParameterSet::new())
            .await
            .unwrap();
        assert_eq!(raw.status, 500);
        assert_eq!(raw.body, "oops");
        let _ = server.await;
    }

    #[tokio::test]
    async fn test_dispatch_timeout_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // accept lalu diam saja, tidak pernah balas
        let server = tokio::spawn(async move {
            let (sock, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(sock);
        });

        let cfg = ClientConfig::with_timeout(Duration::from_millis(300)).unwrap();
        let dispatcher = Dispatcher::new(&cfg).unwrap();
        let started = Instant::now();
        let err = dispatcher
            .dispatch(
                &creds(&format!("http://{addr}/")),
                "chatroom/get.action",
                &ParameterSet::new(),
            )
            .await
            .unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(matches!(
            err,
            YunxinError::Transport(TransportError::Timeout { after }) if after == Duration::from_millis(300)
        ));
        server.abort();
    }

    #[tokio::test]
    async fn test_dispatch_dropped_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // baca request lalu tutup socket tanpa balasan
        let server = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut chunk = [0u8; 4096];
            let _ = sock.read(&mut chunk).await;
            drop(sock);
        });

        let dispatcher = Dispatcher::new(&ClientConfig::default()).unwrap();
        let err = dispatcher
            .dispatch(
                &creds(&format!("http://{addr}/")),
                "chatroom/get.action",
                &ParameterSet::new().with("roomid", 1i64),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Transport);
        assert!(matches!(
            err,
            YunxinError::Transport(TransportError::Connect { .. })
        ));
        let _ = server.await;
    }

    #[tokio::test]
    async fn test_dispatch_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dispatcher = Dispatcher::new(&ClientConfig::default()).unwrap();
        let err = dispatcher
            .dispatch(
                &creds(&format!("http://{addr}/")),
                "chatroom/get.action",
                &ParameterSet::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            YunxinError::Transport(TransportError::Connect { .. })
        ));
    }
}
