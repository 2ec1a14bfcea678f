//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

use json_join::fetch::Fetcher;
use json_join::join::{JoinState, JoinStatus};
use json_join::resilience::RetryPolicy;

/// What the mock backend does with one connection.
#[allow(dead_code)]
pub enum Reply {
    /// 200 with the given body.
    Body(String),
    /// Arbitrary status with the given body.
    Status(u16, String),
    /// Read the request, then never answer.
    Stall,
    /// Read the request, then close the socket without a response.
    Hangup,
}

/// A running mock backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    hits: Arc<AtomicU32>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn url(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{}", self.addr, path)).unwrap()
    }

    /// Connections accepted so far (one per attempt: pooling is disabled in `test_fetcher`).
    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a mock backend that always returns `body` with status 200.
#[allow(dead_code)]
pub async fn start_mock_backend(body: &'static str) -> MockBackend {
    start_programmable_backend(move |_| async move { Reply::Body(body.to_string()) }).await
}

/// Start a programmable mock backend. `f` receives the zero-based connection count.
pub async fn start_programmable_backend<F, Fut>(f: F) -> MockBackend
where
    F: Fn(u32) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Reply> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));
    let f = Arc::new(f);

    let counter = hits.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    let f = f.clone();
                    tokio::spawn(async move {
                        let reply = f(n).await;
                        serve(socket, reply).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockBackend { addr, hits }
}

async fn serve(mut socket: TcpStream, reply: Reply) {
    read_request_head(&mut socket).await;

    let (status, body) = match reply {
        Reply::Body(body) => (200, body),
        Reply::Status(status, body) => (status, body),
        Reply::Stall => {
            tokio::time::sleep(Duration::from_secs(60)).await;
            return;
        }
        Reply::Hangup => return,
    };

    let status_text = match status {
        200 => "200 OK",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request_head(socket: &mut TcpStream) {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 512];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

/// Fetcher that bypasses system proxies and never reuses connections.
pub fn test_fetcher(timeout: Duration) -> Fetcher {
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();
    Fetcher::with_client(client, timeout, RetryPolicy::once())
}

/// Poll `status` until it reports `expected` or `within` elapses.
#[allow(dead_code)]
pub async fn wait_for_state(status: &JoinStatus, expected: JoinState, within: Duration) -> bool {
    let poll = async {
        while status.state() != expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    };
    tokio::time::timeout(within, poll).await.is_ok()
}
