//! Integration Tests Module
//!
//! - `payments_flow`: TON dispatcher → wallet client → connector
//! - `facade_flow`: SDK composition, backend lookups, lifecycle
//!
//! Shared fixtures: a scriptable wallet connector and a minimal HTTP backend
//! bound to a random local port.

mod facade_flow;

use std::sync::{Arc, Mutex};

use tma_game_sdk::{
    async_trait, SdkError, TonConnectUiOptions, TransactionReceipt, TransferRequest,
    WalletConnector,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

// ============================================================================
// WALLET CONNECTOR
// ============================================================================

#[derive(Default)]
pub struct MockConnector {
    pub configured: Mutex<Vec<TonConnectUiOptions>>,
    pub sent: Mutex<Vec<TransferRequest>>,
    pub reject_with: Mutex<Option<String>>,
    pub released: Mutex<bool>,
    pub account: Mutex<Option<String>>,
}

impl MockConnector {
    pub fn rejecting(reason: &str) -> Self {
        let connector = Self::default();
        *connector.reject_with.lock().unwrap() = Some(reason.to_string());
        connector
    }

    pub fn sent(&self) -> Vec<TransferRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletConnector for MockConnector {
    async fn configure(&self, options: &TonConnectUiOptions) -> tma_game_sdk::Result<()> {
        self.configured.lock().unwrap().push(options.clone());
        Ok(())
    }

    async fn connect(&self) -> tma_game_sdk::Result<()> {
        *self.account.lock().unwrap() = Some("UQ_mock_player".to_string());
        Ok(())
    }

    async fn disconnect(&self) -> tma_game_sdk::Result<()> {
        *self.account.lock().unwrap() = None;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.account.lock().unwrap().is_some()
    }

    fn account_address(&self) -> Option<String> {
        self.account.lock().unwrap().clone()
    }

    async fn send_transaction(
        &self,
        request: &TransferRequest,
    ) -> tma_game_sdk::Result<TransactionReceipt> {
        let rejection = self.reject_with.lock().unwrap().clone();
        if let Some(reason) = rejection {
            return Err(SdkError::wallet(reason));
        }
        self.sent.lock().unwrap().push(request.clone());
        Ok(TransactionReceipt {
            boc: format!("boc-{}", self.sent.lock().unwrap().len()),
        })
    }

    async fn release(&self) {
        *self.released.lock().unwrap() = true;
    }
}

// ============================================================================
// HTTP BACKEND
// ============================================================================

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: String,
}

pub struct Backend {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Backend {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serve `handler`'s `(status, json body)` for every request until the test ends
pub async fn spawn_backend<F>(handler: F) -> Backend
where
    F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let handler = Arc::new(handler);

    let log = requests.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let handler = handler.clone();
            let log = log.clone();
            tokio::spawn(async move {
                let Some(request) = read_request(&mut socket).await else {
                    return;
                };
                let (status, body) = handler(&request);
                log.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    Backend {
        base_url: format!("http://{}", addr),
        requests,
    }
}

async fn read_request(socket: &mut TcpStream) -> Option<Recorded> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next()?.split_whitespace();
    Some(Recorded {
        method: request_line.next()?.to_string(),
        path: request_line.next()?.to_string(),
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    })
}
