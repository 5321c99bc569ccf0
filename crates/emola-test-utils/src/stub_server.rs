//! Minimal HTTP/1.1 server standing in for the gateway.
//!
//! Accepts connections on a loopback port, records each request and answers
//! with a canned reply. Enough HTTP to serve `reqwest`: one request per
//! connection, bodies sized by `Content-Length`.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Path the stub reports in [`StubServer::url`].
pub const STUB_PATH: &str = "/BCCSGateway/BCCSGateway";

/// How the stub answers a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubReply {
    /// Reply with a status and an XML body.
    Respond { status: u16, body: String },
    /// Read the request, then never answer.
    Stall,
}

/// A request captured by [`StubServer`].
#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    /// Request method.
    pub method: String,
    /// Request target.
    pub path: String,
    /// Headers in arrival order.
    pub headers: Vec<(String, String)>,
    /// Raw body.
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as UTF-8 text.
    pub fn body_str(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

struct StubState {
    reply: StubReply,
    requests: Vec<RecordedRequest>,
}

/// Loopback HTTP server that records requests and serves a canned reply.
///
/// The accept loop stops when the server is dropped.
pub struct StubServer {
    addr: SocketAddr,
    state: Arc<Mutex<StubState>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// Start a stub that answers every request with `status` and `body`.
    pub async fn start(status: u16, body: impl Into<String>) -> std::io::Result<Self> {
        Self::with_reply(StubReply::Respond {
            status,
            body: body.into(),
        })
        .await
    }

    /// Start a stub that never answers.
    pub async fn stalling() -> std::io::Result<Self> {
        Self::with_reply(StubReply::Stall).await
    }

    /// Start a stub with an explicit reply.
    pub async fn with_reply(reply: StubReply) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(StubState {
            reply,
            requests: Vec::new(),
        }));

        let accept_state = Arc::clone(&state);
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let state = Arc::clone(&accept_state);
                tokio::spawn(async move {
                    let _ = serve(stream, state).await;
                });
            }
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    /// Endpoint URL to point a client at.
    pub fn url(&self) -> String {
        format!("http://{}{}", self.addr, STUB_PATH)
    }

    /// Bound socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Replace the reply served to subsequent requests.
    pub fn set_reply(&self, reply: StubReply) {
        self.state.lock().unwrap().reply = reply;
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Get the number of requests received.
    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// Get the most recent request, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(mut stream: TcpStream, state: Arc<Mutex<StubState>>) -> std::io::Result<()> {
    let request = read_request(&mut stream).await?;

    let reply = {
        let mut state = state.lock().unwrap();
        state.requests.push(request);
        state.reply.clone()
    };

    match reply {
        StubReply::Respond { status, body } => {
            let head = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: text/xml; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                reason_phrase(status),
                body.len()
            );
            stream.write_all(head.as_bytes()).await?;
            stream.write_all(body.as_bytes()).await?;
            stream.shutdown().await
        }
        StubReply::Stall => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<RecordedRequest> {
    let mut buf = Vec::with_capacity(4096);
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut start = lines.next().unwrap_or_default().split_whitespace();
    let method = start.next().unwrap_or_default().to_string();
    let path = start.next().unwrap_or_default().to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Ok(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
