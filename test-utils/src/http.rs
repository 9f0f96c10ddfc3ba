//! Local HTTP endpoints for exercising real clients against failure modes.
//!
//! Each helper binds `127.0.0.1` on an ephemeral port and returns the base URL. The
//! serving tasks live on the test's runtime and end with it.

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::error::TestError;

/// Returns a base URL on which nothing is listening.
pub async fn closed_endpoint() -> Result<String, TestError> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    Ok(base_url(addr))
}

/// Returns a base URL that accepts connections but never answers.
pub async fn silent_endpoint() -> Result<String, TestError> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            open.push(stream);
        }
    });

    Ok(base_url(addr))
}

/// Returns a base URL answering every request with `status` and `body`.
///
/// # Arguments
/// - `status` - HTTP status code of every response
/// - `body` - Response body, sent with a matching `Content-Length`
pub async fn fixed_response_endpoint(status: u16, body: String) -> Result<String, TestError> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let body = body.clone();
            tokio::spawn(async move {
                let _ = respond(stream, status, &body).await;
            });
        }
    });

    Ok(base_url(addr))
}

fn base_url(addr: SocketAddr) -> String {
    format!("http://{}", addr)
}

async fn respond(mut stream: TcpStream, status: u16, body: &str) -> std::io::Result<()> {
    read_request(&mut stream).await?;

    let response = format!(
        "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// Consumes one request, headers and body, so closing the socket does not reset it.
async fn read_request(stream: &mut TcpStream) -> std::io::Result<()> {
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];

    let header_end = loop {
        let read = stream.read(&mut buf).await?;
        if read == 0 {
            return Ok(());
        }
        request.extend_from_slice(&buf[..read]);

        if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&request[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut received = request.len() - header_end;
    while received < content_length {
        let read = stream.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        received += read;
    }

    Ok(())
}
