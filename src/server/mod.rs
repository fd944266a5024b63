use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};

use tracing::{info, warn};

pub mod api;
pub mod routes;

pub use api::AppState;

const MAX_REQUEST_BYTES: usize = 1024 * 1024;

pub fn run_server(bind_addr: &str, state: &AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    info!(bind_addr, species = state.species.len(), "pogodex server listening");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream, state) {
                    warn!(error = %err, "request error");
                }
            }
            Err(err) => warn!(error = %err, "connection failed"),
        }
    }

    Ok(())
}

fn handle_connection(stream: &mut TcpStream, state: &AppState) -> std::io::Result<()> {
    let raw = read_request(stream)?;
    if raw.is_empty() {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&raw);
    let mut lines = request.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let body = header_end(&raw)
        .map(|end| String::from_utf8_lossy(&raw[end..]))
        .unwrap_or_default();

    let response = routes::route_request(state, method, path, &body);
    info!(method, path, status = response.status_code, "request handled");
    stream.write_all(response.to_http_string().as_bytes())?;
    stream.flush()?;
    Ok(())
}

/// Reads the head and then keeps reading until `Content-Length` body bytes have arrived,
/// the peer closes, or the request exceeds [MAX_REQUEST_BYTES].
fn read_request<R: Read>(reader: &mut R) -> std::io::Result<Vec<u8>> {
    let mut raw = Vec::new();
    let mut chunk = [0_u8; 16_384];
    loop {
        if let Some(end) = header_end(&raw) {
            let wanted = end + content_length(&raw[..end]);
            if raw.len() >= wanted {
                raw.truncate(wanted);
                return Ok(raw);
            }
        }
        if raw.len() >= MAX_REQUEST_BYTES {
            return Ok(raw);
        }
        let bytes_read = reader.read(&mut chunk)?;
        if bytes_read == 0 {
            return Ok(raw);
        }
        raw.extend_from_slice(&chunk[..bytes_read]);
    }
}

/// Offset of the first body byte, after the blank line that ends the head.
fn header_end(raw: &[u8]) -> Option<usize> {
    if let Some(pos) = raw.windows(4).position(|window| window == b"\r\n\r\n") {
        return Some(pos + 4);
    }
    raw.windows(2)
        .position(|window| window == b"\n\n")
        .map(|pos| pos + 2)
}

fn content_length(head: &[u8]) -> usize {
    String::from_utf8_lossy(head)
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}
