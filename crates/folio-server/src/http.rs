//! Minimal HTTP/1.1 request parsing and response encoding.
//!
//! Enough for a single-route JSON API and static files: request line,
//! headers, `Content-Length` bodies. No chunked uploads, no keep-alive.

use folio_types::error::{FolioError, Result};

/// Maximum request body size (8 MB).
pub const MAX_BODY_SIZE: usize = 8 * 1024 * 1024;

/// Maximum size of the request line plus headers.
pub const MAX_HEADER_SIZE: usize = 16 * 1024;

/// A parsed HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Upper-case method (`GET`, `POST`, ...).
    pub method: String,
    /// Path without the query string.
    pub path: String,
    pub query: Option<String>,
    /// Headers as (lower-cased name, value) pairs.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Parse a request from the bytes received so far.
///
/// Returns `Ok(None)` while the headers or the declared body are still
/// incomplete.
pub fn parse_request(data: &[u8]) -> Result<Option<HttpRequest>> {
    let Some(header_end) = find_subsequence(data, b"\r\n\r\n") else {
        if data.len() > MAX_HEADER_SIZE {
            return Err(FolioError::Http("request headers too large".to_string()));
        }
        return Ok(None);
    };

    let header_str = std::str::from_utf8(&data[..header_end])
        .map_err(|_| FolioError::Http("non-UTF-8 headers".to_string()))?;
    let mut lines = header_str.split("\r\n");

    // Request line: "METHOD TARGET HTTP/1.x"
    let request_line = lines
        .next()
        .ok_or_else(|| FolioError::Http("empty request".to_string()))?;
    let mut parts = request_line.split(' ');
    let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FolioError::Http(format!("bad request line: {request_line}")));
    };
    if !version.starts_with("HTTP/1.") || method.is_empty() || !target.starts_with('/') {
        return Err(FolioError::Http(format!("bad request line: {request_line}")));
    }
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (target.to_string(), None),
    };

    let mut headers = Vec::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_lowercase(), value.trim().to_string()));
        }
    }

    let body_start = header_end + 4;
    let len = match find_header(&headers, "content-length") {
        Some(cl) => cl
            .parse::<usize>()
            .map_err(|_| FolioError::Http("bad Content-Length".to_string()))?,
        None => 0,
    };
    if len > MAX_BODY_SIZE {
        return Err(FolioError::Http("request body exceeds 8 MB limit".to_string()));
    }
    let available = data.len() - body_start;
    if available < len {
        return Ok(None);
    }

    Ok(Some(HttpRequest {
        method: method.to_ascii_uppercase(),
        path,
        query,
        headers,
        body: data[body_start..body_start + len].to_vec(),
    }))
}

/// A response ready to be written to the socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: content_type.to_string(),
            body,
        }
    }

    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, "application/json", value.to_string().into_bytes())
    }

    pub fn text(status: u16, text: &str) -> Self {
        Self::new(status, "text/plain; charset=utf-8", text.as_bytes().to_vec())
    }

    /// Parse the body back as JSON.
    pub fn json_body(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Encode status line, headers and body. With `include_body` false
    /// (for `HEAD`) the headers still announce the full length.
    pub fn to_bytes(&self, include_body: bool) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\n\
             Content-Type: {}\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n",
            self.status,
            reason_phrase(self.status),
            self.content_type,
            self.body.len(),
        );
        let mut out = head.into_bytes();
        if include_body {
            out.extend_from_slice(&self.body);
        }
        out
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Case-insensitive header lookup.
pub fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    let name_lower = name.to_lowercase();
    headers
        .iter()
        .find(|(k, _)| k == &name_lower)
        .map(|(_, v)| v.as_str())
}

/// Find the first occurrence of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
