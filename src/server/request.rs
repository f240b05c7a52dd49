use may_minihttp::Request;
use std::collections::HashMap;
use tracing::debug;

/// Parsed HTTP request data consumed by the validation pipeline.
///
/// Header names are lowercased. `secure` reports whether the transport
/// itself is encrypted; a TLS-terminating proxy in front of the service
/// signals through `x-forwarded-proto` instead, which
/// [`effective_scheme`](ParsedRequest::effective_scheme) honors. Bodies are
/// never read: nothing in the pipeline inspects them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRequest {
    /// HTTP method as received (GET, POST, ...)
    pub method: String,
    /// Request path with the query string stripped
    pub path: String,
    /// HTTP headers (lowercase names)
    pub headers: HashMap<String, String>,
    /// Parsed query string parameters
    pub query_params: HashMap<String, String>,
    /// Whether the transport connection is encrypted
    pub secure: bool,
}

impl ParsedRequest {
    /// The scheme the request effectively arrived over.
    pub fn effective_scheme(&self) -> &'static str {
        if self.secure {
            return "https";
        }
        match self.header("x-forwarded-proto") {
            Some("https") => "https",
            _ => "http",
        }
    }

    /// Get a header by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Get a query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }
}

/// Parse query string parameters from a URL path.
///
/// Everything after `?` is split and percent-decoded; repeated names keep
/// the last value.
pub fn parse_query_params(path: &str) -> HashMap<String, String> {
    if let Some(pos) = path.find('?') {
        let query_str = &path[pos + 1..];
        url::form_urlencoded::parse(query_str.as_bytes())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    } else {
        HashMap::new()
    }
}

/// Extract method, path, headers and query parameters from a raw request.
///
/// `may_minihttp` serves plain TCP, so `secure` is false; encrypted
/// deployments terminate TLS upstream and set `x-forwarded-proto`.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let raw_path = req.path().to_string();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let query_params = parse_query_params(&raw_path);
    debug!(
        method = %method,
        path = %path,
        header_count = headers.len(),
        param_count = query_params.len(),
        "request parsed"
    );

    ParsedRequest {
        method,
        path,
        headers,
        query_params,
        secure: false,
    }
}
