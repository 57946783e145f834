use std::path::PathBuf;

/// Identity reported in the `Server` header of every response.
pub const SERVER_IDENT: &str = "staticd/0.1.0";

/// Canned 404 page. 142 bytes.
pub const PAGE_NOT_FOUND: &str = "<!doctype html>\r\n  <head>\r\n    <title>HTTP 404 - NOT FOUND</title>\r\n  </head>\r\n  <body>\r\n    <h1>HTTP 404 - NOT FOUND</h1>\r\n  </body>\r\n</html>";

/// Canned 301 page. 158 bytes.
pub const PAGE_MOVED: &str = "<!doctype html>\r\n  <head>\r\n    <title>HTTP 301 - MOVED PERMANENTLY</title>\r\n  </head>\r\n  <body>\r\n    <h1>HTTP 301 - MOVED PERMANENTLY</h1>\r\n  </body>\r\n</html>";

/// Canned 501 page. 168 bytes.
pub const PAGE_NOT_IMPLEMENTED: &str = "<!doctype html>\r\n  <head>\r\n    <title>HTTP 501 - METHOD NOT IMPLEMENTED</title>\r\n  </head>\r\n  <body>\r\n    <h1>HTTP 501 - METHOD NOT IMPLEMENTED</h1>\r\n  </body>\r\n</html>";

/// HTTP status codes the server emits.
///
/// - `Ok` (200): File or directory listing served
/// - `MovedPermanently` (301): Directory requested without a trailing slash
/// - `NotFound` (404): No file behind the resolved path
/// - `NotImplemented` (501): Malformed request or a method other than GET
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 301 Moved Permanently
    MovedPermanently,
    /// 404 Not Found
    NotFound,
    /// 501 Method Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::MovedPermanently => 301,
            StatusCode::NotFound => 404,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the reason phrase written in the status line.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Method Not Implemented");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::MovedPermanently => "Moved Permanently",
            StatusCode::NotFound => "Not Found",
            StatusCode::NotImplemented => "Method Not Implemented",
        }
    }
}

/// Response body: either in-memory bytes or a file streamed at write time.
///
/// For file bodies the length comes from a metadata query taken at response
/// construction; the writer streams at most that many bytes.
#[derive(Debug)]
pub enum Body {
    /// Body held in memory (canned pages, generated listings)
    Bytes(Vec<u8>),
    /// Body streamed from a file in fixed-size chunks
    File {
        /// Resolved filesystem path to stream from
        path: PathBuf,
        /// File size in bytes at resolution time
        len: u64,
    },
}

impl Body {
    /// Byte length the `Content-Length` header declares.
    pub fn len(&self) -> u64 {
        match self {
            Body::Bytes(bytes) => bytes.len() as u64,
            Body::File { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers keep their insertion order, so a given target always serializes
/// to the same bytes.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in the order they are written
    pub headers: Vec<(String, String)>,
    /// Response body
    pub body: Body,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/html")
///     .body(Body::Bytes(page.into_bytes()))
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Body,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Body::Bytes(Vec::new()),
        }
    }

    /// Appends a header. Order is preserved on the wire.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// Adds a Content-Length header from the body length if none was given.
    pub fn build(mut self) -> Response {
        if !self
            .headers
            .iter()
            .any(|(key, _)| key.eq_ignore_ascii_case("Content-Length"))
        {
            self.headers
                .push(("Content-Length".to_string(), self.body.len().to_string()));
        }

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// 200 response streaming a regular file.
    ///
    /// `len` must be the file size queried at resolution time; the declared
    /// Content-Length is taken from it, not from what streaming later yields.
    pub fn file(path: PathBuf, len: u64, content_type: &str) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Server", SERVER_IDENT)
            .header("Content-Length", len.to_string())
            .header("Content-Type", content_type)
            .body(Body::File { path, len })
            .build()
    }

    /// 200 response carrying a generated directory listing.
    pub fn auto_index(listing: String) -> Self {
        let bytes = listing.into_bytes();
        ResponseBuilder::new(StatusCode::Ok)
            .header("Server", SERVER_IDENT)
            .header("Content-Length", bytes.len().to_string())
            .header("Content-Type", "text/html")
            .body(Body::Bytes(bytes))
            .build()
    }

    /// 301 response pointing the client at `location`.
    pub fn redirect(location: &str) -> Self {
        ResponseBuilder::new(StatusCode::MovedPermanently)
            .header("Server", SERVER_IDENT)
            .header("Location", location)
            .header("Content-Length", PAGE_MOVED.len().to_string())
            .header("Content-Type", "text/html")
            .body(Body::Bytes(PAGE_MOVED.as_bytes().to_vec()))
            .build()
    }

    /// 404 response with the canned page.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound)
            .header("Server", SERVER_IDENT)
            .header("Content-Length", PAGE_NOT_FOUND.len().to_string())
            .header("Content-Type", "text/html")
            .body(Body::Bytes(PAGE_NOT_FOUND.as_bytes().to_vec()))
            .build()
    }

    /// 501 response for malformed requests and methods other than GET.
    pub fn not_implemented() -> Self {
        ResponseBuilder::new(StatusCode::NotImplemented)
            .header("Server", SERVER_IDENT)
            .header("Allow", "GET")
            .header("Content-Length", PAGE_NOT_IMPLEMENTED.len().to_string())
            .header("Content-Type", "text/html")
            .body(Body::Bytes(PAGE_NOT_IMPLEMENTED.as_bytes().to_vec()))
            .build()
    }

    /// First value of a header, by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
