/// Represents a parsed HTTP request from a client.
///
/// Contains the method and request-target from the request line plus the
/// handful of headers the server cares about. The path is stored exactly as
/// received; percent-decoding happens during path resolution. A request is
/// immutable after parsing and is discarded when its connection closes.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method token, verbatim (e.g. "GET")
    pub method: String,
    /// The raw request-target (e.g. "/docs/index.html")
    pub path: String,
    /// Value of the Host header, if present
    pub host: Option<String>,
    /// Value of the User-Agent header, if present
    pub user_agent: Option<String>,
    /// Value of the Accept header, if present
    pub accept: Option<String>,
}

impl Request {
    /// Whether this request uses the only method the server implements.
    ///
    /// Anything other than GET is answered with 501 and `Allow: GET`.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::request::Request;
    /// let req = Request {
    ///     method: "POST".to_string(),
    ///     path: "/".to_string(),
    ///     host: None,
    ///     user_agent: None,
    ///     accept: None,
    /// };
    /// assert!(!req.is_get());
    /// ```
    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }
}
