use crate::http::request::Request;

/// Upper bound on the accumulated request head. A client that sends this much
/// without a header terminator is answered with 501 and cut off.
pub const MAX_HEADER_BYTES: usize = 64 * 1024;

#[derive(Debug)]
pub enum ParseError {
    /// No line in the buffer carried an HTTP/1.1 version token.
    MissingRequestLine,
    /// The request line had no method/target separator.
    MalformedRequestLine,
}

/// Parses a buffered request head into a [`Request`].
///
/// The buffer holds everything read from the socket up to (and possibly
/// including) the header terminator. The first line containing the `HTTP/1.1`
/// token is taken as the request line; it splits on the first space into the
/// method and on the next space into the request-target. Of the header lines
/// that follow, only `Host`, `User-Agent` and `Accept` are kept
/// (case-insensitive names); everything else is ignored. A header line
/// without a `": "` separator is tolerated as a name with an empty value.
pub fn parse_request(buf: &[u8]) -> Result<Request, ParseError> {
    let text = String::from_utf8_lossy(buf);
    let mut lines = text.split("\r\n");

    // Request line
    let request_line = lines
        .by_ref()
        .find(|line| line.contains("HTTP/1.1"))
        .ok_or(ParseError::MissingRequestLine)?;

    let (method, rest) = request_line
        .split_once(' ')
        .ok_or(ParseError::MalformedRequestLine)?;
    let (path, _version) = rest
        .split_once(' ')
        .ok_or(ParseError::MalformedRequestLine)?;

    // Headers
    let mut host = None;
    let mut user_agent = None;
    let mut accept = None;

    for line in lines {
        if line.is_empty() {
            break;
        }

        let (name, value) = match line.split_once(": ") {
            Some((name, value)) => (name, value),
            None => (line, ""),
        };

        if name.eq_ignore_ascii_case("Host") {
            host = Some(value.to_string());
        } else if name.eq_ignore_ascii_case("User-Agent") {
            user_agent = Some(value.to_string());
        } else if name.eq_ignore_ascii_case("Accept") {
            accept = Some(value.to_string());
        }
    }

    Ok(Request {
        method: method.to_string(),
        path: path.to_string(),
        host,
        user_agent,
        accept,
    })
}

/// Byte offset of the `\r\n\r\n` header terminator, if present.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}
