use actix_web::http::header;
use actix_web::HttpRequest;

/// Scheme separator. The header value is split on this exact,
/// case-sensitive substring rather than matched as a prefix.
pub const BEARER: &str = "Bearer";

/// Reads the bearer credential from the request's `Authorization` header.
///
/// A missing header, or one whose value is not visible ASCII, yields the
/// empty credential.
pub fn from_request(req: &HttpRequest) -> String {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    extract_credential(header)
}

/// Extracts the credential from an `Authorization` header value.
///
/// The value must split on [`BEARER`] into exactly two parts; the credential
/// is the second part with surrounding whitespace trimmed. Anything else
/// (absent, empty, another scheme, `Bearer` occurring twice) yields the
/// empty credential, which is not an error: it resolves to the anonymous role.
pub fn extract_credential(header: Option<&str>) -> String {
    let header = match header {
        Some(header) => header,
        None => return String::new(),
    };

    let parts = header.split(BEARER).collect::<Vec<&str>>();
    if parts.len() != 2 {
        return String::new();
    }

    parts[1].trim().to_string()
}
