use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("HTTP {status} while fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("network document is missing the `{field}` array")]
    MissingArray { field: &'static str },
}
