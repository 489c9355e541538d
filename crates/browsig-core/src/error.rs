use thiserror::Error;

/// Errors surfaced by the library outside the collection pipeline.
///
/// Building a signature never fails; these cover loading configuration or
/// fixture files and decoding a token back to its canonical text.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// 配置值不合法
    #[error("Config error: {0}")]
    Config(String),
}

/// Result类型别名
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("probe_timeout_ms must be greater than zero".to_string());
        assert_eq!(
            err.to_string(),
            "Config error: probe_timeout_ms must be greater than zero"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Error::Io"),
        }
    }
}
