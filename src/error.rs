use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The resolver failed to look the host up.
    #[error("unable to resolve domain name {target}: {source}")]
    Resolution {
        target: String,
        #[source]
        source: std::io::Error,
    },
    /// The lookup succeeded but returned no IPv4 record.
    #[error("no IPv4 address found for {target}")]
    NotFound { target: String },
    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),
}
