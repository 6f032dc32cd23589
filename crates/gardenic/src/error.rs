#[derive(thiserror::Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid product ID or URL: {0}")]
    InvalidProductId(String),
}
