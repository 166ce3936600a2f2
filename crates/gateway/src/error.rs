use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    #[error("Symbol '{0}' is unknown to the gateway")]
    UnknownSymbol(String),

    #[error("No quote is currently available for '{0}'")]
    QuoteUnavailable(String),

    #[error("Gateway transport failure: {0}")]
    Transport(String),
}
