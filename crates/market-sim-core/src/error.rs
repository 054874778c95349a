use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Unknown asset symbol: '{0}'. Expected one of: PETR4, VALE3, AAPL, BTCUSDT, TSLA")]
    UnknownSymbol(String),

    #[error("Unknown interval: '{0}'. Expected one of: 5min, 15min, 1h, 4h, 1d")]
    UnknownInterval(String),

    #[error("Invalid {field}: {value} is outside [{min}, {max}]")]
    InvalidSetting {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid {field}: value must be finite")]
    NonFinite { field: &'static str },
}
