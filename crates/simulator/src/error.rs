use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Nothing to simulate: no instrument carries a positive allocation weight")]
    EmptyPortfolio,

    #[error("No price data for allocated instrument(s): {}", .0.join(", "))]
    UnknownInstrument(Vec<String>),

    #[error("Not enough data for '{instrument}': need at least 2 observations, got {actual}")]
    InsufficientData { instrument: String, actual: usize },

    #[error("Calculation error: Division by zero on a zero close in '{instrument}'")]
    DivisionByZero { instrument: String },

    #[error("Price series for '{instrument}' does not share its timestamps with '{reference}'")]
    MisalignedSeries { instrument: String, reference: String },
}
