use serde::Deserialize;

/// Top-level payload of the Yahoo Finance v8 chart endpoint.
///
/// The endpoint wraps everything in a `chart` object carrying either a
/// result list or an error; a successful response has exactly one result for
/// a single-ticker request.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ChartErrorBody {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    /// Unix timestamps (seconds), one per sampling interval.
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    pub quote: Vec<Quote>,
}

/// Per-interval quote arrays. Entries are `null` for intervals the venue did
/// not trade, so every value is optional.
#[derive(Debug, Deserialize)]
pub struct Quote {
    pub close: Option<Vec<Option<f64>>>,
}
