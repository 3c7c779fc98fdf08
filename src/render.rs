//! Terminal presentation helpers. The core crates compute the numbers; this
//! module only formats them.

use analytics::ChangeStats;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use core_types::{Instrument, PriceSeries};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sentiment::{Headline, SentimentScorer};
use simulator::ReturnPoint;

const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Prints one instrument's subheader, insight, stats table, and sparkline.
pub fn instrument_section(
    instrument: &Instrument,
    series: &PriceSeries,
    stats: &ChangeStats,
    insight: &str,
) {
    println!("\n== {} ({}) ==", instrument.name, instrument.ticker);
    println!("{insight}");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Current", "Previous", "Change %", "5-day MA"]);
    table.add_row(vec![
        format!("{:.2}", stats.current),
        format!("{:.2}", stats.previous),
        format!("{:.2}%", stats.change_pct),
        stats
            .moving_average_5
            .map(|avg| format!("{avg:.2}"))
            .unwrap_or_else(|| "not enough history".to_string()),
    ]);
    println!("{table}");

    if let (Some(first), Some(last)) = (series.points.first(), series.points.last()) {
        let closes: Vec<Decimal> = series.points.iter().map(|p| p.close).collect();
        println!(
            "{}  {} → {}",
            sparkline(&closes),
            first.timestamp.format("%Y-%m-%d"),
            last.timestamp.format("%Y-%m-%d")
        );
    }
}

/// Prints the simulated cumulative-return series and its final value.
pub fn simulation_table(returns: &[ReturnPoint]) {
    println!("\nSimulated portfolio (additive cumulative return)\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Date", "Cumulative return %"]);
    for point in returns {
        table.add_row(vec![
            point.timestamp.format("%Y-%m-%d").to_string(),
            as_percent(point.cumulative_return),
        ]);
    }
    println!("{table}");

    if let Some(last) = returns.last() {
        let values: Vec<Decimal> = returns.iter().map(|p| p.cumulative_return).collect();
        println!("{}", sparkline(&values));
        println!(
            "Cumulative return over the window: {}%",
            as_percent(last.cumulative_return)
        );
    }
}

/// Prints scored headlines and the net sentiment for the topic.
pub fn sentiment_table(topic: &str, rows: &[(Headline, f64)]) {
    println!("\nNews sentiment for \"{topic}\"\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Headline", "Source", "Score", "Polarity"]);
    for (headline, score) in rows {
        table.add_row(vec![
            headline.title.clone(),
            headline.source.clone(),
            format!("{score:+.2}"),
            SentimentScorer::label(*score).to_string(),
        ]);
    }
    println!("{table}");

    let mean = rows.iter().map(|(_, score)| score).sum::<f64>() / rows.len() as f64;
    println!("Net sentiment: {mean:+.2} ({})", SentimentScorer::label(mean));
}

fn as_percent(fraction: Decimal) -> String {
    format!("{:.2}", fraction * dec!(100))
}

/// Renders values as a fixed-height unicode sparkline. A flat series maps to
/// the middle glyph.
fn sparkline(values: &[Decimal]) -> String {
    let floats: Vec<f64> = values.iter().filter_map(|v| v.to_f64()).collect();
    let (Some(min), Some(max)) = (
        floats.iter().copied().reduce(f64::min),
        floats.iter().copied().reduce(f64::max),
    ) else {
        return String::new();
    };

    let span = max - min;
    floats
        .iter()
        .map(|value| {
            let index = if span == 0.0 {
                3
            } else {
                (((value - min) / span) * 7.0).round() as usize
            };
            SPARK_GLYPHS[index.min(7)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparkline_spans_min_to_max() {
        let line = sparkline(&[dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)]);
        assert!(line.starts_with('▁'));
        assert!(line.ends_with('█'));
        assert_eq!(line.chars().count(), 5);
    }

    #[test]
    fn flat_series_uses_middle_glyph() {
        assert_eq!(sparkline(&[dec!(7), dec!(7), dec!(7)]), "▄▄▄");
    }

    #[test]
    fn empty_series_renders_empty() {
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn percent_formatting_pads_to_two_decimals() {
        assert_eq!(as_percent(dec!(0.1)), "10.00");
        assert_eq!(as_percent(dec!(-0.023456)), "-2.35");
    }
}
