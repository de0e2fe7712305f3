//! Coordinate precision check.

use crate::document::{Collection, Feature};
use crate::geometry::{RawPosition, raw_positions};
use crate::thresholds::Thresholds;
use crate::verdict::{Severity, Warning, WarningCode};

/// Raise one `PRECISION_EXCESS` per polygon feature with a coordinate
/// component written with more than [`Thresholds::max_decimals`] decimals.
///
/// Decimals are counted on the number's textual form, not by comparing
/// rounded values. Scanning a feature stops at its first offending position.
#[must_use]
pub fn check_precision(collection: &Collection<'_>, thresholds: &Thresholds) -> Vec<Warning> {
    collection
        .features()
        .iter()
        .filter(|feature| has_excess_precision(feature, thresholds.max_decimals))
        .map(|feature| {
            Warning::feature(
                WarningCode::PrecisionExcess,
                Severity::Low,
                feature.id().clone(),
                format!(
                    "excessive precision detected (> {} decimals). Parcel ID: {}",
                    thresholds.max_decimals,
                    feature.id()
                ),
            )
        })
        .collect()
}

fn has_excess_precision(feature: &Feature<'_>, max_decimals: usize) -> bool {
    raw_positions(feature.geometry())
        .iter()
        .any(|RawPosition { longitude, latitude }| {
            decimal_places(&longitude.to_string()) > max_decimals
                || decimal_places(&latitude.to_string()) > max_decimals
        })
}

/// Count the digits after the decimal point of a JSON number literal.
///
/// Exponents shift the count, so `1e-7` and `0.0000001` both have seven.
#[must_use]
pub fn decimal_places(literal: &str) -> usize {
    let (mantissa, exponent) = match literal.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().unwrap_or(0)),
        None => (literal, 0),
    };
    let fraction = mantissa
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len());
    let places = i64::try_from(fraction)
        .unwrap_or(i64::MAX)
        .saturating_sub(exponent);
    usize::try_from(places).unwrap_or(0)
}
