/// Standard sea-level pressure in hectopascals.
///
/// Used when no local QNH is known, but altitudes calculated with it can be off by
/// hundreds of metres depending on the weather. Get the current QNH from a nearby
/// airport or weather report.
pub const STANDARD_QNH: f64 = 1013.25;

/// Altitude in metres given the measured pressure and the sea-level reference
/// pressure (QNH), both in hectopascals.
///
/// Uses the international barometric formula.
pub fn altitude(pressure: f64, qnh: f64) -> f64 {
    44330.0 * (1.0 - (pressure / qnh).powf(1.0 / 5.255))
}
