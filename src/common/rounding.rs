/// Round `value` to `places` decimal digits.
///
/// Rounds the exact binary value of the float (ties to even), which is what a
/// `%.2f`-style rendering produces. Scaling by a power of ten first would push
/// values such as `6.015` (stored as `6.01499..`) over the tie and round up.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
