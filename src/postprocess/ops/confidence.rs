/// Inclusive score bands, one per confidence bucket, highest first.
///
/// The edges are the literal decimals used by the tissue model; values falling
/// between two bands (e.g. `0.905`) belong to no band.
pub const CONFIDENCE_BANDS: [(f32, f32); 10] = [
    (0.91, 1.0),
    (0.81, 0.90),
    (0.71, 0.80),
    (0.61, 0.70),
    (0.51, 0.60),
    (0.41, 0.50),
    (0.31, 0.40),
    (0.21, 0.30),
    (0.11, 0.20),
    (0.01, 0.10),
];

/// Map a winning class score to its confidence bucket in `[0, 10)`.
///
/// Scores outside every band, including `0`, negatives, NaN and values above
/// `1`, fall back to bucket `0`.
#[inline]
pub fn confidence_bucket(score: f32) -> u8 {
    CONFIDENCE_BANDS
        .iter()
        .position(|&(low, high)| low <= score && score <= high)
        .map_or(0, |i| i as u8)
}
