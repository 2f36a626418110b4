/// Standard cosine similarity: dot product over the product of
/// magnitudes. An all-zero vector has no direction, so the score is
/// defined as 0.0 instead of NaN.
///
/// Both vectors must come from the same embedding space; a dimension
/// mismatch is a programmer error, not a recoverable condition.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "embedding spaces must match");
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}
