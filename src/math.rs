#[must_use]
#[inline]
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).fold(0.0, |dot, (xi, yi)| dot + xi * yi)
}
