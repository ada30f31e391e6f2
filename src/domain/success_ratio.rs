/// Fraction of requests that must succeed, held as parts per million so that
/// threshold arithmetic stays exact for decimal ratios like `0.9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessRatio(u32);

const PARTS_PER_MILLION: u32 = 1_000_000;

impl SuccessRatio {
    pub fn parse(ratio: f64) -> Result<SuccessRatio, String> {
        if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
            return Err(format!(
                "{} is not a valid success ratio. Use a value between 0.0 and 1.0.",
                ratio
            ));
        }
        Ok(Self((ratio * PARTS_PER_MILLION as f64).round() as u32))
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / PARTS_PER_MILLION as f64
    }

    /// Smallest success count out of `total` that reaches this ratio.
    pub fn required_successes(&self, total: usize) -> usize {
        let scaled = total as u128 * self.0 as u128;
        scaled.div_ceil(PARTS_PER_MILLION as u128) as usize
    }
}
