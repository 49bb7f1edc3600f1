//! Object speed synthesis: normal draws with positivity rejection.

use rand_distr::{Distribution, Normal};

use sv_core::SimRng;

use crate::{MobilityError, MobilityResult};

/// Give up after this many rejected draws (pathological mean/sigma pairs).
const MAX_REJECTION_ATTEMPTS: usize = 100_000;

/// Draw `count` average speeds from `Normal(mean, sigma)`, rejecting
/// non-positive samples.
pub fn sample_average_speeds(
    mean:  f64,
    sigma: f64,
    count: usize,
    rng:   &mut SimRng,
) -> MobilityResult<Vec<f64>> {
    let normal =
        Normal::new(mean, sigma).map_err(|e| MobilityError::Distribution(e.to_string()))?;

    let mut speeds = Vec::with_capacity(count);
    let mut attempts = 0;
    while speeds.len() < count {
        attempts += 1;
        if attempts > MAX_REJECTION_ATTEMPTS {
            return Err(MobilityError::Distribution(format!(
                "speed sampling from Normal({mean}, {sigma}) did not produce \
                 {count} positive draws"
            )));
        }
        let candidate = normal.sample(rng.inner());
        if candidate > 0.0 {
            speeds.push(candidate);
        }
    }
    Ok(speeds)
}
