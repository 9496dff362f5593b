use crate::util::Error;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Clone, Debug)]
enum Cadence {
    Fixed,
    Uniform { min: f32, max: f32, rng: StdRng },
}

/// Fires a spawn event once enough frame time has piled up.
///
/// When the threshold is crossed the accumulator is reset to zero rather than having the
/// threshold subtracted, so a long frame never produces a burst of catch-up spawns.
#[derive(Clone, Debug)]
pub struct SpawnTimer {
    accumulated: f32,
    threshold: f32,
    cadence: Cadence,
    fired: u64,
}

fn check_threshold(threshold: f32) -> Result<f32, Error> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(threshold)
    } else {
        Err(Error::InvalidThreshold(threshold))
    }
}

impl SpawnTimer {
    pub fn fixed(threshold: f32) -> Result<SpawnTimer, Error> {
        Ok(SpawnTimer {
            accumulated: 0.0,
            threshold: check_threshold(threshold)?,
            cadence: Cadence::Fixed,
            fired: 0,
        })
    }

    /// A timer whose threshold is redrawn from `min..=max` after every firing.
    pub fn uniform(min: f32, max: f32, mut rng: StdRng) -> Result<SpawnTimer, Error> {
        check_threshold(min)?;
        check_threshold(max)?;
        if min > max {
            return Err(Error::EmptyRange { min, max });
        }
        let threshold = rng.gen_range(min..=max);
        Ok(SpawnTimer {
            accumulated: 0.0,
            threshold,
            cadence: Cadence::Uniform { min, max, rng },
            fired: 0,
        })
    }

    #[inline]
    pub fn uniform_seeded(min: f32, max: f32, seed: u64) -> Result<SpawnTimer, Error> {
        SpawnTimer::uniform(min, max, StdRng::seed_from_u64(seed))
    }

    /// Make the next `update` fire regardless of its delta.
    pub fn prime(&mut self) {
        self.accumulated = self.threshold;
    }

    pub fn primed(mut self) -> SpawnTimer {
        self.prime();
        self
    }

    #[inline]
    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    #[inline]
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    /// Accumulate `delta` seconds. Fires at most once per call.
    pub fn update(&mut self, delta: f32) -> bool {
        self.accumulated += delta;
        if self.accumulated < self.threshold {
            return false;
        }
        self.accumulated = 0.0;
        self.fired += 1;
        if let Cadence::Uniform { min, max, rng } = &mut self.cadence {
            self.threshold = rng.gen_range(*min..=*max);
        }
        true
    }
}
