//! Stand-in readings for sensors the operator did not enable.
//!
//! Values are uniform in a narrow band around the threshold so a rig with
//! no probe fitted still produces believable telemetry without ever
//! looking dry.

use core::ops::Range;

use fastrand::Rng;

use super::Probe;

pub struct SimulatedProbe {
    rng: Rng,
    band: Range<i32>,
}

impl SimulatedProbe {
    /// Entropy-seeded probe over the half-open `band`.
    pub fn new(band: Range<i32>) -> Self {
        Self {
            rng: Rng::new(),
            band,
        }
    }

    /// Reproducible sequence for tests.
    pub fn with_seed(band: Range<i32>, seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
            band,
        }
    }

    pub fn band(&self) -> &Range<i32> {
        &self.band
    }
}

impl Probe for SimulatedProbe {
    fn sample(&mut self) -> i32 {
        if self.band.is_empty() {
            return self.band.start;
        }
        self.rng.i32(self.band.clone())
    }
}
