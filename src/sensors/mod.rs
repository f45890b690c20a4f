//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! Each channel is a [`Source`]: the real driver when the operator enabled
//! it at boot, otherwise a [`SimulatedProbe`] producing values in a narrow
//! band.  The hub never fails; drivers absorb their own errors.

pub mod light;
pub mod simulated;
pub mod soil;

pub use simulated::SimulatedProbe;

/// One analog-ish channel that always yields a value.
pub trait Probe {
    fn sample(&mut self) -> i32;
}

/// A real driver or its simulated stand-in.
pub enum Source<P> {
    Live(P),
    Simulated(SimulatedProbe),
}

impl<P> Source<P> {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }
}

impl<P: Probe> Probe for Source<P> {
    fn sample(&mut self) -> i32 {
        match self {
            Self::Live(p) => p.sample(),
            Self::Simulated(p) => p.sample(),
        }
    }
}

/// Owns the soil and light channels.
pub struct SensorHub<S, L> {
    soil: Source<S>,
    light: Source<L>,
}

impl<S: Probe, L: Probe> SensorHub<S, L> {
    pub fn new(soil: Source<S>, light: Source<L>) -> Self {
        Self { soil, light }
    }

    pub fn read_soil(&mut self) -> i32 {
        self.soil.sample()
    }

    pub fn read_light(&mut self) -> i32 {
        self.light.sample()
    }

    pub fn soil_is_live(&self) -> bool {
        self.soil.is_live()
    }

    pub fn light_is_live(&self) -> bool {
        self.light.is_live()
    }
}
