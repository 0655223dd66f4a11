/// Run-time settings of a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationConfig {
    /// Minimum wall-clock duration of one tick in milliseconds.  `0` runs
    /// ticks back to back.
    pub millis_per_tick: u64,
}

impl SimulationConfig {
    pub fn paced(millis_per_tick: u64) -> Self {
        Self { millis_per_tick }
    }

    pub fn is_paced(&self) -> bool {
        self.millis_per_tick > 0
    }
}
