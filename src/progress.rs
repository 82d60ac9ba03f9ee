use rand::Rng;

/// Largest increment added per tick
const MAX_STEP: f32 = 15.0;

/// Cosmetic progress counter. Nothing is transferred; the value only
/// advances by a random step each tick until it hits 100.
#[derive(Debug, Clone, Default)]
pub struct ProgressSimulator {
    percent: f32,
}

impl ProgressSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Displayed value in `0.0..=100.0`
    pub fn percent(&self) -> f32 {
        self.percent
    }

    pub fn is_finished(&self) -> bool {
        self.percent >= 100.0
    }

    /// Advances one tick; returns true once the counter has reached 100.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.is_finished() {
            self.percent = (self.percent + rng.gen_range(0.0..MAX_STEP)).min(100.0);
        }
        self.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn monotonic_and_ends_at_exactly_100() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut sim = ProgressSimulator::new();
            let mut last = sim.percent();
            let mut ticks = 0;
            while !sim.tick(&mut rng) {
                assert!(sim.percent() >= last);
                last = sim.percent();
                ticks += 1;
                assert!(ticks < 10_000, "simulation never finished");
            }
            assert_eq!(sim.percent(), 100.0);
        }
    }

    #[test]
    fn ticking_after_finish_is_stable() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sim = ProgressSimulator::new();
        while !sim.tick(&mut rng) {}
        assert!(sim.tick(&mut rng));
        assert_eq!(sim.percent(), 100.0);
    }
}
