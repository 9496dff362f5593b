/// Turns irregular wall-clock frame times into a count of fixed-size steps.
#[derive(Copy, Clone, Debug)]
pub struct FrameClock {
    step: f32,
    accumulated: f32,
}

impl FrameClock {
    pub fn new(rate_hz: f32) -> FrameClock {
        FrameClock {
            step: 1.0 / rate_hz,
            accumulated: 0.0,
        }
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add `elapsed` seconds and return how many whole steps are due.
    pub fn advance(&mut self, elapsed: f32) -> usize {
        self.accumulated += elapsed;
        let mut steps = 0;
        while self.accumulated >= self.step {
            self.accumulated -= self.step;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn carries_remainders() {
        let mut clock = FrameClock::new(4.0);
        assert_eq!(0, clock.advance(0.125));
        assert_eq!(1, clock.advance(0.125));
        assert_eq!(2, clock.advance(0.625));
        assert_eq!(1, clock.advance(0.125));
    }
}
