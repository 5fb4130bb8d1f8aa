//! Tiny PRNG for visual randomness.

/// Xorshift32 generator
///
/// Not suitable for anything but picking flicker timings.
#[derive(Debug, Clone)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    pub const fn new(seed: u32) -> Self {
        // A zero state would only ever produce zeros
        Self {
            state: if seed == 0 { 0x9e37_79b9 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Random value in `[min, max)`; returns `min` when the range is empty
    pub fn range_u16(&mut self, min: u16, max: u16) -> u16 {
        if max <= min {
            return min;
        }
        let span = u32::from(max - min);
        #[allow(clippy::cast_possible_truncation)]
        let offset = (self.next_u32() % span) as u16;
        min + offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_stays_in_bounds() {
        let mut rng = Xorshift32::new(7);
        for _ in 0..1000 {
            let v = rng.range_u16(1000, 5000);
            assert!((1000..5000).contains(&v));
        }
    }

    #[test]
    fn empty_range_returns_min() {
        let mut rng = Xorshift32::new(0);
        assert_eq!(rng.range_u16(300, 300), 300);
        assert_eq!(rng.range_u16(300, 100), 300);
    }
}
