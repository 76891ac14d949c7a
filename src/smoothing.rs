/// Ring buffer of the last `N` raw ADC codes.
///
/// The average only covers the slots written so far, so a freshly booted
/// sensor does not get dragged towards zero by unused entries.
#[derive(Debug, Clone)]
pub struct SmoothingWindow<const N: usize> {
    samples: [u16; N],
    head: usize,
    count: usize,
}

impl<const N: usize> SmoothingWindow<N> {
    pub const fn new() -> Self {
        Self {
            samples: [0; N],
            head: 0,
            count: 0,
        }
    }

    pub fn push(&mut self, raw: u16) {
        if N == 0 {
            return;
        }

        self.samples[self.head] = raw;
        self.head = (self.head + 1) % N;
        if self.count < N {
            self.count += 1;
        }
    }

    /// Arithmetic mean of the filled slots, `0.0` while empty.
    pub fn average(&self) -> f32 {
        if self.count == 0 {
            return 0.0;
        }

        let sum: u32 = self.samples[..self.count].iter().map(|&s| s as u32).sum();
        sum as f32 / self.count as f32
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl<const N: usize> Default for SmoothingWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn empty_window_averages_to_zero() {
        let window = SmoothingWindow::<8>::new();
        assert!(window.is_empty());
        assert_relative_eq!(window.average(), 0.0);
    }

    #[test]
    fn partial_window_ignores_unused_slots() {
        let mut window = SmoothingWindow::<8>::new();
        window.push(100);
        window.push(300);

        assert_eq!(window.len(), 2);
        assert_relative_eq!(window.average(), 200.0);
    }

    #[test]
    fn identical_samples_average_to_themselves() {
        let mut window = SmoothingWindow::<8>::new();
        for _ in 0..8 {
            window.push(2048);
        }

        assert_eq!(window.len(), 8);
        assert_relative_eq!(window.average(), 2048.0);
    }

    #[test]
    fn full_window_keeps_only_most_recent() {
        let mut window = SmoothingWindow::<8>::new();
        for raw in 1..=12u16 {
            window.push(raw * 10);
        }

        // 50..=120 step 10
        assert_eq!(window.len(), 8);
        assert_relative_eq!(window.average(), 85.0);
    }

    #[test]
    fn extreme_codes_do_not_overflow() {
        let mut window = SmoothingWindow::<8>::new();
        for _ in 0..8 {
            window.push(u16::MAX);
        }

        assert_relative_eq!(window.average(), u16::MAX as f32);
    }
}
