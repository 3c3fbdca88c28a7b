use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{self, Color};

/// Ordered option labels; sector `i` shows `labels[i]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelConfig {
    labels: Vec<String>,
    colors: [Color; 2],
}

impl WheelConfig {
    pub fn new<I, S>(labels: I, colors: [Color; 2]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            colors,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sector fill, alternating by index parity
    pub fn color(&self, index: usize) -> Color {
        self.colors[index % 2]
    }

    /// Uniform random permutation of the labels (Fisher-Yates).
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.labels.shuffle(rng);
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self::new(config::FOOD_OPTIONS, [config::ORANGE, config::DARK_CYAN])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shuffle_is_a_permutation() {
        let mut wheel = WheelConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            wheel.shuffle(&mut rng);
            let mut shuffled = wheel.labels().to_vec();
            let mut original: Vec<String> =
                config::FOOD_OPTIONS.iter().map(|s| s.to_string()).collect();
            shuffled.sort();
            original.sort();
            assert_eq!(shuffled, original);
        }
    }

    #[test]
    fn shuffle_changes_order_eventually() {
        let mut wheel = WheelConfig::default();
        let before = wheel.labels().to_vec();
        let mut rng = StdRng::seed_from_u64(1);
        let changed = (0..10).any(|_| {
            wheel.shuffle(&mut rng);
            wheel.labels() != before.as_slice()
        });
        assert!(changed);
    }

    #[test]
    fn colors_alternate_by_parity() {
        let wheel = WheelConfig::default();
        assert_eq!(wheel.color(0), config::ORANGE);
        assert_eq!(wheel.color(1), config::DARK_CYAN);
        assert_eq!(wheel.color(10), config::ORANGE);
        assert_eq!(wheel.color(11), config::DARK_CYAN);
    }

    #[test]
    fn single_option_shuffle_is_stable() {
        let mut wheel = WheelConfig::new(["Rice"], [config::ORANGE, config::DARK_CYAN]);
        wheel.shuffle(&mut StdRng::seed_from_u64(3));
        assert_eq!(wheel.labels(), ["Rice".to_string()]);
    }
}
