use std::time::Duration;

pub const QUOTES: [&str; 10] = [
    "Great job! Every minute of focus brings you closer to your goals.",
    "You're building amazing habits! Keep up the fantastic work!",
    "Focus is your superpower. You just proved it!",
    "Another productive session complete! You're unstoppable!",
    "Excellence is a habit, and you're mastering it!",
    "Your dedication is inspiring! Time well spent!",
    "Progress over perfection - and you're making great progress!",
    "You turned time into achievement. That's pure magic!",
    "Consistency is key, and you're showing up! Amazing!",
    "Your future self is thanking you for this focused time!",
];

const ROTATE_EVERY: Duration = Duration::from_millis(5000);
const FADE: Duration = Duration::from_millis(300);

/// Cycles the end-of-session quotes: every five seconds the current quote
/// fades out briefly and the next one takes its place.
#[derive(Debug, Clone, Default)]
pub struct QuoteRotator {
    index: usize,
    since_change: Duration,
}

impl QuoteRotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn advance(&mut self, dt: Duration) {
        self.since_change += dt;
        while self.since_change >= ROTATE_EVERY + FADE {
            self.since_change -= ROTATE_EVERY + FADE;
            self.index = (self.index + 1) % QUOTES.len();
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// False during the fade gap before the next quote
    pub fn is_visible(&self) -> bool {
        self.since_change < ROTATE_EVERY
    }

    pub fn current(&self) -> &'static str {
        QUOTES[self.index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_with_fade_gap() {
        let mut rotator = QuoteRotator::new();
        assert_eq!(rotator.current(), QUOTES[0]);
        assert!(rotator.is_visible());

        rotator.advance(Duration::from_millis(5000));
        assert!(!rotator.is_visible());
        assert_eq!(rotator.index(), 0);

        rotator.advance(Duration::from_millis(300));
        assert!(rotator.is_visible());
        assert_eq!(rotator.index(), 1);
    }

    #[test]
    fn test_wraps_around() {
        let mut rotator = QuoteRotator::new();
        for _ in 0..QUOTES.len() {
            rotator.advance(ROTATE_EVERY + FADE);
        }
        assert_eq!(rotator.index(), 0);
    }

    #[test]
    fn test_reset() {
        let mut rotator = QuoteRotator::new();
        rotator.advance(Duration::from_secs(12));
        rotator.reset();
        assert_eq!(rotator.index(), 0);
        assert!(rotator.is_visible());
    }
}
