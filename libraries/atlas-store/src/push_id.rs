//! Store-assigned child keys.
//!
//! Keys are 20 characters: 8 encoding the creation time in milliseconds,
//! then 12 of randomness. The alphabet is ordered by ASCII value, so keys
//! sort lexicographically in creation order; within one millisecond the
//! previous random suffix is incremented instead of redrawn, which keeps
//! the order strict even under bursts.

use rand::Rng;

/// 64 characters, ascending ASCII order
const PUSH_ALPHABET: &[u8; 64] =
    b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const TIMESTAMP_CHARS: usize = 8;
const RANDOM_CHARS: usize = 12;

/// Generator state; one per store
#[derive(Debug, Default)]
pub struct PushIdGenerator {
    last_millis: i64,
    last_random: [u8; RANDOM_CHARS],
}

impl PushIdGenerator {
    /// Create a generator with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next key for the given wall-clock time (epoch millis)
    pub fn next_id(&mut self, now_millis: i64) -> String {
        if now_millis == self.last_millis {
            increment(&mut self.last_random);
        } else {
            let mut rng = rand::thread_rng();
            for slot in &mut self.last_random {
                *slot = rng.gen_range(0..64);
            }
        }
        self.last_millis = now_millis;

        let mut id = String::with_capacity(TIMESTAMP_CHARS + RANDOM_CHARS);
        let mut remaining = now_millis;
        let mut stamp = [0u8; TIMESTAMP_CHARS];
        for slot in stamp.iter_mut().rev() {
            *slot = PUSH_ALPHABET[(remaining % 64) as usize];
            remaining /= 64;
        }
        id.extend(stamp.iter().map(|&b| b as char));
        id.extend(
            self.last_random
                .iter()
                .map(|&index| PUSH_ALPHABET[index as usize] as char),
        );
        id
    }
}

/// Add one to a base-64 digit string, carrying right to left
fn increment(digits: &mut [u8; RANDOM_CHARS]) {
    for digit in digits.iter_mut().rev() {
        if *digit == 63 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_twenty_chars() {
        let mut generator = PushIdGenerator::new();
        assert_eq!(generator.next_id(1_700_000_000_000).len(), 20);
    }

    #[test]
    fn keys_order_across_milliseconds() {
        let mut generator = PushIdGenerator::new();
        let earlier = generator.next_id(1_700_000_000_000);
        let later = generator.next_id(1_700_000_000_001);
        assert!(earlier < later);
    }

    #[test]
    fn keys_order_within_one_millisecond() {
        let mut generator = PushIdGenerator::new();
        let first = generator.next_id(1_700_000_000_000);
        let second = generator.next_id(1_700_000_000_000);
        let third = generator.next_id(1_700_000_000_000);
        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn keys_are_unique_under_bursts() {
        let mut generator = PushIdGenerator::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generator.next_id(1_700_000_000_000)));
        }
    }

    #[test]
    fn increment_carries() {
        let mut digits = [63u8; RANDOM_CHARS];
        digits[0] = 5;
        increment(&mut digits);
        assert_eq!(digits[0], 6);
        assert!(digits[1..].iter().all(|&d| d == 0));
    }
}
