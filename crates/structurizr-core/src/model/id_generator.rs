//! Sequential identifier generation.

use crate::identifier::Id;

/// Issues `"1"`, `"2"`, `"3"`, ... as identifiers.
///
/// The generator is told about every externally supplied ID through
/// [`found`](Self::found) so that it never reissues an integer ID that is
/// already in use. Non-numeric IDs are accepted and ignored.
///
/// Once the counter reaches `u64::MAX` it starts again from `"1"`; callers
/// such as [`Model::next_id`](crate::model::Model::next_id) skip IDs that are
/// still taken.
#[derive(Debug, Default, Clone)]
pub struct SequentialIdGenerator {
    counter: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next identifier.
    pub fn generate(&mut self) -> Id {
        self.counter = self.counter.checked_add(1).unwrap_or(1);
        Id::from_sequence(self.counter)
    }

    /// Record an existing identifier, advancing the counter past it if it is
    /// an integer.
    pub fn found(&mut self, id: Id) {
        if let Some(value) = id.as_sequence() {
            self.counter = self.counter.max(value);
        }
    }

    /// The most recently generated or found integer ID.
    pub fn current(&self) -> u64 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sequence() {
        let mut generator = SequentialIdGenerator::new();
        assert_eq!(generator.generate(), "1");
        assert_eq!(generator.generate(), "2");
    }

    #[test]
    fn test_found_advances_counter() {
        let mut generator = SequentialIdGenerator::new();
        generator.found(Id::new("41"));
        assert_eq!(generator.generate(), "42");
    }

    #[test]
    fn test_found_ignores_lower_and_non_numeric() {
        let mut generator = SequentialIdGenerator::new();
        generator.found(Id::new("10"));
        generator.found(Id::new("3"));
        generator.found(Id::new("database"));
        assert_eq!(generator.current(), 10);
    }

    #[test]
    fn test_generate_wraps_after_largest_id() {
        let mut generator = SequentialIdGenerator::new();
        generator.found(Id::new("18446744073709551615"));
        assert_eq!(generator.current(), u64::MAX);
        assert_eq!(generator.generate(), "1");
        assert_eq!(generator.generate(), "2");
    }
}
