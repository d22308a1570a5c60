//! Seeded source of realistic strings, dates, and numbers.
//!
//! `RandomCorpus` wraps a `ChaCha8Rng` and the `fake` crate's English
//! locale. Every draw advances the same RNG, so a corpus built from a given
//! seed always yields the same sequence.

use std::ops::RangeInclusive;

use chrono::{NaiveDate, TimeDelta};
use fake::Fake;
use fake::faker::company::raw::CompanyName;
use fake::faker::lorem::raw::{Paragraph, Sentence, Word};
use fake::faker::name::raw::Name;
use fake::faker::number::raw::NumberWithFormat;
use fake::locales::EN;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random-data capability used by the generator.
///
/// # Example
///
/// ```
/// use document_data::RandomCorpus;
///
/// let mut first = RandomCorpus::from_seed(7);
/// let mut second = RandomCorpus::from_seed(7);
///
/// assert_eq!(first.company(), second.company());
/// assert_eq!(first.integer_in(1..=5), second.integer_in(1..=5));
/// ```
#[derive(Debug, Clone)]
pub struct RandomCorpus {
    rng: ChaCha8Rng,
}

impl RandomCorpus {
    /// Creates a corpus whose output is fully determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Picks one entry uniformly, or `None` when `items` is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Samples up to `amount` distinct entries without replacement.
    ///
    /// Returns every entry (shuffled) when fewer than `amount` are available.
    pub fn sample<T: Clone>(&mut self, items: &[T], amount: usize) -> Vec<T> {
        let mut shuffled = items.to_vec();
        shuffled.shuffle(&mut self.rng);
        shuffled.truncate(amount);
        shuffled
    }

    /// Draws an integer uniformly from an inclusive range.
    pub fn integer_in(&mut self, range: RangeInclusive<u32>) -> u32 {
        if range.is_empty() {
            return *range.start();
        }
        self.rng.random_range(range)
    }

    /// Draws a monetary amount with two decimal places from an inclusive
    /// range expressed in cents.
    #[expect(
        clippy::float_arithmetic,
        reason = "amounts are emitted as JSON numbers with two decimals"
    )]
    pub fn amount_in_cents(&mut self, cents: RangeInclusive<u32>) -> f64 {
        f64::from(self.integer_in(cents)) / 100.0
    }

    /// Draws a date uniformly between `start` and `end`, both inclusive.
    ///
    /// Returns `start` when the range is inverted.
    pub fn date_between(&mut self, start: NaiveDate, end: NaiveDate) -> NaiveDate {
        let span = end.signed_duration_since(start).num_days();
        if span <= 0 {
            return start;
        }
        let offset = self.rng.random_range(0..=span);
        start
            .checked_add_signed(TimeDelta::days(offset))
            .unwrap_or(end)
    }

    /// Generates a company name.
    pub fn company(&mut self) -> String {
        CompanyName(EN).fake_with_rng(&mut self.rng)
    }

    /// Generates a person's full name.
    pub fn person_name(&mut self) -> String {
        Name(EN).fake_with_rng(&mut self.rng)
    }

    /// Generates a single lorem word.
    pub fn word(&mut self) -> String {
        Word(EN).fake_with_rng(&mut self.rng)
    }

    /// Generates a sentence of exactly `words` words, ending in a period.
    pub fn sentence(&mut self, words: usize) -> String {
        Sentence(EN, words..words + 1).fake_with_rng(&mut self.rng)
    }

    /// Generates a paragraph of exactly `sentences` sentences.
    pub fn paragraph(&mut self, sentences: usize) -> String {
        Paragraph(EN, sentences..sentences + 1).fake_with_rng(&mut self.rng)
    }

    /// Fills a pattern, replacing each `#` with a random digit.
    pub fn numerify(&mut self, pattern: &'static str) -> String {
        NumberWithFormat(EN, pattern).fake_with_rng(&mut self.rng)
    }
}
