use chrono::{NaiveDate, NaiveDateTime};
use rand::{rngs::StdRng, SeedableRng};

/// The random source and reference clock shared by every generator of a run.
///
/// Two contexts built from the same seed and reference time drive the generators through
/// identical draws, so the resulting tables are identical.
pub struct GenerationContext {
    pub rng: StdRng,
    seed: Option<u64>,
    reference_time: NaiveDateTime,
}

impl GenerationContext {
    /// Creates a context, seeding from entropy when no seed is given.
    pub fn new(seed: Option<u64>, reference_time: NaiveDateTime) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            seed,
            reference_time,
        }
    }

    pub fn seeded(seed: u64, reference_time: NaiveDateTime) -> Self {
        Self::new(Some(seed), reference_time)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// "Now" for the run. All relative dates are computed from it.
    pub fn now(&self) -> NaiveDateTime {
        self.reference_time
    }

    pub fn today(&self) -> NaiveDate {
        self.reference_time.date()
    }
}
