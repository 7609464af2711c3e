//! Gene-tagged snowflake ID generation.
//!
//! ```text
//! | 41 bits: ms since 2024-01-01 UTC | 6 bits: gene | 6 bits: worker | 10 bits: sequence |
//! ```
//!
//! The top bit is always clear, so every id fits a positive `i64` primary key.
//! The gene tags which table an id belongs to.

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use rand::Rng;

/// Custom epoch: 2024-01-01 00:00:00 UTC (milliseconds since Unix epoch).
const EPOCH_MS: u64 = 1_704_067_200_000;

const TIMESTAMP_BITS: u32 = 41;
const GENE_BITS: u32 = 6;
const WORKER_BITS: u32 = 6;
const SEQUENCE_BITS: u32 = 10;

const TIMESTAMP_MASK: u64 = (1 << TIMESTAMP_BITS) - 1;
const GENE_MASK: u64 = (1 << GENE_BITS) - 1;
const WORKER_MASK: u64 = (1 << WORKER_BITS) - 1;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;

/// Resource-type tag embedded in generated ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Gene {
    GameProfile = 32,
    GameProfileQuota = 33,
    GameProfileQuotaLog = 34,
}

struct SnowflakeState {
    last_timestamp: u64,
    sequence: u64,
}

/// Thread-safe generator producing one id per call.
pub struct SnowflakeGenerator {
    worker_id: u64,
    state: Mutex<SnowflakeState>,
}

impl SnowflakeGenerator {
    /// Create a generator for `worker_id`, keeping its lower 6 bits.
    pub fn new(worker_id: u8) -> Self {
        Self {
            worker_id: u64::from(worker_id) & WORKER_MASK,
            state: Mutex::new(SnowflakeState {
                last_timestamp: 0,
                sequence: 0,
            }),
        }
    }

    /// Create a generator with a random worker id.
    pub fn with_random_worker() -> Self {
        let worker_id = rand::rng().random_range(0..=WORKER_MASK as u8);
        Self::new(worker_id)
    }

    pub fn worker_id(&self) -> u8 {
        self.worker_id as u8
    }

    /// Generate a new id tagged with `gene`.
    ///
    /// Sequence overflow within one millisecond moves on to the next millisecond
    /// instead of sleeping. A clock that moves backwards, or reads before the
    /// custom epoch, keeps the last timestamp.
    pub fn generate(&self, gene: Gene) -> i64 {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0);

        let timestamp = now_ms.saturating_sub(EPOCH_MS) & TIMESTAMP_MASK;

        let mut state = self.state.lock();

        if timestamp > state.last_timestamp {
            state.last_timestamp = timestamp;
            state.sequence = 0;
        } else {
            state.sequence += 1;
            if state.sequence > SEQUENCE_MASK {
                state.last_timestamp += 1;
                state.sequence = 0;
            }
        }

        let id = (state.last_timestamp << (GENE_BITS + WORKER_BITS + SEQUENCE_BITS))
            | ((gene as u64 & GENE_MASK) << (WORKER_BITS + SEQUENCE_BITS))
            | (self.worker_id << SEQUENCE_BITS)
            | state.sequence;

        id as i64
    }
}

/// Extract the gene tag bits from an id.
pub fn extract_gene(id: i64) -> u8 {
    ((id as u64 >> (WORKER_BITS + SEQUENCE_BITS)) & GENE_MASK) as u8
}

/// Extract the worker bits from an id.
pub fn extract_worker(id: i64) -> u8 {
    ((id as u64 >> SEQUENCE_BITS) & WORKER_MASK) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect ids to carry the gene and worker they were generated with
    #[test]
    fn embeds_gene_and_worker() {
        let generator = SnowflakeGenerator::new(7);

        let id = generator.generate(Gene::GameProfileQuotaLog);

        assert!(id > 0);
        assert_eq!(extract_gene(id), 34);
        assert_eq!(extract_worker(id), 7);
    }

    /// Expect strictly increasing ids across a burst larger than one millisecond's sequence
    #[test]
    fn increases_across_sequence_overflow() {
        let generator = SnowflakeGenerator::new(1);

        let mut last = 0;
        for _ in 0..5_000 {
            let id = generator.generate(Gene::GameProfile);
            assert!(id > last);
            last = id;
        }
    }

    /// Expect a random worker id to stay within 6 bits
    #[test]
    fn random_worker_fits_six_bits() {
        for _ in 0..100 {
            assert!(SnowflakeGenerator::with_random_worker().worker_id() <= 63);
        }
    }
}
