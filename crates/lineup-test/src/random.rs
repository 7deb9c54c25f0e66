//! Seeded synthetic pools.

use lineup_core::{Event, Gender, PoolLength, Swimmer, WorldRecordTable};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shape of a synthetic pool.
#[derive(Debug, Clone, Copy)]
pub struct PoolShape {
    pub swimmers: usize,
    /// Chance that a swimmer holds a time in any given event.
    pub density: f64,
    /// Slowest time as a multiple of the world record.
    pub max_ratio: f64,
}

impl Default for PoolShape {
    fn default() -> Self {
        Self {
            swimmers: 8,
            density: 0.5,
            max_ratio: 2.0,
        }
    }
}

/// A reproducible pool over `events`.
///
/// Each swimmer gets a random gender and, per event, a time between the
/// long-course world record and `max_ratio` times it. Events without a
/// record get times between 20 and 600 seconds.
pub fn random_pool(seed: u64, events: &[Event], shape: PoolShape) -> Vec<Swimmer> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let table = WorldRecordTable::standard();

    (0..shape.swimmers)
        .map(|i| {
            let gender = if rng.random_bool(0.5) {
                Gender::Male
            } else {
                Gender::Female
            };
            let mut swimmer = Swimmer::new(format!("s{i}"), "Random", format!("{i}"), gender);
            for &event in events {
                if !rng.random_bool(shape.density) {
                    continue;
                }
                let ms = match table.lookup(event, gender, PoolLength::Long) {
                    Some(wr) => {
                        let ratio = rng.random_range(1.0..shape.max_ratio.max(1.01));
                        (wr as f64 * ratio) as u32
                    }
                    None => rng.random_range(20_000..600_000),
                };
                swimmer = swimmer.with_time(event, ms.max(1));
            }
            swimmer
        })
        .collect()
}
