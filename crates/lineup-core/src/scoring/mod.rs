//! FINA scoring against the world-record table

mod fina;
mod records;

#[cfg(test)]
mod tests;

pub use fina::{fina_points, fina_points_for_label, points_from_record, FinaScore};
pub use records::{PoolLength, WorldRecord, WorldRecordTable};
