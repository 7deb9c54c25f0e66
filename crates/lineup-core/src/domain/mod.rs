//! Domain model for swim-club team composition
//!
//! - `Swimmer` / `PersonalBest`: the pool the solvers choose from
//! - `Event` / `Stroke`: canonical individual events
//! - `SwimmerRecord`: the upstream data contract, turned into `Swimmer`s
//!   with `Swimmer::from_record`

mod event;
mod gender;
mod normalize;
mod record;
mod stroke;
mod swimmer;


pub use event::{
    canonical_event_name, display_to_storage, parse_event_list, storage_to_display, Event,
    REFERENCE_EVENTS,
};
pub use gender::Gender;
pub use normalize::normalize_label;
pub use record::{DataWarning, SwimmerRecord, TimeRecord};
pub use stroke::Stroke;
pub use swimmer::{PersonalBest, Swimmer, SwimmerId};
