//! Map geometry: regions, coasts, typed adjacency edges, supply centers and
//! home centers. See [`Rules`] for the public surface (component C1).

mod border;
pub mod builder;
mod region;
mod rules;

pub use self::border::Border;
pub use self::region::{Mode, Region, RegionId, Terrain};
pub use self::rules::Rules;
