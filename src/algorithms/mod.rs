//! Pure numeric helpers shared by the scoring services.

pub mod inversions;
pub mod stats;

pub use inversions::{count_inversions, max_inversions};
pub use stats::{coefficient_of_variation, mean, median, std_dev};
