mod engine;
mod page;
mod timer;


/// Angs in the Sri Guru Granth Sahib.
pub const TOTAL_ANGS: u32 = 1430;

pub use engine::{NavigationEngine, Step, following_ang};
pub use page::{PageBuffer, Verse};
pub use timer::{AdvanceTimer, sleep_until_deadline};
