//! Line connectors drawn between notes that land together
//!
//! - `entry`: Classification of co-timed notes into a line shape
//! - `window`: Time window in which a line is shown
//! - `tracker`: Grouping notes into entries and recycling expired ones

pub mod entry;
pub mod tracker;
pub mod window;

pub use entry::{LineEntry, LineMember, LineShape, LineType, classify};
pub use tracker::LineTracker;
pub use window::VisibilityWindow;
