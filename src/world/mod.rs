// world/ - Progress queries
//
// Pure functions over the scroll-progress domain.
// No state beyond the progress cell, no allocation - just math.

mod acts;
mod easing;
mod progress;

pub use acts::*;
pub use easing::*;
pub use progress::*;
