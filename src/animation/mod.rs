pub mod axis;
pub mod clock;
pub mod pan;

pub use axis::AxisState;
pub use clock::{Clock, ManualClock, SystemClock};
pub use pan::{Axis, FrameUpdate, PanAnimation};
