//! Small building blocks shared by the rest of the engine: 2D math, the
//! frame clock, and logger setup.

pub mod logging;
pub mod math;
pub mod time;
