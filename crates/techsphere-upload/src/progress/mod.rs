//! Progress throttling.
//!
//! Rate-limits progress events so that fast transfers do not flood emitters.

mod throttle;

pub use throttle::ProgressThrottle;
