//! Performance issue detectors
//!
//! Each detector looks for one anti-pattern in the cause-effect graph:
//!
//! - [`ExcessiveRerenderDetector`]: views updated too often
//! - [`CascadingUpdateDetector`]: one state fanning out to many views
//! - [`FrequentTriggerDetector`]: causes that fire too often
//! - [`DeepChainDetector`]: long trigger-to-view chains
//! - [`TimerCascadeDetector`]: timers reaching several views
//! - [`WholeObjectDetector`]: model objects observed as a whole
//!
//! [`DetectorEngine`] runs them in that order.

pub mod base;
pub mod engine;

mod cascading_update;
mod deep_chain;
mod excessive_rerender;
mod frequent_trigger;
mod timer_cascade;
mod whole_object;

pub use base::{Detector, Thresholds};
pub use engine::{detect, DetectorEngine};

pub use cascading_update::CascadingUpdateDetector;
pub use deep_chain::DeepChainDetector;
pub use excessive_rerender::ExcessiveRerenderDetector;
pub use frequent_trigger::FrequentTriggerDetector;
pub use timer_cascade::TimerCascadeDetector;
pub use whole_object::WholeObjectDetector;
