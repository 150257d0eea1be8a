//! View-state machines: scroll bucket and one-shot reveals.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`) and synchronous:
//! handlers run to completion in the order the host delivers events.

pub mod reveal;
pub mod scroll;
pub mod session;
pub mod state;
pub mod viewport;

pub use reveal::{Registration, RevealController, RevealEvent, RevealKey, RevealPhase, StaggerPlan};
pub use scroll::{Boundary, ScrollObserver, ScrollThreshold};
pub use session::{EventScript, ViewEvent, ViewSession, ViewSettings, ViewTransition};
pub use state::{NavStyle, ViewState};
pub use viewport::{EventChannel, IntersectionBatch, IntersectionEntry, Subscription, Viewport};
