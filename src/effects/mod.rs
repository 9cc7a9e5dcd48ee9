//! Effect sequencing for handlers
//!
//! Handlers describe their side effects as brackets, step sequences and
//! delayed puts. Every update they publish goes through an [`ActionSender`].
//!
//! [`ActionSender`]: crate::app::ActionSender

pub mod bracket;
pub mod delayed;
pub mod sequence;

pub use bracket::{bracket, with_waiting_key, Outcome, Waiting, WaitingGuard};
pub use delayed::DelayedPut;
pub use sequence::{CallFuture, Phase, Sequence, Step};
