//! App layer - central state management and action dispatch
//!
//! The store actor receives actions, reduces them into state, and hands them
//! to the sagas, which reply with more actions through an [`ActionSender`].

pub mod actor;
pub mod reducer;
pub mod sender;
pub mod state;
pub mod waiting;

pub use actor::StoreActor;
pub use sender::ActionSender;
pub use state::AppState;
pub use waiting::WaitingState;
