//! Template editing: the edit session state machine, its command enum, and
//! the fingerprint behind dirty tracking.

mod fingerprint;
pub mod ops;
pub mod session;

pub use ops::{DragLocation, EditOp, MoveEvent};
pub use session::{ExitCheck, ExitOutcome, ExitResolution, TemplateEditSession};
