//! Typed endpoint bindings, one module per resource family.
//!
//! Write payloads are explicit structs validated before anything goes on the
//! wire; a payload that fails validation never produces a request.

pub mod beds;
pub mod locations;
pub mod patient_lists;
pub mod queues;

pub use beds::{BedPayload, BedTagPayload, BedTypePayload};
pub use patient_lists::{CohortMemberPayload, CohortPayload};
pub use queues::{QueueEntryPayload, TransitionPayload, UuidRef, VisitQueueEntryPayload};

/// Representation hint appended to list reads so nested fields are populated.
pub(crate) const REP_FULL: &str = "v=full";
