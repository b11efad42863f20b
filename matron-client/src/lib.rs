pub mod api;
pub mod cache;
pub mod error;
pub mod rest;

pub use api::{
    BedPayload, BedTagPayload, BedTypePayload, CohortMemberPayload, CohortPayload,
    QueueEntryPayload, TransitionPayload, UuidRef, VisitQueueEntryPayload,
};
pub use cache::{FetchState, ResourceCache};
pub use error::{ApiError, Result};
pub use rest::RestClient;
