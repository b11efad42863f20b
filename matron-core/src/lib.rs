pub mod error;
pub mod list;
pub mod pagination;
pub mod project;
pub mod resource;
pub mod rows;
pub mod search;

pub use error::{CoreError, Result};
pub use list::{ListQuery, ListResult};
pub use pagination::Paginator;
pub use resource::{
    AdmissionLocation, Bed, BedTag, BedTagMap, BedType, Cohort, CohortMember, DisplayRef,
    FhirBundle, FhirLocation, FhirPatient, Link, Patient, Queue, QueueEntry, QueueMetric,
    QueueNumber, Results, Visit,
};
pub use search::{filter_rows, fuzzy_score};
