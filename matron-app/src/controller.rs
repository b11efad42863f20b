//! The reusable list view controller.
//!
//! One pipeline shared by every table in the suite:
//! cache fetch → project raw records into rows → local search/filter →
//! client-side pagination. Mutation commands write through the same cache
//! keys, so a successful write refreshes every controller on that key.

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::Utc;
use matron_client::{FetchState, ResourceCache, RestClient};
use matron_core::project::{
    project_bed_tags, project_bed_types, project_beds, project_metrics, project_patient_lists,
    project_queue_entries, project_ward_summaries,
};
use matron_core::resource::{AdmissionLocation, Bed, BedTag, BedType, Cohort, QueueEntry, QueueMetric};
use matron_core::rows::{
    BedRow, BedTagRow, BedTypeRow, MetricCard, PatientListRow, QueueRow, WardSummaryRow,
};
use matron_core::{filter_rows, ListQuery, ListResult, Paginator};

use crate::keys;

type RowLoader = Arc<
    dyn Fn() -> Pin<Box<dyn Future<Output = matron_client::Result<Value>> + Send>> + Send + Sync,
>;
type Projector<R> = Arc<dyn Fn(&Value) -> Vec<R> + Send + Sync>;
type Extractor<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

pub struct ListController<R> {
    cache: Arc<ResourceCache>,
    key: String,
    query: ListQuery,
    loader: RowLoader,
    project: Projector<R>,
    extract: Extractor<R>,
    /// When set, `total_count` comes from the backend's `totalCount` rather
    /// than the filtered set size (server-paginated queue view).
    server_total: bool,
}

impl<R: Clone> ListController<R> {
    pub fn new(
        cache: Arc<ResourceCache>,
        key: impl Into<String>,
        page_size: usize,
        loader: RowLoader,
        project: Projector<R>,
        extract: Extractor<R>,
    ) -> Self {
        Self {
            cache,
            key: key.into(),
            query: ListQuery::new(page_size),
            loader,
            project,
            extract,
            server_total: false,
        }
    }

    pub fn with_server_total(mut self) -> Self {
        self.server_total = true;
        self
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Fetch (or revalidate) and derive the current page.
    pub async fn refresh(&self) -> ListResult<R> {
        let loader = self.loader.clone();
        let state = self.cache.fetch(&self.key, move || loader()).await;
        self.derive(state)
    }

    /// Force a re-fetch through the cache, then derive.
    pub async fn mutate(&self) -> ListResult<R> {
        let state = self.cache.mutate(&self.key).await;
        self.derive(state)
    }

    /// Derive from whatever is cached right now, without fetching.
    pub fn current(&self) -> ListResult<R> {
        self.derive(self.cache.snapshot(&self.key))
    }

    /// Change the search term; any change resets to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> ListResult<R> {
        self.query.set_search_term(term);
        self.current()
    }

    pub fn go_to(&mut self, page: usize) -> ListResult<R> {
        self.query.set_page(page);
        self.current()
    }

    /// Change the page size; always resets to page 1.
    pub fn set_page_size(&mut self, page_size: usize) -> ListResult<R> {
        self.query.set_page_size(page_size);
        self.current()
    }

    fn derive(&self, state: FetchState) -> ListResult<R> {
        let all = state
            .data
            .as_ref()
            .map(|value| (self.project)(value))
            .unwrap_or_default();

        let extract = self.extract.clone();
        let filtered = filter_rows(all, self.query.search_term(), |row| extract(row));

        let total_count = if self.server_total {
            state
                .data
                .as_ref()
                .and_then(|v| v.get("totalCount"))
                .and_then(|v| v.as_u64())
                .map(|n| n as usize)
                .unwrap_or(filtered.len())
        } else {
            filtered.len()
        };

        let paginator = Paginator::new(filtered.len(), self.query.page_size());
        let page = paginator.clamp(self.query.page());

        ListResult {
            rows: paginator.slice(&filtered, page).to_vec(),
            total_count,
            total_pages: paginator.total_pages(),
            page,
            is_loading: state.is_loading,
            is_validating: state.is_validating,
            error: state.error,
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: &Value) -> Vec<T> {
    match serde_json::from_value(value.clone()) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "Cached value no longer decodes, projecting empty");
            Vec::new()
        }
    }
}

/// Bed administration table: one row per bed, searched by bed number.
pub fn bed_list(
    cache: Arc<ResourceCache>,
    client: Arc<RestClient>,
    page_size: usize,
) -> ListController<BedRow> {
    let loader: RowLoader = Arc::new(move || {
        let client = client.clone();
        Box::pin(async move {
            let beds = client.list_beds(None).await?;
            Ok(serde_json::to_value(beds)?)
        })
    });

    ListController::new(
        cache,
        keys::BEDS,
        page_size,
        loader,
        Arc::new(|value| project_beds(&decode::<Bed>(value))),
        Arc::new(|row: &BedRow| row.bed_number.clone()),
    )
}

pub fn bed_type_list(
    cache: Arc<ResourceCache>,
    client: Arc<RestClient>,
    page_size: usize,
) -> ListController<BedTypeRow> {
    let loader: RowLoader = Arc::new(move || {
        let client = client.clone();
        Box::pin(async move {
            let types = client.list_bed_types().await?;
            Ok(serde_json::to_value(types)?)
        })
    });

    ListController::new(
        cache,
        keys::BED_TYPES,
        page_size,
        loader,
        Arc::new(|value| project_bed_types(&decode::<BedType>(value))),
        Arc::new(|row: &BedTypeRow| row.name.clone()),
    )
}

pub fn bed_tag_list(
    cache: Arc<ResourceCache>,
    client: Arc<RestClient>,
    page_size: usize,
) -> ListController<BedTagRow> {
    let loader: RowLoader = Arc::new(move || {
        let client = client.clone();
        Box::pin(async move {
            let tags = client.list_bed_tags().await?;
            Ok(serde_json::to_value(tags)?)
        })
    });

    ListController::new(
        cache,
        keys::BED_TAGS,
        page_size,
        loader,
        Arc::new(|value| project_bed_tags(&decode::<BedTag>(value))),
        Arc::new(|row: &BedTagRow| row.name.clone()),
    )
}

/// Admission-location table: ward occupancy summaries.
pub fn ward_summary_list(
    cache: Arc<ResourceCache>,
    client: Arc<RestClient>,
    page_size: usize,
) -> ListController<WardSummaryRow> {
    let loader: RowLoader = Arc::new(move || {
        let client = client.clone();
        Box::pin(async move {
            let locations = client.list_admission_locations().await?;
            Ok(serde_json::to_value(locations)?)
        })
    });

    ListController::new(
        cache,
        keys::ADMISSION_LOCATIONS,
        page_size,
        loader,
        Arc::new(|value| project_ward_summaries(&decode::<AdmissionLocation>(value))),
        Arc::new(|row: &WardSummaryRow| row.ward.clone()),
    )
}

/// Loader for the queue board key: aggregates every server page and keeps the
/// backend total. Shared with the poller, which refreshes the same entry.
pub(crate) fn queue_entries_loader(client: Arc<RestClient>) -> RowLoader {
    Arc::new(move || {
        let client = client.clone();
        Box::pin(async move {
            let (entries, total) = client.list_queue_entries().await?;
            Ok(serde_json::json!({
                "results": serde_json::to_value(entries)?,
                "totalCount": total,
            }))
        })
    })
}

/// The live queue board. Server-paginated upstream: the loader aggregates all
/// pages and keeps the backend total authoritative.
pub fn queue_board(
    cache: Arc<ResourceCache>,
    client: Arc<RestClient>,
    page_size: usize,
) -> ListController<QueueRow> {
    let loader = queue_entries_loader(client);

    ListController::new(
        cache,
        keys::QUEUE_ENTRIES,
        page_size,
        loader,
        Arc::new(|value| {
            let entries = value
                .get("results")
                .map(decode::<QueueEntry>)
                .unwrap_or_default();
            project_queue_entries(&entries, Utc::now())
        }),
        Arc::new(|row: &QueueRow| row.patient_name.clone()),
    )
    .with_server_total()
}

pub fn patient_list_overview(
    cache: Arc<ResourceCache>,
    client: Arc<RestClient>,
    page_size: usize,
) -> ListController<PatientListRow> {
    let loader: RowLoader = Arc::new(move || {
        let client = client.clone();
        Box::pin(async move {
            let cohorts = client.list_patient_lists().await?;
            Ok(serde_json::to_value(cohorts)?)
        })
    });

    ListController::new(
        cache,
        keys::PATIENT_LISTS,
        page_size,
        loader,
        Arc::new(|value| project_patient_lists(&decode::<Cohort>(value))),
        Arc::new(|row: &PatientListRow| row.name.clone()),
    )
}

/// Metrics cards for the queue dashboard.
pub fn metrics_cards(
    cache: Arc<ResourceCache>,
    client: Arc<RestClient>,
    page_size: usize,
) -> ListController<MetricCard> {
    let loader: RowLoader = Arc::new(move || {
        let client = client.clone();
        Box::pin(async move {
            let metrics = client.queue_metrics().await?;
            Ok(serde_json::to_value(metrics)?)
        })
    });

    ListController::new(
        cache,
        keys::QUEUE_METRICS,
        page_size,
        loader,
        Arc::new(|value| project_metrics(&decode::<QueueMetric>(value))),
        Arc::new(|row: &MetricCard| row.service.clone()),
    )
}
