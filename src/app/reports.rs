use std::sync::Arc;
use std::time::Duration;

use dashmap::DashSet;

use crate::app::auth::AuthContext;
use crate::app::triage::TriageError;
use crate::domain::moderation::{Report, ReportStatus, StatusFilter};
use crate::infra::api::{AdminApi, ApiError};
use crate::infra::cache::ListCache;

/// Reports visible through `filter`, in fetch order.
pub fn filter_reports(reports: &[Report], filter: StatusFilter) -> Vec<&Report> {
    reports
        .iter()
        .filter(|report| filter.matches(report.status))
        .collect()
}

/// Sets the status of the report with `id`; every other entry is untouched.
pub fn with_status(reports: Vec<Report>, id: &str, status: ReportStatus) -> Vec<Report> {
    reports
        .into_iter()
        .map(|report| {
            if report.id == id {
                Report { status, ..report }
            } else {
                report
            }
        })
        .collect()
}

/// Drops the report with `id`.
pub fn without_report(reports: Vec<Report>, id: &str) -> Vec<Report> {
    reports.into_iter().filter(|report| report.id != id).collect()
}

/// The shared report list plus the set of reports with a mutation in flight.
#[derive(Clone)]
pub struct ReportCache {
    list: ListCache<Report>,
    in_flight: Arc<DashSet<String>>,
}

/// Held while a mutation on one report runs.
pub struct MutationGuard {
    id: String,
    in_flight: Arc<DashSet<String>>,
}

impl Drop for MutationGuard {
    fn drop(&mut self) {
        self.in_flight.remove(&self.id);
    }
}

impl ReportCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            list: ListCache::new(ttl),
            in_flight: Arc::new(DashSet::new()),
        }
    }

    pub async fn load<A>(&self, api: &A) -> Result<Vec<Report>, ApiError>
    where
        A: AdminApi + ?Sized,
    {
        self.list
            .get_or_fetch(|| async {
                let reports = api.list_reports().await?;
                tracing::debug!(count = reports.len(), "fetched reports");
                Ok::<_, ApiError>(reports)
            })
            .await
    }

    pub async fn find<A>(&self, api: &A, id: &str) -> Result<Option<Report>, ApiError>
    where
        A: AdminApi + ?Sized,
    {
        let reports = self.load(api).await?;
        Ok(reports.into_iter().find(|report| report.id == id))
    }

    pub async fn snapshot(&self) -> Option<Vec<Report>> {
        self.list.peek().await
    }

    pub async fn set_status(&self, id: &str, status: ReportStatus) {
        self.list
            .patch(|reports| with_status(reports, id, status))
            .await;
    }

    pub async fn remove(&self, id: &str) {
        self.list.patch(|reports| without_report(reports, id)).await;
    }

    /// Claims report `id` for a mutation; `None` when one is already running.
    pub fn begin_mutation(&self, id: &str) -> Option<MutationGuard> {
        if !self.in_flight.insert(id.to_string()) {
            return None;
        }
        Some(MutationGuard {
            id: id.to_string(),
            in_flight: self.in_flight.clone(),
        })
    }

    pub fn is_mutating(&self, id: &str) -> bool {
        self.in_flight.contains(id)
    }
}

/// Deletes a report from the list view. Without an admin session nothing is
/// sent and the caller is expected to send the admin to the login page.
pub async fn delete_report<A>(
    api: &A,
    auth: &AuthContext,
    cache: &ReportCache,
    id: &str,
) -> Result<(), TriageError>
where
    A: AdminApi + ?Sized,
{
    if !auth.is_logged_in() {
        return Err(TriageError::LoginRequired);
    }
    let _guard = cache.begin_mutation(id).ok_or(TriageError::Busy)?;

    api.delete_report(id).await.map_err(|err| {
        tracing::error!(error = ?err, report_id = %id, "failed to delete report");
        TriageError::Api(err)
    })?;

    cache.remove(id).await;
    tracing::info!(report_id = %id, "report deleted");
    Ok(())
}
