// ============================================================================
// QUERY CLIENT - Keyed cache of remote reads with tag invalidation
// ============================================================================
// One entry per QueryKey. Concurrent reads of the same key share a single
// request, fresh data is served without a network call, and mutations mark
// entries stale through tags so the next read (or a subscriber) refetches.
// ============================================================================

use chrono::{DateTime, Utc};
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use crate::error::{ApiError, ApiResult};
use crate::state::ChangeSignal;

type SharedFetch = Shared<LocalBoxFuture<'static, Result<Rc<dyn Any>, ApiError>>>;
type Subscriber = Rc<dyn Fn(&QueryKey, QueryStatus)>;

/// Invalidation groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryTag {
    Submissions,
    DashboardStats,
    ApprovedTickets,
    ProtocolTeam,
}

/// Operation name plus its parameters, rendered as strings
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub operation: &'static str,
    pub params: Vec<String>,
}

impl QueryKey {
    pub fn new(operation: &'static str, params: Vec<String>) -> Self {
        Self { operation, params }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.operation, self.params.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub key: QueryKey,
    pub tags: Vec<QueryTag>,
}

impl Query {
    pub fn new(operation: &'static str, params: Vec<String>, tags: &[QueryTag]) -> Self {
        Self {
            key: QueryKey::new(operation, params),
            tags: tags.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Pending,
    Success,
    Error,
}

struct InFlight {
    id: u64,
    future: SharedFetch,
    /// Set when a tag was invalidated while the request was out
    invalidated: bool,
}

struct CacheEntry {
    tags: Vec<QueryTag>,
    status: QueryStatus,
    data: Option<Rc<dyn Any>>,
    error: Option<ApiError>,
    stale: bool,
    last_fetched_at: Option<DateTime<Utc>>,
    in_flight: Option<InFlight>,
}

impl CacheEntry {
    fn new(tags: Vec<QueryTag>) -> Self {
        Self {
            tags,
            status: QueryStatus::Idle,
            data: None,
            error: None,
            stale: true,
            last_fetched_at: None,
            in_flight: None,
        }
    }

    fn is_fresh(&self) -> bool {
        self.status == QueryStatus::Success && !self.stale && self.in_flight.is_none()
    }
}

/// Read-only view of an entry for rendering
#[derive(Debug, Clone)]
pub struct QuerySnapshot<T> {
    pub status: QueryStatus,
    /// Last successful data, kept while a refetch is pending
    pub data: Option<Rc<T>>,
    pub error: Option<ApiError>,
    pub is_stale: bool,
    pub is_fetching: bool,
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl<T> QuerySnapshot<T> {
    fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            is_stale: true,
            is_fetching: false,
            last_fetched_at: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_fetching && self.data.is_none()
    }
}

enum Plan {
    Cached(Rc<dyn Any>),
    Join(u64, SharedFetch),
    Start,
}

#[derive(Clone, Default)]
pub struct QueryClient {
    entries: Rc<RefCell<HashMap<QueryKey, CacheEntry>>>,
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
    next_id: Rc<Cell<u64>>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read through the cache.
    ///
    /// Joins an in-flight request for the same key, returns fresh data without
    /// calling `fetcher`, otherwise starts a new request. Earlier data stays
    /// readable through `snapshot` while the new request is pending.
    pub async fn fetch<T, F, Fut>(&self, query: Query, fetcher: F) -> ApiResult<Rc<T>>
    where
        T: 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>> + 'static,
    {
        let plan = {
            let mut entries = self.entries.borrow_mut();
            let entry = entries
                .entry(query.key.clone())
                .or_insert_with(|| CacheEntry::new(query.tags.clone()));

            match (&entry.in_flight, &entry.data) {
                (Some(flight), _) if !flight.invalidated => {
                    Plan::Join(flight.id, flight.future.clone())
                }
                (_, Some(data)) if entry.is_fresh() => Plan::Cached(data.clone()),
                _ => Plan::Start,
            }
        };

        let (id, future) = match plan {
            Plan::Cached(data) => {
                log::debug!("📦 [QUERY] {} served from cache", query.key);
                return downcast(data);
            }
            Plan::Join(id, future) => {
                log::debug!("🔗 [QUERY] {} joined in-flight request", query.key);
                (id, future)
            }
            Plan::Start => {
                let future = fetcher()
                    .map(|result| result.map(|value| Rc::new(value) as Rc<dyn Any>))
                    .boxed_local()
                    .shared();
                let id = self.next_id.get() + 1;
                self.next_id.set(id);
                self.begin(&query, id, future.clone());
                (id, future)
            }
        };

        let result = future.await;
        self.settle(&query.key, id, &result);
        result.and_then(downcast)
    }

    fn begin(&self, query: &Query, id: u64, future: SharedFetch) {
        {
            let mut entries = self.entries.borrow_mut();
            let entry = entries
                .entry(query.key.clone())
                .or_insert_with(|| CacheEntry::new(query.tags.clone()));
            entry.status = QueryStatus::Pending;
            entry.in_flight = Some(InFlight {
                id,
                future,
                invalidated: false,
            });
        }
        log::debug!("🌐 [QUERY] {} fetching", query.key);
        self.notify(&query.key, QueryStatus::Pending);
    }

    /// Record a finished request, unless it was superseded or the cache was cleared
    fn settle(&self, key: &QueryKey, id: u64, result: &Result<Rc<dyn Any>, ApiError>) {
        let status = {
            let mut entries = self.entries.borrow_mut();
            let Some(entry) = entries.get_mut(key) else {
                return;
            };
            let invalidated = match &entry.in_flight {
                Some(flight) if flight.id == id => flight.invalidated,
                _ => return,
            };
            entry.in_flight = None;

            match result {
                Ok(data) => {
                    entry.data = Some(data.clone());
                    entry.error = None;
                    entry.status = QueryStatus::Success;
                    entry.stale = invalidated;
                    entry.last_fetched_at = Some(Utc::now());
                }
                Err(error) => {
                    log::warn!("⚠️ [QUERY] {} failed: {}", key, error);
                    entry.error = Some(error.clone());
                    entry.status = QueryStatus::Error;
                    entry.stale = invalidated;
                }
            }
            entry.status
        };
        self.notify(key, status);
    }

    pub fn snapshot<T: 'static>(&self, key: &QueryKey) -> QuerySnapshot<T> {
        let entries = self.entries.borrow();
        let Some(entry) = entries.get(key) else {
            return QuerySnapshot::idle();
        };
        QuerySnapshot {
            status: entry.status,
            data: entry.data.clone().and_then(|d| d.downcast::<T>().ok()),
            error: entry.error.clone(),
            is_stale: entry.stale,
            is_fetching: entry.in_flight.is_some(),
            last_fetched_at: entry.last_fetched_at,
        }
    }

    /// True when a view should trigger a read: never fetched, or stale and idle.
    /// A failed read settles non-stale and is retried only once something
    /// marks it stale again (invalidation or page entry).
    pub fn needs_fetch(&self, key: &QueryKey) -> bool {
        match self.entries.borrow().get(key) {
            None => true,
            Some(entry) => match entry.status {
                QueryStatus::Idle => entry.in_flight.is_none(),
                QueryStatus::Success | QueryStatus::Error => {
                    entry.stale && entry.in_flight.is_none()
                }
                QueryStatus::Pending => false,
            },
        }
    }

    /// Mark settled entries carrying one of `tags` stale without notifying.
    /// Used when a page is entered; the caller re-renders and the page refetches
    /// while its previous data stays visible. Requests already out are left alone.
    pub fn mark_stale(&self, tags: &[QueryTag]) {
        let mut marked = 0;
        for entry in self.entries.borrow_mut().values_mut() {
            if entry.in_flight.is_none() && entry.tags.iter().any(|t| tags.contains(t)) {
                entry.stale = true;
                marked += 1;
            }
        }
        log::debug!("⏳ [QUERY] Marked {:?} stale ({} entries)", tags, marked);
    }

    /// Mark every entry carrying one of `tags` stale
    pub fn invalidate_tags(&self, tags: &[QueryTag]) {
        let touched: Vec<(QueryKey, QueryStatus)> = {
            let mut entries = self.entries.borrow_mut();
            entries
                .iter_mut()
                .filter(|(_, entry)| entry.tags.iter().any(|t| tags.contains(t)))
                .map(|(key, entry)| {
                    entry.stale = true;
                    if let Some(flight) = entry.in_flight.as_mut() {
                        flight.invalidated = true;
                    }
                    (key.clone(), entry.status)
                })
                .collect()
        };

        log::info!("♻️ [QUERY] Invalidated {:?} ({} entries)", tags, touched.len());
        for (key, status) in touched {
            self.notify(&key, status);
        }
    }

    /// Drop every entry. In-flight results landing afterwards are discarded.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        log::info!("🗑️ [QUERY] Cache cleared");
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&QueryKey, QueryStatus) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    fn notify(&self, key: &QueryKey, status: QueryStatus) {
        let subscribers: Vec<Subscriber> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback(key, status);
        }
    }
}

fn downcast<T: 'static>(data: Rc<dyn Any>) -> ApiResult<Rc<T>> {
    data.downcast::<T>()
        .map_err(|_| ApiError::Decode("Cached value has an unexpected type".to_string()))
}

// ============================================================================
// MUTATIONS
// ============================================================================

/// Tracks whether a write is running and invalidates tags once it succeeds.
/// It does not refuse overlapping runs; views disable their controls instead,
/// so `changes` is raised when a run starts and when it ends.
#[derive(Clone)]
pub struct Mutation {
    pending: Rc<Cell<usize>>,
    changes: ChangeSignal,
}

struct PendingGuard(Rc<Cell<usize>>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

impl Mutation {
    pub fn new(changes: ChangeSignal) -> Self {
        Self {
            pending: Rc::new(Cell::new(0)),
            changes,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get() > 0
    }

    pub async fn run<T, Fut>(
        &self,
        client: &QueryClient,
        invalidates: &[QueryTag],
        operation: Fut,
    ) -> ApiResult<T>
    where
        Fut: Future<Output = ApiResult<T>>,
    {
        self.pending.set(self.pending.get() + 1);
        let guard = PendingGuard(self.pending.clone());
        self.changes.notify();
        let result = operation.await;
        drop(guard);

        if result.is_ok() {
            client.invalidate_tags(invalidates);
        }
        self.changes.notify();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_query() -> Query {
        Query::new("dashboardStats", vec![], &[QueryTag::DashboardStats])
    }

    fn counting_fetcher(
        calls: &Rc<Cell<u32>>,
        value: u32,
    ) -> impl FnOnce() -> LocalBoxFuture<'static, ApiResult<u32>> {
        let calls = calls.clone();
        move || {
            async move {
                calls.set(calls.get() + 1);
                tokio::task::yield_now().await;
                Ok(value)
            }
            .boxed_local()
        }
    }

    #[tokio::test]
    async fn concurrent_reads_share_one_request() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));

        let (a, b) = futures::join!(
            client.fetch(stats_query(), counting_fetcher(&calls, 7)),
            client.fetch(stats_query(), counting_fetcher(&calls, 8)),
        );

        assert_eq!(*a.unwrap(), 7);
        assert_eq!(*b.unwrap(), 7);
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn fresh_data_is_served_without_a_call() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));

        client.fetch(stats_query(), counting_fetcher(&calls, 1)).await.unwrap();
        let again = client.fetch(stats_query(), counting_fetcher(&calls, 2)).await.unwrap();

        assert_eq!(*again, 1);
        assert_eq!(calls.get(), 1);
        assert!(!client.needs_fetch(&stats_query().key));
    }

    #[tokio::test]
    async fn invalidation_triggers_refetch() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        client.subscribe(move |key, status| sink.borrow_mut().push((key.operation, status)));

        client.fetch(stats_query(), counting_fetcher(&calls, 1)).await.unwrap();
        client.invalidate_tags(&[QueryTag::Submissions, QueryTag::DashboardStats]);
        assert!(client.needs_fetch(&stats_query().key));

        let refreshed = client.fetch(stats_query(), counting_fetcher(&calls, 2)).await.unwrap();
        assert_eq!(*refreshed, 2);
        assert_eq!(calls.get(), 2);
        assert_eq!(
            *seen.borrow(),
            vec![
                ("dashboardStats", QueryStatus::Pending),
                ("dashboardStats", QueryStatus::Success),
                ("dashboardStats", QueryStatus::Success),
                ("dashboardStats", QueryStatus::Pending),
                ("dashboardStats", QueryStatus::Success),
            ]
        );
    }

    #[tokio::test]
    async fn unrelated_tags_stay_fresh() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));
        client.fetch(stats_query(), counting_fetcher(&calls, 1)).await.unwrap();

        client.invalidate_tags(&[QueryTag::ProtocolTeam]);

        assert!(!client.needs_fetch(&stats_query().key));
    }

    #[tokio::test]
    async fn invalidation_during_flight_leaves_result_stale() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));

        let (result, _) = futures::join!(
            client.fetch(stats_query(), counting_fetcher(&calls, 3)),
            async { client.invalidate_tags(&[QueryTag::DashboardStats]) },
        );

        assert_eq!(*result.unwrap(), 3);
        let snapshot = client.snapshot::<u32>(&stats_query().key);
        assert_eq!(snapshot.status, QueryStatus::Success);
        assert!(snapshot.is_stale);
        assert!(client.needs_fetch(&stats_query().key));
    }

    #[tokio::test]
    async fn previous_data_visible_while_refetching() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));
        client.fetch(stats_query(), counting_fetcher(&calls, 1)).await.unwrap();
        client.invalidate_tags(&[QueryTag::DashboardStats]);

        let (_, during) = futures::join!(
            client.fetch(stats_query(), counting_fetcher(&calls, 2)),
            async { client.snapshot::<u32>(&stats_query().key) },
        );

        assert_eq!(during.status, QueryStatus::Pending);
        assert_eq!(during.data.as_deref(), Some(&1));
        assert!(during.is_fetching);
        assert!(!during.is_loading());
    }

    #[tokio::test]
    async fn errors_are_kept_until_marked_stale() {
        let client = QueryClient::new();
        let query = Query::new("protocolTeam", vec![], &[QueryTag::ProtocolTeam]);

        let result = client
            .fetch(query.clone(), || async { Err::<u32, _>(ApiError::from_status(500, None)) })
            .await;

        assert_eq!(result.unwrap_err().status(), Some(500));
        let snapshot = client.snapshot::<u32>(&query.key);
        assert_eq!(snapshot.status, QueryStatus::Error);
        assert!(snapshot.error.is_some());
        assert!(!client.needs_fetch(&query.key));
    }

    #[tokio::test]
    async fn failed_read_retries_after_invalidation() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));

        let failed = client
            .fetch(stats_query(), || async {
                Err::<u32, _>(ApiError::Network("connection reset".into()))
            })
            .await;
        assert!(failed.is_err());
        assert!(!client.needs_fetch(&stats_query().key));

        client.invalidate_tags(&[QueryTag::DashboardStats]);
        assert!(client.needs_fetch(&stats_query().key));

        let recovered = client.fetch(stats_query(), counting_fetcher(&calls, 4)).await.unwrap();
        assert_eq!(*recovered, 4);
        assert_eq!(calls.get(), 1);
        let snapshot = client.snapshot::<u32>(&stats_query().key);
        assert_eq!(snapshot.status, QueryStatus::Success);
        assert!(snapshot.error.is_none());
        assert!(!client.needs_fetch(&stats_query().key));
    }

    #[tokio::test]
    async fn mark_stale_keeps_data_and_skips_requests_in_flight() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));
        client.fetch(stats_query(), counting_fetcher(&calls, 1)).await.unwrap();

        client.mark_stale(&[QueryTag::DashboardStats]);

        let snapshot = client.snapshot::<u32>(&stats_query().key);
        assert!(snapshot.is_stale);
        assert_eq!(snapshot.data.as_deref(), Some(&1));
        assert!(client.needs_fetch(&stats_query().key));

        let (result, _) = futures::join!(
            client.fetch(stats_query(), counting_fetcher(&calls, 2)),
            async { client.mark_stale(&[QueryTag::DashboardStats]) },
        );
        assert_eq!(*result.unwrap(), 2);
        assert!(!client.needs_fetch(&stats_query().key));
    }

    #[tokio::test]
    async fn clear_discards_entries_and_late_results() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));

        let (result, _) = futures::join!(
            client.fetch(stats_query(), counting_fetcher(&calls, 5)),
            async { client.clear() },
        );

        assert_eq!(*result.unwrap(), 5);
        assert_eq!(client.snapshot::<u32>(&stats_query().key).status, QueryStatus::Idle);
        assert!(client.needs_fetch(&stats_query().key));
    }

    #[tokio::test]
    async fn keys_with_different_params_are_separate() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));
        let pending = Query::new("submissions", vec!["PENDING".into()], &[QueryTag::Submissions]);
        let paid = Query::new("submissions", vec!["PAID".into()], &[QueryTag::Submissions]);

        client.fetch(pending, counting_fetcher(&calls, 1)).await.unwrap();
        client.fetch(paid, counting_fetcher(&calls, 2)).await.unwrap();

        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn mutation_invalidates_only_on_success() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));
        client.fetch(stats_query(), counting_fetcher(&calls, 1)).await.unwrap();
        let mutation = Mutation::new(ChangeSignal::new());

        let failed = mutation
            .run(&client, &[QueryTag::DashboardStats], async {
                Err::<(), _>(ApiError::from_status(400, None))
            })
            .await;
        assert!(failed.is_err());
        assert!(!client.needs_fetch(&stats_query().key));

        let (ok, pending_during) = futures::join!(
            mutation.run(&client, &[QueryTag::DashboardStats], async {
                tokio::task::yield_now().await;
                Ok::<_, ApiError>(())
            }),
            async { mutation.is_pending() },
        );
        assert!(ok.is_ok());
        assert!(pending_during);
        assert!(!mutation.is_pending());
        assert!(client.needs_fetch(&stats_query().key));
    }

    #[tokio::test]
    async fn mutation_signals_start_and_end() {
        let client = QueryClient::new();
        let changes = ChangeSignal::new();
        let mutation = Mutation::new(changes.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (sink, watched) = (seen.clone(), mutation.clone());
        changes.subscribe(move || sink.borrow_mut().push(watched.is_pending()));

        mutation
            .run(&client, &[QueryTag::Submissions], async {
                tokio::task::yield_now().await;
                Ok::<_, ApiError>(())
            })
            .await
            .unwrap();

        assert_eq!(*seen.borrow(), vec![true, false]);
    }
}
