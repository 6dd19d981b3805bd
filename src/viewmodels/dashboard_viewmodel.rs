// ============================================================================
// DASHBOARD VIEWMODEL - Verification queue, review actions, sub-admin form
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{error_message, ApiResult, FieldError};
use crate::models::submission::institutions;
use crate::models::{
    CreateAdminUserRequest, DashboardStats, Submission, SubmissionFilter, SubmissionSearch,
    TicketRecord,
};
use crate::services::submission_service::{
    self, dashboard_stats_query, submissions_query, REVIEW_INVALIDATES,
};
use crate::services::team_service::{self, CREATE_SUB_ADMIN_INVALIDATES};
use crate::services::{Mutation, Notice, QuerySnapshot};
use crate::state::AppServices;
use crate::utils::validation::{into_result, validate_reject_reason, validate_sub_admin};

#[derive(Clone)]
pub struct DashboardViewModel {
    services: AppServices,
    tab: Rc<Cell<SubmissionFilter>>,
    search: Rc<RefCell<SubmissionSearch>>,
    review: Mutation,
    create_admin: Mutation,
    /// Submission whose reject dialog is open
    reject_target: Rc<RefCell<Option<String>>>,
    reject_errors: Rc<RefCell<Vec<FieldError>>>,
    document_preview: Rc<RefCell<Option<String>>>,
    create_form_open: Rc<Cell<bool>>,
    create_errors: Rc<RefCell<Vec<FieldError>>>,
}

impl DashboardViewModel {
    pub fn new(services: AppServices) -> Self {
        Self {
            tab: Rc::new(Cell::new(SubmissionFilter::default())),
            search: Rc::new(RefCell::new(SubmissionSearch::default())),
            review: Mutation::new(services.changes.clone()),
            create_admin: Mutation::new(services.changes.clone()),
            reject_target: Rc::new(RefCell::new(None)),
            reject_errors: Rc::new(RefCell::new(Vec::new())),
            document_preview: Rc::new(RefCell::new(None)),
            create_form_open: Rc::new(Cell::new(false)),
            create_errors: Rc::new(RefCell::new(Vec::new())),
            services,
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn tab(&self) -> SubmissionFilter {
        self.tab.get()
    }

    pub fn set_tab(&self, tab: SubmissionFilter) {
        if self.tab.replace(tab) != tab {
            log::info!("🗂️ [DASHBOARD] Tab -> {}", tab.as_str());
            self.services.changes.notify();
        }
    }

    pub fn stats(&self) -> QuerySnapshot<DashboardStats> {
        self.services
            .queries
            .snapshot(&dashboard_stats_query().key)
    }

    pub fn submissions(&self) -> QuerySnapshot<Vec<TicketRecord>> {
        self.services
            .queries
            .snapshot(&submissions_query(self.tab()).key)
    }

    /// Fetch whatever the current tab shows and is missing or stale.
    /// Failures stay in the snapshots.
    pub async fn refresh(&self) {
        let queries = &self.services.queries;
        let stats = dashboard_stats_query();
        let list = submissions_query(self.tab());
        let tab = self.tab();

        let load_stats = async {
            if queries.needs_fetch(&stats.key) {
                let api = self.services.api.clone();
                let _ = queries
                    .fetch(stats.clone(), move || async move {
                        submission_service::get_dashboard_stats(&api).await
                    })
                    .await;
            }
        };
        let load_list = async {
            if queries.needs_fetch(&list.key) {
                let api = self.services.api.clone();
                let _ = queries
                    .fetch(list.clone(), move || async move {
                        submission_service::list_submissions(&api, tab).await
                    })
                    .await;
            }
        };
        futures::join!(load_stats, load_list);
    }

    pub fn search(&self) -> SubmissionSearch {
        self.search.borrow().clone()
    }

    pub fn update_search<F>(&self, update: F)
    where
        F: FnOnce(&mut SubmissionSearch),
    {
        update(&mut self.search.borrow_mut());
        self.services.changes.notify();
    }

    pub fn clear_search(&self) {
        self.update_search(|search| *search = SubmissionSearch::default());
    }

    /// Cards for the current tab after search and filters
    pub fn visible_submissions(&self) -> Vec<Submission> {
        let tab = self.tab();
        let records = self.submissions().data;
        let cards: Vec<Submission> = records
            .iter()
            .flat_map(|list| list.iter())
            .map(|record| Submission::from_record(record, tab))
            .collect();
        self.search.borrow().apply(cards)
    }

    pub fn institution_options(&self) -> Vec<String> {
        self.submissions()
            .data
            .map(|list| institutions(&list))
            .unwrap_or_default()
    }

    pub fn is_reviewing(&self) -> bool {
        self.review.is_pending()
    }

    // ------------------------------------------------------------------
    // Review actions
    // ------------------------------------------------------------------

    pub async fn approve(&self, id: &str) -> ApiResult<()> {
        let api = self.services.api.clone();
        let result = self
            .review
            .run(&self.services.queries, &REVIEW_INVALIDATES, async {
                submission_service::approve(&api, id).await
            })
            .await;
        self.report(result, "Submission approved successfully.", false)
    }

    pub fn open_reject(&self, id: &str) {
        *self.reject_target.borrow_mut() = Some(id.to_string());
        self.reject_errors.borrow_mut().clear();
        self.services.changes.notify();
    }

    pub fn cancel_reject(&self) {
        *self.reject_target.borrow_mut() = None;
        self.reject_errors.borrow_mut().clear();
        self.services.changes.notify();
    }

    pub fn reject_target(&self) -> Option<String> {
        self.reject_target.borrow().clone()
    }

    pub fn reject_errors(&self) -> Vec<FieldError> {
        self.reject_errors.borrow().clone()
    }

    /// Reject the submission of the open dialog. A blank reason keeps the dialog open.
    pub async fn confirm_reject(&self, reason: &str) -> ApiResult<()> {
        let Some(id) = self.reject_target() else {
            return Ok(());
        };
        let errors = validate_reject_reason(reason);
        *self.reject_errors.borrow_mut() = errors.clone();
        if let Err(e) = into_result(errors) {
            self.services.changes.notify();
            return Err(e);
        }

        let api = self.services.api.clone();
        let result = self
            .review
            .run(&self.services.queries, &REVIEW_INVALIDATES, async {
                submission_service::reject(&api, &id, reason).await
            })
            .await;
        if result.is_ok() {
            *self.reject_target.borrow_mut() = None;
        }
        self.report(result, "Submission rejected successfully.", true)
    }

    fn report<T>(&self, result: ApiResult<T>, success: &str, softer: bool) -> ApiResult<()> {
        let outcome = match result {
            Ok(_) => {
                let notice = if softer {
                    Notice::warning("Success", success)
                } else {
                    Notice::success("Success", success)
                };
                self.services.notifier.show(notice);
                Ok(())
            }
            Err(e) => {
                self.services
                    .notifier
                    .show(Notice::error("Error", error_message(&e)));
                Err(e)
            }
        };
        self.services.changes.notify();
        outcome
    }

    // ------------------------------------------------------------------
    // Document preview
    // ------------------------------------------------------------------

    /// Open the document of `submission`, or explain that there is none
    pub fn view_document(&self, submission: &Submission) {
        match &submission.document_url {
            Some(url) => *self.document_preview.borrow_mut() = Some(url.clone()),
            None => self.services.notifier.show(Notice::warning(
                "No Document Available",
                "No document has been uploaded for this submission.",
            )),
        }
        self.services.changes.notify();
    }

    pub fn document_preview(&self) -> Option<String> {
        self.document_preview.borrow().clone()
    }

    pub fn close_document(&self) {
        *self.document_preview.borrow_mut() = None;
        self.services.changes.notify();
    }

    // ------------------------------------------------------------------
    // Sub-admin creation
    // ------------------------------------------------------------------

    pub fn is_create_form_open(&self) -> bool {
        self.create_form_open.get()
    }

    pub fn set_create_form_open(&self, open: bool) {
        self.create_form_open.set(open);
        if !open {
            self.create_errors.borrow_mut().clear();
        }
        self.services.changes.notify();
    }

    pub fn create_errors(&self) -> Vec<FieldError> {
        self.create_errors.borrow().clone()
    }

    pub fn is_creating(&self) -> bool {
        self.create_admin.is_pending()
    }

    pub async fn create_sub_admin(&self, request: CreateAdminUserRequest) -> ApiResult<()> {
        let errors = validate_sub_admin(&request);
        *self.create_errors.borrow_mut() = errors.clone();
        if let Err(e) = into_result(errors) {
            self.services.changes.notify();
            return Err(e);
        }

        let api = self.services.api.clone();
        let result = self
            .create_admin
            .run(&self.services.queries, &CREATE_SUB_ADMIN_INVALIDATES, async {
                team_service::create_sub_admin(&api, &request).await
            })
            .await;

        let outcome = match result {
            Ok(_) => {
                self.services.notifier.show(Notice::success(
                    "Sub Admin Created",
                    "The new protocol team member has been added successfully.",
                ));
                self.create_form_open.set(false);
                Ok(())
            }
            Err(e) => {
                self.services
                    .notifier
                    .show(Notice::error("Creation Failed", error_message(&e)));
                Err(e)
            }
        };
        self.services.changes.notify();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::DisplayStatus;
    use crate::services::NoticeLevel;
    use crate::test_support::{admin_user, test_services, MockTransport};

    const APPLICATIONS: &str = r#"[
        {"id":1,"fullName":"Ama Mensah","ticketType":"STUDENT","verificationStatus":"PENDING",
         "institutionName":"KNUST","courseOfStudy":"Nursing","phoneNumber":"0241112222"},
        {"id":2,"fullName":"Kwame Asante","ticketType":"NON_STUDENT","ticketStatus":"PAID"},
        {"id":3,"fullName":"Efua Sarpong","ticketType":"STUDENT","verificationStatus":"APPROVED",
         "institutionName":"University of Ghana","studentDocumentUrl":"https://cdn/doc.png"}
    ]"#;

    fn signed_in(transport: &MockTransport) -> (DashboardViewModel, AppServices, std::rc::Rc<crate::test_support::RecordingNotifier>) {
        let (services, notifier, _) = test_services(transport);
        services.session.set_auth("jwt".into(), admin_user());
        (DashboardViewModel::new(services.clone()), services, notifier)
    }

    fn serve_dashboard(transport: &MockTransport) {
        transport.respond("GET", "/admin/dashboard/stats", 200, r#"{"pendingStudentApplications":1}"#);
        transport.respond("GET", "/student-tickets/admin/applications", 200, APPLICATIONS);
    }

    #[tokio::test]
    async fn refresh_loads_stats_and_cards() {
        let transport = MockTransport::new();
        serve_dashboard(&transport);
        let (vm, _, _) = signed_in(&transport);

        vm.refresh().await;

        let cards = vm.visible_submissions();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1].status, DisplayStatus::Paid);
        assert!(vm.stats().data.is_some());
        assert_eq!(vm.institution_options(), vec!["KNUST", "University of Ghana"]);

        // Everything fresh: a second refresh stays off the network
        vm.refresh().await;
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn tab_switch_queries_with_status() {
        let transport = MockTransport::new();
        serve_dashboard(&transport);
        let (vm, _, _) = signed_in(&transport);

        vm.set_tab(SubmissionFilter::Paid);
        vm.refresh().await;

        let list_call = transport
            .requests()
            .into_iter()
            .find(|r| r.url.ends_with("/student-tickets/admin/applications"))
            .unwrap();
        assert_eq!(list_call.query_param("status"), Some("PAID"));
        assert!(vm
            .visible_submissions()
            .iter()
            .all(|card| card.status == DisplayStatus::Paid));
    }

    #[tokio::test]
    async fn search_narrows_cards() {
        let transport = MockTransport::new();
        serve_dashboard(&transport);
        let (vm, _, _) = signed_in(&transport);
        vm.refresh().await;

        vm.update_search(|s| s.term = "nurs".into());
        assert_eq!(vm.visible_submissions()[0].name, "Ama Mensah");
        assert_eq!(vm.visible_submissions().len(), 1);

        vm.update_search(|s| {
            s.term.clear();
            s.ticket_type = "STUDENT".into();
        });
        assert_eq!(vm.visible_submissions().len(), 2);

        vm.clear_search();
        assert_eq!(vm.visible_submissions().len(), 3);
    }

    #[tokio::test]
    async fn approve_invalidates_list_and_stats() {
        let transport = MockTransport::new();
        serve_dashboard(&transport);
        transport.respond("POST", "/student-tickets/admin/approve/1", 200, "{}");
        let (vm, services, notifier) = signed_in(&transport);
        vm.refresh().await;

        vm.approve("1").await.unwrap();

        assert_eq!(notifier.notices()[0].message, "Submission approved successfully.");
        assert!(services.queries.needs_fetch(&dashboard_stats_query().key));
        assert!(services.queries.needs_fetch(&submissions_query(SubmissionFilter::All).key));

        vm.refresh().await;
        assert_eq!(transport.calls_to("/admin/dashboard/stats"), 2);
        assert_eq!(transport.calls_to("/student-tickets/admin/applications"), 2);
    }

    #[tokio::test]
    async fn review_buttons_render_busy_while_approving() {
        let transport = MockTransport::new();
        transport.respond("POST", "/student-tickets/admin/approve/1", 200, "{}");
        let (vm, services, _) = signed_in(&transport);
        let renders = Rc::new(RefCell::new(Vec::new()));
        let (sink, watched) = (renders.clone(), vm.clone());
        services
            .changes
            .subscribe(move || sink.borrow_mut().push(watched.is_reviewing()));

        vm.approve("1").await.unwrap();

        assert_eq!(renders.borrow().first(), Some(&true));
        assert_eq!(renders.borrow().last(), Some(&false));
        assert!(!vm.is_reviewing());
    }

    #[tokio::test]
    async fn create_form_renders_busy_while_submitting() {
        let transport = MockTransport::new();
        transport.respond("POST", "/admin/users/protocol-team", 200, r#"{"id":5}"#);
        let (vm, services, _) = signed_in(&transport);
        let renders = Rc::new(RefCell::new(Vec::new()));
        let (sink, watched) = (renders.clone(), vm.clone());
        services
            .changes
            .subscribe(move || sink.borrow_mut().push(watched.is_creating()));

        vm.create_sub_admin(CreateAdminUserRequest {
            full_name: "Joe Mensah".into(),
            email: "joe@event.gh".into(),
            password: "12345678".into(),
            phone_number: "0201234567".into(),
        })
        .await
        .unwrap();

        assert!(renders.borrow().contains(&true));
        assert!(!vm.is_creating());
    }

    #[tokio::test]
    async fn failed_approve_shows_error_and_keeps_cache() {
        let transport = MockTransport::new();
        serve_dashboard(&transport);
        transport.respond("POST", "/student-tickets/admin/approve/1", 409, r#"{"message":"Already reviewed"}"#);
        let (vm, services, notifier) = signed_in(&transport);
        vm.refresh().await;

        assert!(vm.approve("1").await.is_err());

        let notice = &notifier.notices()[0];
        assert_eq!(notice.title, "Error");
        assert_eq!(notice.message, "Already reviewed");
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(!services.queries.needs_fetch(&dashboard_stats_query().key));
        assert!(!vm.is_reviewing());
    }

    #[tokio::test]
    async fn reject_requires_reason_then_posts_it() {
        let transport = MockTransport::new();
        transport.respond("POST", "/student-tickets/admin/reject/3", 200, "");
        let (vm, _, notifier) = signed_in(&transport);

        vm.open_reject("3");
        let err = vm.confirm_reject("  ").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(transport.requests().is_empty());
        assert_eq!(vm.reject_target().as_deref(), Some("3"));

        vm.confirm_reject("ID expired").await.unwrap();
        assert_eq!(vm.reject_target(), None);
        assert_eq!(
            transport.requests()[0].body,
            Some(serde_json::json!({"reason": "ID expired"}))
        );
        assert_eq!(notifier.notices()[0].message, "Submission rejected successfully.");
    }

    #[tokio::test]
    async fn missing_document_is_reported() {
        let transport = MockTransport::new();
        serve_dashboard(&transport);
        let (vm, _, notifier) = signed_in(&transport);
        vm.refresh().await;
        let cards = vm.visible_submissions();

        vm.view_document(&cards[0]);
        assert_eq!(notifier.notices()[0].title, "No Document Available");
        assert_eq!(vm.document_preview(), None);

        vm.view_document(&cards[2]);
        assert_eq!(vm.document_preview().as_deref(), Some("https://cdn/doc.png"));
    }

    #[tokio::test]
    async fn create_sub_admin_validates_and_invalidates_team() {
        let transport = MockTransport::new();
        transport.respond("POST", "/admin/users/protocol-team", 200, r#"{"id":5}"#);
        let (vm, _, notifier) = signed_in(&transport);
        vm.set_create_form_open(true);

        let bad = CreateAdminUserRequest {
            full_name: "Jo".into(),
            email: "jo@event.gh".into(),
            password: "12345678".into(),
            phone_number: "0201234567".into(),
        };
        assert!(vm.create_sub_admin(bad).await.is_err());
        assert_eq!(vm.create_errors()[0].field, "fullName");
        assert!(transport.requests().is_empty());

        let good = CreateAdminUserRequest {
            full_name: "Joe Mensah".into(),
            email: "joe@event.gh".into(),
            password: "12345678".into(),
            phone_number: "+233201234567".into(),
        };
        vm.create_sub_admin(good).await.unwrap();
        assert!(!vm.is_create_form_open());
        assert_eq!(notifier.notices()[0].title, "Sub Admin Created");
    }
}
