// ============================================================================
// TICKETS VIEWMODEL - Paid tickets table: paging, filters, CSV export
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::NaiveDate;

use crate::models::{ApprovedTicketsQuery, DashboardStats, Page, TicketRecord};
use crate::services::submission_service::{self, approved_tickets_query, dashboard_stats_query};
use crate::services::QuerySnapshot;
use crate::state::AppServices;
use crate::utils::csv_export::{export_filename, tickets_to_csv};

#[derive(Clone)]
pub struct TicketsViewModel {
    services: AppServices,
    page_size: u32,
    /// One-based, as shown in the pager
    page: Rc<Cell<u32>>,
    ticket_type: Rc<RefCell<Option<String>>>,
    payment_method: Rc<RefCell<Option<String>>>,
    /// Last page shown, kept on screen while the next one loads
    previous: Rc<RefCell<Option<Rc<Page<TicketRecord>>>>>,
    selected: Rc<RefCell<Option<TicketRecord>>>,
}

impl TicketsViewModel {
    pub fn new(services: AppServices, page_size: u32) -> Self {
        Self {
            services,
            page_size: page_size.max(1),
            page: Rc::new(Cell::new(1)),
            ticket_type: Rc::new(RefCell::new(None)),
            payment_method: Rc::new(RefCell::new(None)),
            previous: Rc::new(RefCell::new(None)),
            selected: Rc::new(RefCell::new(None)),
        }
    }

    pub fn page(&self) -> u32 {
        self.page.get()
    }

    pub fn set_page(&self, page: u32) {
        self.page.set(page.max(1));
        self.services.changes.notify();
    }

    pub fn ticket_type(&self) -> Option<String> {
        self.ticket_type.borrow().clone()
    }

    pub fn payment_method(&self) -> Option<String> {
        self.payment_method.borrow().clone()
    }

    /// Empty selection clears the filter
    pub fn set_ticket_type(&self, value: Option<String>) {
        *self.ticket_type.borrow_mut() = value.filter(|v| !v.is_empty());
        self.services.changes.notify();
    }

    pub fn set_payment_method(&self, value: Option<String>) {
        *self.payment_method.borrow_mut() = value.filter(|v| !v.is_empty());
        self.services.changes.notify();
    }

    /// Request for the current pager position (zero-based on the wire)
    pub fn current_query(&self) -> ApprovedTicketsQuery {
        ApprovedTicketsQuery::new(self.page().saturating_sub(1), self.page_size)
            .with_ticket_type(self.ticket_type())
            .with_payment_method(self.payment_method())
    }

    pub fn tickets(&self) -> QuerySnapshot<Page<TicketRecord>> {
        self.services
            .queries
            .snapshot(&approved_tickets_query(&self.current_query()).key)
    }

    pub fn stats(&self) -> QuerySnapshot<DashboardStats> {
        self.services.queries.snapshot(&dashboard_stats_query().key)
    }

    /// Current page if loaded, else the previously shown one
    pub fn displayed_page(&self) -> Option<Rc<Page<TicketRecord>>> {
        self.tickets()
            .data
            .or_else(|| self.previous.borrow().clone())
    }

    pub fn total_pages(&self) -> u32 {
        self.displayed_page().map(|p| p.total_pages).unwrap_or(0)
    }

    pub async fn refresh(&self) {
        let queries = &self.services.queries;
        let stats = dashboard_stats_query();
        let params = self.current_query();
        let tickets = approved_tickets_query(&params);

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
        let load_tickets = async {
            if queries.needs_fetch(&tickets.key) {
                let api = self.services.api.clone();
                let fetched = queries
                    .fetch(tickets.clone(), move || async move {
                        submission_service::list_approved_tickets(&api, &params).await
                    })
                    .await;
                if let Ok(page) = fetched {
                    *self.previous.borrow_mut() = Some(page);
                }
            }
        };
        futures::join!(load_stats, load_tickets);
    }

    pub fn select(&self, ticket: TicketRecord) {
        *self.selected.borrow_mut() = Some(ticket);
        self.services.changes.notify();
    }

    pub fn close_details(&self) {
        *self.selected.borrow_mut() = None;
        self.services.changes.notify();
    }

    pub fn selected(&self) -> Option<TicketRecord> {
        self.selected.borrow().clone()
    }

    /// `(filename, csv)` for the page on screen; `None` when nothing is loaded
    pub fn export_csv(&self, today: NaiveDate) -> Option<(String, String)> {
        let page = self.displayed_page()?;
        log::info!("📤 [EXPORT] {} tickets", page.content.len());
        Some((export_filename(today), tickets_to_csv(&page.content)))
    }
}
