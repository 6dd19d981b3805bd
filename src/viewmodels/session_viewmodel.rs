// ============================================================================
// SESSION VIEWMODEL - Login form + logout
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{error_message, ApiResult, FieldError};
use crate::models::User;
use crate::services::{auth_service, Notice};
use crate::state::AppServices;
use crate::utils::validation::{into_result, validate_login};

#[derive(Clone)]
pub struct SessionViewModel {
    services: AppServices,
    loading: Rc<Cell<bool>>,
    errors: Rc<RefCell<Vec<FieldError>>>,
}

impl SessionViewModel {
    pub fn new(services: AppServices) -> Self {
        Self {
            services,
            loading: Rc::new(Cell::new(false)),
            errors: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        self.errors.borrow().clone()
    }

    /// Validate, call the API, store the session.
    ///
    /// Invalid input never reaches the network. Success and failure are both
    /// reported through a notice; the caller only decides where to navigate.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let errors = validate_login(email, password);
        *self.errors.borrow_mut() = errors.clone();
        if let Err(e) = into_result(errors) {
            self.services.changes.notify();
            return Err(e);
        }

        self.loading.set(true);
        self.services.changes.notify();

        let result = auth_service::login(&self.services.api, email, password).await;

        self.loading.set(false);
        let outcome = match result {
            Ok(response) => {
                self.services.queries.clear();
                self.services
                    .session
                    .set_auth(response.token, response.user.clone());
                self.services
                    .notifier
                    .show(Notice::success("Login Successful", "Welcome back!"));
                Ok(response.user)
            }
            Err(e) => {
                log::error!("❌ [AUTH] Login failed: {}", e);
                self.services
                    .notifier
                    .show(Notice::error("Login Failed", error_message(&e)));
                Err(e)
            }
        };
        self.services.changes.notify();
        outcome
    }

    /// Forget the session and everything fetched under it
    pub fn logout(&self) {
        self.services.session.logout();
        self.services.queries.clear();
        self.errors.borrow_mut().clear();
    }

    pub fn current_user(&self) -> Option<User> {
        self.services.session.user()
    }
}
