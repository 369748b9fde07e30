//! Admin user directory — list, role/status updates, deletion.
//!
//! Same fetch-on-mount discipline as the product screens. Successful
//! updates set `notice`; clearing it is the host's rendering concern.

use crate::net::api::{ApiError, MarketApi};
use crate::net::types::{Role, User, UserStatus};
use crate::state::session::SessionController;

const FETCH_FAILED: &str = "failed to fetch users";
const ADMIN_REQUIRED: &str = "administrator sign-in required";

/// User-management screen state.
#[derive(Clone, Debug, Default)]
pub struct UsersState {
    pub items: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
    /// Success message after an update; the host clears it.
    pub notice: Option<String>,
}

impl UsersState {
    /// Reload the directory.
    pub async fn refresh(&mut self, api: &dyn MarketApi, session: &SessionController) {
        let Some(token) = self.bearer(session) else { return };
        self.loading = true;
        self.error = None;
        match api.list_users(&token).await {
            Ok(items) => self.items = items,
            Err(ApiError::Unauthorized) => session.invalidate(),
            Err(_) => self.error = Some(FETCH_FAILED.to_owned()),
        }
        self.loading = false;
    }

    /// Change a user's role and mirror it locally.
    pub async fn set_role(&mut self, api: &dyn MarketApi, session: &SessionController, id: &str, role: Role) {
        let Some(token) = self.bearer(session) else { return };
        self.begin_update();
        match api.update_user_role(&token, id, role).await {
            Ok(()) => {
                if let Some(user) = self.items.iter_mut().find(|u| u.id == id) {
                    user.role = role;
                }
                self.notice = Some("role updated".to_owned());
            }
            Err(error) => self.apply_error(error, session),
        }
    }

    /// Change a user's status and mirror it locally.
    pub async fn set_status(
        &mut self,
        api: &dyn MarketApi,
        session: &SessionController,
        id: &str,
        status: UserStatus,
    ) {
        let Some(token) = self.bearer(session) else { return };
        self.begin_update();
        match api.update_user_status(&token, id, status).await {
            Ok(()) => {
                if let Some(user) = self.items.iter_mut().find(|u| u.id == id) {
                    user.status = status;
                }
                self.notice = Some("status updated".to_owned());
            }
            Err(error) => self.apply_error(error, session),
        }
    }

    /// Delete a user and drop them from the local list.
    pub async fn remove(&mut self, api: &dyn MarketApi, session: &SessionController, id: &str) {
        let Some(token) = self.bearer(session) else { return };
        self.begin_update();
        match api.delete_user(&token, id).await {
            Ok(()) => {
                self.items.retain(|u| u.id != id);
                self.notice = Some("user deleted".to_owned());
            }
            Err(error) => self.apply_error(error, session),
        }
    }

    fn begin_update(&mut self) {
        self.error = None;
        self.notice = None;
    }

    fn apply_error(&mut self, error: ApiError, session: &SessionController) {
        match error {
            // Token invalidation resets the session; a 403 only means
            // this account lost the admin role, so surface it instead.
            ApiError::Unauthorized => session.invalidate(),
            other => self.error = Some(other.to_string()),
        }
    }

    fn bearer(&mut self, session: &SessionController) -> Option<String> {
        let token = session.snapshot().token().map(ToOwned::to_owned);
        if token.is_none() {
            self.error = Some(ADMIN_REQUIRED.to_owned());
        }
        token
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
