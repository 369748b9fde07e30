//! Product screens — public catalog list and the create form.
//!
//! Fetch-on-mount: the host calls `refresh` when the list view mounts
//! and renders from the fields. Failures degrade to display text, with
//! one exception: an `Unauthorized` from the service is handed to the
//! session controller as a forced logout and never shown here.

use crate::net::api::{ApiError, MarketApi};
use crate::net::types::{NewProduct, Product};
use crate::state::session::SessionController;

const FETCH_FAILED: &str = "failed to fetch products, try again later";
const SIGN_IN_REQUIRED: &str = "sign in to create products";

/// Product list and create-form state.
#[derive(Clone, Debug, Default)]
pub struct ProductsState {
    pub items: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub create_pending: bool,
}

impl ProductsState {
    /// Reload the catalog.
    pub async fn refresh(&mut self, api: &dyn MarketApi, session: &SessionController) {
        self.loading = true;
        self.error = None;
        match api.list_products().await {
            Ok(items) => self.items = items,
            Err(ApiError::Unauthorized) => session.invalidate(),
            Err(_) => self.error = Some(FETCH_FAILED.to_owned()),
        }
        self.loading = false;
    }

    /// Submit the create form. Returns the created listing on success.
    pub async fn create(
        &mut self,
        api: &dyn MarketApi,
        session: &SessionController,
        draft: NewProduct,
    ) -> Option<Product> {
        let Some(token) = session.snapshot().token().map(ToOwned::to_owned) else {
            self.error = Some(SIGN_IN_REQUIRED.to_owned());
            return None;
        };
        self.create_pending = true;
        self.error = None;
        let result = api.create_product(&token, &draft).await;
        self.create_pending = false;
        match result {
            Ok(product) => {
                self.items.push(product.clone());
                Some(product)
            }
            Err(ApiError::Unauthorized) => {
                session.invalidate();
                None
            }
            Err(error) => {
                self.error = Some(error.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
