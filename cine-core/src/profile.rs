//! Account profile for the persisted session.

use std::sync::Arc;

use cine_model::Account;
use tracing::debug;

use crate::api::MovieApi;
use crate::error::CoreError;
use crate::session::{SESSION_ID_KEY, SessionStore};

#[derive(Clone)]
pub struct ProfileService {
    api: Arc<dyn MovieApi>,
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for ProfileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileService").finish_non_exhaustive()
    }
}

impl ProfileService {
    pub fn new(api: Arc<dyn MovieApi>, store: Arc<dyn SessionStore>) -> Self {
        Self { api, store }
    }

    /// Fetch the account behind the stored session id.
    ///
    /// Returns [`CoreError::SessionMissing`] without calling the API when
    /// no session is stored.
    pub async fn load(&self) -> Result<Account, CoreError> {
        let session_id = self
            .store
            .get(SESSION_ID_KEY)
            .await?
            .filter(|id| !id.is_empty())
            .ok_or(CoreError::SessionMissing)?;
        let account = self.api.fetch_account(&session_id).await?;
        debug!(account = %account.masked_id(), "loaded profile");
        Ok(account)
    }
}
