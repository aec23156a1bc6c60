use super::{Login, LoginBackend};
use crate::{api::errors::ApiError, identity::errors::ProvisioningError};
use futures::future::try_join_all;
use std::{collections::VecDeque, sync::Arc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoginCacheError {
    /// returned if a login could not be provisioned
    #[error("could not provision a login\nCaused by: {0}")]
    Provision(#[from] ProvisioningError),

    /// returned if the backend user of a login could not be reset
    #[error("could not reset the user '{user_id}'\nCaused by: {source}")]
    Reset { user_id: String, source: ApiError },

    /// returned if the backend user of a login could not be deleted
    #[error("could not delete the user '{user_id}'\nCaused by: {source}")]
    Delete { user_id: String, source: ApiError },

    /// returned if the cache is used after it was torn down
    #[error("the login cache was already torn down")]
    TornDown,
}

/// a pool of logins shared by the tests of one file
///
/// a login handed out by [`LoginCache::get_clean_login`] is dirty until the next
/// [`LoginCache::clean`], which resets every login the cache knows and makes all of them
/// available again. [`LoginCache::reset`] deletes every backend user the cache ever issued.
///
/// the cache is driven by one test at a time and does no locking of its own
pub struct LoginCache<B> {
    backend: B,
    /// logins available for checkout, in the order they become available
    clean: VecDeque<Arc<Login>>,
    /// every login the cache knows, in issuance order, each once
    issued: Vec<Arc<Login>>,
    torn_down: bool,
}

impl<B: LoginBackend> LoginCache<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            clean: VecDeque::new(),
            issued: Vec::new(),
            torn_down: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// adds a login known to be pristine to the pool
    pub fn add_clean_login(&mut self, login: impl Into<Arc<Login>>) -> Result<(), LoginCacheError> {
        self.ensure_usable()?;
        let login = login.into();

        if !self.clean.iter().any(|clean| clean.user_id() == login.user_id()) {
            self.clean.push_back(Arc::clone(&login));
        }
        self.record_issued(login);

        Ok(())
    }

    /// provisions `count` logins concurrently and adds them to the pool
    pub async fn prepopulate(&mut self, count: usize) -> Result<(), LoginCacheError> {
        self.ensure_usable()?;

        let logins = try_join_all((0..count).map(|_| self.backend.provision())).await?;
        tracing::info!(count, "prepopulated the login cache");

        for login in logins {
            self.add_clean_login(login)?;
        }

        Ok(())
    }

    /// hands out a clean login, provisioning a new one when the pool is empty
    ///
    /// a login is never handed out twice between two calls to [`LoginCache::clean`]
    pub async fn get_clean_login(&mut self) -> Result<Arc<Login>, LoginCacheError> {
        self.ensure_usable()?;

        if let Some(login) = self.clean.pop_front() {
            return Ok(login);
        }

        let login = Arc::new(self.backend.provision().await?);
        tracing::info!(user_id = login.user_id(), "provisioned a login on demand");
        self.record_issued(Arc::clone(&login));

        Ok(login)
    }

    /// resets every known login and returns all of them to the pool
    ///
    /// the first failure aborts the cleaning and is returned
    pub async fn clean(&mut self) -> Result<(), LoginCacheError> {
        self.ensure_usable()?;

        for login in &self.issued {
            self.backend
                .reset(login)
                .await
                .map_err(|source| LoginCacheError::Reset {
                    user_id: login.user_id().to_owned(),
                    source,
                })?;
        }

        self.clean = self.issued.iter().cloned().collect();
        tracing::info!(logins = self.issued.len(), "cleaned the login cache");

        Ok(())
    }

    /// deletes the backend user of every login the cache ever issued, once each
    ///
    /// the cache is unusable afterwards, also when a deletion failed
    pub async fn reset(&mut self) -> Result<(), LoginCacheError> {
        self.ensure_usable()?;
        self.torn_down = true;
        self.clean.clear();

        let issued = std::mem::take(&mut self.issued);
        for login in &issued {
            self.backend
                .delete(login)
                .await
                .map_err(|source| LoginCacheError::Delete {
                    user_id: login.user_id().to_owned(),
                    source,
                })?;
        }

        tracing::info!(logins = issued.len(), "tore down the login cache");
        Ok(())
    }

    /// the number of logins the cache knows
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    /// the number of logins available for checkout
    pub fn clean_len(&self) -> usize {
        self.clean.len()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn ensure_usable(&self) -> Result<(), LoginCacheError> {
        if self.torn_down {
            return Err(LoginCacheError::TornDown);
        }
        Ok(())
    }

    fn record_issued(&mut self, login: Arc<Login>) {
        if !self.issued.iter().any(|issued| issued.user_id() == login.user_id()) {
            self.issued.push(login);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::{ApiClient, AuthMode};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use secrecy::SecretString;
    use std::{
        collections::HashSet,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
    };

    /// provisions `id-<n>` / `user-<n>` logins and records every reset and delete
    #[derive(Default)]
    struct FakeBackend {
        provisioned: AtomicUsize,
        resets: Mutex<Vec<String>>,
        deletes: Mutex<Vec<String>>,
        failing_user: Option<String>,
    }

    impl FakeBackend {
        fn failing_for(user_id: &str) -> Self {
            Self {
                failing_user: Some(user_id.to_owned()),
                ..Self::default()
            }
        }

        fn provisioned(&self) -> usize {
            self.provisioned.load(Ordering::SeqCst)
        }

        fn deletes(&self) -> Vec<String> {
            self.deletes.lock().unwrap().clone()
        }

        fn check(&self, login: &Login) -> Result<(), ApiError> {
            match &self.failing_user {
                Some(user_id) if user_id == login.user_id() => {
                    Err(ApiError::Graphql(vec![format!("User `{user_id}` is not ACTIVE")]))
                }
                _ => Ok(()),
            }
        }
    }

    #[async_trait]
    impl LoginBackend for FakeBackend {
        async fn provision(&self) -> Result<Login, ProvisioningError> {
            let n = self.provisioned.fetch_add(1, Ordering::SeqCst);
            Ok(fake_login(n))
        }

        async fn reset(&self, login: &Login) -> Result<(), ApiError> {
            self.check(login)?;
            self.resets.lock().unwrap().push(login.user_id().to_owned());
            login.set_username(login.default_username());
            Ok(())
        }

        async fn delete(&self, login: &Login) -> Result<(), ApiError> {
            self.check(login)?;
            self.deletes.lock().unwrap().push(login.user_id().to_owned());
            Ok(())
        }
    }

    fn fake_login(n: usize) -> Login {
        let client = ApiClient::new(
            "https://backend.invalid/graphql",
            AuthMode::Bearer(SecretString::new(format!("token-{n}"))),
        )
        .unwrap();
        Login::new(format!("id-{n}"), format!("user-{n}"), client)
    }

    /// a cache seeded with logins `id-100` onwards, so seeded and provisioned ids never collide
    fn seeded(backend: FakeBackend, count: usize) -> LoginCache<FakeBackend> {
        let mut cache = LoginCache::new(backend);
        for n in 0..count {
            cache.add_clean_login(fake_login(100 + n)).unwrap();
        }
        cache
    }

    #[tokio::test]
    async fn consecutive_checkouts_are_distinct() {
        let mut cache = seeded(FakeBackend::default(), 2);

        let first = cache.get_clean_login().await.unwrap();
        let second = cache.get_clean_login().await.unwrap();

        assert_ne!(first.user_id(), second.user_id());
        assert_eq!(cache.backend().provisioned(), 0);
    }

    #[tokio::test]
    async fn empty_pool_provisions_exactly_once() {
        let mut cache = LoginCache::new(FakeBackend::default());

        let login = cache.get_clean_login().await.unwrap();

        assert_eq!(login.user_id(), "id-0");
        assert_eq!(cache.backend().provisioned(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.clean_len(), 0);
    }

    #[tokio::test]
    async fn no_login_is_handed_out_twice_between_cleans() {
        let mut cache = seeded(FakeBackend::default(), 2);

        let mut seen = HashSet::new();
        for _ in 0..4 {
            let login = cache.get_clean_login().await.unwrap();
            assert!(seen.insert(login.user_id().to_owned()));
        }

        assert_eq!(cache.backend().provisioned(), 2);
    }

    #[tokio::test]
    async fn mutations_before_clean_are_not_observable_after() {
        let mut cache = seeded(FakeBackend::default(), 3);

        let mut checked_out = Vec::new();
        for _ in 0..4 {
            let login = cache.get_clean_login().await.unwrap();
            login.set_username(format!("{}-mutated", login.username()));
            checked_out.push(login);
        }

        cache.clean().await.unwrap();
        assert_eq!(cache.clean_len(), 4);

        for _ in 0..4 {
            let login = cache.get_clean_login().await.unwrap();
            assert_eq!(login.username(), login.default_username());
        }
        assert!(checked_out.iter().all(|login| !login.username().ends_with("-mutated")));
    }

    #[tokio::test]
    async fn clean_restores_issuance_order() {
        let mut cache = seeded(FakeBackend::default(), 2);
        cache.get_clean_login().await.unwrap();
        cache.get_clean_login().await.unwrap();
        cache.get_clean_login().await.unwrap();

        cache.clean().await.unwrap();

        let mut order = Vec::new();
        for _ in 0..3 {
            order.push(cache.get_clean_login().await.unwrap().user_id().to_owned());
        }
        assert_eq!(order, ["id-100", "id-101", "id-0"]);
    }

    #[tokio::test]
    async fn pooled_login_keeps_its_default_username_across_clean() {
        let mut cache = seeded(FakeBackend::default(), 2);

        let first = cache.get_clean_login().await.unwrap();
        first.set_username("renamed");

        cache.clean().await.unwrap();

        let again = cache.get_clean_login().await.unwrap();
        assert_eq!(again.user_id(), first.user_id());
        assert_eq!(again.username(), "user-100");
    }

    #[tokio::test]
    async fn teardown_deletes_every_issued_login_once() {
        let mut cache = seeded(FakeBackend::default(), 2);
        let duplicate = cache.get_clean_login().await.unwrap();
        cache.add_clean_login(duplicate).unwrap();
        cache.get_clean_login().await.unwrap();
        cache.get_clean_login().await.unwrap();
        cache.get_clean_login().await.unwrap();

        cache.reset().await.unwrap();

        let mut deletes = cache.backend().deletes();
        deletes.sort();
        assert_eq!(deletes, ["id-0", "id-100", "id-101"]);
        assert!(cache.is_torn_down());
        assert!(cache.is_empty());
        assert!(matches!(cache.get_clean_login().await, Err(LoginCacheError::TornDown)));
        assert!(matches!(cache.reset().await, Err(LoginCacheError::TornDown)));
    }

    #[tokio::test]
    async fn reset_failures_abort_the_clean() {
        let mut cache = seeded(FakeBackend::failing_for("id-100"), 2);
        cache.get_clean_login().await.unwrap();

        let error = cache.clean().await.unwrap_err();

        assert!(matches!(error, LoginCacheError::Reset { ref user_id, ref source }
            if user_id == "id-100" && source.message_contains("not ACTIVE")));
        assert!(cache.backend().resets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_teardown_still_marks_the_cache_unusable() {
        let mut cache = seeded(FakeBackend::failing_for("id-101"), 3);

        let error = cache.reset().await.unwrap_err();

        assert!(matches!(error, LoginCacheError::Delete { ref user_id, .. } if user_id == "id-101"));
        assert_eq!(cache.backend().deletes(), ["id-100"]);
        assert!(cache.is_torn_down());
    }

    #[tokio::test]
    async fn prepopulated_logins_are_clean() {
        let mut cache = LoginCache::new(FakeBackend::default());

        cache.prepopulate(3).await.unwrap();

        assert_eq!(cache.backend().provisioned(), 3);
        assert_eq!(cache.clean_len(), 3);
        assert_eq!(cache.len(), 3);
    }
}
