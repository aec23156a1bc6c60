//! Runs the scenarios of a test file against one login cache.
//!
//! A [`Suite`] owns its [`LoginCache`]: every scenario checks out the clean logins it asks for,
//! the cache is cleaned after each scenario and torn down by [`Suite::finish`]. A panicking
//! scenario is recorded and the remaining ones still run.

use backend::login::{AppSyncLoginBackend, CognitoProvisioner, Login, LoginBackend, LoginCache, LoginCacheError};
use common::environment::Environment;
use futures::FutureExt;
use std::{future::Future, panic::AssertUnwindSafe, sync::Arc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuiteError {
    /// returned if scenarios panicked or could not check out their logins
    #[error("{suite}: {} scenario(s) failed: {}", scenarios.len(), scenarios.join(", "))]
    Scenarios { suite: &'static str, scenarios: Vec<String> },

    /// returned if the logins could not be cleaned after a scenario, later scenarios are skipped
    #[error("{suite}: could not clean the logins after '{scenario}'\nCaused by: {source}")]
    Clean {
        suite: &'static str,
        scenario: String,
        source: LoginCacheError,
    },

    /// returned if the logins could not be provisioned up front
    #[error("{suite}: could not provision the logins\nCaused by: {source}")]
    Provision {
        suite: &'static str,
        source: LoginCacheError,
    },

    /// returned if the backend users could not be deleted
    #[error("{suite}: could not tear down the logins\nCaused by: {source}")]
    Teardown {
        suite: &'static str,
        source: LoginCacheError,
    },
}

pub struct Suite<B = AppSyncLoginBackend> {
    name: &'static str,
    logins: LoginCache<B>,
    failed: Vec<String>,
    broken: Option<(String, LoginCacheError)>,
}

impl Suite<AppSyncLoginBackend> {
    /// a suite of password authenticated logins for the deployment configured in the environment
    pub fn new(name: &'static str) -> Self {
        Self::with_backend(name, AppSyncLoginBackend::new(provisioner()))
    }

    /// a suite of anonymous logins for the deployment configured in the environment
    pub fn anonymous(name: &'static str) -> Self {
        Self::with_backend(name, AppSyncLoginBackend::anonymous(provisioner()))
    }
}

impl<B: LoginBackend> Suite<B> {
    pub fn with_backend(name: &'static str, backend: B) -> Self {
        Self {
            name,
            logins: LoginCache::new(backend),
            failed: Vec::new(),
            broken: None,
        }
    }

    /// provisions logins up front, for files whose scenarios each need several
    pub async fn prepopulate(&mut self, count: usize) -> Result<(), SuiteError> {
        self.logins
            .prepopulate(count)
            .await
            .map_err(|source| SuiteError::Provision {
                suite: self.name,
                source,
            })
    }

    pub fn logins(&self) -> &LoginCache<B> {
        &self.logins
    }

    /// runs `scenario` with `count` clean logins, then cleans every login of the suite
    pub async fn run<F, Fut>(&mut self, scenario: &str, count: usize, test: F)
    where
        F: FnOnce(Vec<Arc<Login>>) -> Fut,
        Fut: Future<Output = ()>,
    {
        if self.broken.is_some() {
            tracing::warn!(suite = self.name, scenario, "skipped, the logins are not clean");
            return;
        }

        tracing::info!(suite = self.name, scenario, "running");

        match self.checkout(count).await {
            Ok(logins) => {
                if AssertUnwindSafe(test(logins)).catch_unwind().await.is_err() {
                    self.failed.push(scenario.to_owned());
                }
            }
            Err(error) => {
                tracing::error!(suite = self.name, scenario, %error, "could not check out logins");
                self.failed.push(scenario.to_owned());
            }
        }

        if let Err(error) = self.logins.clean().await {
            tracing::error!(suite = self.name, scenario, %error, "could not clean the logins");
            self.broken = Some((scenario.to_owned(), error));
        }
    }

    /// deletes every backend user the suite created and reports the failures
    pub async fn finish(mut self) -> Result<(), SuiteError> {
        self.logins.reset().await.map_err(|source| SuiteError::Teardown {
            suite: self.name,
            source,
        })?;

        if let Some((scenario, source)) = self.broken {
            return Err(SuiteError::Clean {
                suite: self.name,
                scenario,
                source,
            });
        }

        if !self.failed.is_empty() {
            return Err(SuiteError::Scenarios {
                suite: self.name,
                scenarios: self.failed,
            });
        }

        Ok(())
    }

    async fn checkout(&mut self, count: usize) -> Result<Vec<Arc<Login>>, LoginCacheError> {
        let mut logins = Vec::with_capacity(count);
        for _ in 0..count {
            logins.push(self.logins.get_clean_login().await?);
        }
        Ok(logins)
    }
}

fn provisioner() -> CognitoProvisioner {
    CognitoProvisioner::for_tests(Environment::try_init())
        .unwrap_or_else(|error| panic!("the deployment is not configured: {error}"))
}
