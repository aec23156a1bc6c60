use super::{provisioner::CognitoProvisioner, Login, LoginBackend};
use crate::{
    api::{
        errors::ApiError,
        graphql::mutations::{DeleteUser, ResetUser, ResetUserArguments},
    },
    identity::errors::ProvisioningError,
};
use async_trait::async_trait;
use cynic::MutationBuilder;

/// provisions through the identity provider and cleans up through the backend's self-service mutations
#[derive(Debug)]
pub struct AppSyncLoginBackend {
    provisioner: CognitoProvisioner,
    anonymous: bool,
}

impl AppSyncLoginBackend {
    /// provisions password authenticated logins
    pub fn new(provisioner: CognitoProvisioner) -> Self {
        Self {
            provisioner,
            anonymous: false,
        }
    }

    /// provisions anonymous logins
    pub fn anonymous(provisioner: CognitoProvisioner) -> Self {
        Self {
            provisioner,
            anonymous: true,
        }
    }
}

#[async_trait]
impl LoginBackend for AppSyncLoginBackend {
    async fn provision(&self) -> Result<Login, ProvisioningError> {
        if self.anonymous {
            self.provisioner.get_anonymous_app_sync_login().await
        } else {
            self.provisioner.get_app_sync_login().await
        }
    }

    async fn reset(&self, login: &Login) -> Result<(), ApiError> {
        // anonymous logins have no username of their own to restore
        let new_username = Some(login.default_username()).filter(|username| !username.is_empty());

        let response = login
            .client()
            .run(ResetUser::build(ResetUserArguments { new_username }))
            .await?;

        match response.reset_user {
            Some(user) => login.set_username(user.username),
            None => login.set_username(login.default_username()),
        }

        tracing::debug!(user_id = login.user_id(), "reset user");
        Ok(())
    }

    async fn delete(&self, login: &Login) -> Result<(), ApiError> {
        login.client().run(DeleteUser::build(())).await?;

        tracing::debug!(user_id = login.user_id(), "deleted user");
        Ok(())
    }
}
