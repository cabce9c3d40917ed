//! CRUD operations on service users

use tracing::debug;

use crate::client::{CloudClient, escape};
use crate::error::Result;

use super::types::{ServiceUser, UserCreateRequest, UserUpdateRequest};

/// Handler for `/cloud/project/{service_name}/database/{engine}/{cluster_id}/user` endpoints
pub struct UserHandler {
    client: CloudClient,
}

impl UserHandler {
    #[must_use]
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    fn base_path(service_name: &str, engine: &str, cluster_id: &str) -> String {
        format!(
            "/cloud/project/{}/database/{}/{}/user",
            escape(service_name),
            escape(engine),
            escape(cluster_id)
        )
    }

    fn path(service_name: &str, engine: &str, cluster_id: &str, id: &str) -> String {
        format!(
            "{}/{}",
            Self::base_path(service_name, engine, cluster_id),
            escape(id)
        )
    }

    /// List the ids of all users of a cluster
    pub async fn list(
        &self,
        service_name: &str,
        engine: &str,
        cluster_id: &str,
    ) -> Result<Vec<String>> {
        self.client
            .get(&Self::base_path(service_name, engine, cluster_id))
            .await
    }

    /// Fetch one user
    pub async fn get(
        &self,
        service_name: &str,
        engine: &str,
        cluster_id: &str,
        id: &str,
    ) -> Result<ServiceUser> {
        self.client
            .get(&Self::path(service_name, engine, cluster_id, id))
            .await
    }

    /// Create a user; the response carries the one-time password
    pub async fn create(
        &self,
        service_name: &str,
        engine: &str,
        cluster_id: &str,
        request: &UserCreateRequest,
    ) -> Result<ServiceUser> {
        debug!(
            "creating user {} on cluster {} in project {}",
            request.name, cluster_id, service_name
        );
        self.client
            .post(&Self::base_path(service_name, engine, cluster_id), request)
            .await
    }

    /// Update a user's ACLs
    pub async fn update(
        &self,
        service_name: &str,
        engine: &str,
        cluster_id: &str,
        id: &str,
        request: &UserUpdateRequest,
    ) -> Result<ServiceUser> {
        debug!(
            "updating user {} on cluster {} in project {}",
            id, cluster_id, service_name
        );
        self.client
            .put(&Self::path(service_name, engine, cluster_id, id), request)
            .await
    }

    /// Delete a user; deletion completes asynchronously
    pub async fn delete(
        &self,
        service_name: &str,
        engine: &str,
        cluster_id: &str,
        id: &str,
    ) -> Result<()> {
        debug!(
            "deleting user {} on cluster {} in project {}",
            id, cluster_id, service_name
        );
        self.client
            .delete(&Self::path(service_name, engine, cluster_id, id))
            .await
    }
}
