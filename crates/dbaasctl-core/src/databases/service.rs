//! CRUD operations on database service clusters

use tracing::debug;

use crate::client::{CloudClient, escape};
use crate::error::Result;

use super::types::{DatabaseService, ServiceCreateRequest, ServiceUpdateRequest};

/// Handler for `/cloud/project/{service_name}/database/{engine}` endpoints
pub struct ServiceHandler {
    client: CloudClient,
}

impl ServiceHandler {
    #[must_use]
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    fn base_path(service_name: &str, engine: &str) -> String {
        format!(
            "/cloud/project/{}/database/{}",
            escape(service_name),
            escape(engine)
        )
    }

    fn path(service_name: &str, engine: &str, id: &str) -> String {
        format!("{}/{}", Self::base_path(service_name, engine), escape(id))
    }

    /// List the ids of all clusters of one engine in a project
    pub async fn list(&self, service_name: &str, engine: &str) -> Result<Vec<String>> {
        self.client.get(&Self::base_path(service_name, engine)).await
    }

    /// Fetch one cluster
    pub async fn get(&self, service_name: &str, engine: &str, id: &str) -> Result<DatabaseService> {
        self.client.get(&Self::path(service_name, engine, id)).await
    }

    /// Create a cluster; the returned object is typically still `PENDING`
    pub async fn create(
        &self,
        service_name: &str,
        engine: &str,
        request: &ServiceCreateRequest,
    ) -> Result<DatabaseService> {
        debug!("creating {} cluster in project {}", engine, service_name);
        self.client
            .post(&Self::base_path(service_name, engine), request)
            .await
    }

    /// Update a cluster; the returned object reflects the accepted change
    pub async fn update(
        &self,
        service_name: &str,
        engine: &str,
        id: &str,
        request: &ServiceUpdateRequest,
    ) -> Result<DatabaseService> {
        debug!("updating {} cluster {} in project {}", engine, id, service_name);
        self.client
            .put(&Self::path(service_name, engine, id), request)
            .await
    }

    /// Delete a cluster; deletion completes asynchronously
    pub async fn delete(&self, service_name: &str, engine: &str, id: &str) -> Result<()> {
        debug!("deleting {} cluster {} in project {}", engine, id, service_name);
        self.client.delete(&Self::path(service_name, engine, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_percent_encoded() {
        assert_eq!(
            ServiceHandler::path("my project", "redis", "id/1"),
            "/cloud/project/my%20project/database/redis/id%2F1"
        );
    }

    #[test]
    fn test_base_path_shape() {
        assert_eq!(
            ServiceHandler::base_path("proj", "postgresql"),
            "/cloud/project/proj/database/postgresql"
        );
    }
}
