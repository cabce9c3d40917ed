//! Request and response models for the Cloud Databases API
//!
//! Field names follow the wire format (camelCase JSON). The `status` field
//! is a free-form string owned by the remote service; a resource's `id` is
//! assigned at creation and never changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::poll::StatusSource;

/// Node placement pattern for a database service cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodesPattern {
    pub flavor: String,
    pub region: String,
    pub number: u32,
}

/// Body for creating a database service cluster
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCreateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub plan: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_pattern: Option<NodesPattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
}

/// Body for updating a database service cluster; only set fields change
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_pattern: Option<NodesPattern>,
}

impl ServiceUpdateRequest {
    /// True if no field is set, i.e. the update would be a no-op
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.plan.is_none()
            && self.version.is_none()
            && self.nodes_pattern.is_none()
    }
}

/// Primary user provisioned with a new service cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryUser {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// A database service cluster as reported by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseService {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub domain: String,
    pub plan: String,
    pub version: String,
    #[serde(default)]
    pub network_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(default)]
    pub node_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_user: Option<PrimaryUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl StatusSource for DatabaseService {
    fn status(&self) -> &str {
        &self.status
    }
}

/// Body for creating a service user
///
/// The ACL fields (categories, commands, keys, channels) apply to redis
/// engines; other engines ignore them.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
}

/// Body for updating a service user; the name is immutable
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
}

/// A service user as reported by the API
///
/// `password` is only present in the creation response; subsequent reads
/// omit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUser {
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl StatusSource for ServiceUser {
    fn status(&self) -> &str {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_skips_unset_fields() {
        let req = ServiceCreateRequest {
            plan: "essential".into(),
            version: "7.2".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"plan": "essential", "version": "7.2"}));
    }

    #[test]
    fn test_create_request_camel_case_keys() {
        let req = ServiceCreateRequest {
            plan: "business".into(),
            version: "15".into(),
            nodes_pattern: Some(NodesPattern {
                flavor: "db1-7".into(),
                region: "GRA".into(),
                number: 3,
            }),
            network_id: Some("net-1".into()),
            subnet_id: Some("sub-1".into()),
            description: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("nodesPattern").is_some());
        assert!(json.get("networkId").is_some());
        assert!(json.get("subnetId").is_some());
    }

    #[test]
    fn test_service_deserializes_minimal_response() {
        let json = serde_json::json!({
            "id": "abc-123",
            "status": "PENDING",
            "plan": "essential",
            "version": "7.2"
        });
        let service: DatabaseService = serde_json::from_value(json).unwrap();
        assert_eq!(service.id, "abc-123");
        assert_eq!(service.status(), "PENDING");
        assert!(service.primary_user.is_none());
    }

    #[test]
    fn test_user_password_only_on_create() {
        let created: ServiceUser = serde_json::from_value(serde_json::json!({
            "id": "u1", "name": "app", "status": "CREATING", "password": "s3cret"
        }))
        .unwrap();
        assert_eq!(created.password.as_deref(), Some("s3cret"));

        let read: ServiceUser = serde_json::from_value(serde_json::json!({
            "id": "u1", "name": "app", "status": "READY"
        }))
        .unwrap();
        assert!(read.password.is_none());
    }

    #[test]
    fn test_update_request_is_empty() {
        assert!(ServiceUpdateRequest::default().is_empty());
        let req = ServiceUpdateRequest {
            plan: Some("business".into()),
            ..Default::default()
        };
        assert!(!req.is_empty());
    }
}
