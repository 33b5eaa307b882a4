//! List records returned by the Koyeb API.
//!
//! Only the fields the exporter reads are modelled. Every string field
//! defaults to an empty string when the API omits it or sends `null`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Koyeb App.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct App {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub organization_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
}

/// Koyeb API credential (token).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credential {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub organization_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// The part of a deployment's definition the exporter labels with.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeploymentDefinition {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub definition_type: String,
}

/// Koyeb Deployment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Deployment {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub app_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deployment_group: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub service_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(default)]
    pub definition: Option<DeploymentDefinition>,
}

impl Deployment {
    /// Definition name, or empty when the deployment carries no definition.
    pub fn definition_name(&self) -> &str {
        self.definition.as_ref().map_or("", |d| d.name.as_str())
    }

    /// Definition type (e.g. `WEB`, `WORKER`), or empty.
    pub fn definition_type(&self) -> &str {
        self.definition
            .as_ref()
            .map_or("", |d| d.definition_type.as_str())
    }
}

/// Koyeb Domain.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Domain {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub app_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub organization_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub domain_type: String,
}

/// Koyeb Instance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Instance {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub app_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub service_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub organization_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
}

/// The registry sub-objects a secret may carry.
///
/// Upstream guarantees nothing about these being mutually exclusive; the
/// exporter classifies them, this type only records which are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrySources {
    #[serde(default)]
    pub azure_container_registry: Option<Value>,
    #[serde(default)]
    pub digital_ocean_registry: Option<Value>,
    #[serde(default)]
    pub docker_hub_registry: Option<Value>,
    #[serde(default)]
    pub gcp_container_registry: Option<Value>,
    #[serde(default)]
    pub github_registry: Option<Value>,
    #[serde(default)]
    pub gitlab_registry: Option<Value>,
    #[serde(default)]
    pub private_registry: Option<Value>,
}

/// Koyeb Secret.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secret {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub organization_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub secret_type: String,
    #[serde(flatten)]
    pub registries: RegistrySources,
}

/// Koyeb Service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Service {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub app_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub organization_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
}
