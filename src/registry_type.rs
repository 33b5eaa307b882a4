//! Container-registry classification for Koyeb secrets.

use koyeb_api::RegistrySources;
use std::fmt;

/// Which external container registry a secret authenticates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegistryType {
    #[default]
    Undefined,
    Azure,
    DigitalOcean,
    DockerHub,
    Google,
    GitHub,
    Gitlab,
    Private,
}

impl RegistryType {
    /// Classify a secret by its registry sub-objects.
    ///
    /// The sub-objects are expected to be mutually exclusive. When more than
    /// one is present the first in priority order wins: Azure, DigitalOcean,
    /// DockerHub, Google, GitHub, Gitlab, Private. None present is `Undefined`.
    pub fn classify(sources: &RegistrySources) -> Self {
        let candidates = [
            (sources.azure_container_registry.is_some(), Self::Azure),
            (sources.digital_ocean_registry.is_some(), Self::DigitalOcean),
            (sources.docker_hub_registry.is_some(), Self::DockerHub),
            (sources.gcp_container_registry.is_some(), Self::Google),
            (sources.github_registry.is_some(), Self::GitHub),
            (sources.gitlab_registry.is_some(), Self::Gitlab),
            (sources.private_registry.is_some(), Self::Private),
        ];
        candidates
            .into_iter()
            .find_map(|(present, kind)| present.then_some(kind))
            .unwrap_or(Self::Undefined)
    }

    /// Label value for the `registry` label. Empty for `Undefined`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "",
            Self::Azure => "Azure",
            Self::DigitalOcean => "DigitalOcean",
            Self::DockerHub => "DockerHub",
            Self::Google => "GCR",
            Self::GitHub => "GitHub",
            Self::Gitlab => "Gitlab",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for RegistryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
