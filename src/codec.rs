//! Kubeconfig codec
//!
//! Typed view of a kubeconfig document for the `--print` path. Only the
//! fields needed for display are modelled; everything else is carried
//! through the `extra` maps so rendering does not drop content.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

use crate::cli_style::{context_table, ContextRow};
use crate::error::Result;

/// Parsed kubeconfig
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Kubeconfig {
    #[serde(rename = "apiVersion", default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub clusters: Vec<NamedCluster>,

    #[serde(default)]
    pub contexts: Vec<NamedContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_context: Option<String>,

    #[serde(default)]
    pub users: Vec<NamedUser>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Value>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCluster {
    pub name: String,
    pub cluster: ClusterEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterEntry {
    pub server: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_authority_data: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedContext {
    pub name: String,
    pub context: ContextEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub cluster: String,
    pub user: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn default_kind() -> String {
    "Config".to_string()
}

/// User entries are credentials; kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedUser {
    pub name: String,

    #[serde(default)]
    pub user: BTreeMap<String, Value>,
}

impl Kubeconfig {
    /// Server URL of the named cluster
    pub fn server_for(&self, cluster: &str) -> Option<&str> {
        self.clusters
            .iter()
            .find(|c| c.name == cluster)
            .map(|c| c.cluster.server.as_str())
    }

    /// Overview rows, one per context
    pub fn context_rows(&self) -> Vec<ContextRow> {
        self.contexts
            .iter()
            .map(|ctx| ContextRow {
                current: self.current_context.as_deref() == Some(ctx.name.as_str()),
                context: ctx.name.clone(),
                cluster: ctx.context.cluster.clone(),
                server: self
                    .server_for(&ctx.context.cluster)
                    .unwrap_or("-")
                    .to_string(),
                user: ctx.context.user.clone(),
            })
            .collect()
    }
}

/// Parse kubeconfig text. A missing `kind` reads as `Config`.
pub fn parse(content: &str) -> Result<Kubeconfig> {
    Ok(serde_yaml::from_str(content)?)
}

/// Render a parsed kubeconfig back to normalised YAML
pub fn render(config: &Kubeconfig) -> Result<String> {
    Ok(serde_yaml::to_string(config)?)
}

/// Human-readable overview of contexts and servers
pub fn summary(config: &Kubeconfig) -> String {
    if config.contexts.is_empty() {
        return format!(
            "kubeconfig with {} cluster(s) and no contexts",
            config.clusters.len()
        );
    }
    context_table(&config.context_rows()).to_string()
}
