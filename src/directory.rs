//! Cluster directory and master-node resolution
//!
//! Maps a cluster name to the one master node whose kubeconfig we fetch.
//! Resolution is read-only and runs before any remote connection is opened.

use serde::{Deserialize, Serialize};

use crate::error::{KubefetchError, Result};

/// A registered cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub name: String,

    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// A cluster node as recorded in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,

    #[serde(default)]
    pub is_master: bool,

    /// Public (externally reachable) address
    pub ip_address: String,

    /// Private (cluster-internal) address
    pub private_ip_address: String,

    /// Name of the SSH key used to reach this node
    pub ssh_key_name: String,
}

/// Lookup of clusters by name
pub trait ClusterDirectory {
    /// Find a cluster by exact name, returning its registry index
    fn find_cluster_by_name(&self, name: &str) -> Option<(usize, &Cluster)>;
}

/// The master node of a resolved cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterNodeDescriptor {
    pub name: String,
    pub private_address: String,
    pub public_address: String,
    pub credential_key_name: String,
}

impl From<&Node> for MasterNodeDescriptor {
    fn from(node: &Node) -> Self {
        Self {
            name: node.name.clone(),
            private_address: node.private_ip_address.clone(),
            public_address: node.ip_address.clone(),
            credential_key_name: node.ssh_key_name.clone(),
        }
    }
}

/// Resolve a cluster identifier to its master node.
///
/// Fails with a validation-class error on an empty identifier, an unknown
/// cluster, or a cluster without exactly one master.
pub fn resolve<D: ClusterDirectory + ?Sized>(
    directory: &D,
    identifier: &str,
) -> Result<MasterNodeDescriptor> {
    if identifier.is_empty() {
        return Err(KubefetchError::Validation(
            "cluster name is required".to_string(),
        ));
    }

    let (idx, cluster) =
        directory
            .find_cluster_by_name(identifier)
            .ok_or_else(|| KubefetchError::ClusterNotFound {
                name: identifier.to_string(),
            })?;

    let mut masters = cluster.nodes.iter().filter(|n| n.is_master);
    let master = match (masters.next(), masters.next()) {
        (Some(master), None) => master,
        _ => {
            return Err(KubefetchError::MasterNotFound {
                cluster: cluster.name.clone(),
            })
        }
    };

    tracing::debug!(
        cluster = %cluster.name,
        index = idx,
        master = %master.name,
        "resolved master node"
    );

    Ok(MasterNodeDescriptor::from(master))
}
