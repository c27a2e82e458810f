/*!
 * Configuration types for kubefetch
 *
 * The whole application context lives in one TOML file, `~/.kubefetch/config.toml`:
 * the cluster registry, SSH connection settings and the local kube directory.
 * It is loaded once per invocation and passed explicitly to the pipeline.
 */

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::directory::{Cluster, ClusterDirectory};
use crate::error::{KubefetchError, Result};

const CONFIG_DIR_NAME: &str = ".kubefetch";
const CONFIG_FILE_NAME: &str = "config.toml";
const KUBE_DIR_NAME: &str = ".kube";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SSH connection settings used for every master node
    #[serde(default)]
    pub ssh: SshSettings,

    /// Local kubeconfig location
    #[serde(default)]
    pub kube: KubeSettings,

    /// Known clusters
    #[serde(default)]
    pub clusters: Vec<Cluster>,
}

/// SSH connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshSettings {
    /// Remote user
    #[serde(default = "default_ssh_user")]
    pub user: String,

    /// Remote port
    #[serde(default = "default_ssh_port")]
    pub port: u16,

    /// Socket and session timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory holding private keys, named by `ssh_key_name` (None = ~/.ssh)
    #[serde(default)]
    pub key_dir: Option<PathBuf>,

    /// Enable SSH transport compression
    #[serde(default)]
    pub compress: bool,
}

impl Default for SshSettings {
    fn default() -> Self {
        Self {
            user: default_ssh_user(),
            port: default_ssh_port(),
            timeout_secs: default_timeout_secs(),
            key_dir: None,
            compress: false,
        }
    }
}

impl SshSettings {
    /// Resolve the key directory, falling back to `~/.ssh`
    pub fn resolved_key_dir(&self) -> Result<PathBuf> {
        match &self.key_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(home_dir()?.join(".ssh")),
        }
    }
}

/// Local kubeconfig settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubeSettings {
    /// Install directory override (None = ~/.kube)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl KubeSettings {
    /// Resolve the install directory, falling back to `~/.kube`
    pub fn resolved_dir(&self) -> Result<PathBuf> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(home_dir()?.join(KUBE_DIR_NAME)),
        }
    }
}

fn default_ssh_user() -> String {
    "root".to_string()
}

fn default_ssh_port() -> u16 {
    22
}

fn default_timeout_secs() -> u64 {
    30
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| KubefetchError::Config("could not determine home directory".to_string()))
}

/// Path to `~/.kubefetch/config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    Ok(home_dir()?.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl AppConfig {
    /// Load configuration from a TOML file, returning the default if it is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            KubefetchError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents).map_err(|e| {
            KubefetchError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }
}

impl ClusterDirectory for AppConfig {
    fn find_cluster_by_name(&self, name: &str) -> Option<(usize, &Cluster)> {
        self.clusters
            .iter()
            .enumerate()
            .find(|(_, cluster)| cluster.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Node;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ssh.user, "root");
        assert_eq!(config.ssh.port, 22);
        assert_eq!(config.ssh.timeout_secs, 30);
        assert!(!config.ssh.compress);
        assert!(config.clusters.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [ssh]
            port = 2222

            [[clusters]]
            name = "demo"
            "#,
        )
        .unwrap();

        assert_eq!(config.ssh.port, 2222);
        assert_eq!(config.ssh.user, "root");
        assert_eq!(config.clusters.len(), 1);
        assert!(config.clusters[0].nodes.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "clusters = 7").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, KubefetchError::Config(_)));
    }

    #[test]
    fn test_serialized_config_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = AppConfig {
            kube: KubeSettings {
                dir: Some(dir.path().join("kube")),
            },
            clusters: vec![Cluster {
                name: "demo".to_string(),
                nodes: vec![Node {
                    name: "demo-master-01".to_string(),
                    is_master: true,
                    ip_address: "203.0.113.9".to_string(),
                    private_ip_address: "10.0.0.5".to_string(),
                    ssh_key_name: "demo-key".to_string(),
                }],
            }],
            ..Default::default()
        };

        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_find_cluster_by_name_returns_index() {
        let config = AppConfig {
            clusters: vec![
                Cluster {
                    name: "alpha".to_string(),
                    nodes: vec![],
                },
                Cluster {
                    name: "beta".to_string(),
                    nodes: vec![],
                },
            ],
            ..Default::default()
        };

        let (idx, cluster) = config.find_cluster_by_name("beta").unwrap();
        assert_eq!(idx, 1);
        assert_eq!(cluster.name, "beta");
        assert!(config.find_cluster_by_name("Beta").is_none());
    }

    #[test]
    fn test_explicit_dirs_win() {
        let kube = KubeSettings {
            dir: Some(PathBuf::from("/srv/kube")),
        };
        assert_eq!(kube.resolved_dir().unwrap(), PathBuf::from("/srv/kube"));

        let ssh = SshSettings {
            key_dir: Some(PathBuf::from("/srv/keys")),
            ..Default::default()
        };
        assert_eq!(ssh.resolved_key_dir().unwrap(), PathBuf::from("/srv/keys"));
    }
}
