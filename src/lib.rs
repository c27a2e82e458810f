/*!
 * kubefetch - fetch the admin kubeconfig of a provisioned cluster
 *
 * Looks up the cluster's master node in the local registry, reads
 * `/etc/kubernetes/admin.conf` from it over SSH, points the document at the
 * master's public address and installs it as `~/.kube/config`:
 * - Resolver: [`directory::resolve`]
 * - Fetcher: [`remote::fetch`] over any [`remote::RemoteExecutor`]
 * - Installer/Presenter: [`install::install`]
 */

pub mod cli_style;
pub mod codec;
pub mod commands;
pub mod config;
pub mod directory;
pub mod document;
pub mod error;
pub mod install;
pub mod logging;
pub mod remote;

// Re-export commonly used types
pub use config::AppConfig;
pub use directory::{resolve, Cluster, ClusterDirectory, MasterNodeDescriptor, Node};
pub use document::CredentialDocument;
pub use error::{KubefetchError, Result};
pub use install::{install, ConfirmationProvider, InstallOptions, InstallOutcome, InstallTarget};
pub use remote::{fetch, RemoteExecutor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
