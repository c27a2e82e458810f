//! Remote execution on cluster nodes
//!
//! [`RemoteExecutor`] exposes the two capabilities the fetcher needs:
//! unlocking a key and running a command. [`fetch`] uses them to read the
//! admin kubeconfig off the master node in a single attempt.

pub mod ssh;

pub use ssh::{DialoguerPassphrase, PassphraseSource, SshExecutor};

use crate::directory::MasterNodeDescriptor;
use crate::document::CredentialDocument;
use crate::error::{KubefetchError, Result};

/// Privileged kubeconfig written by kubeadm on control-plane nodes
pub const ADMIN_CONF_PATH: &str = "/etc/kubernetes/admin.conf";

/// Executes commands on cluster nodes
pub trait RemoteExecutor {
    /// Prepare credentials for `key_name`, prompting for a passphrase if needed.
    ///
    /// Must succeed before [`RemoteExecutor::run`] is called.
    fn authenticate(&mut self, key_name: &str) -> Result<()>;

    /// Run `command` on `node` and return its standard output
    fn run(&mut self, node: &MasterNodeDescriptor, command: &str) -> Result<String>;
}

/// Fetch the admin kubeconfig from the master node
pub fn fetch<E: RemoteExecutor + ?Sized>(
    executor: &mut E,
    node: &MasterNodeDescriptor,
) -> Result<CredentialDocument> {
    tracing::info!(node = %node.name, key = %node.credential_key_name, "authenticating");
    executor.authenticate(&node.credential_key_name)?;

    let command = format!("cat {}", ADMIN_CONF_PATH);
    tracing::debug!(node = %node.name, %command, "running remote command");
    let output = executor.run(node, &command)?;

    let document = CredentialDocument::new(output);
    if document.is_blank() {
        return Err(KubefetchError::Remote(format!(
            "{} on {} returned no content",
            ADMIN_CONF_PATH, node.name
        )));
    }

    tracing::info!(node = %node.name, bytes = document.len(), "fetched kubeconfig");
    Ok(document)
}
