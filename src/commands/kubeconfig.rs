/*!
 * kubefetch kubeconfig - fetch and install a cluster's admin kubeconfig
 *
 * Resolves the cluster's master node, reads /etc/kubernetes/admin.conf over
 * SSH, swaps the private API address for the public one and saves the
 * result to ~/.kube/config (or prints it with -p).
 *
 * Examples:
 *   kubefetch kubeconfig my-cluster        # install the kubeconfig of "my-cluster"
 *   kubefetch kubeconfig my-cluster -f     # overwrite ~/.kube/config without asking
 *   kubefetch kubeconfig my-cluster -p     # print it to the console
 *   kubefetch kubeconfig -n my-cluster -p > my-conf.yaml
 */

use clap::Args;
use std::io::Write;

use crate::cli_style::{print_success, print_warning};
use crate::codec;
use crate::config::AppConfig;
use crate::directory::{resolve, ClusterDirectory};
use crate::error::{KubefetchError, Result};
use crate::install::{
    install, ConfirmationProvider, InstallOptions, InstallOutcome, InstallTarget, StdinConfirmer,
};
use crate::remote::{fetch, DialoguerPassphrase, RemoteExecutor, SshExecutor};

/// Fetch the kubeconfig of a cluster and install it locally
#[derive(Args, Debug, Clone, Default)]
pub struct KubeconfigArgs {
    /// Name of the cluster
    #[arg(value_name = "CLUSTER NAME")]
    pub cluster: Option<String>,

    /// Name of the cluster (legacy form of the positional argument)
    #[arg(short = 'n', long = "name")]
    pub name: Option<String>,

    /// Print the kubeconfig to stdout instead of installing it
    #[arg(short = 'p', long = "print")]
    pub print: bool,

    /// Save the existing kubeconfig before installing (not implemented)
    #[arg(short = 'b', long = "backup")]
    pub backup: bool,

    /// Don't ask before overwriting an existing kubeconfig
    #[arg(short = 'f', long = "force")]
    pub force: bool,
}

impl KubeconfigArgs {
    /// The cluster name, given either positionally or with `--name` but not both
    pub fn cluster_name(&self) -> Result<&str> {
        let name = match (self.cluster.as_deref(), self.name.as_deref()) {
            (Some(_), Some(_)) => {
                return Err(KubefetchError::Validation(
                    "give the cluster name either as argument or with --name, not both"
                        .to_string(),
                ))
            }
            (Some(name), None) | (None, Some(name)) => name,
            (None, None) => "",
        };

        if name.is_empty() {
            return Err(KubefetchError::Validation(
                "flag --name is required".to_string(),
            ));
        }
        Ok(name)
    }

    pub fn options(&self) -> InstallOptions {
        InstallOptions {
            print_only: self.print,
            force: self.force,
            backup: self.backup,
        }
    }
}

/// Everything one kubeconfig fetch needs, passed explicitly
pub struct FetchContext<'a, D: ?Sized, E: ?Sized> {
    pub directory: &'a D,
    pub executor: &'a mut E,
    pub target: InstallTarget,
}

impl<'a, D, E> FetchContext<'a, D, E>
where
    D: ClusterDirectory + ?Sized,
    E: RemoteExecutor + ?Sized,
{
    pub fn new(directory: &'a D, executor: &'a mut E, target: InstallTarget) -> Self {
        Self {
            directory,
            executor,
            target,
        }
    }

    /// Resolve, fetch and install. Resolution errors stop before any remote call.
    pub fn run<C, W>(
        &mut self,
        cluster: &str,
        opts: &InstallOptions,
        confirmer: &mut C,
        out: &mut W,
    ) -> Result<InstallOutcome>
    where
        C: ConfirmationProvider + ?Sized,
        W: Write + ?Sized,
    {
        let node = resolve(self.directory, cluster)?;
        tracing::info!(cluster, master = %node.name, "fetching kubeconfig");

        let doc = fetch(self.executor, &node)?;
        install(&doc, &node, opts, &self.target, confirmer, out)
    }
}

/// Run the kubeconfig command
pub fn run(args: KubeconfigArgs, config: &AppConfig) -> Result<()> {
    let cluster = args.cluster_name()?;
    let opts = args.options();

    // Fail on unknown clusters before building the SSH client
    resolve(config, cluster)?;

    let mut executor = SshExecutor::new(&config.ssh, Box::new(DialoguerPassphrase))?;
    let target = InstallTarget::from_settings(&config.kube)?;
    let mut confirmer = StdinConfirmer;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let outcome = FetchContext::new(config, &mut executor, target).run(
        cluster,
        &opts,
        &mut confirmer,
        &mut out,
    )?;

    match outcome {
        InstallOutcome::Printed(kubeconfig) => {
            eprintln!("{}", codec::summary(&kubeconfig));
        }
        InstallOutcome::Written(path) => {
            if opts.backup {
                print_warning("--backup is not implemented yet, no backup was written");
            }
            print_success(&format!("kubeconfig configured at {}", path.display()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cluster: Option<&str>, name: Option<&str>) -> KubeconfigArgs {
        KubeconfigArgs {
            cluster: cluster.map(str::to_string),
            name: name.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_positional_name() {
        assert_eq!(args(Some("demo"), None).cluster_name().unwrap(), "demo");
    }

    #[test]
    fn test_legacy_flag_name() {
        assert_eq!(args(None, Some("demo")).cluster_name().unwrap(), "demo");
    }

    #[test]
    fn test_name_given_twice_is_rejected() {
        assert!(matches!(
            args(Some("demo"), Some("demo")).cluster_name(),
            Err(KubefetchError::Validation(_))
        ));
    }

    #[test]
    fn test_conflicting_names() {
        assert!(matches!(
            args(Some("demo"), Some("prod")).cluster_name(),
            Err(KubefetchError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_or_empty_name() {
        assert!(args(None, None).cluster_name().is_err());
        assert!(args(Some(""), None).cluster_name().is_err());
    }

    #[test]
    fn test_options_mapping() {
        let args = KubeconfigArgs {
            cluster: Some("demo".to_string()),
            print: true,
            force: true,
            backup: false,
            ..Default::default()
        };
        assert_eq!(
            args.options(),
            InstallOptions {
                print_only: true,
                force: true,
                backup: false,
            }
        );
    }

    #[test]
    fn test_unknown_cluster_fails_before_ssh() {
        let config = AppConfig::default();
        let err = run(args(Some("ghost"), None), &config).unwrap_err();
        assert!(matches!(err, KubefetchError::ClusterNotFound { .. }));
    }
}
