//! Kubeconfig installation and presentation
//!
//! Takes the fetched document, rewrites the master's private address to its
//! public one and then either prints it or installs it to `~/.kube/config`.
//! An existing file is only replaced after confirmation (or with `force`),
//! and the new content is written to a temp file and renamed into place so
//! a failed install never leaves a partial kubeconfig behind.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::codec::{self, Kubeconfig};
use crate::config::KubeSettings;
use crate::directory::MasterNodeDescriptor;
use crate::document::CredentialDocument;
use crate::error::{KubefetchError, Result};

/// File name kubectl expects inside the kube directory
pub const KUBECONFIG_FILE_NAME: &str = "config";

pub const OVERWRITE_PROMPT: &str =
    "There already exists a kubeconfig. Overwrite? (use -f to suppress this question) [yN]:";

#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Install behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Print the rewritten document instead of installing it
    pub print_only: bool,
    /// Overwrite an existing kubeconfig without asking
    pub force: bool,
    /// Accepted for compatibility; no backup is written
    pub backup: bool,
}

/// Where the kubeconfig gets installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    dir: PathBuf,
}

impl InstallTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target from configuration, defaulting to `~/.kube`
    pub fn from_settings(settings: &KubeSettings) -> Result<Self> {
        Ok(Self::new(settings.resolved_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(KUBECONFIG_FILE_NAME)
    }

    /// Create the directory (and parents) if missing
    fn ensure_dir(&self) -> Result<()> {
        if self.dir.is_dir() {
            return Ok(());
        }
        tracing::debug!(dir = %self.dir.display(), "creating kube directory");
        fs::create_dir_all(&self.dir).map_err(|e| KubefetchError::io(&self.dir, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.dir, fs::Permissions::from_mode(DIR_MODE))
                .map_err(|e| KubefetchError::io(&self.dir, e))?;
        }
        Ok(())
    }
}

/// Asks the operator a yes/no question
pub trait ConfirmationProvider {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Confirmation read as one line from an input stream
pub struct LineConfirmer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ConfirmationProvider for LineConfirmer<R, W> {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        writeln!(self.output, "{}", prompt)
            .and_then(|_| self.output.flush())
            .map_err(|e| KubefetchError::io("<stderr>", e))?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .map_err(|e| KubefetchError::io("<stdin>", e))?;
        if read == 0 {
            return Ok(false);
        }
        Ok(is_affirmative(&answer))
    }
}

/// Prompts on stderr and reads the answer from stdin.
///
/// Stdin is locked only for the duration of one `confirm` call, so the SSH
/// passphrase prompt can still read the terminal earlier in the pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirmer;

impl ConfirmationProvider for StdinConfirmer {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        LineConfirmer::new(std::io::stdin().lock(), std::io::stderr()).confirm(prompt)
    }
}

/// Any `y` or `Y` in the answer counts as yes
pub fn is_affirmative(answer: &str) -> bool {
    answer.contains(['y', 'Y'])
}

/// Result of a successful install call
#[derive(Debug, Clone, PartialEq)]
pub enum InstallOutcome {
    /// Document was parsed and rendered to the output stream
    Printed(Kubeconfig),
    /// Document was written to this path
    Written(PathBuf),
}

/// Rewrite the document for `node` and print or install it
pub fn install<C, W>(
    doc: &CredentialDocument,
    node: &MasterNodeDescriptor,
    opts: &InstallOptions,
    target: &InstallTarget,
    confirmer: &mut C,
    out: &mut W,
) -> Result<InstallOutcome>
where
    C: ConfirmationProvider + ?Sized,
    W: Write + ?Sized,
{
    let rewritten = doc.rewrite_address(&node.private_address, &node.public_address);
    tracing::debug!(
        from = %node.private_address,
        to = %node.public_address,
        "rewrote master address"
    );

    if opts.print_only {
        return present(&rewritten, out).map(InstallOutcome::Printed);
    }

    if opts.backup {
        tracing::warn!("--backup is not implemented, no backup will be written");
    }

    target.ensure_dir()?;
    let path = target.path();

    if path.exists() && !opts.force {
        tracing::debug!(path = %path.display(), "kubeconfig exists, asking to overwrite");
        if !confirmer.confirm(OVERWRITE_PROMPT)? {
            tracing::info!(path = %path.display(), "overwrite declined");
            return Err(KubefetchError::ConfirmationDeclined);
        }
    }

    write_atomic(&path, rewritten.as_bytes())?;
    tracing::info!(path = %path.display(), "kubeconfig written");
    Ok(InstallOutcome::Written(path))
}

/// Parse and render the document to `out`
fn present<W: Write + ?Sized>(doc: &CredentialDocument, out: &mut W) -> Result<Kubeconfig> {
    let config = codec::parse(doc.as_str()).inspect_err(|e| {
        tracing::error!(error = %e, "fetched kubeconfig could not be parsed");
    })?;
    let rendered = codec::render(&config)?;
    out.write_all(rendered.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| KubefetchError::io("<stdout>", e))?;
    Ok(config)
}

/// Write `data` next to `path` and rename it into place
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| KubefetchError::io(dir, e))?;

    tmp.write_all(data)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| KubefetchError::io(tmp.path(), e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(FILE_MODE))
            .map_err(|e| KubefetchError::io(tmp.path(), e))?;
    }

    tmp.persist(path)
        .map_err(|e| KubefetchError::io(path, e.error))?;
    Ok(())
}
