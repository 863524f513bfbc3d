//! Sandbox module for path validation and security
//!
//! Caller paths are resolved in two steps:
//!
//! 1. [`Sandbox::resolve`] is purely lexical: the request is joined onto the
//!    root, `.` and `..` are collapsed, and the result must lie under the
//!    root. Nothing on disk is consulted.
//! 2. [`Sandbox::confine`] canonicalizes the deepest existing ancestor of the
//!    resolved path (following dangling links by their target) and re-checks
//!    containment, so a symlink inside the workspace cannot be used to reach
//!    files outside it.
//!
//! Step 2 is a check-then-use: a link swapped in between the check and the
//! actual I/O is not caught.

use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::types::{WorkspaceError, WorkspaceResult};

/// A caller path resolved against the workspace root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    absolute: PathBuf,
    /// Normalized path under the root, empty for the root itself
    relative: PathBuf,
}

impl ResolvedPath {
    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    pub fn relative(&self) -> &Path {
        &self.relative
    }

    pub fn is_root(&self) -> bool {
        self.relative.as_os_str().is_empty()
    }

    /// Relative form used in messages, `.` for the root
    pub fn display_relative(&self) -> String {
        if self.is_root() {
            ".".to_string()
        } else {
            self.relative.to_string_lossy().into_owned()
        }
    }

    /// Relative path of a direct child named `name`
    pub fn child(&self, name: &OsStr) -> String {
        self.relative.join(name).to_string_lossy().into_owned()
    }
}

/// Confines file access to a single canonical workspace root
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// Create a sandbox rooted at `root`
    ///
    /// The root must be absolute and name an existing directory; it is stored
    /// in canonical form.
    pub fn new(root: impl AsRef<Path>) -> WorkspaceResult<Self> {
        let root = root.as_ref();

        if root.as_os_str().is_empty() {
            return Err(WorkspaceError::Configuration(
                "workspace root is empty".to_string(),
            ));
        }
        if !root.is_absolute() {
            return Err(WorkspaceError::Configuration(format!(
                "workspace root must be an absolute path: {}",
                root.display()
            )));
        }

        let canonical = root.canonicalize().map_err(|e| {
            WorkspaceError::Configuration(format!(
                "workspace root {} is not accessible: {}",
                root.display(),
                e
            ))
        })?;

        if !canonical.is_dir() {
            return Err(WorkspaceError::Configuration(format!(
                "workspace root {} is not a directory",
                canonical.display()
            )));
        }

        Ok(Self { root: canonical })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lexically resolve a caller-supplied path under the root
    ///
    /// The request is joined onto the root and `.`/`..` are collapsed over
    /// the whole path, so `..` may climb through the root's own segments as
    /// long as the result ends up back inside it. Leading `/` (or a drive
    /// prefix) is ignored, so absolute input lands under the root rather than
    /// replacing it.
    pub fn resolve(&self, requested: &str) -> WorkspaceResult<ResolvedPath> {
        if requested.contains('\0') {
            return Err(WorkspaceError::InvalidPath(
                "path contains a null byte".to_string(),
            ));
        }

        let absolute = normalize_under(&self.root, Path::new(requested));
        if !is_within(&self.root, &absolute) {
            return Err(WorkspaceError::Boundary(requested.to_string()));
        }

        let relative = absolute
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .map_err(|_| WorkspaceError::Boundary(requested.to_string()))?;

        Ok(ResolvedPath { absolute, relative })
    }

    /// Reject resolved paths that leave the root through a symbolic link
    ///
    /// Walks up from the resolved path to the first ancestor that exists,
    /// canonicalizes it and checks it is still under the root. A dangling
    /// link met on the way is followed by reading its target and checking
    /// that instead, so only links pointing outside the root are refused; a
    /// missing in-root target is left for the operation to report.
    pub async fn confine(&self, resolved: &ResolvedPath) -> WorkspaceResult<()> {
        let rel_display = resolved.display_relative();
        let mut pending = resolved.absolute().to_path_buf();

        for _ in 0..MAX_LINK_HOPS {
            let deepest = deepest_existing(&pending)
                .await
                .map_err(|e| WorkspaceError::from_io(&rel_display, e))?;

            match deepest {
                Deepest::Existing(canonical) => {
                    if is_within(&self.root, &canonical) {
                        return Ok(());
                    }
                    tracing::warn!(
                        path = %rel_display,
                        target = %canonical.display(),
                        "symlink resolves outside the workspace"
                    );
                    return Err(WorkspaceError::Boundary(rel_display));
                }
                Deepest::DanglingLink { link, target } => {
                    tracing::debug!(
                        path = %rel_display,
                        link = %link.display(),
                        target = %target.display(),
                        "following dangling symlink"
                    );
                    let base = link.parent().unwrap_or(&self.root);
                    let mut next = base.join(&target);
                    if let Ok(rest) = pending.strip_prefix(&link) {
                        if !rest.as_os_str().is_empty() {
                            next.push(rest);
                        }
                    }
                    pending = next;
                }
            }
        }

        tracing::warn!(path = %rel_display, "too many levels of symbolic links");
        Err(WorkspaceError::Boundary(rel_display))
    }
}

/// Link chains longer than this are refused
const MAX_LINK_HOPS: usize = 40;

/// What the filesystem has at the deepest existing point of a path
enum Deepest {
    /// Canonical form of the deepest existing ancestor
    Existing(PathBuf),
    /// A symlink whose target does not exist
    DanglingLink { link: PathBuf, target: PathBuf },
}

async fn deepest_existing(path: &Path) -> io::Result<Deepest> {
    for ancestor in path.ancestors() {
        match tokio::fs::canonicalize(ancestor).await {
            Ok(canonical) => return Ok(Deepest::Existing(canonical)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let is_link = tokio::fs::symlink_metadata(ancestor)
                    .await
                    .map(|m| m.file_type().is_symlink())
                    .unwrap_or(false);
                if is_link {
                    let target = tokio::fs::read_link(ancestor).await?;
                    return Ok(Deepest::DanglingLink {
                        link: ancestor.to_path_buf(),
                        target,
                    });
                }
            }
            Err(e) => return Err(e),
        }
    }

    Err(io::Error::from(io::ErrorKind::NotFound))
}

/// Join `requested` onto `root` and collapse `.` and `..` lexically
///
/// `..` pops whatever segment precedes it, including the root's own, and
/// stops at the filesystem root.
fn normalize_under(root: &Path, requested: &Path) -> PathBuf {
    let mut normalized = root.to_path_buf();

    for component in requested.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(segment) => normalized.push(segment),
        }
    }

    normalized
}

/// Segment-wise containment: `candidate` is `root` or lies beneath it
///
/// `Path::starts_with` compares whole components, so `/ws-other` is not
/// inside `/ws`. Paths still carrying `..` are never considered inside.
pub fn is_within(root: &Path, candidate: &Path) -> bool {
    !candidate
        .components()
        .any(|c| matches!(c, Component::ParentDir))
        && candidate.starts_with(root)
}
