//! Output Directory Redirection
//!
//! Computes the shared build root for the whole tree and the per-subproject
//! output directories under it. Pure path computation, eager and done once
//! at resolution time; no filesystem I/O.

use std::path::{Component, Path, PathBuf};

/// Resolved output directory layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    build_root: PathBuf,
}

impl OutputLayout {
    /// Redirect the build root: join `relative_base` onto the root project's
    /// default build directory and normalize the result lexically
    pub fn redirect(root_build_dir: &Path, relative_base: &str) -> Self {
        Self {
            build_root: normalize(&root_build_dir.join(relative_base)),
        }
    }

    /// The shared build root for the whole tree
    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// The output directory for the named subproject
    pub fn subproject_dir(&self, name: &str) -> PathBuf {
        self.build_root.join(name)
    }
}

/// Lexical path normalization: resolves `.` and `..` components without
/// touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                // Nothing above a filesystem root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                // Relative paths keep their leading `..`
                _ => result.push(".."),
            },
            other => result.push(other),
        }
    }

    result
}
