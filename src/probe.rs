//! Repository presence check

use crate::vcs::VersionControl;

/// Checks whether a history store is reachable before anything else runs
pub struct RepositoryProbe<'a, V: VersionControl + ?Sized> {
    client: &'a V,
}

impl<'a, V: VersionControl + ?Sized> RepositoryProbe<'a, V> {
    pub fn new(client: &'a V) -> Self {
        Self { client }
    }

    /// True iff the client can reach a repository. Never touches the filesystem.
    pub fn exists(&self) -> bool {
        match self.client.probe() {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Repository probe failed: {}", e);
                false
            }
        }
    }
}
