//! Synchronisation of workspaces with a Structurizr service.
//!
//! The network layer is abstracted behind [`Transport`]; [`WorkspaceClient`]
//! adds archiving, parsing, layout merging and modification stamping on top
//! of it.

use std::ops::{Deref, DerefMut};

use chrono::{SecondsFormat, Utc};
use log::{debug, info, warn};
use thiserror::Error;

use structurizr_core::Workspace;

use crate::{StructurizrError, archive, config::ClientConfig, config::ConfigError};

/// Errors reported by a [`Transport`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("workspace {0} does not exist")]
    NotFound(i64),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("workspace {0} is locked by another user")]
    Locked(i64),
}

/// Moves workspace documents to and from a Structurizr service.
///
/// Implementations deal in raw JSON text; parsing and serialisation happen in
/// [`WorkspaceClient`].
pub trait Transport {
    /// Fetches the JSON document of a workspace.
    fn fetch_workspace(&self, workspace_id: i64) -> Result<String, TransportError>;

    /// Stores the JSON document of a workspace, replacing the remote copy.
    fn store_workspace(&mut self, workspace_id: i64, document: &str)
    -> Result<(), TransportError>;

    /// Locks a workspace against changes by other users and agents.
    ///
    /// Returns `false` if the service refused the lock. Services without
    /// locking accept every request.
    fn lock_workspace(
        &mut self,
        workspace_id: i64,
        user: Option<&str>,
        agent: &str,
    ) -> Result<bool, TransportError> {
        let _ = (workspace_id, user, agent);
        Ok(true)
    }

    /// Releases a lock taken with [`lock_workspace`](Self::lock_workspace).
    ///
    /// Returns `false` if the service refused to release it.
    fn unlock_workspace(
        &mut self,
        workspace_id: i64,
        user: Option<&str>,
        agent: &str,
    ) -> Result<bool, TransportError> {
        let _ = (workspace_id, user, agent);
        Ok(true)
    }
}

/// Client reading and writing a single workspace through a [`Transport`].
///
/// # Examples
///
/// ```
/// use structurizr::{
///     ClientConfig, StructurizrError, Transport, TransportError, Workspace, WorkspaceClient,
///     config::ArchiveLocation,
/// };
///
/// #[derive(Default)]
/// struct Memory(Option<String>);
///
/// impl Transport for Memory {
///     fn fetch_workspace(&self, id: i64) -> Result<String, TransportError> {
///         self.0.clone().ok_or(TransportError::NotFound(id))
///     }
///
///     fn store_workspace(&mut self, _id: i64, document: &str) -> Result<(), TransportError> {
///         self.0 = Some(document.to_owned());
///         Ok(())
///     }
/// }
///
/// # fn main() -> Result<(), StructurizrError> {
/// let config = ClientConfig::new(7).with_archive_location(ArchiveLocation::Disabled);
/// let mut client = WorkspaceClient::new(Memory::default(), config)?;
///
/// let mut workspace = Workspace::new(7, "Shop", "");
/// client.put_workspace(&mut workspace)?;
///
/// assert_eq!(client.get_workspace()?.name(), "Shop");
/// # Ok(())
/// # }
/// ```
pub struct WorkspaceClient<T: Transport> {
    transport: T,
    config: ClientConfig,
    workspace_id: i64,
}

impl<T: Transport> WorkspaceClient<T> {
    /// Creates a client for the workspace named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the configuration has no
    /// workspace ID.
    pub fn new(transport: T, config: ClientConfig) -> Result<Self, StructurizrError> {
        let workspace_id = config.workspace_id().ok_or_else(|| {
            ConfigError::Validation("a workspace ID is required to create a client".to_owned())
        })?;
        debug!(workspace_id = workspace_id, url = config.url(); "Created workspace client");
        Ok(Self {
            transport,
            config,
            workspace_id,
        })
    }

    pub fn workspace_id(&self) -> i64 {
        self.workspace_id
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consumes the client, returning its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Fetches and parses the remote workspace.
    ///
    /// The raw document is archived first when the archive location is
    /// enabled, so it is kept even if it fails to parse.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails, the archive cannot be
    /// written, or the document is invalid.
    pub fn get_workspace(&self) -> Result<Workspace, StructurizrError> {
        info!(workspace_id = self.workspace_id; "Fetching workspace");
        let document = self.transport.fetch_workspace(self.workspace_id)?;

        archive::archive_workspace(
            self.config.workspace_archive_location(),
            self.workspace_id,
            &document,
            Utc::now(),
        )?;

        Ok(crate::loads(&document)?)
    }

    /// Uploads `workspace`, replacing the remote copy.
    ///
    /// When merging from the remote is enabled, the layout of views that
    /// exist remotely is copied into `workspace` first. The thumbnail is
    /// cleared and the last-modified date, user and agent are stamped on
    /// `workspace` before it is serialised.
    ///
    /// # Errors
    ///
    /// Returns [`StructurizrError::WorkspaceMismatch`] if `workspace` is not
    /// the workspace this client is configured for, and propagates transport,
    /// archive and codec errors.
    pub fn put_workspace(&mut self, workspace: &mut Workspace) -> Result<(), StructurizrError> {
        if workspace.id() != self.workspace_id {
            return Err(StructurizrError::WorkspaceMismatch {
                expected: self.workspace_id,
                found: workspace.id(),
            });
        }

        if self.config.merge_from_remote() {
            self.merge_remote_layout(workspace)?;
        }

        workspace.set_thumbnail(None);
        workspace.set_last_modified_date(Some(
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
        workspace.set_last_modified_user(self.config.user().map(str::to_owned));
        workspace.set_last_modified_agent(Some(self.config.agent().to_owned()));

        let document = crate::dumps(workspace)?;
        info!(workspace_id = self.workspace_id, bytes = document.len(); "Storing workspace");
        self.transport.store_workspace(self.workspace_id, &document)?;
        Ok(())
    }

    /// Locks the remote workspace until the returned guard is dropped or
    /// [`unlock`](WorkspaceLock::unlock)ed.
    ///
    /// The guard dereferences to the client, so the workspace can be fetched
    /// and stored while it is held.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Locked`] if the service refused the lock,
    /// and propagates other transport errors.
    pub fn lock(&mut self) -> Result<WorkspaceLock<'_, T>, StructurizrError> {
        let locked = self.transport.lock_workspace(
            self.workspace_id,
            self.config.user(),
            self.config.agent(),
        )?;
        if !locked {
            return Err(TransportError::Locked(self.workspace_id).into());
        }
        info!(workspace_id = self.workspace_id; "Locked workspace");
        Ok(WorkspaceLock {
            client: self,
            released: false,
        })
    }

    fn release_lock(&mut self) -> Result<bool, TransportError> {
        let unlocked = self.transport.unlock_workspace(
            self.workspace_id,
            self.config.user(),
            self.config.agent(),
        )?;
        if unlocked {
            info!(workspace_id = self.workspace_id; "Unlocked workspace");
        }
        Ok(unlocked)
    }

    fn merge_remote_layout(&self, workspace: &mut Workspace) -> Result<(), StructurizrError> {
        match self.get_workspace() {
            Ok(remote) => {
                debug!(workspace_id = self.workspace_id; "Merging layout from remote workspace");
                workspace.views_mut().copy_layout_information_from(remote.views());
                Ok(())
            }
            Err(StructurizrError::Transport(TransportError::NotFound(id))) => {
                warn!(workspace_id = id; "Remote workspace does not exist, nothing to merge");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

/// A lock on the remote workspace, released when dropped.
///
/// Failures to release the lock on drop are logged; call
/// [`unlock`](Self::unlock) to handle them instead.
pub struct WorkspaceLock<'c, T: Transport> {
    client: &'c mut WorkspaceClient<T>,
    released: bool,
}

impl<T: Transport> WorkspaceLock<'_, T> {
    /// Releases the lock.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Rejected`] if the service refused to release
    /// the lock, and propagates other transport errors.
    pub fn unlock(mut self) -> Result<(), StructurizrError> {
        self.released = true;
        let workspace_id = self.client.workspace_id;
        if self.client.release_lock()? {
            Ok(())
        } else {
            Err(TransportError::Rejected(format!("failed to unlock workspace {workspace_id}")).into())
        }
    }
}

impl<T: Transport> Deref for WorkspaceLock<'_, T> {
    type Target = WorkspaceClient<T>;

    fn deref(&self) -> &Self::Target {
        self.client
    }
}

impl<T: Transport> DerefMut for WorkspaceLock<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.client
    }
}

impl<T: Transport> Drop for WorkspaceLock<'_, T> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let workspace_id = self.client.workspace_id;
        match self.client.release_lock() {
            Ok(true) => {}
            Ok(false) => warn!(workspace_id = workspace_id; "Service refused to unlock workspace"),
            Err(err) => {
                warn!(workspace_id = workspace_id, error:% = err; "Failed to unlock workspace")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::config::ArchiveLocation;

    /// Counts fetches, keeps the last stored document and tracks the lock.
    #[derive(Default)]
    struct Recording {
        remote: Option<String>,
        fetches: Cell<usize>,
        lock_holder: Option<String>,
        refuse_unlock: bool,
    }

    impl Transport for Recording {
        fn fetch_workspace(&self, workspace_id: i64) -> Result<String, TransportError> {
            self.fetches.set(self.fetches.get() + 1);
            self.remote
                .clone()
                .ok_or(TransportError::NotFound(workspace_id))
        }

        fn store_workspace(&mut self, _: i64, document: &str) -> Result<(), TransportError> {
            self.remote = Some(document.to_owned());
            Ok(())
        }

        fn lock_workspace(
            &mut self,
            _: i64,
            user: Option<&str>,
            _: &str,
        ) -> Result<bool, TransportError> {
            if self.lock_holder.is_some() {
                return Ok(false);
            }
            self.lock_holder = Some(user.unwrap_or("anonymous").to_owned());
            Ok(true)
        }

        fn unlock_workspace(
            &mut self,
            _: i64,
            _: Option<&str>,
            _: &str,
        ) -> Result<bool, TransportError> {
            if self.refuse_unlock {
                return Ok(false);
            }
            Ok(self.lock_holder.take().is_some())
        }
    }

    fn config(id: i64) -> ClientConfig {
        ClientConfig::new(id).with_archive_location(ArchiveLocation::Disabled)
    }

    #[test]
    fn test_new_requires_workspace_id() {
        let config = ClientConfig::default();
        let err = WorkspaceClient::new(Recording::default(), config)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            StructurizrError::Config(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_put_rejects_other_workspace() {
        let mut client = WorkspaceClient::new(Recording::default(), config(1)).unwrap();
        let mut workspace = Workspace::new(2, "Other", "");

        let err = client.put_workspace(&mut workspace).unwrap_err();
        assert!(matches!(
            err,
            StructurizrError::WorkspaceMismatch {
                expected: 1,
                found: 2
            }
        ));
        assert_eq!(client.transport().fetches.get(), 0);
        assert!(client.transport().remote.is_none());
    }

    #[test]
    fn test_put_without_remote_copy_still_stores() {
        let mut client = WorkspaceClient::new(Recording::default(), config(1)).unwrap();
        let mut workspace = Workspace::new(1, "Shop", "");

        client.put_workspace(&mut workspace).unwrap();

        assert_eq!(client.transport().fetches.get(), 1);
        assert!(client.transport().remote.is_some());
    }

    #[test]
    fn test_put_skips_merge_when_disabled() {
        let config = config(1).with_merge_from_remote(false);
        let mut client = WorkspaceClient::new(Recording::default(), config).unwrap();
        let mut workspace = Workspace::new(1, "Shop", "");

        client.put_workspace(&mut workspace).unwrap();

        assert_eq!(client.transport().fetches.get(), 0);
    }

    #[test]
    fn test_get_propagates_document_errors() {
        let transport = Recording {
            remote: Some("{not json".to_owned()),
            ..Recording::default()
        };
        let client = WorkspaceClient::new(transport, config(1)).unwrap();

        let err = client.get_workspace().unwrap_err();
        assert!(matches!(err, StructurizrError::Document(_)));
    }

    #[test]
    fn test_lock_released_on_drop() {
        let mut client =
            WorkspaceClient::new(Recording::default(), config(1).with_user("alice")).unwrap();

        {
            let mut lock = client.lock().unwrap();
            assert_eq!(lock.transport().lock_holder.as_deref(), Some("alice"));
            lock.put_workspace(&mut Workspace::new(1, "Shop", "")).unwrap();
        }

        assert!(client.transport().lock_holder.is_none());
        assert!(client.transport().remote.is_some());
    }

    #[test]
    fn test_lock_refused_when_held() {
        let transport = Recording {
            lock_holder: Some("bob".to_owned()),
            ..Recording::default()
        };
        let mut client = WorkspaceClient::new(transport, config(4)).unwrap();

        let err = client.lock().err().unwrap();
        assert!(matches!(
            err,
            StructurizrError::Transport(TransportError::Locked(4))
        ));
        assert_eq!(client.transport().lock_holder.as_deref(), Some("bob"));
    }

    #[test]
    fn test_explicit_unlock_reports_refusal() {
        let transport = Recording {
            refuse_unlock: true,
            ..Recording::default()
        };
        let mut client = WorkspaceClient::new(transport, config(1)).unwrap();

        let err = client.lock().unwrap().unlock().unwrap_err();
        assert!(matches!(
            err,
            StructurizrError::Transport(TransportError::Rejected(_))
        ));
        assert!(client.transport().lock_holder.is_some());
    }
}
