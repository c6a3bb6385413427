//! Process-wide session registry.
//!
//! At most one live session exists per process, keyed on the endpoint
//! identity. Acquiring a different endpoint first releases the previous
//! session's resources, then connects - there are no leaked background
//! connections.

use std::future::Future;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tokio::sync::Mutex;

use crate::config::Endpoint;

use super::session::{ExecResult, RegionSession};

static GLOBAL: Lazy<SessionRegistry> = Lazy::new(SessionRegistry::new);

/// The process-wide registry instance.
pub fn global() -> &'static SessionRegistry {
    &GLOBAL
}

/// Single-owner registry for the live store session.
///
/// Lifecycle: the session is created on first acquisition, reused while the
/// endpoint identity is unchanged, and torn down explicitly either on
/// endpoint change or via [`SessionRegistry::shutdown`].
#[derive(Default)]
pub struct SessionRegistry {
    active: Mutex<Option<(Endpoint, Arc<dyn RegionSession>)>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(None),
        }
    }

    /// Return the live session for `endpoint`, connecting with `connect` if
    /// none exists. A session held for a different endpoint is closed first;
    /// its close failure propagates rather than leaking the connection
    /// silently.
    pub async fn acquire<F, Fut>(
        &self,
        endpoint: &Endpoint,
        connect: F,
    ) -> ExecResult<Arc<dyn RegionSession>>
    where
        F: FnOnce(Endpoint) -> Fut,
        Fut: Future<Output = ExecResult<Arc<dyn RegionSession>>>,
    {
        let mut active = self.active.lock().await;

        if let Some((current, session)) = active.as_ref() {
            if current == endpoint {
                return Ok(Arc::clone(session));
            }
        }

        if let Some((previous, session)) = active.take() {
            tracing::debug!(endpoint = %previous, "closing session for superseded endpoint");
            session.close().await?;
        }

        let session = connect(endpoint.clone()).await?;
        tracing::debug!(endpoint = %endpoint, "opened store session");
        *active = Some((endpoint.clone(), Arc::clone(&session)));
        Ok(session)
    }

    /// Close and drop the live session, if any.
    pub async fn shutdown(&self) -> ExecResult<()> {
        if let Some((endpoint, session)) = self.active.lock().await.take() {
            tracing::debug!(endpoint = %endpoint, "closing store session");
            session.close().await?;
        }
        Ok(())
    }
}
