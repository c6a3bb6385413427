//! Session registry lifecycle: reuse, endpoint-change teardown, shutdown.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use regionql::config::Endpoint;
use regionql::exec::{ExecError, ExecResult, RegionSession, SessionRegistry};

#[derive(Debug, Default)]
struct FakeSession {
    closed: AtomicBool,
    fail_close: bool,
}

#[async_trait]
impl RegionSession for FakeSession {
    async fn execute(&self, _oql: &str) -> ExecResult<Vec<Value>> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ExecError::SessionClosed);
        }
        Ok(vec![])
    }

    async fn close(&self) -> ExecResult<()> {
        self.closed.store(true, Ordering::SeqCst);
        if self.fail_close {
            return Err(ExecError::ConnectionLost("close timed out".into()));
        }
        Ok(())
    }
}

fn endpoint(host: &str, port: u16) -> Endpoint {
    Endpoint {
        host: host.to_string(),
        port,
    }
}

async fn acquire_fake(
    registry: &SessionRegistry,
    ep: &Endpoint,
    connects: &AtomicUsize,
) -> ExecResult<Arc<dyn RegionSession>> {
    registry
        .acquire(ep, |_| async {
            connects.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(FakeSession::default()) as Arc<dyn RegionSession>)
        })
        .await
}

#[tokio::test]
async fn test_same_endpoint_reuses_session() {
    let registry = SessionRegistry::new();
    let connects = AtomicUsize::new(0);
    let ep = endpoint("localhost", 10334);

    let first = acquire_fake(&registry, &ep, &connects).await.unwrap();
    let second = acquire_fake(&registry, &ep, &connects).await.unwrap();

    assert_eq!(connects.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_endpoint_change_closes_previous_session() {
    let registry = SessionRegistry::new();
    let connects = AtomicUsize::new(0);

    let first = acquire_fake(&registry, &endpoint("a", 1), &connects)
        .await
        .unwrap();
    let second = acquire_fake(&registry, &endpoint("b", 2), &connects)
        .await
        .unwrap();

    assert_eq!(connects.load(Ordering::SeqCst), 2);
    // The superseded session no longer executes.
    assert!(matches!(
        first.execute("SELECT * FROM /R").await,
        Err(ExecError::SessionClosed)
    ));
    assert!(second.execute("SELECT * FROM /R").await.is_ok());
}

#[tokio::test]
async fn test_port_alone_changes_endpoint_identity() {
    let registry = SessionRegistry::new();
    let connects = AtomicUsize::new(0);

    acquire_fake(&registry, &endpoint("localhost", 10334), &connects)
        .await
        .unwrap();
    acquire_fake(&registry, &endpoint("localhost", 10335), &connects)
        .await
        .unwrap();

    assert_eq!(connects.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_close_failure_on_supersede_propagates() {
    let registry = SessionRegistry::new();

    registry
        .acquire(&endpoint("a", 1), |_| async {
            Ok(Arc::new(FakeSession {
                closed: AtomicBool::new(false),
                fail_close: true,
            }) as Arc<dyn RegionSession>)
        })
        .await
        .unwrap();

    let err = registry
        .acquire(&endpoint("b", 2), |_| async {
            Ok(Arc::new(FakeSession::default()) as Arc<dyn RegionSession>)
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ExecError::ConnectionLost(_)));
}

#[tokio::test]
async fn test_connect_failure_leaves_registry_empty() {
    let registry = SessionRegistry::new();
    let connects = AtomicUsize::new(0);

    let err = registry
        .acquire(&endpoint("a", 1), |_| async {
            Err(ExecError::ConnectionLost("refused".into()))
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ExecError::ConnectionLost(_)));

    // The next acquisition connects fresh.
    acquire_fake(&registry, &endpoint("a", 1), &connects)
        .await
        .unwrap();
    assert_eq!(connects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_shutdown_closes_and_forgets() {
    let registry = SessionRegistry::new();
    let connects = AtomicUsize::new(0);
    let ep = endpoint("localhost", 10334);

    let session = acquire_fake(&registry, &ep, &connects).await.unwrap();
    registry.shutdown().await.unwrap();

    assert!(matches!(
        session.execute("SELECT * FROM /R").await,
        Err(ExecError::SessionClosed)
    ));

    // Shutdown with nothing live is a no-op.
    registry.shutdown().await.unwrap();

    // Re-acquiring after shutdown connects again.
    acquire_fake(&registry, &ep, &connects).await.unwrap();
    assert_eq!(connects.load(Ordering::SeqCst), 2);
}
