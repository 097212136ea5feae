use std::sync::Arc;

use axum_test::TestServer;
use tempfile::TempDir;
use tutorcal_api::{ApiState, build_router};
use tutorcal_store::{FileSlotStore, SharedStore};

pub struct TestContext {
    // Keeps the temp dir alive for the lifetime of the test
    pub _dir: TempDir,
    pub store: Arc<FileSlotStore>,
    pub server: TestServer,
}

impl TestContext {
    /// Server backed by a fresh file store in a temp dir.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = Arc::new(FileSlotStore::new(dir.path().join("db.json")));
        let server = server_with(store.clone());

        Self {
            _dir: dir,
            store,
            server,
        }
    }
}

/// Server backed by any store, including mocks.
pub fn server_with(store: SharedStore) -> TestServer {
    let state = Arc::new(ApiState { store });
    TestServer::new(build_router(state)).expect("Failed to start test server")
}
