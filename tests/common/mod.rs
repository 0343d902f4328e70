//! Test helpers shared by the web API tests.

use axum_test::TestServer;
use tempfile::TempDir;

use spicyzone::config::{AuthConfiguration, Config, HttpConfiguration, StorageConfiguration};
use spicyzone::http::{api_router, ApiContext};

pub const USER_PASSWORD: &str = "test-user-secret";
pub const ADMIN_PASSWORD: &str = "test-admin-secret";

pub fn create_test_config(upload_dir: &TempDir) -> Config {
    Config {
        auth: AuthConfiguration {
            user_password: USER_PASSWORD.to_string(),
            admin_password: ADMIN_PASSWORD.to_string(),
        },
        storage: StorageConfiguration {
            upload_dir: upload_dir.path().to_path_buf(),
        },
        http: HttpConfiguration {
            max_upload_bytes: 10 * 1024 * 1024,
            allowed_origins: Vec::new(),
            listen_addr: "127.0.0.1:0".parse().unwrap(),
        },
    }
}

/// Create a test server backed by a fresh temporary upload directory.
/// The `TempDir` must be kept alive for the duration of the test.
pub fn create_test_server() -> (TestServer, TempDir) {
    let upload_dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = create_test_config(&upload_dir);
    let router = api_router(ApiContext::new(config));
    let server = TestServer::new(router).expect("failed to create test server");
    (server, upload_dir)
}
