//! Tests for the backend application bootstrap, covering data directory
//! setup and readiness signalling.

use super::server::{ServerConfig, create_server};
use actix_web::web;
use rstest::{fixture, rstest};
use waitline::inbound::http::health::HealthState;
use waitline::test_support::cap_fs::write_file;
use waitline::test_support::data_dir::TempDataDir;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn data_dir() -> TempDataDir {
    TempDataDir::new().expect("tempdir")
}

fn loopback_config(data_dir: std::path::PathBuf) -> ServerConfig {
    ServerConfig::new(
        "127.0.0.1:0".parse().expect("loopback address"),
        data_dir,
    )
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, data_dir: TempDataDir) {
    let config = loopback_config(data_dir.path().to_path_buf());

    let _server = create_server(health_state.clone(), config).expect("server should start");

    assert!(health_state.is_ready(), "server should be marked ready");
}

#[rstest]
#[actix_rt::test]
async fn create_server_creates_missing_data_directory(
    health_state: web::Data<HealthState>,
    data_dir: TempDataDir,
) {
    let nested = data_dir.path().join("state").join("queue");

    let _server = create_server(health_state, loopback_config(nested.clone()))
        .expect("server should start");

    assert!(nested.is_dir(), "data directory should be created");
}

#[rstest]
#[actix_rt::test]
async fn unusable_data_directory_fails_before_ready(
    health_state: web::Data<HealthState>,
    data_dir: TempDataDir,
) {
    let blocker = data_dir.path().join("not-a-dir");
    write_file(&blocker, b"occupied").expect("seed file");

    let result = create_server(health_state.clone(), loopback_config(blocker));

    assert!(result.is_err(), "a file in place of the data directory should fail");
    assert!(!health_state.is_ready());
}
