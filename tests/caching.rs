mod common;

use std::{sync::Arc, time::Duration};

use common::{builder_for, location, mount_any, ok, request_count};
use retro_weather::{
    app::cache::StateCache,
    error::{BuildError, CacheBuildError},
};
use wiremock::{Mock, MockServer, ResponseTemplate, matchers::method};

const LONG_TTL: Duration = Duration::from_secs(60);

#[tokio::test]
async fn concurrent_cold_start_builds_once() {
    let server = MockServer::start().await;
    mount_any(&server, ok(30.0).set_delay(Duration::from_millis(200))).await;
    let cache = StateCache::new(builder_for(&server), LONG_TTL);
    let locations = vec![location("Buffalo", 42.9, -78.9)];

    let (first, second) = tokio::join!(cache.get_state(&locations), cache.get_state(&locations));
    let first = first.expect("first caller");
    let second = second.expect("second caller");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn fresh_value_is_served_without_upstream_calls() {
    let server = MockServer::start().await;
    mount_any(&server, ok(30.0)).await;
    let cache = StateCache::new(builder_for(&server), LONG_TTL);
    let locations = vec![location("Buffalo", 42.9, -78.9), location("Erie", 42.1, -80.1)];

    let first = cache.get_state(&locations).await.expect("build");
    for _ in 0..3 {
        let again = cache.get_state(&locations).await.expect("cached");
        assert!(Arc::ptr_eq(&first, &again));
    }

    assert_eq!(request_count(&server).await, 2, "one request per location");
}

#[tokio::test]
async fn expired_value_triggers_a_new_build() {
    let server = MockServer::start().await;
    mount_any(&server, ok(30.0)).await;
    let cache = StateCache::new(builder_for(&server), Duration::from_millis(50));
    assert_eq!(cache.refresh_interval(), Duration::from_millis(50));
    let locations = vec![location("Buffalo", 42.9, -78.9)];

    let first = cache.get_state(&locations).await.expect("first build");
    tokio::time::sleep(Duration::from_millis(120)).await;
    let second = cache.get_state(&locations).await.expect("second build");

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn failed_build_frees_the_slot_for_the_next_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_any(&server, ok(30.0)).await;
    let cache = StateCache::new(builder_for(&server), LONG_TTL);
    let locations = vec![location("Buffalo", 42.9, -78.9)];

    let err = cache.get_state(&locations).await.expect_err("upstream down");
    assert!(matches!(
        err,
        CacheBuildError::Build(BuildError::NoForecastData { ref failures }) if failures.len() == 1
    ));

    let state = cache.get_state(&locations).await.expect("recovered");
    assert_eq!(state.location.name, "Buffalo");
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn joined_callers_share_a_failed_build() {
    let server = MockServer::start().await;
    mount_any(
        &server,
        ResponseTemplate::new(500).set_delay(Duration::from_millis(150)),
    )
    .await;
    let cache = StateCache::new(builder_for(&server), LONG_TTL);
    let locations = vec![location("Buffalo", 42.9, -78.9)];

    let (first, second) = tokio::join!(cache.get_state(&locations), cache.get_state(&locations));
    assert!(first.is_err());
    assert!(second.is_err());
    assert_eq!(request_count(&server).await, 1);
}
