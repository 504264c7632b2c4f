//! End-to-end tests against an in-process stub controller.

use std::{
  collections::HashMap,
  sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use alb_client::{
  AlbClient, ApiErrorKind, ClientError, Credentials, FilterParams, PatchOp, Session, SessionConfig, TransportError,
  request,
};
use alb_models::Pool;
use axum::{
  Json, Router,
  extract::Query,
  http::{HeaderMap, StatusCode},
  routing::{get, post},
};
use futures::StreamExt;
use serde_json::json;

async fn serve(app: Router) -> String {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  format!("http://{addr}")
}

fn session_for(base: &str) -> Session {
  Session::new(
    SessionConfig::builder()
      .controller(base)
      .credentials(Credentials::Bearer("test-token".to_string()))
      .max_retries(2)
      .retry_backoff(Duration::from_millis(10))
      .build(),
  )
  .unwrap()
}

#[tokio::test]
async fn paginate_yields_all_pages_in_order_then_terminates() {
  let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
  let app = Router::new().route(
    "/api/pool",
    get({
      let log = log.clone();
      move |Query(params): Query<HashMap<String, String>>| {
        let log = log.clone();
        async move {
          let page = params.get("page").cloned().unwrap_or_else(|| "1".to_string());
          log.lock().unwrap().push(page.clone());
          if page == "1" {
            // `next` points at a different host on purpose; only its path
            // and query may be reused.
            Json(json!({
              "count": 3,
              "next": "https://some-other-frontend/api/pool?page=2",
              "results": [{"name": "a"}, {"name": "b"}],
            }))
          } else {
            Json(json!({"count": 3, "results": [{"name": "c"}]}))
          }
        }
      }
    }),
  );
  let base = serve(app).await;
  let client = AlbClient::new(session_for(&base));

  let mut stream = client.pool().stream(&FilterParams::new());
  let mut names = Vec::new();
  while let Some(item) = stream.next().await {
    names.push(item.unwrap().name.unwrap());
  }

  assert_eq!(names, vec!["a", "b", "c"]);
  assert_eq!(*log.lock().unwrap(), vec!["1", "2"]);
}

#[tokio::test]
async fn second_page_is_not_fetched_while_first_still_buffered() {
  let hits = Arc::new(AtomicUsize::new(0));
  let app = Router::new().route(
    "/api/pool",
    get({
      let hits = hits.clone();
      move |Query(params): Query<HashMap<String, String>>| {
        let hits = hits.clone();
        async move {
          hits.fetch_add(1, Ordering::SeqCst);
          if params.contains_key("page") {
            Json(json!({"count": 3, "results": [{"name": "c"}]}))
          } else {
            Json(json!({
              "count": 3,
              "next": "https://ctrl/api/pool?page=2",
              "results": [{"name": "a"}, {"name": "b"}],
            }))
          }
        }
      }
    }),
  );
  let base = serve(app).await;
  let client = AlbClient::new(session_for(&base));

  let mut stream = client.pool().stream(&FilterParams::new());
  let first = stream.next().await.unwrap().unwrap();
  let second = stream.next().await.unwrap().unwrap();

  assert_eq!(first.name.as_deref(), Some("a"));
  assert_eq!(second.name.as_deref(), Some("b"));
  assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn page_fetch_error_ends_the_stream() {
  let app = Router::new().route(
    "/api/pool",
    get(|Query(params): Query<HashMap<String, String>>| async move {
      if params.contains_key("page") {
        (StatusCode::BAD_GATEWAY, Json(json!({"code": 502, "message": "bad gateway"})))
      } else {
        (
          StatusCode::OK,
          Json(json!({
            "count": 2,
            "next": "https://ctrl/api/pool?page=2",
            "results": [{"name": "a"}],
          })),
        )
      }
    }),
  );
  let base = serve(app).await;
  let session = Session::new(
    SessionConfig::builder()
      .controller(base)
      .credentials(Credentials::Bearer("t".to_string()))
      .max_retries(0)
      .build(),
  )
  .unwrap();
  let client = AlbClient::new(session);

  let mut stream = client.pool().stream(&FilterParams::new());
  let first = stream.next().await.unwrap();
  let second = stream.next().await.unwrap();
  let end = stream.next().await;

  assert!(first.is_ok());
  assert!(matches!(second, Err(ClientError::Api(_))));
  assert!(end.is_none());
}

#[tokio::test]
async fn unauthorized_is_surfaced_after_exactly_one_attempt() {
  let hits = Arc::new(AtomicUsize::new(0));
  let app = Router::new().route(
    "/api/pool",
    get({
      let hits = hits.clone();
      move || {
        let hits = hits.clone();
        async move {
          hits.fetch_add(1, Ordering::SeqCst);
          (
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": 401, "message": "Invalid credentials"})),
          )
        }
      }
    }),
  );
  let base = serve(app).await;
  let client = AlbClient::new(session_for(&base));

  let err = client.pool().get_all(&FilterParams::new()).await.unwrap_err();

  match err {
    ClientError::Api(api) => {
      assert_eq!(api.kind, ApiErrorKind::Unauthorized);
      assert_eq!(api.message, "Invalid credentials");
    }
    other => panic!("expected ApiError, got {other}"),
  }
  assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn get_is_retried_to_the_limit_then_surfaces_server_error() {
  let hits = Arc::new(AtomicUsize::new(0));
  let app = Router::new().route(
    "/api/pool",
    get({
      let hits = hits.clone();
      move || {
        let hits = hits.clone();
        async move {
          hits.fetch_add(1, Ordering::SeqCst);
          (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"code": 503, "message": "upgrade in progress"})))
        }
      }
    }),
  );
  let base = serve(app).await;
  let client = AlbClient::new(session_for(&base));

  let err = client.pool().get_all(&FilterParams::new()).await.unwrap_err();

  match err {
    ClientError::Api(api) => assert_eq!(api.kind, ApiErrorKind::ServerError),
    other => panic!("expected ApiError, got {other}"),
  }
  // initial attempt + max_retries
  assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn create_is_not_retried_by_default() {
  let hits = Arc::new(AtomicUsize::new(0));
  let app = Router::new().route(
    "/api/pool",
    post({
      let hits = hits.clone();
      move || {
        let hits = hits.clone();
        async move {
          hits.fetch_add(1, Ordering::SeqCst);
          (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"code": 503, "message": "busy"})))
        }
      }
    }),
  );
  let base = serve(app).await;
  let client = AlbClient::new(session_for(&base));

  let pool = Pool {
    name: Some("p".to_string()),
    ..Default::default()
  };
  let err = client.pool().create(&pool).await.unwrap_err();

  assert!(matches!(err, ClientError::Api(_)));
  assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn create_marked_safe_is_retried_until_success() {
  let hits = Arc::new(AtomicUsize::new(0));
  let app = Router::new().route(
    "/api/pool",
    post({
      let hits = hits.clone();
      move || {
        let hits = hits.clone();
        async move {
          let hit = hits.fetch_add(1, Ordering::SeqCst);
          if hit < 2 {
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"code": 503, "message": "busy"})))
          } else {
            (StatusCode::CREATED, Json(json!({"name": "p", "uuid": "pool-1"})))
          }
        }
      }
    }),
  );
  let base = serve(app).await;
  let session = session_for(&base);

  let pool = Pool {
    name: Some("p".to_string()),
    ..Default::default()
  };
  let descriptor = request::create(&pool).unwrap();
  let response = session.execute_retriable(&descriptor).await.unwrap();
  let created: Pool = alb_client::resolver::resolve_object(&response).unwrap();

  assert_eq!(created.uuid.as_deref(), Some("pool-1"));
  assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn get_by_name_distinguishes_found_missing_and_ambiguous() {
  let app = Router::new().route(
    "/api/pool",
    get(|Query(params): Query<HashMap<String, String>>| async move {
      let body = match params.get("name").map(String::as_str) {
        Some("web") => json!({"count": 1, "results": [{"name": "web", "uuid": "pool-w"}]}),
        Some("dup") => json!({"count": 2, "results": [{"name": "dup"}, {"name": "dup"}]}),
        _ => json!({"count": 0, "results": []}),
      };
      Json(body)
    }),
  );
  let base = serve(app).await;
  let client = AlbClient::new(session_for(&base));

  let found = client.pool().get_by_name("web").await.unwrap();
  assert_eq!(found.uuid.as_deref(), Some("pool-w"));

  let missing = client.pool().get_by_name("nope").await.unwrap_err();
  assert!(matches!(missing, ClientError::NotFoundByName { .. }));

  let ambiguous = client.pool().get_by_name("dup").await.unwrap_err();
  assert!(matches!(ambiguous, ClientError::AmbiguousName { .. }));
}

#[tokio::test]
async fn patch_envelope_and_headers_reach_the_wire() {
  let seen: Arc<Mutex<Option<(String, serde_json::Value)>>> = Arc::new(Mutex::new(None));
  let app = Router::new().route(
    "/api/pool/{uuid}",
    axum::routing::patch({
      let seen = seen.clone();
      move |headers: HeaderMap, Json(body): Json<serde_json::Value>| {
        let seen = seen.clone();
        async move {
          let tenant = headers
            .get("x-avi-tenant")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
          *seen.lock().unwrap() = Some((tenant, body));
          Json(json!({"name": "p", "uuid": "pool-1", "enabled": false}))
        }
      }
    }),
  );
  let base = serve(app).await;
  let client = AlbClient::new(session_for(&base));

  let partial = Pool {
    enabled: Some(false),
    ..Default::default()
  };
  let patched = client
    .pool()
    .patch("pool-1", PatchOp::Replace, &partial)
    .await
    .unwrap();

  assert_eq!(patched.enabled, Some(false));
  let (tenant, body) = seen.lock().unwrap().clone().unwrap();
  assert_eq!(tenant, "admin");
  assert_eq!(body, json!({"replace": {"enabled": false}}));
}

#[tokio::test]
async fn per_call_tenant_override_wins_over_session_tenant() {
  let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
  let app = Router::new().route(
    "/api/pool",
    get({
      let seen = seen.clone();
      move |headers: HeaderMap| {
        let seen = seen.clone();
        async move {
          let tenant = headers
            .get("x-avi-tenant")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
          seen.lock().unwrap().push(tenant);
          Json(json!({"count": 0, "results": []}))
        }
      }
    }),
  );
  let base = serve(app).await;
  let session = session_for(&base);

  let descriptor = request::list::<Pool>(&FilterParams::new());
  session.execute(&descriptor).await.unwrap();
  session
    .execute_with(
      &descriptor,
      &alb_client::ExecuteOptions {
        tenant: Some("finance".to_string()),
        ..Default::default()
      },
    )
    .await
    .unwrap();

  assert_eq!(*seen.lock().unwrap(), vec!["admin", "finance"]);
}

#[tokio::test]
async fn cancellation_abandons_the_request() {
  let app = Router::new().route(
    "/api/pool",
    get(|| async {
      std::future::pending::<()>().await;
      "unreachable"
    }),
  );
  let base = serve(app).await;
  let session = session_for(&base);

  let descriptor = request::list::<Pool>(&FilterParams::new());
  let err = session
    .execute_cancellable(&descriptor, std::future::ready(()))
    .await
    .unwrap_err();

  assert!(matches!(err, ClientError::Transport(TransportError::Cancelled)));
}
