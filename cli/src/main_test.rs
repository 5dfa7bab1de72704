use super::*;
use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use serde_json::json;

// =============================================================================
// argument parsing
// =============================================================================

#[test]
fn defaults_point_at_local_services() {
    let cli = Cli::try_parse_from(["dracarys", "whoami"]).unwrap();
    assert!(!cli.api_url.is_empty());
    assert!(!cli.site_url.is_empty());
    assert!(matches!(cli.command, Command::Whoami));
}

#[test]
fn login_takes_email_and_password() {
    let cli = Cli::try_parse_from(["dracarys", "login", "--email", "a@x.com", "--password", "pw"]).unwrap();
    match cli.command {
        Command::Login { email, password } => {
            assert_eq!(email, "a@x.com");
            assert_eq!(password, "pw");
        }
        other => panic!("expected login, got {other:?}"),
    }
}

#[test]
fn products_category_defaults_to_all() {
    let cli = Cli::try_parse_from(["dracarys", "products"]).unwrap();
    assert!(matches!(cli.command, Command::Products { ref category } if category == ALL_CATEGORIES));
}

#[test]
fn forgot_password_requires_email() {
    assert!(Cli::try_parse_from(["dracarys", "forgot-password"]).is_err());
}

// =============================================================================
// run_products
// =============================================================================

#[test]
fn run_products_rejects_unknown_category() {
    let err = run_products("hardware").unwrap_err();
    assert!(matches!(err, CliError::UnknownCategory(ref c) if c == "hardware"));
}

#[test]
fn run_products_accepts_known_category() {
    assert!(run_products("consulting").is_ok());
}

// =============================================================================
// stub services
// =============================================================================

async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// An address nothing is listening on.
async fn dead_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn user_json() -> Value {
    json!({ "id": 1, "email": "a@x.com", "name": "A", "role": "client", "is_active": true })
}

async fn stub_me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if auth == "Bearer tok1" {
        (StatusCode::OK, Json(user_json()))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Could not validate credentials" })))
    }
}

async fn stub_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "a@x.com" && body["password"] == "pw" {
        (StatusCode::OK, Json(json!({ "access_token": "tok1", "token_type": "bearer", "user": user_json() })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Incorrect email or password" })))
    }
}

async fn stub_register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "taken@x.com" {
        return (StatusCode::BAD_REQUEST, Json(json!({ "detail": "Email already registered" })));
    }
    let user = json!({ "id": 2, "email": body["email"], "name": body["name"], "role": "client", "is_active": true });
    (StatusCode::OK, Json(json!({ "access_token": "tok2", "token_type": "bearer", "user": user })))
}

async fn stub_relay(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "known@x.com" {
        (StatusCode::OK, Json(json!({ "message": "Reset email sent" })))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "detail": "User not found" })))
    }
}

async fn backend() -> String {
    let router = Router::new()
        .route("/auth/me", get(stub_me))
        .route("/auth/login", post(stub_login))
        .route("/auth/register", post(stub_register));
    spawn_router(router).await
}

async fn site() -> String {
    let router = Router::new()
        .route("/api/forgot-password", post(stub_relay))
        .route("/healthz", get(|| async { "ok" }));
    spawn_router(router).await
}

fn session_file() -> PathBuf {
    std::env::temp_dir().join(format!("dracarys-cli-{}.json", uuid::Uuid::new_v4()))
}

fn cli_for(api_url: &str, session_file: &std::path::Path) -> Cli {
    Cli::try_parse_from([
        "dracarys",
        "--api-url",
        api_url,
        "--session-file",
        session_file.to_str().unwrap(),
        "whoami",
    ])
    .unwrap()
}

fn signed_in_user(scope: &AuthScope) -> Option<String> {
    scope.use_auth().unwrap().user().map(|u| u.email)
}

// =============================================================================
// session commands
// =============================================================================

#[tokio::test]
async fn fresh_session_file_mounts_anonymous() {
    let path = session_file();
    let cli = cli_for(&backend().await, &path);

    let scope = mount(&cli).await.unwrap();
    assert_eq!(signed_in_user(&scope), None);
    assert!(run_whoami(&scope).is_ok());
}

#[tokio::test]
async fn login_whoami_logout_across_invocations() {
    let path = session_file();
    let cli = cli_for(&backend().await, &path);

    run_login(&cli, "a@x.com", "pw").await.unwrap();
    assert!(std::fs::read_to_string(&path).unwrap().contains("tok1"));

    let scope = mount(&cli).await.unwrap();
    assert_eq!(signed_in_user(&scope).as_deref(), Some("a@x.com"));
    assert!(run_whoami(&scope).is_ok());

    run_logout(&cli).await.unwrap();
    assert_eq!(signed_in_user(&mount(&cli).await.unwrap()), None);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn rejected_login_is_an_error_and_stores_nothing() {
    let path = session_file();
    let cli = cli_for(&backend().await, &path);

    let err = run_login(&cli, "a@x.com", "wrong").await.unwrap_err();
    assert!(matches!(err, CliError::Auth(AuthError::Api(ApiError::Status { status: 401, .. }))));
    assert_eq!(signed_in_user(&mount(&cli).await.unwrap()), None);
}

#[tokio::test]
async fn register_signs_in_as_new_account() {
    let path = session_file();
    let cli = cli_for(&backend().await, &path);

    run_register(&cli, "B", "b@x.com", "pw").await.unwrap();
    assert!(std::fs::read_to_string(&path).unwrap().contains("tok2"));

    let err = run_register(&cli, "T", "taken@x.com", "pw").await.unwrap_err();
    assert!(matches!(err, CliError::Auth(AuthError::Api(ApiError::Status { status: 400, .. }))));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn stale_session_file_is_cleared_on_mount() {
    let path = session_file();
    std::fs::write(&path, r#"{"token":"expired"}"#).unwrap();
    let cli = cli_for(&backend().await, &path);

    assert_eq!(signed_in_user(&mount(&cli).await.unwrap()), None);
    assert!(!std::fs::read_to_string(&path).unwrap().contains("expired"));

    let _ = std::fs::remove_file(&path);
}

// =============================================================================
// site commands
// =============================================================================

#[tokio::test]
async fn forgot_password_succeeds_for_known_email() {
    let site = site().await;
    assert!(run_forgot_password(&site, "known@x.com").await.is_ok());
}

#[tokio::test]
async fn forgot_password_surfaces_relay_status() {
    let site = site().await;
    let err = run_forgot_password(&site, "ghost@x.com").await.unwrap_err();
    assert!(matches!(err, CliError::RelayStatus(404)));
}

#[tokio::test]
async fn ping_reports_reachability() {
    assert!(run_ping(&site().await).await.is_ok());
    let err = run_ping(&dead_address().await).await.unwrap_err();
    assert!(matches!(err, CliError::Api(ApiError::Transport(_))));
}
