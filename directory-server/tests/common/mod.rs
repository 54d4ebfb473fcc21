#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use directory_server::{
    Config, EmployeeStore, JsonFileStore, ServerState, StoreError, StoreResult, create_router,
};
use shared::{Directory, Employee, EmployeeProfile, Location};
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "michael.chen@company.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const USER_EMAIL: &str = "david.kim@company.com";
pub const USER_PASSWORD: &str = "password123";

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
    pub data_file: std::path::PathBuf,
    _dir: TempDir,
}

fn record(
    name: &str,
    email: &str,
    password: &str,
    joined: &str,
    admin: bool,
) -> EmployeeProfile {
    EmployeeProfile {
        name: Some(name.into()),
        designation: Some("Software Engineer".into()),
        email: Some(email.into()),
        password: Some(password.into()),
        phone: Some("555-0100".into()),
        department: Some("Engineering".into()),
        joining_date: Some(joined.into()),
        location: Some(Location::new("Seattle", "WA")),
        is_admin: Some(admin),
        registration_completed: Some(true),
        ..Default::default()
    }
}

/// Admin (id 1), regular user (id 2) and three more staff
pub fn seed() -> Directory {
    let mut d = Directory::default();
    d.insert(record("Michael Chen", ADMIN_EMAIL, ADMIN_PASSWORD, "2020-03-15", true)).unwrap();
    d.insert(record("David Kim", USER_EMAIL, USER_PASSWORD, "2021-07-01", false)).unwrap();
    d.insert(record("Sarah Lee", "sarah.lee@company.com", "pw", "2023-01-10", false)).unwrap();
    d.insert(record("Priya Patel", "priya.patel@company.com", "pw", "2022-11-20", false)).unwrap();
    d.insert(record("Tom Brown", "tom.brown@company.com", "pw", "2024-02-05", false)).unwrap();
    d
}

pub async fn app_with(directory: Directory) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("db.json");
    let config = Config::with_data_file(&data_file);
    let store: Arc<dyn EmployeeStore> = Arc::new(JsonFileStore::new(&data_file));
    store.save(&directory).await.unwrap();

    let state = ServerState::with_store(config, store);
    TestApp {
        router: create_router(state.clone()),
        state,
        data_file,
        _dir: dir,
    }
}

pub async fn app() -> TestApp {
    app_with(seed()).await
}

/// Store that serves a fixed directory and refuses every write
#[derive(Debug)]
pub struct FailingStore {
    pub directory: Directory,
}

#[async_trait]
impl EmployeeStore for FailingStore {
    async fn load(&self) -> Directory {
        self.directory.clone()
    }

    async fn save(&self, _directory: &Directory) -> StoreResult<()> {
        Err(StoreError::Io {
            path: "unwritable.json".into(),
            source: std::io::Error::other("disk full"),
        })
    }
}

pub fn failing_app() -> (Router, ServerState) {
    let config = Config::with_data_file("unwritable.json");
    let store: Arc<dyn EmployeeStore> = Arc::new(FailingStore { directory: seed() });
    let state = ServerState::with_store(config, store);
    (create_router(state.clone()), state)
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn directory(&self) -> Directory {
        self.state.store.load().await
    }

    pub async fn login_admin(&self) -> String {
        let form = format!("username={}&password={}", ADMIN_EMAIL, ADMIN_PASSWORD);
        let resp = self.send(form_post("/admin/login", &form, None)).await;
        assert_eq!(resp.status(), 303);
        cookie_header(&resp)
    }

    pub async fn login_user(&self) -> String {
        let form = format!("username={}&password={}", USER_EMAIL, USER_PASSWORD);
        let resp = self.send(form_post("/login", &form, None)).await;
        assert_eq!(location(&resp), "/directory");
        cookie_header(&resp)
    }
}

pub async fn send(router: &Router, req: Request<Body>) -> Response<Body> {
    router.clone().oneshot(req).await.unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(resp).await).unwrap()
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub fn set_cookies(resp: &Response<Body>) -> Vec<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// Turn the `Set-Cookie` headers of a response into a `Cookie` request header
pub fn cookie_header(resp: &Response<Body>) -> String {
    set_cookies(resp)
        .iter()
        .filter(|c| !c.contains("Max-Age=0"))
        .filter_map(|c| c.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn find<'a>(directory: &'a Directory, email: &str) -> &'a Employee {
    directory.find_by_email(email).unwrap()
}
