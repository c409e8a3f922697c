#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use server::{config::AppConfig, http::build_router, http::AppState};

pub struct TestApp {
    pub router: Router,
    pub pool: DatabaseConnection,
}

/// In-memory sqlite stand-in for the Postgres schema, with the same
/// constraints the migration declares.
pub async fn spawn_app() -> TestApp {
    let pool = Database::connect("sqlite::memory:")
        .await
        .expect("sqlite connect");
    bootstrap_sqlite(&pool).await;

    let config = Arc::new(AppConfig {
        jwt_secret: "integration-test-secret-0123456789".into(),
        token_ttl_minutes: 30,
        hr_email_domain: "company.ba".into(),
        cors_allowed_origins: vec![],
    });
    let auth = Arc::new(config.auth());
    let state = AppState {
        pool: pool.clone(),
        auth,
        config,
    };
    TestApp {
        router: build_router(state),
        pool,
    }
}

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE person (
        id TEXT PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE role (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE employee (
        person_id TEXT PRIMARY KEY REFERENCES person (id) ON DELETE CASCADE,
        role_id TEXT NOT NULL REFERENCES role (id) ON DELETE RESTRICT,
        hire_date TEXT NOT NULL,
        qualifications TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE hr_employee (
        person_id TEXT PRIMARY KEY REFERENCES person (id) ON DELETE CASCADE,
        department TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE external_user (
        person_id TEXT PRIMARY KEY REFERENCES person (id) ON DELETE CASCADE,
        username TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE project (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        hr_employee_id TEXT REFERENCES hr_employee (person_id) ON DELETE SET NULL
    );
    "#,
    r#"
    CREATE TABLE leave_request (
        id TEXT PRIMARY KEY,
        employee_id TEXT NOT NULL REFERENCES employee (person_id) ON DELETE RESTRICT,
        hr_employee_id TEXT REFERENCES hr_employee (person_id) ON DELETE SET NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        request_type TEXT NOT NULL,
        status TEXT NOT NULL,
        reason TEXT
    );
    "#,
    r#"
    CREATE TABLE external_request (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES external_user (person_id) ON DELETE RESTRICT,
        project_id TEXT NOT NULL REFERENCES project (id) ON DELETE RESTRICT,
        hr_employee_id TEXT REFERENCES hr_employee (person_id) ON DELETE SET NULL,
        description TEXT NOT NULL,
        status TEXT NOT NULL,
        response TEXT
    );
    "#,
    r#"
    CREATE TABLE employee_project (
        employee_id TEXT NOT NULL REFERENCES employee (person_id) ON DELETE RESTRICT,
        project_id TEXT NOT NULL REFERENCES project (id) ON DELETE RESTRICT,
        PRIMARY KEY (employee_id, project_id)
    );
    "#,
];

async fn bootstrap_sqlite(db: &DatabaseConnection) {
    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "PRAGMA foreign_keys = ON;",
    ))
    .await
    .unwrap();
    for ddl in TABLES {
        db.execute(Statement::from_string(DatabaseBackend::Sqlite, *ddl))
            .await
            .unwrap();
    }
}

pub async fn send(
    app: &TestApp,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn get(app: &TestApp, path: &str, token: &str) -> (StatusCode, Value) {
    send(app, Method::GET, path, Some(token), None).await
}

pub async fn post(app: &TestApp, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, path, Some(token), Some(body)).await
}

pub async fn register(
    app: &TestApp,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/register",
        None,
        Some(json!({
            "firstName": first_name,
            "lastName": last_name,
            "email": email,
            "password": password,
        })),
    )
    .await
}

/// Form-encoded login; returns the bearer token, panicking on rejection.
pub async fn login(app: &TestApp, email: &str, password: &str) -> String {
    let form = format!(
        "username={}&password={}",
        urlencode(email),
        urlencode(password)
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK, "login failed");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    value["access_token"].as_str().unwrap().to_string()
}

pub async fn try_login(app: &TestApp, email: &str, password: &str) -> StatusCode {
    let form = format!(
        "username={}&password={}",
        urlencode(email),
        urlencode(password)
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap().status()
}

fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Registers an HR account and returns (token, person id).
pub async fn hr_session(app: &TestApp, local_part: &str) -> (String, String) {
    let email = format!("{local_part}@company.ba");
    let (status, body) = register(app, "Hana", "Resources", &email, "s3cret-pass").await;
    assert_eq!(status, StatusCode::CREATED);
    let person_id = body["userId"].as_str().unwrap().to_string();
    let token = login(app, &email, "s3cret-pass").await;
    (token, person_id)
}

/// Registers an external account and returns (token, person id).
pub async fn external_session(app: &TestApp, email: &str) -> (String, String) {
    let (status, body) = register(app, "Esma", "Vanjska", email, "s3cret-pass").await;
    assert_eq!(status, StatusCode::CREATED);
    let person_id = body["userId"].as_str().unwrap().to_string();
    let token = login(app, email, "s3cret-pass").await;
    (token, person_id)
}

/// Creates a role and an employee through the HR surface and returns
/// (employee token, employee person id, role id).
pub async fn employee_session(app: &TestApp, hr_token: &str, email: &str) -> (String, String, String) {
    let (status, role) = post(app, "/roles", hr_token, json!({ "roleName": "Engineer" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let role_id = role["id"].as_str().unwrap().to_string();

    let (status, employee) = post(
        app,
        "/hr/employees",
        hr_token,
        json!({
            "firstName": "Emir",
            "lastName": "Radnik",
            "email": email,
            "password": "s3cret-pass",
            "roleId": role_id,
            "hireDate": "2024-03-01",
            "qualifications": "BSc",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let person_id = employee["personId"].as_str().unwrap().to_string();
    let token = login(app, email, "s3cret-pass").await;
    (token, person_id, role_id)
}
