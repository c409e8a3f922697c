mod common;

use axum::http::{Method, StatusCode};
use common::{employee_session, external_session, get, hr_session, post, send, spawn_app};
use serde_json::json;
use uuid::Uuid;

async fn create_project(app: &common::TestApp, hr_token: &str, name: &str) -> String {
    let (status, body) = post(
        app,
        "/projects",
        hr_token,
        json!({
            "projectName": name,
            "description": "internal tooling",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("Project created"));
    body["project"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn hr_creates_projects_and_externals_can_browse_them() {
    let app = spawn_app().await;
    let (hr_token, _) = hr_session(&app, "ana.hr").await;
    let project_id = create_project(&app, &hr_token, "Portal").await;

    let (external_token, _) = external_session(&app, "esma@client.org").await;
    let (status, body) = get(&app, "/projects", &external_token).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], json!(project_id));
    assert_eq!(listed[0]["name"], json!("Portal"));
}

#[tokio::test]
async fn employees_cannot_create_projects() {
    let app = spawn_app().await;
    let (hr_token, _) = hr_session(&app, "ana.hr").await;
    let (employee_token, _, _) = employee_session(&app, &hr_token, "emir@firma.ba").await;

    let (status, _) = post(
        &app,
        "/projects",
        &employee_token,
        json!({ "projectName": "Rogue", "description": "nope" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn assigning_an_unknown_hr_owner_fails() {
    let app = spawn_app().await;
    let (hr_token, _) = hr_session(&app, "ana.hr").await;

    let (status, body) = post(
        &app,
        "/projects",
        &hr_token,
        json!({
            "projectName": "Portal",
            "description": "internal tooling",
            "hrEmployeeId": Uuid::new_v4(),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("HR employee not found"));
}

#[tokio::test]
async fn project_updates_are_partial() {
    let app = spawn_app().await;
    let (hr_token, hr_id) = hr_session(&app, "ana.hr").await;
    let project_id = create_project(&app, &hr_token, "Portal").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/projects/{project_id}"),
        Some(&hr_token),
        Some(json!({ "hrEmployeeId": hr_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project"]["name"], json!("Portal"));
    assert_eq!(body["project"]["hrEmployeeId"], json!(hr_id));

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/projects/{}", Uuid::new_v4()),
        Some(&hr_token),
        Some(json!({ "description": "missing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn external_request_round_trip_through_hr_response() {
    let app = spawn_app().await;
    let (hr_token, hr_id) = hr_session(&app, "ana.hr").await;
    let project_id = create_project(&app, &hr_token, "Portal").await;
    let (external_token, external_id) = external_session(&app, "esma@client.org").await;

    let (status, body) = post(
        &app,
        "/external/requests",
        &external_token,
        json!({ "projectId": project_id, "description": "need access" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("External request submitted successfully."));
    assert_eq!(body["request"]["status"], json!("pending"));
    assert_eq!(body["request"]["userId"], json!(external_id));
    let request_id = body["request"]["id"].as_str().unwrap().to_string();

    let (status, all) = get(&app, "/hr/external-requests", &hr_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (status, body) = post(
        &app,
        &format!("/hr/external-requests/{request_id}/respond"),
        &hr_token,
        json!({ "response": "granted, credentials follow" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Response sent"));

    let (status, mine) = get(&app, "/external/requests/me", &external_token).await;
    assert_eq!(status, StatusCode::OK);
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["status"], json!("responded"));
    assert_eq!(mine[0]["response"], json!("granted, credentials follow"));
    assert_eq!(mine[0]["hrEmployeeId"], json!(hr_id));
}

#[tokio::test]
async fn requests_against_missing_projects_are_not_found() {
    let app = spawn_app().await;
    let (external_token, _) = external_session(&app, "esma@client.org").await;
    let (status, body) = post(
        &app,
        "/external/requests",
        &external_token,
        json!({ "projectId": Uuid::new_v4(), "description": "need access" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Project not found"));
}

#[tokio::test]
async fn projects_with_open_requests_cannot_be_deleted() {
    let app = spawn_app().await;
    let (hr_token, _) = hr_session(&app, "ana.hr").await;
    let project_id = create_project(&app, &hr_token, "Portal").await;
    let (external_token, _) = external_session(&app, "esma@client.org").await;
    post(
        &app,
        "/external/requests",
        &external_token,
        json!({ "projectId": project_id, "description": "need access" }),
    )
    .await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/projects/{project_id}"),
        Some(&hr_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn unreferenced_projects_delete_cleanly() {
    let app = spawn_app().await;
    let (hr_token, _) = hr_session(&app, "ana.hr").await;
    let project_id = create_project(&app, &hr_token, "Portal").await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/projects/{project_id}"),
        Some(&hr_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Project deleted"));
    assert_eq!(body["projectId"], json!(project_id));
}
