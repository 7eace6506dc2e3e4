mod common;

use auth::Claims;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_returns_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().expect("token");
    let claims = app.token_service.verify(token).expect("token is valid");
    assert!(!claims.sub.is_empty());
}

#[tokio::test]
async fn test_register_reports_every_invalid_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "name": "",
            "email": "not-an-email",
            "password": "123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("errors list");
    let params: Vec<&str> = errors.iter().filter_map(|e| e["param"].as_str()).collect();
    assert_eq!(params, vec!["name", "email", "password"]);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register("Ada", "ada@example.com").await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "name": "Other",
            "email": "ADA@example.com",
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0]["msg"], "email already taken");
}

#[tokio::test]
async fn test_login_and_current_user() {
    let app = TestApp::spawn().await;
    app.register("Ada", "ada@example.com").await;

    let response = app
        .post("/api/auth")
        .json(&json!({ "email": "ada@example.com", "password": "secret123" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().expect("token").to_string();

    let response = app
        .get("/api/auth")
        .header("x-auth-token", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@example.com");
    assert!(body["avatar"]
        .as_str()
        .expect("avatar")
        .starts_with("https://www.gravatar.com/avatar/"));
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.register("Ada", "ada@example.com").await;

    let response = app
        .post("/api/auth")
        .json(&json!({ "email": "ada@example.com", "password": "wrong-password" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0]["msg"], "Invalid Credentials");
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/profile/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "No token, authorization denied");
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/profile/me")
        .header("x-auth-token", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "Token is not valid");
}

#[tokio::test]
async fn test_protected_route_with_expired_token() {
    let app = TestApp::spawn().await;
    let token = app.register("Ada", "ada@example.com").await;
    let sub = app.token_service.verify(&token).expect("valid token").sub;

    let now = Utc::now().timestamp();
    let expired = app
        .token_service
        .encode(&Claims {
            sub,
            iat: now - 7200,
            exp: now - 3600,
        })
        .expect("Failed to sign token");

    let response = app
        .get("/api/auth")
        .header("x-auth-token", expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "Token is not valid");
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let app = TestApp::spawn().await;
    let token = app.register("Ada", "ada@example.com").await;

    let response = app
        .get("/api/auth")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_and_read_own_profile() {
    let app = TestApp::spawn().await;
    let token = app.register("Ada", "ada@example.com").await;

    let response = app
        .get("/api/profile/me")
        .header("x-auth-token", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "there is no profile for this user");

    let response = app
        .post("/api/profile")
        .header("x-auth-token", &token)
        .json(&json!({ "status": "Student", "skills": "go, rust" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "Student");
    assert_eq!(body["skills"], json!(["go", "rust"]));

    let response = app
        .get("/api/profile/me")
        .header("x-auth-token", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "Student");
    assert_eq!(body["user"]["name"], "Ada");
    assert!(body["user"]["avatar"].is_string());
    assert_eq!(body["experience"], json!([]));
    assert_eq!(body["education"], json!([]));
}

#[tokio::test]
async fn test_upsert_requires_status_and_skills() {
    let app = TestApp::spawn().await;
    let token = app.register("Ada", "ada@example.com").await;

    let response = app
        .post("/api/profile")
        .header("x-auth-token", &token)
        .json(&json!({ "company": "Acme" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    let messages: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors list")
        .iter()
        .filter_map(|e| e["msg"].as_str())
        .collect();
    assert_eq!(messages, vec!["Status is required", "Skills is required"]);

    let response = app
        .get("/api/profile/me")
        .header("x-auth-token", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_second_upsert_keeps_unsent_fields_and_replaces_social() {
    let app = TestApp::spawn().await;
    let token = app.register("Ada", "ada@example.com").await;

    app.post("/api/profile")
        .header("x-auth-token", &token)
        .json(&json!({
            "status": "Developer",
            "skills": "rust",
            "company": "Acme",
            "twitter": "https://twitter.com/ada",
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/profile")
        .header("x-auth-token", &token)
        .json(&json!({
            "status": "Lead",
            "skills": "rust, go",
            "youtube": "https://youtube.com/ada",
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "Lead");
    assert_eq!(body["company"], "Acme");
    assert_eq!(body["skills"], json!(["rust", "go"]));
    assert_eq!(body["social"], json!({ "youtube": "https://youtube.com/ada" }));

    let response = app
        .get("/api/profile")
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().expect("profile list").len(), 1);
}

#[tokio::test]
async fn test_experience_is_prepended_and_removed() {
    let app = TestApp::spawn().await;
    let token = app.register_with_profile("Ada", "ada@example.com").await;

    for title in ["Junior", "Senior"] {
        let response = app
            .put("/api/profile/experience")
            .header("x-auth-token", &token)
            .json(&json!({
                "title": title,
                "company": "Acme",
                "from": "2020-01-01",
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .get("/api/profile/me")
        .header("x-auth-token", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let experience = body["experience"].as_array().expect("experience list");
    assert_eq!(experience.len(), 2);
    assert_eq!(experience[0]["title"], "Senior");
    assert_eq!(experience[1]["title"], "Junior");

    let senior_id = experience[0]["_id"].as_str().expect("entry id").to_string();
    let response = app
        .delete(&format!("/api/profile/experience/{}", senior_id))
        .header("x-auth-token", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let experience = body["experience"].as_array().expect("experience list");
    assert_eq!(experience.len(), 1);
    assert_eq!(experience[0]["title"], "Junior");
}

#[tokio::test]
async fn test_remove_unknown_experience() {
    let app = TestApp::spawn().await;
    let token = app.register_with_profile("Ada", "ada@example.com").await;

    let response = app
        .delete("/api/profile/experience/00000000-0000-0000-0000-000000000000")
        .header("x-auth-token", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "Experience not found");

    let response = app
        .delete("/api/profile/experience/not-an-id")
        .header("x-auth-token", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_experience_requires_profile() {
    let app = TestApp::spawn().await;
    let token = app.register("Ada", "ada@example.com").await;

    let response = app
        .put("/api/profile/experience")
        .header("x-auth-token", &token)
        .json(&json!({
            "title": "Engineer",
            "company": "Acme",
            "from": "2020-01-01",
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "there is no profile for this user");
}

#[tokio::test]
async fn test_education_removal_leaves_experience() {
    let app = TestApp::spawn().await;
    let token = app.register_with_profile("Ada", "ada@example.com").await;

    app.put("/api/profile/experience")
        .header("x-auth-token", &token)
        .json(&json!({ "title": "Engineer", "company": "Acme", "from": "2020-01-01" }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .put("/api/profile/education")
        .header("x-auth-token", &token)
        .json(&json!({
            "school": "MIT",
            "degree": "BSc",
            "fieldofstudy": "CS",
            "from": "2015-09-01",
            "to": "2019-06-30",
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["education"][0]["fieldofstudy"], "CS");
    let education_id = body["education"][0]["_id"]
        .as_str()
        .expect("entry id")
        .to_string();

    let response = app
        .delete(&format!("/api/profile/education/{}", education_id))
        .header("x-auth-token", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["education"], json!([]));
    assert_eq!(body["experience"].as_array().expect("experience list").len(), 1);
}

#[tokio::test]
async fn test_public_profile_lookup() {
    let app = TestApp::spawn().await;
    let token = app.register_with_profile("Ada", "ada@example.com").await;
    app.register_with_profile("Grace", "grace@example.com").await;
    let user_id = app.token_service.verify(&token).expect("valid token").sub;

    let response = app
        .get("/api/profile")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().expect("profile list").len(), 2);

    let response = app
        .get(&format!("/api/profile/user/{}", user_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["user"]["_id"], user_id.as_str());
    assert_eq!(body["user"]["name"], "Ada");

    let response = app
        .get("/api/profile/user/not-a-user-id")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "Profile not found");
}

#[tokio::test]
async fn test_delete_account_removes_profile_and_user() {
    let app = TestApp::spawn().await;
    let token = app.register_with_profile("Ada", "ada@example.com").await;
    let other = app.register_with_profile("Grace", "grace@example.com").await;

    let response = app
        .delete("/api/profile")
        .header("x-auth-token", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "User Deleted");

    let response = app
        .get("/api/auth")
        .header("x-auth-token", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .get("/api/profile")
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let profiles = body.as_array().expect("profile list");
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["user"]["name"], "Grace");

    let response = app
        .get("/api/auth")
        .header("x-auth-token", &other)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post("/api/auth")
        .json(&json!({ "email": "ada@example.com", "password": "secret123" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
