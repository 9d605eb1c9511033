//! End-to-end tests of the client against a local mock backend.

use std::time::{Duration, Instant};

use dockhand_provider::dockhand_transport::REQUEST_TIMEOUT;
use dockhand_provider::dockhand_types::{
    EnvironmentUpdateCheck, GitStackPayload, RegistryPayload, StackAdoptItem, StackAdoptPayload,
    StackEnvVariable, StackPayload,
};
use dockhand_provider::{DockhandClient, DockhandConfig, DockhandError, login};
use reqwest::StatusCode;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COOKIE: &str = "dockhand_session=abc123";

fn client(server: &MockServer, default_env: &str) -> DockhandClient {
    DockhandClient::new(&server.uri(), COOKIE, default_env, false).unwrap()
}

fn config(server: &MockServer) -> DockhandConfig {
    DockhandConfig {
        endpoint: server.uri(),
        username: "admin".to_string(),
        password: "secret".to_string(),
        mfa_token: None,
        auth_provider: "local".to_string(),
        default_env: "1".to_string(),
        insecure: false,
    }
}

#[tokio::test]
async fn sends_session_cookie_and_decodes_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/7"))
        .and(header("cookie", COOKIE))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 7, "username": "ops", "isAdmin": true})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let res = client(&server, "").get_user("7").await.unwrap();

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data.id, 7);
    assert_eq!(res.data.username, "ops");
    assert!(res.data.is_admin);
}

#[tokio::test]
async fn json_body_carries_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/registries"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "name": "hub",
            "url": "https://registry-1.docker.io",
            "isDefault": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 3, "name": "hub"})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = RegistryPayload {
        name: "hub".to_string(),
        url: "https://registry-1.docker.io".to_string(),
        ..RegistryPayload::default()
    };
    let res = client(&server, "").create_registry(&payload).await.unwrap();

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.data.id, 3);
}

#[tokio::test]
async fn post_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/stacks"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let payload = StackPayload {
        name: "web".to_string(),
        compose: "services: {}".to_string(),
    };
    let err = client(&server, "").create_stack("", &payload).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn get_recovers_after_transient_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let started = Instant::now();
    let res = client(&server, "").list_users().await.unwrap();

    assert_eq!(res.data.len(), 1);
    assert!(started.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn get_gives_up_after_three_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .expect(3)
        .mount(&server)
        .await;

    let started = Instant::now();
    let err = client(&server, "").list_users().await.unwrap_err();

    assert!(matches!(&err, DockhandError::Api { status, body: Some(body) }
        if *status == StatusCode::SERVICE_UNAVAILABLE && body == "busy"));
    assert!(started.elapsed() >= Duration::from_millis(700));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("  not found\n"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, "").delete_user("9").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "dockhand api returned status 404: not found");
}

#[tokio::test]
async fn error_body_is_capped_at_64_kib() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/license"))
        .respond_with(ResponseTemplate::new(400).set_body_string("e".repeat(200 * 1024)))
        .mount(&server)
        .await;

    let err = client(&server, "").get_license().await.unwrap_err();

    let DockhandError::Api { body: Some(body), .. } = err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(body.len(), 64 * 1024);
}

#[tokio::test]
async fn success_body_is_capped_at_10_mib() {
    let server = MockServer::start().await;
    let mut huge = String::from(r#"{"name":""#);
    huge.push_str(&"x".repeat(11 * 1024 * 1024));
    huge.push_str(r#""}"#);
    Mock::given(method("GET"))
        .and(path("/api/registries/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(huge))
        .mount(&server)
        .await;

    let err = client(&server, "").get_registry("1").await.unwrap_err();

    assert!(matches!(err, DockhandError::Decode { status, .. } if status == StatusCode::OK));
}

#[tokio::test]
async fn empty_success_body_decodes_to_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/registries/1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let res = client(&server, "").get_registry("1").await.unwrap();

    assert_eq!(res.data.id, 0);
    assert!(res.data.name.is_empty());
}

#[tokio::test]
async fn null_values_decode_to_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/environments/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"id":1,"name":"local","icon":null,"labels":null}"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let client = client(&server, "");
    let env = client.get_environment("1").await.unwrap().data;
    assert_eq!(env.id, 1);
    assert_eq!(env.name, "local");
    assert!(env.icon.is_empty());
    assert!(env.labels.is_empty());

    let networks = client.list_networks("").await.unwrap();
    assert_eq!(networks.status, StatusCode::OK);
    assert!(networks.data.is_empty());
}

#[tokio::test]
async fn env_query_is_omitted_when_no_environment_is_known() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/containers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    client(&server, "").list_containers("").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn env_query_falls_back_to_default_and_is_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/containers"))
        .and(query_param("env", "prod & qa"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server, "prod & qa");
    client.list_containers("").await.unwrap();
    client.list_containers("prod & qa").await.unwrap();
}

#[tokio::test]
async fn path_segments_are_escaped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/stacks/my%20app%2Fv2/start"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client(&server, "").start_stack("", "my app/v2").await.unwrap();
}

#[tokio::test]
async fn wrapped_stack_list_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stacks"))
        .and(query_param("env", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "stacks": [
                {"stack": "web", "manifest": "services: {}", "status": "running"},
                {"name": ""},
                {"stack_name": "db", "compose": 12}
            ]
        })))
        .mount(&server)
        .await;

    let client = client(&server, "2");
    let stacks = client.list_stacks("").await.unwrap().data;

    assert_eq!(stacks.len(), 2);
    assert_eq!(stacks[0].name, "web");
    assert_eq!(stacks[0].compose, "services: {}");
    assert_eq!(stacks[1].compose, "12");

    let db = client.get_stack_by_name("", "db").await.unwrap().data;
    assert_eq!(db.map(|s| s.name).as_deref(), Some("db"));
    assert!(client.get_stack_by_name("", "cache").await.unwrap().data.is_none());
}

#[tokio::test]
async fn unexpected_stack_list_shape_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stacks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .mount(&server)
        .await;

    let err = client(&server, "").list_stacks("").await.unwrap_err();

    assert!(matches!(err, DockhandError::UnexpectedShape { status } if status == StatusCode::OK));
}

#[tokio::test]
async fn volume_delete_is_forced() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/volumes/data"))
        .and(query_param("force", "true"))
        .and(query_param("env", "1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server, "1").delete_volume("", "data").await.unwrap();
}

#[tokio::test]
async fn login_returns_session_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(serde_json::json!({
            "username": "admin",
            "password": "secret",
            "provider": "local"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "dockhand_session=tok42; Path=/; HttpOnly")
                .set_body_json(serde_json::json!({"success": true})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cookie = login(&config(&server)).await.unwrap();

    assert_eq!(cookie, "dockhand_session=tok42");
}

#[tokio::test]
async fn rejected_login_reports_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"error": "Invalid credentials"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = login(&config(&server)).await.unwrap_err();

    assert_eq!(err.to_string(), "dockhand login failed: Invalid credentials");
}

#[tokio::test]
async fn connect_logs_in_then_sends_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "dockhand_session=live"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .and(query_param("env", "1"))
        .and(header("cookie", "dockhand_session=live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"containers": 4})))
        .expect(1)
        .mount(&server)
        .await;

    let client = DockhandClient::connect(&config(&server)).await.unwrap();
    let health = client.health("").await.unwrap();

    assert_eq!(health.data.status, "ok");
    assert_eq!(client.default_env(), "1");
}

#[test]
fn overall_deadline_is_thirty_seconds() {
    assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(30));
}

#[tokio::test]
async fn stack_env_reads_variables_and_writes_raw_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stacks/web/env"))
        .and(query_param("env", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "variables": [{"key": "DB_PASSWORD", "value": "***", "isSecret": true}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/stacks/web/env/raw"))
        .and(query_param("env", "2"))
        .and(body_json(serde_json::json!({"content": "PORT=8080\n"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/stacks/web/env"))
        .and(body_json(serde_json::json!({"variables": []})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, "2");
    let vars = client.get_stack_env_vars("", "web").await.unwrap().into_data();
    assert_eq!(
        vars,
        vec![StackEnvVariable {
            key: "DB_PASSWORD".to_string(),
            value: "***".to_string(),
            is_secret: true,
        }]
    );
    client.update_stack_env_raw("", "web", "PORT=8080\n").await.unwrap();
    client.update_stack_env_vars("", "web", &[]).await.unwrap();
}

#[tokio::test]
async fn stack_adoption_reports_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/stacks/adopt"))
        .and(body_json(serde_json::json!({
            "environmentId": 1,
            "stacks": [{"name": "legacy", "composePath": "/srv/legacy/compose.yml"}]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"adopted": ["legacy"], "failed": null})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let payload = StackAdoptPayload {
        environment_id: 1,
        stacks: vec![StackAdoptItem {
            name: "legacy".to_string(),
            compose_path: "/srv/legacy/compose.yml".to_string(),
        }],
    };
    let res = client(&server, "").adopt_stacks(&payload).await.unwrap().into_data();
    assert_eq!(res.adopted, ["legacy"]);
    assert!(res.failed.is_empty());
}

#[tokio::test]
async fn git_stack_lifecycle_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/git/stacks"))
        .and(query_param("env", "4"))
        .and(body_json(serde_json::json!({
            "stackName": "app",
            "composePath": "deploy/compose.yml",
            "environmentId": 4,
            "url": "https://git.example/app.git",
            "branch": "main",
            "autoUpdate": false,
            "autoUpdateCron": "0 3 * * *",
            "webhookEnabled": false,
            "deployNow": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 12,
            "stackName": "app",
            "environmentId": 4,
            "repository": {"name": "app", "url": "https://git.example/app.git", "branch": "main"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/git/stacks/12/deploy-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_string("data: pulling\ndata: done\n"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/git/stacks/12/env-files"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"files": ["prod.env", ".env"]})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/git/stacks/12/env-files"))
        .and(body_json(serde_json::json!({"path": ".env"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"vars": {"PORT": "80"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, "");
    let payload = GitStackPayload {
        stack_name: "app".to_string(),
        compose_path: "deploy/compose.yml".to_string(),
        environment_id: Some(4),
        url: Some("https://git.example/app.git".to_string()),
        branch: Some("main".to_string()),
        auto_update_cron: "0 3 * * *".to_string(),
        deploy_now: true,
        ..GitStackPayload::default()
    };
    let created = client.create_git_stack("4", &payload).await.unwrap();
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data.id, 12);
    assert_eq!(created.data.repository.as_ref().and_then(|r| r.branch.as_deref()), Some("main"));

    let log = client.deploy_git_stack("12").await.unwrap().into_data();
    assert!(log.ends_with("data: done\n"));

    let files = client.list_git_stack_env_files("12").await.unwrap().into_data();
    assert_eq!(files, [".env", "prod.env"]);

    let vars = client.get_git_stack_env_file_vars("12", ".env").await.unwrap().into_data();
    assert_eq!(vars.get("PORT").map(String::as_str), Some("80"));
}

#[tokio::test]
async fn container_files_address_path_by_query_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/containers/c1/files/content"))
        .and(query_param("path", "/etc/app.conf"))
        .and(query_param("env", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"content": "debug=true"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/containers/c1/files/content"))
        .and(body_json(serde_json::json!({"path": "/etc/app.conf", "content": "debug=false"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/containers/c1/files/delete"))
        .and(query_param("path", "/etc/app.conf"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, "1");
    let content = client.get_container_file_content("", "c1", "/etc/app.conf").await.unwrap();
    assert_eq!(content.data, "debug=true");
    client
        .update_container_file_content("", "c1", "/etc/app.conf", "debug=false")
        .await
        .unwrap();
    let err = client.delete_container_file("", "c1", "/etc/app.conf").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn container_top_and_stats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/containers/c1/top"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "titles": ["PID", "CMD"],
            "processes": [["1", "nginx"]]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/containers/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "c1", "name": "web", "cpuPercent": 1.5, "memoryUsage": 1024, "memoryLimit": null}
        ])))
        .mount(&server)
        .await;

    let client = client(&server, "");
    let top = client.get_container_top("", "c1").await.unwrap().into_data();
    assert_eq!(top.titles, ["PID", "CMD"]);
    assert_eq!(top.processes, [["1", "nginx"]]);
    assert_eq!(top.error, None);

    let stats = client.get_container_stats("").await.unwrap().into_data();
    assert_eq!(stats.len(), 1);
    assert!((stats[0].cpu_percent - 1.5).abs() < f64::EPSILON);
    assert_eq!(stats[0].memory_usage, 1024);
    assert_eq!(stats[0].memory_limit, 0);
}

#[tokio::test]
async fn environment_update_check_settings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/environments/3/update-check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"settings": null})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/environments/3/update-check"))
        .and(body_json(serde_json::json!({
            "enabled": true,
            "cron": "0 4 * * *",
            "autoUpdate": false,
            "vulnerabilityCriteria": "never"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/environments/3/timezone"))
        .and(body_json(serde_json::json!({"timezone": "Europe/Paris"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, "");
    let current = client.get_environment_update_check("3").await.unwrap().into_data();
    assert!(current.settings.is_none());

    let settings = EnvironmentUpdateCheck {
        enabled: true,
        cron: "0 4 * * *".to_string(),
        auto_update: false,
        vulnerability_criteria: "never".to_string(),
    };
    client.set_environment_update_check("3", &settings).await.unwrap();
    client.set_environment_timezone("3", "Europe/Paris").await.unwrap();
}

#[tokio::test]
async fn scanner_image_removal_and_update_check() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/settings/scanner"))
        .and(query_param("env", "5"))
        .and(query_param("scanner", "trivy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/settings/scanner/check-updates"))
        .and(query_param("env", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "updates": {"grype": {"hasUpdate": false}, "trivy": {"hasUpdate": true}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, "");
    assert!(client.remove_scanner_image("5", "trivy").await.unwrap().data.success);
    let updates = client.check_scanner_updates("5").await.unwrap().into_data();
    assert_eq!(updates.has_update("grype"), Some(false));
    assert_eq!(updates.has_update("trivy"), Some(true));
}

#[tokio::test]
async fn activity_and_stack_sources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 41, "action": "die", "containerName": "web", "status": null}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/stacks/sources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "web": {"sourceType": "internal"}
        })))
        .mount(&server)
        .await;

    let client = client(&server, "");
    let events = client.list_activity().await.unwrap().into_data();
    assert_eq!(events[0].id, 41);
    assert_eq!(events[0].action, "die");
    assert_eq!(events[0].container_name.as_deref(), Some("web"));
    assert_eq!(events[0].status, None);

    let sources = client.get_stack_sources().await.unwrap().into_data();
    assert_eq!(sources["web"].source_type, "internal");
}
