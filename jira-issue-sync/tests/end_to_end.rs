use jira_issue_sync::{ActionInputs, PullRequestContext, Runner, RunnerConfig};
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{basic_auth, body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EVENT: &str = r#"{
    "action": "synchronize",
    "pull_request": {
        "number": 42,
        "title": "Fix login (AB-42)",
        "head": { "ref": "feature/AB-99-login" }
    }
}"#;

async fn mount_jira(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/api/2/issue/AB-42"))
        .and(basic_auth("bot@example.com", "jira-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "AB-42",
            "fields": {
                "issuetype": { "name": "Bug" },
                "priority": { "name": "High" },
                "labels": ["ui"],
                "fixVersions": [{ "name": "3.1" }],
                "status": { "name": "In Progress" }
            },
            "names": {}
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_github(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("projectItems"))
        .and(header("authorization", "Bearer gh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "repository": {
                    "pullRequest": {
                        "projectItems": {
                            "nodes": [{
                                "id": "item-1",
                                "project": {
                                    "id": "project-1",
                                    "title": "Board",
                                    "field": {
                                        "id": "field-1",
                                        "name": "Type",
                                        "options": [{ "id": "opt-bug", "name": "Bug" }]
                                    }
                                }
                            }]
                        }
                    }
                }
            }
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("updateProjectV2ItemFieldValue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "updateProjectV2ItemFieldValue": { "projectV2Item": { "id": "item-1" } } }
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/issues/42/labels"))
        .and(body_json(json!({ "labels": ["JIRA - ui"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "node_id": "LA_1",
            "url": "https://api.github.com/repos/acme/widgets/labels/JIRA%20-%20ui",
            "name": "JIRA - ui",
            "description": null,
            "color": "ededed",
            "default": false
        }])))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn syncs_pull_request_against_mocked_services() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let jira = MockServer::start().await;
    let github = MockServer::start().await;
    mount_jira(&jira).await;
    mount_github(&github).await;

    let temp = TempDir::new().unwrap();
    let event_path = temp.path().join("event.json");
    let output_path = temp.path().join("github_output");
    fs::write(&event_path, EVENT).unwrap();

    let jira_uri = jira.uri();
    let values: HashMap<&str, &str> = HashMap::from([
        ("github-token", "gh-token"),
        ("jira-username", "bot@example.com"),
        ("jira-api-token", "jira-token"),
        ("jira-base-url", jira_uri.as_str()),
        ("sync-issue-priority", "false"),
        ("label-prefix", "JIRA"),
    ]);
    let inputs = ActionInputs::from_lookup(|name| values.get(name).map(|v| v.to_string())).unwrap();
    let context = PullRequestContext::load(
        &event_path,
        "acme/widgets",
        Some("feature/AB-99-login"),
        Some("refs/pull/42/merge"),
    )
    .unwrap();

    let config = RunnerConfig::new(inputs, context)
        .with_github_api_url(github.uri())
        .with_output_path(output_path.clone());
    let summary = Runner::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary.issue_key(), "AB-42");
    assert_eq!(summary.applied_count(), 2);

    let outputs = fs::read_to_string(&output_path).unwrap();
    assert!(outputs.contains("issue-key<<"));
    assert!(outputs.contains("\nAB-42\n"));
    assert!(outputs.contains("\n[\"3.1\"]\n"));
    assert!(outputs.contains("\n{\"name\":\"In Progress\"}\n"));
}
