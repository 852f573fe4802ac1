//! Single-select project field updates through the GraphQL API.

use super::GitHubError;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

/// Maximum number of project items read per pull request.
const MAX_PROJECT_ITEMS: u32 = 50;

const PROJECT_ITEMS_QUERY: &str = r#"
query($owner: String!, $repo: String!, $number: Int!, $field: String!, $first: Int!) {
  repository(owner: $owner, name: $repo) {
    pullRequest(number: $number) {
      projectItems(first: $first) {
        nodes {
          id
          project {
            id
            title
            field(name: $field) {
              ... on ProjectV2SingleSelectField {
                id
                name
                options { id name }
              }
            }
          }
        }
      }
    }
  }
}
"#;

const UPDATE_FIELD_MUTATION: &str = r#"
mutation($project: ID!, $item: ID!, $field: ID!, $option: String!) {
  updateProjectV2ItemFieldValue(
    input: { projectId: $project, itemId: $item, fieldId: $field, value: { singleSelectOptionId: $option } }
  ) {
    projectV2Item { id }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct RepositoryData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    pull_request: Option<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestNode {
    project_items: ProjectItemConnection,
}

#[derive(Debug, Deserialize)]
struct ProjectItemConnection {
    #[serde(default)]
    nodes: Vec<ProjectItemNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectItemNode {
    id: String,
    project: ProjectNode,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    id: String,
    title: String,
    field: Option<FieldNode>,
}

/// Non single-select fields come back as an empty object.
#[derive(Debug, Deserialize)]
struct FieldNode {
    id: Option<String>,
    #[serde(default)]
    options: Vec<FieldOption>,
}

#[derive(Debug, Deserialize)]
struct FieldOption {
    id: String,
    name: String,
}

/// A resolved field update for one project item.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldUpdate {
    project_id: String,
    item_id: String,
    field_id: String,
    option_id: String,
}

/// Selects the option named `value` in the `field` single-select field of
/// every project the pull request belongs to.
///
/// All projects are validated before any update is sent.
///
/// # Returns
///
/// The number of project items updated.
pub(crate) async fn set_single_select_field(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    number: u64,
    field: &str,
    value: &str,
) -> Result<usize, GitHubError> {
    let data: RepositoryData = graphql(
        octocrab,
        json!({
            "query": PROJECT_ITEMS_QUERY,
            "variables": {
                "owner": owner,
                "repo": repo,
                "number": number,
                "field": field,
                "first": MAX_PROJECT_ITEMS,
            }
        }),
    )
    .await?;

    let items = data
        .repository
        .and_then(|r| r.pull_request)
        .ok_or(GitHubError::PullRequestNotFound { number })?
        .project_items
        .nodes;

    let updates = resolve_updates(items, field, value, number)?;

    for update in &updates {
        debug!(project_id = %update.project_id, item_id = %update.item_id, "Updating project item");
        let _: serde_json::Value = graphql(
            octocrab,
            json!({
                "query": UPDATE_FIELD_MUTATION,
                "variables": {
                    "project": update.project_id,
                    "item": update.item_id,
                    "field": update.field_id,
                    "option": update.option_id,
                }
            }),
        )
        .await?;
    }

    info!(field = %field, value = %value, items = updates.len(), "Project field updated");
    Ok(updates.len())
}

fn resolve_updates(
    items: Vec<ProjectItemNode>,
    field: &str,
    value: &str,
    number: u64,
) -> Result<Vec<FieldUpdate>, GitHubError> {
    let mut updates = Vec::new();

    for item in items {
        let Some(FieldNode {
            id: Some(field_id),
            options,
        }) = item.project.field
        else {
            continue;
        };

        let option = options
            .into_iter()
            .find(|option| option.name.eq_ignore_ascii_case(value))
            .ok_or_else(|| GitHubError::UnknownFieldOption {
                field: field.to_string(),
                value: value.to_string(),
                project: item.project.title.clone(),
            })?;

        updates.push(FieldUpdate {
            project_id: item.project.id,
            item_id: item.id,
            field_id,
            option_id: option.id,
        });
    }

    if updates.is_empty() {
        return Err(GitHubError::FieldNotFound {
            field: field.to_string(),
            number,
        });
    }

    Ok(updates)
}

/// Sends a GraphQL request, surfacing server-side `errors` as
/// [`GitHubError::GraphQl`].
async fn graphql<T: DeserializeOwned>(
    octocrab: &Octocrab,
    payload: serde_json::Value,
) -> Result<T, GitHubError> {
    octocrab.graphql(&payload).await.map_err(|e| match e {
        octocrab::Error::Graphql { source, .. } => GitHubError::GraphQl {
            message: source
                .0
                .iter()
                .map(|error| error.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        },
        other => GitHubError::Api(other),
    })
}
