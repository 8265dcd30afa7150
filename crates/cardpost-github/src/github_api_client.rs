use std::time::Duration;

use async_trait::async_trait;
use cardpost_core::{CardPostError, CardPostResult, ProjectColumn, TrackedItem, TrackingApi};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::json;
use tracing::debug;

use crate::card_event::RepoRef;
use crate::github_transport_helpers::{describe_github_failure, exhausted_rate_limit_reset};

const COLUMNS_PAGE_SIZE: usize = 100;
const MAX_COLUMN_PAGES: u32 = 10;

#[derive(Debug, Clone)]
/// Connection settings for [`GithubApiClient`].
pub struct GithubApiConfig {
    pub api_base: String,
    pub token: String,
    pub repo: RepoRef,
    pub request_timeout_ms: u64,
}

#[derive(Clone)]
/// REST client for issues and classic project boards.
pub struct GithubApiClient {
    http: reqwest::Client,
    api_base: String,
    repo: RepoRef,
}

impl GithubApiClient {
    pub fn new(config: GithubApiConfig) -> CardPostResult<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("cardpost"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        let auth_header = format!("Bearer {}", config.token.trim());
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&auth_header)
                .map_err(|_| CardPostError::Config("invalid github authorization header".into()))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
            .build()
            .map_err(|error| {
                CardPostError::Config(format!("failed to create github api client: {error}"))
            })?;
        Ok(Self {
            http: client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            repo: config.repo,
        })
    }

    fn issue_url(&self, number: u64) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}",
            self.api_base, self.repo.owner, self.repo.name, number
        )
    }

    async fn request_json<T>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> CardPostResult<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(|error| {
            CardPostError::collaborator(format!("github {operation}"), error.to_string())
        })?;
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|error| {
                CardPostError::collaborator(
                    format!("github {operation}"),
                    format!("failed to decode response: {error}"),
                )
            });
        }

        let rate_limit_reset = exhausted_rate_limit_reset(response.headers());
        let body = response.text().await.unwrap_or_default();
        Err(CardPostError::collaborator(
            format!("github {operation}"),
            describe_github_failure(status.as_u16(), rate_limit_reset, &body),
        ))
    }
}

#[async_trait]
impl TrackingApi for GithubApiClient {
    async fn get_item(&self, number: u64) -> CardPostResult<TrackedItem> {
        self.request_json("get issue", self.http.get(self.issue_url(number)))
            .await
    }

    async fn get_column(&self, column_id: u64) -> CardPostResult<ProjectColumn> {
        self.request_json(
            "get project column",
            self.http
                .get(format!("{}/projects/columns/{}", self.api_base, column_id)),
        )
        .await
    }

    async fn list_project_columns(&self, project_id: u64) -> CardPostResult<Vec<ProjectColumn>> {
        let mut page = 1_u32;
        let mut rows = Vec::new();
        loop {
            let page_value = page.to_string();
            let per_page = COLUMNS_PAGE_SIZE.to_string();
            let chunk: Vec<ProjectColumn> = self
                .request_json(
                    "list project columns",
                    self.http
                        .get(format!("{}/projects/{}/columns", self.api_base, project_id))
                        .query(&[
                            ("per_page", per_page.as_str()),
                            ("page", page_value.as_str()),
                        ]),
                )
                .await?;
            let chunk_len = chunk.len();
            rows.extend(chunk);
            if chunk_len < COLUMNS_PAGE_SIZE {
                break;
            }
            if page >= MAX_COLUMN_PAGES {
                return Err(CardPostError::collaborator(
                    "github list project columns",
                    format!(
                        "project {project_id} still returned full pages after {MAX_COLUMN_PAGES} pages"
                    ),
                ));
            }
            page += 1;
        }
        debug!(project_id, columns = rows.len(), "listed project columns");
        Ok(rows)
    }

    async fn create_comment(&self, number: u64, body: &str) -> CardPostResult<()> {
        let payload = json!({ "body": body });
        let _: IgnoredAny = self
            .request_json(
                "create issue comment",
                self.http
                    .post(format!("{}/comments", self.issue_url(number)))
                    .json(&payload),
            )
            .await?;
        Ok(())
    }

    async fn close_item(&self, number: u64) -> CardPostResult<()> {
        let payload = json!({ "state": "closed" });
        let _: IgnoredAny = self
            .request_json(
                "close issue",
                self.http.patch(self.issue_url(number)).json(&payload),
            )
            .await?;
        Ok(())
    }

    async fn move_card(&self, card_id: u64, column_id: u64) -> CardPostResult<()> {
        let payload = json!({ "position": "top", "column_id": column_id });
        let _: IgnoredAny = self
            .request_json(
                "move project card",
                self.http
                    .post(format!(
                        "{}/projects/columns/cards/{}/moves",
                        self.api_base, card_id
                    ))
                    .json(&payload),
            )
            .await?;
        Ok(())
    }
}
