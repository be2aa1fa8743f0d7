//! Thin GitHub REST API client: repository metadata, pull request/commit
//! diffs, and file content at a ref.
//!
//! Mirrors `llm-gateway::ollama::OllamaClient`'s shape (one `reqwest::Client`,
//! typed request/response structs, a uniform status check before parsing)
//! rather than introducing a new HTTP idiom for the one other outbound
//! integration this crate needs.

use base64::Engine;
use serde::Deserialize;
use tracing::debug;

use crate::error::CliError;

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "tracelink-cli";

pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
}

/// Base/head refs and SHAs for one pull request (spec §6: `pr_url` input).
#[derive(Debug, Clone)]
pub struct PullRequestInfo {
    pub base_sha: String,
    pub base_ref: String,
    pub head_sha: String,
    pub head_ref: String,
}

#[derive(Debug, Clone)]
pub struct CommitSummary {
    pub sha: String,
    pub message: String,
}

/// One changed file as GitHub's commit/compare endpoints report it.
#[derive(Debug, Clone)]
pub struct CommitFile {
    pub filename: String,
    pub status: String,
    pub patch: Option<String>,
    pub additions: u32,
    pub deletions: u32,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self, CliError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, token })
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.get(url).header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        req
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, CliError> {
        debug!(url, "GET");
        let resp = self.request(url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(CliError::GitHub(format!("{status} from {url}: {}", truncate(&body))));
        }
        resp.json::<T>().await.map_err(CliError::Transport)
    }

    /// Repository's configured default branch.
    pub async fn default_branch(&self, owner: &str, repo: &str) -> Result<String, CliError> {
        #[derive(Deserialize)]
        struct Repo {
            default_branch: String,
        }
        let url = format!("{API_BASE}/repos/{owner}/{repo}");
        Ok(self.get_json::<Repo>(&url).await?.default_branch)
    }

    /// One file's decoded text content at `git_ref`, or `None` if it
    /// doesn't exist there (GitHub reports that as a 404).
    pub async fn file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<String>, CliError> {
        #[derive(Deserialize)]
        struct Content {
            content: String,
            encoding: String,
        }
        let url = format!(
            "{API_BASE}/repos/{owner}/{repo}/contents/{path}?ref={git_ref}",
            path = urlencode_path(path),
        );
        let resp = self.request(&url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(CliError::GitHub(format!("{status} from {url}: {}", truncate(&body))));
        }
        let content: Content = resp.json().await.map_err(CliError::Transport)?;
        if content.encoding != "base64" {
            return Err(CliError::GitHub(format!("unsupported content encoding `{}`", content.encoding)));
        }
        let raw = base64::engine::general_purpose::STANDARD
            .decode(content.content.replace('\n', ""))
            .map_err(|e| CliError::GitHub(format!("failed to decode file content: {e}")))?;
        Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
    }

    pub async fn pull_request(&self, owner: &str, repo: &str, number: u64) -> Result<PullRequestInfo, CliError> {
        #[derive(Deserialize)]
        struct Ref {
            sha: String,
            #[serde(rename = "ref")]
            git_ref: String,
        }
        #[derive(Deserialize)]
        struct Pr {
            base: Ref,
            head: Ref,
        }
        let url = format!("{API_BASE}/repos/{owner}/{repo}/pulls/{number}");
        let pr: Pr = self.get_json(&url).await?;
        Ok(PullRequestInfo {
            base_sha: pr.base.sha,
            base_ref: pr.base.git_ref,
            head_sha: pr.head.sha,
            head_ref: pr.head.git_ref,
        })
    }

    pub async fn pull_request_commits(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<CommitSummary>, CliError> {
        #[derive(Deserialize)]
        struct CommitEnvelope {
            message: String,
        }
        #[derive(Deserialize)]
        struct Commit {
            sha: String,
            commit: CommitEnvelope,
        }
        let url = format!("{API_BASE}/repos/{owner}/{repo}/pulls/{number}/commits?per_page=100");
        let commits: Vec<Commit> = self.get_json(&url).await?;
        Ok(commits
            .into_iter()
            .map(|c| CommitSummary { sha: c.sha, message: c.commit.message })
            .collect())
    }

    /// File-level diff for one commit (spec §4.8 input shape).
    pub async fn commit_files(&self, owner: &str, repo: &str, sha: &str) -> Result<Vec<CommitFile>, CliError> {
        #[derive(Deserialize)]
        struct Commit {
            #[serde(default)]
            files: Vec<RawFile>,
        }
        let url = format!("{API_BASE}/repos/{owner}/{repo}/commits/{sha}");
        let commit: Commit = self.get_json(&url).await?;
        Ok(commit.files.into_iter().map(RawFile::into_commit_file).collect())
    }

    /// File-level diff between two refs, used by `baseline-update` to find
    /// everything that changed since the map's last sync (GitHub's
    /// "compare two commits" endpoint).
    pub async fn compare(&self, owner: &str, repo: &str, base: &str, head: &str) -> Result<Vec<CommitFile>, CliError> {
        #[derive(Deserialize)]
        struct Compare {
            #[serde(default)]
            files: Vec<RawFile>,
        }
        let url = format!("{API_BASE}/repos/{owner}/{repo}/compare/{base}...{head}");
        let compare: Compare = self.get_json(&url).await?;
        Ok(compare.files.into_iter().map(RawFile::into_commit_file).collect())
    }
}

#[derive(Deserialize)]
struct RawFile {
    filename: String,
    status: String,
    #[serde(default)]
    patch: Option<String>,
    #[serde(default)]
    additions: u32,
    #[serde(default)]
    deletions: u32,
}

impl RawFile {
    fn into_commit_file(self) -> CommitFile {
        CommitFile {
            filename: self.filename,
            status: self.status,
            patch: self.patch,
            additions: self.additions,
            deletions: self.deletions,
        }
    }
}

/// Parses an `https://github.com/<owner>/<repo>/pull/<number>` URL.
pub fn parse_pr_url(url: &str) -> Result<(String, String, u64), CliError> {
    let trimmed = url.trim().trim_end_matches('/');
    let tail = trimmed
        .split("github.com/")
        .nth(1)
        .ok_or_else(|| CliError::InvalidPrUrl(url.to_string()))?;
    let parts: Vec<&str> = tail.split('/').collect();
    if parts.len() != 4 || parts[2] != "pull" {
        return Err(CliError::InvalidPrUrl(url.to_string()));
    }
    let number: u64 = parts[3].parse().map_err(|_| CliError::InvalidPrUrl(url.to_string()))?;
    Ok((parts[0].to_string(), parts[1].to_string(), number))
}

fn urlencode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding_segment(segment))
        .collect::<Vec<_>>()
        .join("/")
}

fn urlencoding_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn truncate(s: &str) -> String {
    s.chars().take(240).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_pr_url() {
        let (owner, repo, number) = parse_pr_url("https://github.com/acme/widgets/pull/42").unwrap();
        assert_eq!(owner, "acme");
        assert_eq!(repo, "widgets");
        assert_eq!(number, 42);
    }

    #[test]
    fn rejects_a_non_pull_request_url() {
        assert!(parse_pr_url("https://github.com/acme/widgets/issues/42").is_err());
    }

    #[test]
    fn urlencodes_path_segments_with_spaces() {
        assert_eq!(urlencode_path("docs/My Design.md"), "docs/My%20Design.md");
    }
}
