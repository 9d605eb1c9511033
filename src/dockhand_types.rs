//! Dockhand API data types.
//!
//! Unique responsibility: wire representation of every request payload and
//! response body exchanged with the Dockhand backend.
//!
//! Conventions:
//! - JSON keys are camelCase on the wire, snake_case in Rust.
//! - Response types tolerate missing fields (`#[serde(default)]`) and `null`
//!   values (`null_as_default`), so an empty body decodes to `Default`.
//! - Optional payload fields are omitted from the JSON when `None`.

#![allow(clippy::struct_excessive_bools)]

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Read `null` as the type's default, the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Settings
// ============================================================================

/// General application settings (`/api/settings/general`), sent and received as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSettings {
    /// Ask before destructive operations.
    #[serde(deserialize_with = "null_as_default")]
    pub confirm_destructive: bool,
    /// Dark theme name.
    #[serde(deserialize_with = "null_as_default")]
    pub dark_theme: String,
    /// Date display format.
    #[serde(deserialize_with = "null_as_default")]
    pub date_format: String,
    /// Extra arguments for Grype scans.
    #[serde(deserialize_with = "null_as_default")]
    pub default_grype_args: String,
    /// Default timezone.
    #[serde(deserialize_with = "null_as_default")]
    pub default_timezone: String,
    /// Extra arguments for Trivy scans.
    #[serde(deserialize_with = "null_as_default")]
    pub default_trivy_args: String,
    /// Download format.
    #[serde(deserialize_with = "null_as_default")]
    pub download_format: String,
    /// Editor font.
    #[serde(deserialize_with = "null_as_default")]
    pub editor_font: String,
    /// Cron expression for event cleanup.
    #[serde(deserialize_with = "null_as_default")]
    pub event_cleanup_cron: String,
    /// Whether event cleanup runs.
    #[serde(deserialize_with = "null_as_default")]
    pub event_cleanup_enabled: bool,
    /// Event collection mode.
    #[serde(deserialize_with = "null_as_default")]
    pub event_collection_mode: String,
    /// Event poll interval.
    #[serde(deserialize_with = "null_as_default")]
    pub event_poll_interval: i64,
    /// Event retention in days.
    #[serde(deserialize_with = "null_as_default")]
    pub event_retention_days: i64,
    /// Extra directories scanned for stacks.
    #[serde(deserialize_with = "null_as_default")]
    pub external_stack_paths: Vec<String>,
    /// UI font.
    #[serde(deserialize_with = "null_as_default")]
    pub font: String,
    /// UI font size.
    #[serde(deserialize_with = "null_as_default")]
    pub font_size: String,
    /// Grid font size.
    #[serde(deserialize_with = "null_as_default")]
    pub grid_font_size: String,
    /// Highlight available updates.
    #[serde(deserialize_with = "null_as_default")]
    pub highlight_updates: bool,
    /// Light theme name.
    #[serde(deserialize_with = "null_as_default")]
    pub light_theme: String,
    /// Log buffer size in KiB.
    #[serde(deserialize_with = "null_as_default")]
    pub log_buffer_size_kb: i64,
    /// Metrics collection interval.
    #[serde(deserialize_with = "null_as_default")]
    pub metrics_collection_interval: i64,
    /// Primary stack location.
    pub primary_stack_location: Option<String>,
    /// Cron expression for schedule history cleanup.
    #[serde(deserialize_with = "null_as_default")]
    pub schedule_cleanup_cron: String,
    /// Whether schedule history cleanup runs.
    #[serde(deserialize_with = "null_as_default")]
    pub schedule_cleanup_enabled: bool,
    /// Schedule history retention in days.
    #[serde(deserialize_with = "null_as_default")]
    pub schedule_retention_days: i64,
    /// Show stopped containers.
    #[serde(deserialize_with = "null_as_default")]
    pub show_stopped_containers: bool,
    /// Terminal font.
    #[serde(deserialize_with = "null_as_default")]
    pub terminal_font: String,
    /// Time display format.
    #[serde(deserialize_with = "null_as_default")]
    pub time_format: String,
}

// ============================================================================
// Stacks
// ============================================================================

/// Payload for creating a compose stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StackPayload {
    /// Stack name.
    pub name: String,
    /// Compose file content.
    pub compose: String,
}

/// Normalized stack record (see `dockhand_stacks::parse_stacks`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackResponse {
    /// Stack name, never empty.
    pub name: String,
    /// Compose file content.
    pub compose: String,
    /// Stack status.
    pub status: String,
    /// Container names.
    pub containers: Vec<String>,
    /// Per-container details, when reported.
    pub container_details: Vec<StackContainerDetail>,
}

/// Container belonging to a stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackContainerDetail {
    /// Container ID.
    pub id: String,
    /// Container name.
    pub name: String,
    /// Compose service name.
    pub service: String,
    /// Container state.
    pub state: String,
    /// Human-readable status.
    pub status: String,
    /// Health check status.
    pub health: String,
    /// Image reference.
    pub image: String,
    /// Restart count.
    pub restart_count: i64,
}

/// Lifecycle action for [`crate::DockhandClient::run_stack_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackAction {
    /// `POST /api/stacks/{name}/start`.
    Start,
    /// `POST /api/stacks/{name}/stop`.
    Stop,
    /// Stop, then start.
    Restart,
}

impl StackAction {
    /// Lower-case action name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
        }
    }
}

impl std::str::FromStr for StackAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "restart" => Ok(Self::Restart),
            other => Err(format!("unsupported stack action {other:?}")),
        }
    }
}

/// One variable of a stack's `.env`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StackEnvVariable {
    /// Variable name.
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    /// Value; the backend masks secrets as `***` on read.
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    /// Stored as a secret.
    #[serde(deserialize_with = "null_as_default")]
    pub is_secret: bool,
}

/// Body of `/api/stacks/{name}/env`, read and written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackEnvVariables {
    /// Variables in backend order.
    #[serde(deserialize_with = "null_as_default")]
    pub variables: Vec<StackEnvVariable>,
}

/// Body of `/api/stacks/{name}/env/raw`, read and written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackEnvRaw {
    /// Raw `.env` file content.
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
}

/// Result of scanning the stack directories for unmanaged stacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackScanResponse {
    /// Stacks found on disk.
    #[serde(deserialize_with = "null_as_default")]
    pub discovered: Vec<Value>,
    /// Stacks adopted automatically.
    #[serde(deserialize_with = "null_as_default")]
    pub adopted: Vec<Value>,
    /// Stacks left alone.
    #[serde(deserialize_with = "null_as_default")]
    pub skipped: Vec<Value>,
    /// Per-stack scan failures.
    #[serde(deserialize_with = "null_as_default")]
    pub errors: Vec<Value>,
}

/// Stack to adopt from an existing compose file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackAdoptItem {
    /// Stack name.
    pub name: String,
    /// Compose file path on the host.
    pub compose_path: String,
}

/// Payload for adopting stacks into an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackAdoptPayload {
    /// Target environment.
    pub environment_id: i64,
    /// Stacks to adopt.
    pub stacks: Vec<StackAdoptItem>,
}

/// Names of stacks that were, or were not, adopted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StackAdoptResponse {
    /// Adopted stack names.
    #[serde(deserialize_with = "null_as_default")]
    pub adopted: Vec<String>,
    /// Stack names that failed.
    #[serde(deserialize_with = "null_as_default")]
    pub failed: Vec<String>,
}

/// Where a stack's compose file comes from, keyed by stack name in
/// `/api/stacks/sources`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StackSource {
    /// `internal`, `external` or `git`.
    #[serde(deserialize_with = "null_as_default")]
    pub source_type: String,
    /// Compose file path.
    pub compose_path: Option<String>,
    /// Backing git repository.
    pub repository: Option<StackSourceRepository>,
}

/// Git repository behind a stack source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StackSourceRepository {
    /// Repository ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Repository name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Clone URL.
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// Branch.
    pub branch: Option<String>,
    /// Compose file path in the repository.
    pub compose_path: Option<String>,
    /// Target environment.
    pub environment_id: Option<i64>,
    /// Sync status.
    pub sync_status: Option<String>,
}

// ============================================================================
// Git stacks
// ============================================================================

/// Environment variable stored with a git stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitStackEnvVar {
    /// Variable name.
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    /// Value.
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    /// Stored as a secret.
    #[serde(deserialize_with = "null_as_default")]
    pub is_secret: bool,
}

/// Payload for creating or updating a git-backed stack.
///
/// Either `repository_id` names an existing repository, or `url` (with
/// `repo_name`, `branch` and `credential_id`) describes a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitStackPayload {
    /// Stack name.
    pub stack_name: String,
    /// Compose file path in the repository.
    pub compose_path: String,
    /// Target environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<i64>,
    /// Existing repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<i64>,
    /// Name for a new repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    /// Clone URL for a new repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Branch for a new repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Credential for a new repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<i64>,
    /// `.env` file path in the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_file_path: Option<String>,
    /// Redeploy on new commits.
    pub auto_update: bool,
    /// Auto-update cron expression.
    pub auto_update_cron: String,
    /// Accept push webhooks.
    pub webhook_enabled: bool,
    /// Webhook secret; an empty string disables secret generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_secret: Option<String>,
    /// Deploy right after saving.
    pub deploy_now: bool,
    /// Extra environment variables.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env_vars: Vec<GitStackEnvVar>,
}

/// Git-backed stack as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitStackResponse {
    /// Git stack ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Stack name.
    #[serde(deserialize_with = "null_as_default")]
    pub stack_name: String,
    /// Target environment.
    pub environment_id: Option<i64>,
    /// Backing repository.
    pub repository_id: Option<i64>,
    /// Compose file path.
    pub compose_path: Option<String>,
    /// `.env` file path.
    pub env_file_path: Option<String>,
    /// Redeploy on new commits.
    #[serde(deserialize_with = "null_as_default")]
    pub auto_update: bool,
    /// Auto-update cron expression.
    pub auto_update_cron: Option<String>,
    /// Accept push webhooks.
    #[serde(deserialize_with = "null_as_default")]
    pub webhook_enabled: bool,
    /// Webhook secret.
    pub webhook_secret: Option<String>,
    /// Last sync timestamp.
    pub last_sync: Option<String>,
    /// Last synced commit.
    pub last_commit: Option<String>,
    /// Sync status.
    pub sync_status: Option<String>,
    /// Last sync error.
    pub sync_error: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
    /// Repository summary.
    pub repository: Option<GitStackRepository>,
}

/// Repository summary embedded in a git stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitStackRepository {
    /// Repository name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Clone URL.
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// Branch.
    pub branch: Option<String>,
    /// Credential used to clone.
    pub credential_id: Option<i64>,
}

/// `.env` files found in a git stack's repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GitStackEnvFiles {
    /// Repository-relative paths.
    #[serde(deserialize_with = "null_as_default")]
    pub files: Vec<String>,
}

/// Request for the variables of one git stack `.env` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GitStackEnvFileRequest {
    /// Repository-relative path.
    pub path: String,
}

/// Variables parsed from a git stack `.env` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GitStackEnvFileVars {
    /// Variables by name.
    #[serde(deserialize_with = "null_as_default")]
    pub vars: BTreeMap<String, String>,
}

// ============================================================================
// Containers
// ============================================================================

/// Port mapping for a new container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPortPayload {
    /// Port inside the container.
    pub container_port: i64,
    /// Host port.
    pub host_port: String,
    /// `tcp` or `udp`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub protocol: String,
}

/// Payload for creating a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPayload {
    /// Container name.
    pub name: String,
    /// Image reference.
    pub image: String,
    /// Command override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// `KEY=value` entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,
    /// Labels.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Port mappings.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ContainerPortPayload>,
    /// Network mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
    /// Restart policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<String>,
    /// Run privileged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privileged: Option<bool>,
    /// Allocate a TTY.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tty: Option<bool>,
}

/// Result of creating a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerCreateResponse {
    /// Whether the backend reports success.
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    /// ID of the new container.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
}

/// Container as listed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerResponse {
    /// Container ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Container name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Image reference.
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    /// Container state.
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    /// Human-readable status.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Health check status.
    #[serde(deserialize_with = "null_as_default")]
    pub health: String,
    /// Restart count.
    #[serde(deserialize_with = "null_as_default")]
    pub restart_count: i64,
    /// Labels.
    #[serde(deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    /// Command, if known.
    pub command: Option<String>,
}

/// Container log output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerLogsResponse {
    /// Log text.
    #[serde(deserialize_with = "null_as_default")]
    pub logs: String,
}

/// Shells available inside a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerShellsResponse {
    /// Paths of usable shells.
    #[serde(deserialize_with = "null_as_default")]
    pub shells: Vec<String>,
    /// Shell the backend would pick.
    pub default_shell: Option<String>,
    /// Every shell that was tried.
    #[serde(deserialize_with = "null_as_default")]
    pub all_shells: Vec<ContainerShellOption>,
}

/// One shell that was tried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerShellOption {
    /// Shell path.
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    /// Display label.
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
    /// Whether the shell exists in the container.
    #[serde(deserialize_with = "null_as_default")]
    pub available: bool,
}

/// Pending image updates for an environment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerPendingUpdatesResponse {
    /// Environment the updates belong to.
    #[serde(deserialize_with = "null_as_default")]
    pub environment_id: i64,
    /// Backend-defined update entries.
    #[serde(deserialize_with = "null_as_default")]
    pub pending_updates: Vec<Value>,
}

/// Result of a container update check.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerCheckUpdatesResponse {
    /// Containers checked.
    #[serde(deserialize_with = "null_as_default")]
    pub total: i64,
    /// Containers with a newer image.
    #[serde(deserialize_with = "null_as_default")]
    pub updates_found: i64,
    /// Backend-defined per-container results.
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<Value>,
}

/// Payload for renaming a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerRenamePayload {
    /// New container name.
    pub name: String,
}

/// Live resource usage of one container.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerStats {
    /// Container ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Container name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// CPU usage in percent.
    #[serde(deserialize_with = "null_as_default")]
    pub cpu_percent: f64,
    /// Memory in use, cache excluded, in bytes.
    #[serde(deserialize_with = "null_as_default")]
    pub memory_usage: i64,
    /// Memory in use as reported by the engine, in bytes.
    #[serde(deserialize_with = "null_as_default")]
    pub memory_raw: i64,
    /// Page cache, in bytes.
    #[serde(deserialize_with = "null_as_default")]
    pub memory_cache: i64,
    /// Memory limit, in bytes.
    #[serde(deserialize_with = "null_as_default")]
    pub memory_limit: i64,
    /// Memory usage in percent of the limit.
    #[serde(deserialize_with = "null_as_default")]
    pub memory_percent: f64,
    /// Bytes received.
    #[serde(deserialize_with = "null_as_default")]
    pub network_rx: i64,
    /// Bytes sent.
    #[serde(deserialize_with = "null_as_default")]
    pub network_tx: i64,
    /// Bytes read from block devices.
    #[serde(deserialize_with = "null_as_default")]
    pub block_read: i64,
    /// Bytes written to block devices.
    #[serde(deserialize_with = "null_as_default")]
    pub block_write: i64,
}

/// Process table of a container (`docker top`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerTopResponse {
    /// Column titles.
    #[serde(deserialize_with = "null_as_default")]
    pub titles: Vec<String>,
    /// One row per process, aligned with `titles`.
    #[serde(deserialize_with = "null_as_default")]
    pub processes: Vec<Vec<String>>,
    /// Set when the engine could not list processes.
    pub error: Option<String>,
}

/// Payload for creating a file or directory inside a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerFileCreatePayload {
    /// Absolute path inside the container.
    pub path: String,
    /// `file` or `directory`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// File content inside a container, read and written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerFileContent {
    /// Absolute path inside the container; only sent on write.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub path: String,
    /// File content.
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
}

// ============================================================================
// Health
// ============================================================================

/// Result of the health check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthResponse {
    /// `ok` when the API answered.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Backend version, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

// ============================================================================
// Users
// ============================================================================

/// Payload for creating or updating a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    /// Login name.
    pub username: String,
    /// Password (omitted on update to keep the current one).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// E-mail address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Administrator flag.
    pub is_admin: bool,
    /// Active flag.
    pub is_active: bool,
}

/// User as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserResponse {
    /// User ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Login name.
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    /// E-mail address.
    pub email: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
    /// Whether MFA is enrolled.
    #[serde(deserialize_with = "null_as_default")]
    pub mfa_enabled: bool,
    /// Administrator flag.
    #[serde(deserialize_with = "null_as_default")]
    pub is_admin: bool,
    /// Active flag.
    #[serde(deserialize_with = "null_as_default")]
    pub is_active: bool,
    /// Last login timestamp.
    pub last_login: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

// ============================================================================
// Registries
// ============================================================================

/// Payload for creating or updating a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryPayload {
    /// Registry name.
    pub name: String,
    /// Registry URL.
    pub url: String,
    /// Username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Default registry flag.
    pub is_default: bool,
}

/// Registry as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryResponse {
    /// Registry ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Registry name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Registry URL.
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// Username.
    pub username: Option<String>,
    /// Default registry flag.
    #[serde(deserialize_with = "null_as_default")]
    pub is_default: bool,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
    /// Whether credentials are stored.
    #[serde(deserialize_with = "null_as_default")]
    pub has_credentials: bool,
}

// ============================================================================
// Git
// ============================================================================

/// Payload for creating or updating a git credential.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitCredentialPayload {
    /// Credential name.
    pub name: String,
    /// `password`, `ssh` or `none`.
    pub auth_type: String,
    /// Username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password or token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Private SSH key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_key: Option<String>,
}

/// Git credential as returned by the backend (secrets are never echoed).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitCredentialResponse {
    /// Credential ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Credential name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Authentication type.
    #[serde(deserialize_with = "null_as_default")]
    pub auth_type: String,
    /// Username.
    pub username: Option<String>,
    /// Whether a password is stored.
    #[serde(deserialize_with = "null_as_default")]
    pub has_password: bool,
    /// Whether an SSH key is stored.
    #[serde(deserialize_with = "null_as_default")]
    pub has_ssh_key: bool,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

/// Payload for creating or updating a git repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRepositoryPayload {
    /// Repository name.
    pub name: String,
    /// Clone URL.
    pub url: String,
    /// Branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Path of the compose file in the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compose_path: Option<String>,
    /// Credential used to clone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<i64>,
    /// Target environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<i64>,
    /// Redeploy on new commits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_update: Option<bool>,
    /// Auto-update schedule kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_update_schedule: Option<String>,
    /// Auto-update cron expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_update_cron: Option<String>,
    /// Accept push webhooks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_enabled: Option<bool>,
}

/// Git repository as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitRepositoryResponse {
    /// Repository ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Repository name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Clone URL.
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// Branch.
    pub branch: Option<String>,
    /// Compose file path.
    pub compose_path: Option<String>,
    /// Credential used to clone.
    pub credential_id: Option<i64>,
    /// Target environment.
    pub environment_id: Option<i64>,
    /// Redeploy on new commits.
    #[serde(deserialize_with = "null_as_default")]
    pub auto_update: bool,
    /// Auto-update schedule kind.
    pub auto_update_schedule: Option<String>,
    /// Auto-update cron expression.
    pub auto_update_cron: Option<String>,
    /// Accept push webhooks.
    #[serde(deserialize_with = "null_as_default")]
    pub webhook_enabled: bool,
    /// Webhook secret.
    pub webhook_secret: Option<String>,
    /// Last sync timestamp.
    pub last_sync: Option<String>,
    /// Last synced commit.
    pub last_commit: Option<String>,
    /// Sync status.
    pub sync_status: Option<String>,
    /// Last sync error.
    pub sync_error: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

// ============================================================================
// Config sets
// ============================================================================

/// Key/value pair in a config set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSetKv {
    /// Key.
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    /// Value.
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

/// Port mapping in a config set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigSetPort {
    /// Port inside the container.
    #[serde(deserialize_with = "null_as_default")]
    pub container_port: i64,
    /// Host port.
    #[serde(deserialize_with = "null_as_default")]
    pub host_port: i64,
    /// `tcp` or `udp`.
    #[serde(deserialize_with = "null_as_default")]
    pub protocol: String,
}

/// Volume mount in a config set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigSetVolume {
    /// Host path or volume name.
    #[serde(deserialize_with = "null_as_default")]
    pub source: String,
    /// Mount point in the container.
    #[serde(deserialize_with = "null_as_default")]
    pub target: String,
    /// `bind` or `volume`.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Mount read-only.
    #[serde(deserialize_with = "null_as_default")]
    pub read_only: bool,
}

/// Payload for creating or updating a config set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSetPayload {
    /// Config set name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Environment variables.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env_vars: Vec<ConfigSetKv>,
    /// Labels.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<ConfigSetKv>,
    /// Port mappings.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ConfigSetPort>,
    /// Volume mounts.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<ConfigSetVolume>,
    /// Network mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
    /// Restart policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<String>,
}

/// Config set as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigSetResponse {
    /// Config set ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Config set name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Environment variables.
    #[serde(deserialize_with = "null_as_default")]
    pub env_vars: Vec<ConfigSetKv>,
    /// Labels.
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Vec<ConfigSetKv>,
    /// Port mappings.
    #[serde(deserialize_with = "null_as_default")]
    pub ports: Vec<ConfigSetPort>,
    /// Volume mounts.
    #[serde(deserialize_with = "null_as_default")]
    pub volumes: Vec<ConfigSetVolume>,
    /// Network mode.
    #[serde(deserialize_with = "null_as_default")]
    pub network_mode: String,
    /// Restart policy.
    #[serde(deserialize_with = "null_as_default")]
    pub restart_policy: String,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

// ============================================================================
// Notifications
// ============================================================================

/// Payload for creating or updating a notification channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    /// Channel type (`smtp`, `apprise`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Channel name.
    pub name: String,
    /// Enabled flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Subscribed event types.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_types: Vec<String>,
    /// Type-specific configuration.
    pub config: Map<String, Value>,
}

/// Notification channel as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationResponse {
    /// Channel ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Channel type.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Channel name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Enabled flag.
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    /// Type-specific configuration.
    #[serde(deserialize_with = "null_as_default")]
    pub config: Map<String, Value>,
    /// Subscribed event types.
    #[serde(deserialize_with = "null_as_default")]
    pub event_types: Vec<String>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

// ============================================================================
// Environments
// ============================================================================

/// Payload for creating or updating an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentPayload {
    /// Environment name.
    pub name: String,
    /// `socket`, `direct` or `hawser`.
    pub connection_type: String,
    /// Docker host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Docker port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    /// `http` or `https`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Docker socket path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket_path: Option<String>,
    /// Skip TLS verification towards the Docker host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_skip_verify: Option<bool>,
    /// Icon name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Collect container activity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_activity: Option<bool>,
    /// Collect metrics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_metrics: Option<bool>,
    /// Highlight changes in the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_changes: Option<bool>,
    /// Timezone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Check for image updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_check_enabled: Option<bool>,
    /// Apply image updates automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_check_auto_update: Option<bool>,
    /// Prune unused images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_prune_enabled: Option<bool>,
}

/// Environment as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentResponse {
    /// Environment ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Environment name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Connection type.
    #[serde(deserialize_with = "null_as_default")]
    pub connection_type: String,
    /// Docker host.
    pub host: Option<String>,
    /// Docker port.
    #[serde(deserialize_with = "null_as_default")]
    pub port: i64,
    /// Protocol.
    #[serde(deserialize_with = "null_as_default")]
    pub protocol: String,
    /// Docker socket path.
    pub socket_path: Option<String>,
    /// Skip TLS verification towards the Docker host.
    #[serde(deserialize_with = "null_as_default")]
    pub tls_skip_verify: bool,
    /// Icon name.
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
    /// Collect container activity.
    #[serde(deserialize_with = "null_as_default")]
    pub collect_activity: bool,
    /// Collect metrics.
    #[serde(deserialize_with = "null_as_default")]
    pub collect_metrics: bool,
    /// Highlight changes in the UI.
    #[serde(deserialize_with = "null_as_default")]
    pub highlight_changes: bool,
    /// Timezone.
    pub timezone: Option<String>,
    /// Check for image updates.
    #[serde(deserialize_with = "null_as_default")]
    pub update_check_enabled: bool,
    /// Apply image updates automatically.
    #[serde(deserialize_with = "null_as_default")]
    pub update_check_auto_update: bool,
    /// Prune unused images.
    #[serde(deserialize_with = "null_as_default")]
    pub image_prune_enabled: bool,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
    /// Labels.
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
}

/// Timezone of an environment, read and written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentTimezone {
    /// IANA timezone name.
    #[serde(deserialize_with = "null_as_default")]
    pub timezone: String,
}

/// Image update check schedule of an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentUpdateCheck {
    /// Whether checks run.
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    /// Check schedule.
    #[serde(deserialize_with = "null_as_default")]
    pub cron: String,
    /// Apply updates automatically.
    #[serde(deserialize_with = "null_as_default")]
    pub auto_update: bool,
    /// Vulnerability level that blocks an automatic update, or `never`.
    #[serde(deserialize_with = "null_as_default")]
    pub vulnerability_criteria: String,
}

/// Automatic image prune schedule of an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentImagePrune {
    /// Whether pruning runs.
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    /// Prune schedule.
    #[serde(deserialize_with = "null_as_default")]
    pub cron_expression: String,
    /// `dangling` or `all`.
    #[serde(deserialize_with = "null_as_default")]
    pub prune_mode: String,
}

/// Envelope of environment-scoped settings; `settings` is absent until saved once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EnvironmentSettingsResponse<T> {
    /// Stored settings.
    pub settings: Option<T>,
}

// ============================================================================
// Activity
// ============================================================================

/// Container event recorded by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityEvent {
    /// Event ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Docker action (`start`, `die`, ...).
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    /// Container ID.
    pub container_id: Option<String>,
    /// Container name.
    pub container_name: Option<String>,
    /// Image reference.
    pub image: Option<String>,
    /// Event time.
    pub timestamp: Option<String>,
    /// Container status after the event.
    pub status: Option<String>,
}

// ============================================================================
// Networks
// ============================================================================

/// Payload for creating a network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkPayload {
    /// Network name.
    pub name: String,
    /// Driver (`bridge`, `overlay`, ...).
    pub driver: String,
    /// Restrict external access.
    pub internal: bool,
    /// Allow manual container attachment.
    pub attachable: bool,
    /// Driver options.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

/// Network as listed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkResponse {
    /// Network ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Network name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Driver.
    #[serde(deserialize_with = "null_as_default")]
    pub driver: String,
    /// Internal flag.
    #[serde(deserialize_with = "null_as_default")]
    pub internal: bool,
    /// Attachable flag.
    #[serde(deserialize_with = "null_as_default")]
    pub attachable: bool,
    /// Scope.
    pub scope: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<String>,
}

/// Network inspect result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkInspectResponse {
    /// Network ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Network name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Driver.
    #[serde(deserialize_with = "null_as_default")]
    pub driver: String,
    /// Internal flag.
    #[serde(deserialize_with = "null_as_default")]
    pub internal: bool,
    /// Attachable flag.
    #[serde(deserialize_with = "null_as_default")]
    pub attachable: bool,
    /// Scope.
    pub scope: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Driver options.
    #[serde(deserialize_with = "null_as_default")]
    pub options: BTreeMap<String, String>,
    /// Labels.
    #[serde(deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
}

/// Payload for connecting a container to a network or disconnecting it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConnectionPayload {
    /// Container to (dis)connect.
    pub container_id: String,
}

// ============================================================================
// Volumes
// ============================================================================

/// Payload for creating a volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumePayload {
    /// Volume name.
    pub name: String,
    /// Driver.
    pub driver: String,
    /// Driver options.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub driver_opts: BTreeMap<String, String>,
    /// Labels.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Volume as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeResponse {
    /// Volume name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Driver.
    #[serde(deserialize_with = "null_as_default")]
    pub driver: String,
    /// Mount point on the Docker host.
    pub mountpoint: Option<String>,
    /// Scope.
    pub scope: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Labels.
    #[serde(deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    /// Driver options.
    #[serde(deserialize_with = "null_as_default")]
    pub options: Map<String, Value>,
    /// Driver status.
    #[serde(deserialize_with = "null_as_default")]
    pub status: Map<String, Value>,
    /// Size and reference count.
    #[serde(deserialize_with = "null_as_default")]
    pub usage_data: BTreeMap<String, f64>,
}

/// Payload for cloning a volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VolumeClonePayload {
    /// Name of the new volume.
    pub name: String,
}

// ============================================================================
// Images
// ============================================================================

/// Payload for pulling an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePullPayload {
    /// Image reference.
    pub image: String,
    /// Scan for vulnerabilities once pulled.
    pub scan_after_pull: bool,
}

/// Payload for pushing an image to a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePushPayload {
    /// Image ID.
    pub image_id: String,
    /// Target registry.
    pub registry_id: i64,
}

/// Payload for scanning an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageScanPayload {
    /// Image reference.
    pub image_name: String,
}

/// Image as listed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageResponse {
    /// Image ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Repository tags.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Size in bytes.
    #[serde(deserialize_with = "null_as_default")]
    pub size: i64,
    /// Creation time (unix seconds).
    #[serde(deserialize_with = "null_as_default")]
    pub created: i64,
}

// ============================================================================
// Authentication settings
// ============================================================================

/// Authentication settings as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthSettingsResponse {
    /// Settings row ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Whether login is required.
    #[serde(deserialize_with = "null_as_default")]
    pub auth_enabled: bool,
    /// Default login provider.
    #[serde(deserialize_with = "null_as_default")]
    pub default_provider: String,
    /// Session timeout in seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub session_timeout: i64,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

/// Payload for updating authentication settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSettingsPayload {
    /// Whether login is required.
    pub auth_enabled: bool,
    /// Default login provider.
    pub default_provider: String,
    /// Session timeout in seconds.
    pub session_timeout: i64,
}

/// One configured login provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthProviderItem {
    /// Provider ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// `local`, `ldap`, `oidc`, ...
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
}

/// Configured login providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthProvidersResponse {
    /// Default provider ID.
    #[serde(deserialize_with = "null_as_default")]
    pub default_provider: String,
    /// All providers.
    #[serde(deserialize_with = "null_as_default")]
    pub providers: Vec<AuthProviderItem>,
}

// ============================================================================
// License
// ============================================================================

/// Payload for activating a license.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LicensePayload {
    /// Licensee name.
    pub name: String,
    /// License key.
    pub key: String,
}

/// License state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LicenseResponse {
    /// Key is valid.
    #[serde(deserialize_with = "null_as_default")]
    pub valid: bool,
    /// License is active.
    #[serde(deserialize_with = "null_as_default")]
    pub active: bool,
    /// Host the license is bound to.
    pub hostname: Option<String>,
}

// ============================================================================
// Schedules
// ============================================================================

/// Most recent execution of a schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleLastExecution {
    /// Execution ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Execution status.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Trigger timestamp.
    pub triggered_at: Option<String>,
    /// Completion timestamp.
    pub completed_at: Option<String>,
}

/// Schedule as listed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleResponse {
    /// Schedule ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Schedule type (used in toggle/run paths).
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Schedule name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Entity the schedule acts on.
    pub entity_name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Environment ID.
    pub environment_id: Option<i64>,
    /// Environment name.
    pub environment_name: Option<String>,
    /// Enabled flag.
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    /// Schedule kind.
    pub schedule_type: Option<String>,
    /// Cron expression.
    pub cron_expression: Option<String>,
    /// Next run timestamp.
    pub next_run: Option<String>,
    /// Built-in system schedule.
    #[serde(deserialize_with = "null_as_default")]
    pub is_system: bool,
    /// Most recent execution.
    pub last_execution: Option<ScheduleLastExecution>,
}

/// Schedule list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchedulesListResponse {
    /// All schedules.
    #[serde(deserialize_with = "null_as_default")]
    pub schedules: Vec<ScheduleResponse>,
}

/// One page of schedule executions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScheduleExecutionsResponse {
    /// Executions on this page.
    #[serde(deserialize_with = "null_as_default")]
    pub executions: Vec<ScheduleExecution>,
    /// Total number of executions.
    #[serde(deserialize_with = "null_as_default")]
    pub total: i64,
    /// Page size applied by the backend.
    #[serde(deserialize_with = "null_as_default")]
    pub limit: i64,
    /// Offset applied by the backend.
    #[serde(deserialize_with = "null_as_default")]
    pub offset: i64,
}

/// One schedule execution.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleExecution {
    /// Execution ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Schedule type.
    #[serde(deserialize_with = "null_as_default")]
    pub schedule_type: String,
    /// Schedule ID.
    #[serde(deserialize_with = "null_as_default")]
    pub schedule_id: i64,
    /// Environment ID.
    pub environment_id: Option<i64>,
    /// Entity name.
    pub entity_name: Option<String>,
    /// What triggered the run.
    pub triggered_by: Option<String>,
    /// Trigger timestamp.
    pub triggered_at: Option<String>,
    /// Start timestamp.
    pub started_at: Option<String>,
    /// Completion timestamp.
    pub completed_at: Option<String>,
    /// Duration in milliseconds.
    pub duration: Option<i64>,
    /// Execution status.
    pub status: Option<String>,
    /// Error message.
    pub error_message: Option<String>,
    /// Backend-defined details.
    pub details: Option<Value>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Captured output.
    pub logs: Option<String>,
}

// ============================================================================
// Scanner
// ============================================================================

/// Vulnerability scanner settings and installation state of an environment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScannerSettingsResponse {
    /// Scanner configuration.
    #[serde(deserialize_with = "null_as_default")]
    pub settings: ScannerSettings,
    /// Installed scanners by name (`grype`, `trivy`).
    #[serde(deserialize_with = "null_as_default")]
    pub availability: BTreeMap<String, bool>,
    /// Scanner versions by name; values may be strings or numbers.
    #[serde(deserialize_with = "null_as_default")]
    pub versions: BTreeMap<String, Value>,
}

impl ScannerSettingsResponse {
    /// Whether the named scanner is installed.
    #[must_use]
    pub fn is_available(&self, scanner: &str) -> bool {
        self.availability.get(scanner).copied().unwrap_or(false)
    }

    /// Trimmed version of the named scanner, if reported.
    #[must_use]
    pub fn version(&self, scanner: &str) -> Option<String> {
        let raw = match self.versions.get(scanner)? {
            Value::Null => return None,
            Value::String(s) => s.trim().to_string(),
            other => other.to_string().trim().to_string(),
        };
        (!raw.is_empty()).then_some(raw)
    }
}

/// Scanner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerSettings {
    /// `none`, `grype`, `trivy` or `both`.
    #[serde(deserialize_with = "null_as_default")]
    pub scanner: String,
    /// Extra Grype arguments.
    #[serde(deserialize_with = "null_as_default")]
    pub grype_args: String,
    /// Extra Trivy arguments.
    #[serde(deserialize_with = "null_as_default")]
    pub trivy_args: String,
}

/// Payload for updating scanner settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannerSettingsPayload {
    /// Target environment ID.
    pub env_id: String,
    /// Scanner configuration.
    pub settings: ScannerSettings,
}

/// Result of removing a scanner image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScannerRemoveResponse {
    /// Whether the image was removed.
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
}

/// Newer scanner images, keyed by scanner name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScannerCheckUpdatesResponse {
    /// Update state per scanner.
    #[serde(deserialize_with = "null_as_default")]
    pub updates: BTreeMap<String, ScannerUpdate>,
}

impl ScannerCheckUpdatesResponse {
    /// Whether the named scanner has a newer image; `None` when not reported.
    #[must_use]
    pub fn has_update(&self, scanner: &str) -> Option<bool> {
        self.updates.get(scanner).map(|u| u.has_update)
    }
}

/// Update state of one scanner image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerUpdate {
    /// A newer image exists.
    #[serde(deserialize_with = "null_as_default")]
    pub has_update: bool,
    /// Installed version.
    pub current_version: Option<String>,
    /// Latest published version.
    pub latest_version: Option<String>,
}
