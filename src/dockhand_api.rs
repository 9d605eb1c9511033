//! Typed Dockhand endpoints.
//!
//! Unique responsibility: map each backend operation to a verb, path, query
//! and payload, and run it through [`DockhandClient::execute`].
//!
//! Every method returns the HTTP status alongside the payload. Failures are
//! [`DockhandError`]s; use [`DockhandError::is_not_found`] to detect a 404.
//!
//! Environment-scoped methods take an `env` argument; an empty value falls
//! back to the client's default environment, and no `env` query parameter is
//! sent when both are empty.

#![allow(clippy::missing_errors_doc)]

use std::collections::BTreeMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::dockhand_client::DockhandClient;
use crate::dockhand_error::DockhandError;
use crate::dockhand_request::{ApiRequest, ApiResponse, escape_segment};
use crate::dockhand_retry::sleep_cancellable;
use crate::dockhand_stacks::parse_stacks;
use crate::dockhand_types::{
    ActivityEvent, AuthProvidersResponse, AuthSettingsPayload, AuthSettingsResponse, ConfigSetPayload,
    ConfigSetResponse, ContainerCheckUpdatesResponse, ContainerCreateResponse, ContainerFileContent,
    ContainerFileCreatePayload, ContainerLogsResponse, ContainerPayload, ContainerPendingUpdatesResponse,
    ContainerRenamePayload, ContainerResponse, ContainerShellsResponse, ContainerStats, ContainerTopResponse,
    EnvironmentImagePrune, EnvironmentPayload, EnvironmentResponse, EnvironmentSettingsResponse,
    EnvironmentTimezone, EnvironmentUpdateCheck, GeneralSettings, GitCredentialPayload, GitCredentialResponse,
    GitRepositoryPayload, GitRepositoryResponse, GitStackEnvFileRequest, GitStackEnvFileVars, GitStackEnvFiles,
    GitStackPayload, GitStackResponse, HealthResponse, ImagePullPayload, ImagePushPayload, ImageResponse,
    ImageScanPayload, LicensePayload, LicenseResponse, NetworkConnectionPayload, NetworkInspectResponse,
    NetworkPayload, NetworkResponse, NotificationPayload, NotificationResponse, RegistryPayload,
    RegistryResponse, ScannerCheckUpdatesResponse, ScannerRemoveResponse, ScannerSettings,
    ScannerSettingsPayload, ScannerSettingsResponse, ScheduleExecutionsResponse, SchedulesListResponse,
    StackAction, StackAdoptPayload, StackAdoptResponse, StackEnvRaw, StackEnvVariable, StackEnvVariables,
    StackPayload, StackResponse, StackScanResponse, StackSource, UserPayload, UserResponse,
    VolumeClonePayload, VolumePayload, VolumeResponse,
};

type ApiResult<T> = Result<ApiResponse<T>, DockhandError>;

const SETTINGS_GENERAL: &str = "/api/settings/general";
const SETTINGS_SCANNER: &str = "/api/settings/scanner";
const REGISTRIES: &str = "/api/registries";
const GIT_CREDENTIALS: &str = "/api/git/credentials";
const GIT_REPOSITORIES: &str = "/api/git/repositories";
const CONFIG_SETS: &str = "/api/config-sets";
const NOTIFICATIONS: &str = "/api/notifications";
const ENVIRONMENTS: &str = "/api/environments";
const NETWORKS: &str = "/api/networks";
const VOLUMES: &str = "/api/volumes";
const IMAGES: &str = "/api/images";
const SCHEDULES: &str = "/api/schedules";
const AUTH_SETTINGS: &str = "/api/auth/settings";
const AUTH_PROVIDERS: &str = "/api/auth/providers";
const LICENSE: &str = "/api/license";
const STACKS: &str = "/api/stacks";
const CONTAINERS: &str = "/api/containers";
const USERS: &str = "/api/users";
const DASHBOARD_STATS: &str = "/api/dashboard/stats";
const GIT_STACKS: &str = "/api/git/stacks";
const ACTIVITY: &str = "/api/activity";

/// Tries per step of [`DockhandClient::run_stack_action`].
const STACK_ACTION_ATTEMPTS: usize = 3;
const STACK_ACTION_PAUSE: Duration = Duration::from_millis(300);

fn item_path(base: &str, id: &str) -> String {
    format!("{base}/{}", escape_segment(id))
}

fn item_action_path(base: &str, id: &str, action: &str) -> String {
    format!("{base}/{}/{action}", escape_segment(id))
}

fn container_files_path(id: &str, action: &str) -> String {
    format!("{}/files/{action}", item_path(CONTAINERS, id))
}

impl DockhandClient {
    fn scoped(&self, request: ApiRequest, env: &str) -> ApiRequest {
        request.query("env", self.resolve_env(env))
    }

    async fn get<T: DeserializeOwned + Default>(&self, path: impl Into<String>) -> ApiResult<T> {
        self.execute(ApiRequest::get(path)).await
    }

    async fn delete(&self, path: impl Into<String>) -> ApiResult<()> {
        self.execute_empty(ApiRequest::delete(path)).await
    }

    // ========================================================================
    // General settings
    // ========================================================================

    /// Read the general settings.
    pub async fn get_general_settings(&self) -> ApiResult<GeneralSettings> {
        self.get(SETTINGS_GENERAL).await
    }

    /// Replace the general settings.
    pub async fn update_general_settings(&self, settings: &GeneralSettings) -> ApiResult<GeneralSettings> {
        self.execute(ApiRequest::post(SETTINGS_GENERAL).json(settings)?).await
    }

    // ========================================================================
    // Registries
    // ========================================================================

    /// List container registries.
    pub async fn list_registries(&self) -> ApiResult<Vec<RegistryResponse>> {
        self.get(REGISTRIES).await
    }

    /// Read one registry.
    pub async fn get_registry(&self, id: &str) -> ApiResult<RegistryResponse> {
        self.get(item_path(REGISTRIES, id)).await
    }

    /// Create a registry.
    pub async fn create_registry(&self, payload: &RegistryPayload) -> ApiResult<RegistryResponse> {
        self.execute(ApiRequest::post(REGISTRIES).json(payload)?).await
    }

    /// Update a registry.
    pub async fn update_registry(&self, id: &str, payload: &RegistryPayload) -> ApiResult<RegistryResponse> {
        self.execute(ApiRequest::put(item_path(REGISTRIES, id)).json(payload)?).await
    }

    /// Delete a registry.
    pub async fn delete_registry(&self, id: &str) -> ApiResult<()> {
        self.delete(item_path(REGISTRIES, id)).await
    }

    // ========================================================================
    // Git credentials
    // ========================================================================

    /// List git credentials.
    pub async fn list_git_credentials(&self) -> ApiResult<Vec<GitCredentialResponse>> {
        self.get(GIT_CREDENTIALS).await
    }

    /// Read one git credential.
    pub async fn get_git_credential(&self, id: &str) -> ApiResult<GitCredentialResponse> {
        self.get(item_path(GIT_CREDENTIALS, id)).await
    }

    /// Create a git credential.
    pub async fn create_git_credential(&self, payload: &GitCredentialPayload) -> ApiResult<GitCredentialResponse> {
        self.execute(ApiRequest::post(GIT_CREDENTIALS).json(payload)?).await
    }

    /// Update a git credential.
    pub async fn update_git_credential(
        &self,
        id: &str,
        payload: &GitCredentialPayload,
    ) -> ApiResult<GitCredentialResponse> {
        self.execute(ApiRequest::put(item_path(GIT_CREDENTIALS, id)).json(payload)?).await
    }

    /// Delete a git credential.
    pub async fn delete_git_credential(&self, id: &str) -> ApiResult<()> {
        self.delete(item_path(GIT_CREDENTIALS, id)).await
    }

    // ========================================================================
    // Git repositories
    // ========================================================================

    /// List git repositories.
    pub async fn list_git_repositories(&self) -> ApiResult<Vec<GitRepositoryResponse>> {
        self.get(GIT_REPOSITORIES).await
    }

    /// Read one git repository.
    pub async fn get_git_repository(&self, id: &str) -> ApiResult<GitRepositoryResponse> {
        self.get(item_path(GIT_REPOSITORIES, id)).await
    }

    /// Create a git repository.
    pub async fn create_git_repository(&self, payload: &GitRepositoryPayload) -> ApiResult<GitRepositoryResponse> {
        self.execute(ApiRequest::post(GIT_REPOSITORIES).json(payload)?).await
    }

    /// Update a git repository.
    pub async fn update_git_repository(
        &self,
        id: &str,
        payload: &GitRepositoryPayload,
    ) -> ApiResult<GitRepositoryResponse> {
        self.execute(ApiRequest::put(item_path(GIT_REPOSITORIES, id)).json(payload)?).await
    }

    /// Delete a git repository.
    pub async fn delete_git_repository(&self, id: &str) -> ApiResult<()> {
        self.delete(item_path(GIT_REPOSITORIES, id)).await
    }

    // ========================================================================
    // Config sets
    // ========================================================================

    /// List config sets.
    pub async fn list_config_sets(&self) -> ApiResult<Vec<ConfigSetResponse>> {
        self.get(CONFIG_SETS).await
    }

    /// Read one config set.
    pub async fn get_config_set(&self, id: &str) -> ApiResult<ConfigSetResponse> {
        self.get(item_path(CONFIG_SETS, id)).await
    }

    /// Create a config set.
    pub async fn create_config_set(&self, payload: &ConfigSetPayload) -> ApiResult<ConfigSetResponse> {
        self.execute(ApiRequest::post(CONFIG_SETS).json(payload)?).await
    }

    /// Update a config set.
    pub async fn update_config_set(&self, id: &str, payload: &ConfigSetPayload) -> ApiResult<ConfigSetResponse> {
        self.execute(ApiRequest::put(item_path(CONFIG_SETS, id)).json(payload)?).await
    }

    /// Delete a config set.
    pub async fn delete_config_set(&self, id: &str) -> ApiResult<()> {
        self.delete(item_path(CONFIG_SETS, id)).await
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// List notification channels.
    pub async fn list_notifications(&self) -> ApiResult<Vec<NotificationResponse>> {
        self.get(NOTIFICATIONS).await
    }

    /// Read one notification channel.
    pub async fn get_notification(&self, id: &str) -> ApiResult<NotificationResponse> {
        self.get(item_path(NOTIFICATIONS, id)).await
    }

    /// Create a notification channel.
    pub async fn create_notification(&self, payload: &NotificationPayload) -> ApiResult<NotificationResponse> {
        self.execute(ApiRequest::post(NOTIFICATIONS).json(payload)?).await
    }

    /// Update a notification channel.
    pub async fn update_notification(
        &self,
        id: &str,
        payload: &NotificationPayload,
    ) -> ApiResult<NotificationResponse> {
        self.execute(ApiRequest::put(item_path(NOTIFICATIONS, id)).json(payload)?).await
    }

    /// Delete a notification channel.
    pub async fn delete_notification(&self, id: &str) -> ApiResult<()> {
        self.delete(item_path(NOTIFICATIONS, id)).await
    }

    // ========================================================================
    // Environments
    // ========================================================================

    /// List environments.
    pub async fn list_environments(&self) -> ApiResult<Vec<EnvironmentResponse>> {
        self.get(ENVIRONMENTS).await
    }

    /// Read one environment.
    pub async fn get_environment(&self, id: &str) -> ApiResult<EnvironmentResponse> {
        self.get(item_path(ENVIRONMENTS, id)).await
    }

    /// Create an environment.
    pub async fn create_environment(&self, payload: &EnvironmentPayload) -> ApiResult<EnvironmentResponse> {
        self.execute(ApiRequest::post(ENVIRONMENTS).json(payload)?).await
    }

    /// Update an environment.
    pub async fn update_environment(&self, id: &str, payload: &EnvironmentPayload) -> ApiResult<EnvironmentResponse> {
        self.execute(ApiRequest::put(item_path(ENVIRONMENTS, id)).json(payload)?).await
    }

    /// Delete an environment.
    pub async fn delete_environment(&self, id: &str) -> ApiResult<()> {
        self.delete(item_path(ENVIRONMENTS, id)).await
    }

    /// Read an environment's timezone.
    pub async fn get_environment_timezone(&self, id: &str) -> ApiResult<EnvironmentTimezone> {
        self.get(item_action_path(ENVIRONMENTS, id, "timezone")).await
    }

    /// Set an environment's timezone.
    pub async fn set_environment_timezone(&self, id: &str, timezone: &str) -> ApiResult<()> {
        let payload = EnvironmentTimezone {
            timezone: timezone.to_string(),
        };
        let request = ApiRequest::post(item_action_path(ENVIRONMENTS, id, "timezone")).json(&payload)?;
        self.execute_empty(request).await
    }

    /// Read an environment's image update check schedule.
    pub async fn get_environment_update_check(
        &self,
        id: &str,
    ) -> ApiResult<EnvironmentSettingsResponse<EnvironmentUpdateCheck>> {
        self.get(item_action_path(ENVIRONMENTS, id, "update-check")).await
    }

    /// Replace an environment's image update check schedule.
    pub async fn set_environment_update_check(&self, id: &str, settings: &EnvironmentUpdateCheck) -> ApiResult<()> {
        let request = ApiRequest::post(item_action_path(ENVIRONMENTS, id, "update-check")).json(settings)?;
        self.execute_empty(request).await
    }

    /// Read an environment's image prune schedule.
    pub async fn get_environment_image_prune(
        &self,
        id: &str,
    ) -> ApiResult<EnvironmentSettingsResponse<EnvironmentImagePrune>> {
        self.get(item_action_path(ENVIRONMENTS, id, "image-prune")).await
    }

    /// Replace an environment's image prune schedule.
    pub async fn set_environment_image_prune(&self, id: &str, settings: &EnvironmentImagePrune) -> ApiResult<()> {
        let request = ApiRequest::post(item_action_path(ENVIRONMENTS, id, "image-prune")).json(settings)?;
        self.execute_empty(request).await
    }

    // ========================================================================
    // Networks
    // ========================================================================

    /// List networks of an environment.
    pub async fn list_networks(&self, env: &str) -> ApiResult<Vec<NetworkResponse>> {
        self.execute(self.scoped(ApiRequest::get(NETWORKS), env)).await
    }

    /// Inspect a network.
    pub async fn inspect_network(&self, env: &str, id: &str) -> ApiResult<NetworkInspectResponse> {
        let request = ApiRequest::get(item_action_path(NETWORKS, id, "inspect"));
        self.execute(self.scoped(request, env)).await
    }

    /// Create a network.
    pub async fn create_network(&self, env: &str, payload: &NetworkPayload) -> ApiResult<NetworkResponse> {
        let request = ApiRequest::post(NETWORKS).json(payload)?;
        self.execute(self.scoped(request, env)).await
    }

    /// Delete a network.
    pub async fn delete_network(&self, env: &str, id: &str) -> ApiResult<()> {
        let request = ApiRequest::delete(item_path(NETWORKS, id));
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Attach a container to a network.
    pub async fn connect_network(&self, env: &str, network_id: &str, container_id: &str) -> ApiResult<()> {
        self.network_connection(env, network_id, container_id, "connect").await
    }

    /// Detach a container from a network.
    pub async fn disconnect_network(&self, env: &str, network_id: &str, container_id: &str) -> ApiResult<()> {
        self.network_connection(env, network_id, container_id, "disconnect").await
    }

    async fn network_connection(
        &self,
        env: &str,
        network_id: &str,
        container_id: &str,
        action: &str,
    ) -> ApiResult<()> {
        let payload = NetworkConnectionPayload {
            container_id: container_id.to_string(),
        };
        let request = ApiRequest::post(item_action_path(NETWORKS, network_id, action)).json(&payload)?;
        self.execute_empty(self.scoped(request, env)).await
    }

    // ========================================================================
    // Volumes
    // ========================================================================

    /// List volumes of an environment.
    pub async fn list_volumes(&self, env: &str) -> ApiResult<Vec<VolumeResponse>> {
        self.execute(self.scoped(ApiRequest::get(VOLUMES), env)).await
    }

    /// Inspect a volume.
    pub async fn inspect_volume(&self, env: &str, name: &str) -> ApiResult<VolumeResponse> {
        let request = ApiRequest::get(item_action_path(VOLUMES, name, "inspect"));
        self.execute(self.scoped(request, env)).await
    }

    /// Create a volume.
    pub async fn create_volume(&self, env: &str, payload: &VolumePayload) -> ApiResult<VolumeResponse> {
        let request = ApiRequest::post(VOLUMES).json(payload)?;
        self.execute(self.scoped(request, env)).await
    }

    /// Force-delete a volume.
    pub async fn delete_volume(&self, env: &str, name: &str) -> ApiResult<()> {
        let request = ApiRequest::delete(item_path(VOLUMES, name)).query("force", "true");
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Copy volume `source` into a new volume named `target`.
    pub async fn clone_volume(&self, env: &str, source: &str, target: &str) -> ApiResult<()> {
        let payload = VolumeClonePayload {
            name: target.to_string(),
        };
        let request = ApiRequest::post(item_action_path(VOLUMES, source, "clone")).json(&payload)?;
        self.execute_empty(self.scoped(request, env)).await
    }

    // ========================================================================
    // Images
    // ========================================================================

    /// List images of an environment.
    pub async fn list_images(&self, env: &str) -> ApiResult<Vec<ImageResponse>> {
        self.execute(self.scoped(ApiRequest::get(IMAGES), env)).await
    }

    /// Pull an image, optionally scanning it afterwards.
    pub async fn pull_image(&self, env: &str, image: &str, scan_after_pull: bool) -> ApiResult<()> {
        let payload = ImagePullPayload {
            image: image.to_string(),
            scan_after_pull,
        };
        let request = ApiRequest::post(format!("{IMAGES}/pull")).json(&payload)?;
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Push an image to a registry.
    pub async fn push_image(&self, env: &str, image_id: &str, registry_id: i64) -> ApiResult<()> {
        let payload = ImagePushPayload {
            image_id: image_id.to_string(),
            registry_id,
        };
        let request = ApiRequest::post(format!("{IMAGES}/push")).json(&payload)?;
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Scan an image for vulnerabilities; the report is returned verbatim.
    pub async fn scan_image(&self, env: &str, image_name: &str) -> ApiResult<String> {
        let payload = ImageScanPayload {
            image_name: image_name.to_string(),
        };
        let request = ApiRequest::post(format!("{IMAGES}/scan")).json(&payload)?;
        let raw = self.execute_raw(self.scoped(request, env)).await?;
        Ok(raw.map(|body| String::from_utf8_lossy(&body).into_owned()))
    }

    /// Delete an image.
    pub async fn delete_image(&self, env: &str, id: &str) -> ApiResult<()> {
        let request = ApiRequest::delete(item_path(IMAGES, id));
        self.execute_empty(self.scoped(request, env)).await
    }

    // ========================================================================
    // Schedules
    // ========================================================================

    /// List schedules.
    pub async fn list_schedules(&self) -> ApiResult<SchedulesListResponse> {
        self.get(SCHEDULES).await
    }

    /// Enable or disable a schedule.
    ///
    /// System schedules live under a dedicated path that ignores `schedule_type`.
    pub async fn toggle_schedule(&self, schedule_type: &str, id: &str, is_system: bool) -> ApiResult<()> {
        let path = if is_system {
            format!("{SCHEDULES}/system/{}/toggle", escape_segment(id))
        } else {
            format!(
                "{SCHEDULES}/{}/{}/toggle",
                escape_segment(schedule_type),
                escape_segment(id)
            )
        };
        self.execute_empty(ApiRequest::post(path)).await
    }

    /// Trigger a schedule now.
    pub async fn run_schedule(&self, schedule_type: &str, id: &str) -> ApiResult<()> {
        let path = format!(
            "{SCHEDULES}/{}/{}/run",
            escape_segment(schedule_type),
            escape_segment(id)
        );
        self.execute_empty(ApiRequest::post(path)).await
    }

    /// Page through schedule executions. Zero `limit`/`offset` are not sent.
    pub async fn list_schedule_executions(&self, limit: u32, offset: u32) -> ApiResult<ScheduleExecutionsResponse> {
        let mut request = ApiRequest::get(format!("{SCHEDULES}/executions"));
        if limit > 0 {
            request = request.query("limit", limit.to_string());
        }
        if offset > 0 {
            request = request.query("offset", offset.to_string());
        }
        self.execute(request).await
    }

    // ========================================================================
    // Authentication settings
    // ========================================================================

    /// Read authentication settings.
    pub async fn get_auth_settings(&self) -> ApiResult<AuthSettingsResponse> {
        self.get(AUTH_SETTINGS).await
    }

    /// Update authentication settings.
    pub async fn update_auth_settings(&self, payload: &AuthSettingsPayload) -> ApiResult<AuthSettingsResponse> {
        self.execute(ApiRequest::put(AUTH_SETTINGS).json(payload)?).await
    }

    /// List configured login providers.
    pub async fn get_auth_providers(&self) -> ApiResult<AuthProvidersResponse> {
        self.get(AUTH_PROVIDERS).await
    }

    // ========================================================================
    // License
    // ========================================================================

    /// Read the license state.
    pub async fn get_license(&self) -> ApiResult<LicenseResponse> {
        self.get(LICENSE).await
    }

    /// Activate a license.
    pub async fn set_license(&self, payload: &LicensePayload) -> ApiResult<LicenseResponse> {
        self.execute(ApiRequest::post(LICENSE).json(payload)?).await
    }

    /// Remove the license.
    pub async fn delete_license(&self) -> ApiResult<()> {
        self.delete(LICENSE).await
    }

    // ========================================================================
    // Stacks
    // ========================================================================

    /// List compose stacks, normalizing the backend's payload shape.
    pub async fn list_stacks(&self, env: &str) -> ApiResult<Vec<StackResponse>> {
        let raw = self.execute_raw(self.scoped(ApiRequest::get(STACKS), env)).await?;
        let stacks = parse_stacks(&raw.data).map_err(|e| e.into_dockhand_error(raw.status))?;
        Ok(ApiResponse {
            status: raw.status,
            data: stacks,
        })
    }

    /// Find a stack by exact name.
    pub async fn get_stack_by_name(&self, env: &str, name: &str) -> ApiResult<Option<StackResponse>> {
        let stacks = self.list_stacks(env).await?;
        Ok(stacks.map(|list| list.into_iter().find(|s| s.name == name)))
    }

    /// Create a compose stack.
    pub async fn create_stack(&self, env: &str, payload: &StackPayload) -> ApiResult<()> {
        let request = ApiRequest::post(STACKS).json(payload)?;
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Start a stack.
    pub async fn start_stack(&self, env: &str, name: &str) -> ApiResult<()> {
        self.stack_action(env, name, "start").await
    }

    /// Stop a stack.
    pub async fn stop_stack(&self, env: &str, name: &str) -> ApiResult<()> {
        self.stack_action(env, name, "stop").await
    }

    /// Restart a stack in one backend call.
    pub async fn restart_stack(&self, env: &str, name: &str) -> ApiResult<()> {
        self.stack_action(env, name, "restart").await
    }

    /// Stop a stack and remove its containers (`compose down`).
    pub async fn down_stack(&self, env: &str, name: &str) -> ApiResult<()> {
        self.stack_action(env, name, "down").await
    }

    async fn stack_action(&self, env: &str, name: &str, action: &str) -> ApiResult<()> {
        let request = ApiRequest::post(item_action_path(STACKS, name, action));
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Start a stack, retrying when the connection drops mid-request.
    pub async fn start_stack_with_status(&self, env: &str, name: &str) -> ApiResult<()> {
        self.stack_action_resilient(env, name, "start").await
    }

    /// Stop a stack, retrying when the connection drops mid-request.
    pub async fn stop_stack_with_status(&self, env: &str, name: &str) -> ApiResult<()> {
        self.stack_action_resilient(env, name, "stop").await
    }

    /// Run a lifecycle action, tolerating dropped connections.
    ///
    /// Each step is tried up to three times when the connection drops before
    /// a response arrives; [`StackAction::Restart`] is a stop followed by a
    /// start and stops at the first failing step.
    pub async fn run_stack_action(&self, env: &str, name: &str, action: StackAction) -> ApiResult<()> {
        match action {
            StackAction::Start => self.start_stack_with_status(env, name).await,
            StackAction::Stop => self.stop_stack_with_status(env, name).await,
            StackAction::Restart => {
                self.stop_stack_with_status(env, name).await?;
                self.start_stack_with_status(env, name).await
            }
        }
    }

    async fn stack_action_resilient(&self, env: &str, name: &str, action: &str) -> ApiResult<()> {
        let mut attempt = 1;
        loop {
            match self.stack_action(env, name, action).await {
                Err(err) if attempt < STACK_ACTION_ATTEMPTS && is_dropped_connection(&err) => {
                    warn!(stack = name, action, attempt, error = %err, "stack action lost its connection, retrying");
                    sleep_cancellable(self.cancellation(), STACK_ACTION_PAUSE).await?;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Force-delete a stack.
    pub async fn delete_stack(&self, env: &str, name: &str) -> ApiResult<()> {
        let request = ApiRequest::delete(item_path(STACKS, name)).query("force", "true");
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Read a stack's `.env` variables; secret values come back masked.
    pub async fn get_stack_env_vars(&self, env: &str, name: &str) -> ApiResult<Vec<StackEnvVariable>> {
        let request = ApiRequest::get(item_action_path(STACKS, name, "env"));
        let res: ApiResponse<StackEnvVariables> = self.execute(self.scoped(request, env)).await?;
        Ok(res.map(|body| body.variables))
    }

    /// Replace a stack's `.env` variables. An empty slice clears them.
    pub async fn update_stack_env_vars(&self, env: &str, name: &str, variables: &[StackEnvVariable]) -> ApiResult<()> {
        let payload = StackEnvVariables {
            variables: variables.to_vec(),
        };
        let request = ApiRequest::put(item_action_path(STACKS, name, "env")).json(&payload)?;
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Read a stack's raw `.env` file.
    pub async fn get_stack_env_raw(&self, env: &str, name: &str) -> ApiResult<String> {
        let request = ApiRequest::get(format!("{}/env/raw", item_path(STACKS, name)));
        let res: ApiResponse<StackEnvRaw> = self.execute(self.scoped(request, env)).await?;
        Ok(res.map(|body| body.content))
    }

    /// Overwrite a stack's raw `.env` file.
    pub async fn update_stack_env_raw(&self, env: &str, name: &str, content: &str) -> ApiResult<()> {
        let payload = StackEnvRaw {
            content: content.to_string(),
        };
        let request = ApiRequest::put(format!("{}/env/raw", item_path(STACKS, name))).json(&payload)?;
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Scan the stack directories for compose projects Dockhand does not manage yet.
    pub async fn scan_stacks(&self) -> ApiResult<StackScanResponse> {
        self.execute(ApiRequest::post(format!("{STACKS}/scan"))).await
    }

    /// Adopt existing compose projects as stacks.
    pub async fn adopt_stacks(&self, payload: &StackAdoptPayload) -> ApiResult<StackAdoptResponse> {
        self.execute(ApiRequest::post(format!("{STACKS}/adopt")).json(payload)?).await
    }

    /// Source of every stack, keyed by stack name.
    pub async fn get_stack_sources(&self) -> ApiResult<BTreeMap<String, StackSource>> {
        self.get(format!("{STACKS}/sources")).await
    }

    // ========================================================================
    // Git stacks
    // ========================================================================

    /// Create a git-backed stack.
    pub async fn create_git_stack(&self, env: &str, payload: &GitStackPayload) -> ApiResult<GitStackResponse> {
        let request = ApiRequest::post(GIT_STACKS).json(payload)?;
        self.execute(self.scoped(request, env)).await
    }

    /// Read one git-backed stack.
    pub async fn get_git_stack(&self, env: &str, id: &str) -> ApiResult<GitStackResponse> {
        let request = ApiRequest::get(item_path(GIT_STACKS, id));
        self.execute(self.scoped(request, env)).await
    }

    /// Update a git-backed stack.
    pub async fn update_git_stack(&self, env: &str, id: &str, payload: &GitStackPayload) -> ApiResult<GitStackResponse> {
        let request = ApiRequest::put(item_path(GIT_STACKS, id)).json(payload)?;
        self.execute(self.scoped(request, env)).await
    }

    /// Delete a git-backed stack.
    pub async fn delete_git_stack(&self, env: &str, id: &str) -> ApiResult<()> {
        let request = ApiRequest::delete(item_path(GIT_STACKS, id));
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Pull and deploy a git stack; the streamed deploy log is returned verbatim.
    pub async fn deploy_git_stack(&self, id: &str) -> ApiResult<String> {
        let request = ApiRequest::post(item_action_path(GIT_STACKS, id, "deploy-stream"));
        let raw = self.execute_raw(request).await?;
        Ok(raw.map(|body| String::from_utf8_lossy(&body).into_owned()))
    }

    /// Fire a git stack's webhook as if the repository had been pushed to.
    pub async fn trigger_git_stack_webhook(&self, id: &str) -> ApiResult<()> {
        self.execute_empty(ApiRequest::post(item_action_path(GIT_STACKS, id, "webhook")))
            .await
    }

    /// List `.env` files in a git stack's repository, sorted.
    pub async fn list_git_stack_env_files(&self, id: &str) -> ApiResult<Vec<String>> {
        let res: ApiResponse<GitStackEnvFiles> = self.get(item_action_path(GIT_STACKS, id, "env-files")).await?;
        Ok(res.map(|body| {
            let mut files = body.files;
            files.sort();
            files
        }))
    }

    /// Parse one `.env` file of a git stack's repository.
    pub async fn get_git_stack_env_file_vars(&self, id: &str, path: &str) -> ApiResult<BTreeMap<String, String>> {
        let payload = GitStackEnvFileRequest { path: path.to_string() };
        let request = ApiRequest::post(item_action_path(GIT_STACKS, id, "env-files")).json(&payload)?;
        let res: ApiResponse<GitStackEnvFileVars> = self.execute(request).await?;
        Ok(res.map(|body| body.vars))
    }

    // ========================================================================
    // Activity
    // ========================================================================

    /// Recent container events, newest first.
    pub async fn list_activity(&self) -> ApiResult<Vec<ActivityEvent>> {
        self.get(ACTIVITY).await
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Check that the API answers.
    ///
    /// The backend has no health endpoint; a successful dashboard stats
    /// request counts as healthy.
    pub async fn health(&self, env: &str) -> ApiResult<HealthResponse> {
        let res = self
            .execute_empty(self.scoped(ApiRequest::get(DASHBOARD_STATS), env))
            .await?;
        Ok(res.map(|()| HealthResponse {
            status: "ok".to_string(),
            version: None,
        }))
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// List users.
    pub async fn list_users(&self) -> ApiResult<Vec<UserResponse>> {
        self.get(USERS).await
    }

    /// Read one user.
    pub async fn get_user(&self, id: &str) -> ApiResult<UserResponse> {
        self.get(item_path(USERS, id)).await
    }

    /// Create a user.
    pub async fn create_user(&self, payload: &UserPayload) -> ApiResult<UserResponse> {
        self.execute(ApiRequest::post(USERS).json(payload)?).await
    }

    /// Update a user.
    pub async fn update_user(&self, id: &str, payload: &UserPayload) -> ApiResult<UserResponse> {
        self.execute(ApiRequest::put(item_path(USERS, id)).json(payload)?).await
    }

    /// Delete a user.
    pub async fn delete_user(&self, id: &str) -> ApiResult<()> {
        self.delete(item_path(USERS, id)).await
    }

    // ========================================================================
    // Containers
    // ========================================================================

    /// List containers of an environment.
    pub async fn list_containers(&self, env: &str) -> ApiResult<Vec<ContainerResponse>> {
        self.execute(self.scoped(ApiRequest::get(CONTAINERS), env)).await
    }

    /// Find a container by exact ID.
    pub async fn get_container_by_id(&self, env: &str, id: &str) -> ApiResult<Option<ContainerResponse>> {
        let containers = self.list_containers(env).await?;
        Ok(containers.map(|list| list.into_iter().find(|c| c.id == id)))
    }

    /// Create a container.
    pub async fn create_container(&self, env: &str, payload: &ContainerPayload) -> ApiResult<ContainerCreateResponse> {
        let request = ApiRequest::post(CONTAINERS).json(payload)?;
        self.execute(self.scoped(request, env)).await
    }

    /// Start a container.
    pub async fn start_container(&self, env: &str, id: &str) -> ApiResult<()> {
        self.container_action(env, id, "start").await
    }

    /// Stop a container.
    pub async fn stop_container(&self, env: &str, id: &str) -> ApiResult<()> {
        self.container_action(env, id, "stop").await
    }

    /// Restart a container.
    pub async fn restart_container(&self, env: &str, id: &str) -> ApiResult<()> {
        self.container_action(env, id, "restart").await
    }

    /// Pause a container.
    pub async fn pause_container(&self, env: &str, id: &str) -> ApiResult<()> {
        self.container_action(env, id, "pause").await
    }

    /// Unpause a container.
    pub async fn unpause_container(&self, env: &str, id: &str) -> ApiResult<()> {
        self.container_action(env, id, "unpause").await
    }

    async fn container_action(&self, env: &str, id: &str, action: &str) -> ApiResult<()> {
        let request = ApiRequest::post(item_action_path(CONTAINERS, id, action));
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Delete a container.
    pub async fn delete_container(&self, env: &str, id: &str) -> ApiResult<()> {
        let request = ApiRequest::delete(item_path(CONTAINERS, id));
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Read container logs; `tail == 0` returns the backend default.
    pub async fn get_container_logs(&self, env: &str, id: &str, tail: u32) -> ApiResult<ContainerLogsResponse> {
        let mut request = ApiRequest::get(item_action_path(CONTAINERS, id, "logs"));
        if tail > 0 {
            request = request.query("tail", tail.to_string());
        }
        self.execute(self.scoped(request, env)).await
    }

    /// Read pending image updates for an environment.
    pub async fn get_container_pending_updates(&self, env: &str) -> ApiResult<ContainerPendingUpdatesResponse> {
        let request = ApiRequest::get(format!("{CONTAINERS}/pending-updates"));
        self.execute(self.scoped(request, env)).await
    }

    /// Detect shells available in a container.
    pub async fn get_container_shells(&self, env: &str, id: &str) -> ApiResult<ContainerShellsResponse> {
        let request = ApiRequest::get(item_action_path(CONTAINERS, id, "shells"));
        self.execute(self.scoped(request, env)).await
    }

    /// Rename a container.
    pub async fn rename_container(&self, env: &str, id: &str, name: &str) -> ApiResult<()> {
        let payload = ContainerRenamePayload {
            name: name.to_string(),
        };
        let request = ApiRequest::post(item_action_path(CONTAINERS, id, "rename")).json(&payload)?;
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Update a container's resource and restart settings.
    ///
    /// The payload and result are passed through as free-form JSON.
    pub async fn update_container(&self, env: &str, id: &str, payload: &Map<String, Value>) -> ApiResult<Value> {
        let request = ApiRequest::post(item_action_path(CONTAINERS, id, "update")).json(payload)?;
        self.execute(self.scoped(request, env)).await
    }

    /// Check every container of an environment for newer images.
    pub async fn check_container_updates(&self, env: &str) -> ApiResult<ContainerCheckUpdatesResponse> {
        let request = ApiRequest::post(format!("{CONTAINERS}/check-updates"));
        self.execute(self.scoped(request, env)).await
    }

    /// Full engine inspect document of a container, passed through as JSON.
    pub async fn inspect_container(&self, env: &str, id: &str) -> ApiResult<Value> {
        let request = ApiRequest::get(item_path(CONTAINERS, id));
        self.execute(self.scoped(request, env)).await
    }

    /// Live resource usage of every running container.
    pub async fn get_container_stats(&self, env: &str) -> ApiResult<Vec<ContainerStats>> {
        let request = ApiRequest::get(format!("{CONTAINERS}/stats"));
        self.execute(self.scoped(request, env)).await
    }

    /// Process table of a container.
    pub async fn get_container_top(&self, env: &str, id: &str) -> ApiResult<ContainerTopResponse> {
        let request = ApiRequest::get(item_action_path(CONTAINERS, id, "top"));
        self.execute(self.scoped(request, env)).await
    }

    /// Create an empty file (`kind == "file"`) or a directory inside a container.
    pub async fn create_container_file(&self, env: &str, id: &str, path: &str, kind: &str) -> ApiResult<()> {
        let payload = ContainerFileCreatePayload {
            path: path.to_string(),
            kind: kind.to_string(),
        };
        let request = ApiRequest::post(container_files_path(id, "create")).json(&payload)?;
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Read a file inside a container.
    pub async fn get_container_file_content(&self, env: &str, id: &str, path: &str) -> ApiResult<String> {
        let request = ApiRequest::get(container_files_path(id, "content")).query("path", path);
        let res: ApiResponse<ContainerFileContent> = self.execute(self.scoped(request, env)).await?;
        Ok(res.map(|body| body.content))
    }

    /// Overwrite a file inside a container.
    pub async fn update_container_file_content(&self, env: &str, id: &str, path: &str, content: &str) -> ApiResult<()> {
        let payload = ContainerFileContent {
            path: path.to_string(),
            content: content.to_string(),
        };
        let request = ApiRequest::put(container_files_path(id, "content")).json(&payload)?;
        self.execute_empty(self.scoped(request, env)).await
    }

    /// Delete a file inside a container.
    pub async fn delete_container_file(&self, env: &str, id: &str, path: &str) -> ApiResult<()> {
        let request = ApiRequest::delete(container_files_path(id, "delete")).query("path", path);
        self.execute_empty(self.scoped(request, env)).await
    }

    // ========================================================================
    // Scanner settings
    // ========================================================================

    /// Read scanner settings and installation state of an environment.
    ///
    /// With `settings_only`, the backend skips probing scanner availability.
    pub async fn get_scanner_settings(&self, env: &str, settings_only: bool) -> ApiResult<ScannerSettingsResponse> {
        let mut request = self.scoped(ApiRequest::get(SETTINGS_SCANNER), env);
        if settings_only {
            request = request.query("settingsOnly", "true");
        }
        self.execute(request).await
    }

    /// Replace scanner settings of an environment.
    pub async fn set_scanner_settings(&self, env: &str, settings: &ScannerSettings) -> ApiResult<()> {
        let payload = ScannerSettingsPayload {
            env_id: self.resolve_env(env).to_string(),
            settings: settings.clone(),
        };
        self.execute_empty(ApiRequest::post(SETTINGS_SCANNER).json(&payload)?).await
    }

    /// Remove the image of one scanner (`grype` or `trivy`) from an environment.
    pub async fn remove_scanner_image(&self, env: &str, scanner: &str) -> ApiResult<ScannerRemoveResponse> {
        let request = ApiRequest::delete(SETTINGS_SCANNER).query("scanner", scanner);
        self.execute(self.scoped(request, env)).await
    }

    /// Check whether newer scanner images are published.
    pub async fn check_scanner_updates(&self, env: &str) -> ApiResult<ScannerCheckUpdatesResponse> {
        let request = ApiRequest::post(format!("{SETTINGS_SCANNER}/check-updates"));
        self.execute(self.scoped(request, env)).await
    }
}

/// Connection lost before any response headers arrived.
fn is_dropped_connection(err: &DockhandError) -> bool {
    matches!(err, DockhandError::Transport { status: None, .. })
}
