use std::sync::Arc;
use std::time::Instant;
use crate::config::config_manager::ConfigManager;
use crate::enums::changeable_field::ChangeableField;
use crate::enums::commands::{Commands, ReviewAction};
use crate::enums::request_status::RequestStatus;
use crate::enums::review_target::ReviewTarget;
use crate::enums::sort_order::SortOrder;
use crate::enums::submit_outcome::SubmitOutcome;
use crate::errors::{PortalError, PortalResult};
use crate::services::admin_review::AdminReviewController;
use crate::services::auth_session::AuthSessionController;
use crate::services::catalog_loader::CatalogLoader;
use crate::services::change_request_controller::ChangeRequestController;
use crate::services::group_catalog::GroupCatalog;
use crate::services::group_editor::GroupEditor;
use crate::services::http_gateway::HttpGateway;
use crate::services::portal_client::PortalClient;
use crate::services::request_form_controller::RequestFormController;
use crate::services::request_list::{ChangeRequestListView, RequestListView};
use crate::services::session_expiry::SessionExpiryBroadcaster;
use crate::services::token_store::FileTokenStore;
use crate::structs::config::config::Config;
use crate::structs::credentials::Credentials;
use crate::structs::list_query::ListQuery;
use crate::traits::portal_api::PortalApi;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner {
    pub fn new() -> Self {
        Self { start_time: None }
    }

    pub async fn run_command(&mut self, command: Commands) -> PortalResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::Validate => self.validate_command(),
            other => self.portal_command(other).await,
        };

        if let Some(start) = self.start_time {
            log::debug!("⏱️  Command completed in {:.2}s", start.elapsed().as_secs_f64());
        }

        result
    }

    fn init_command(&self) -> PortalResult<()> {
        log::info!("🚀 Initializing gpulab configuration...");
        let path = ConfigManager::create_sample_config()?;
        log::info!("📝 Edit {} to point at your portal.", path.display());
        log::info!("🔧 Run 'gpulab validate' to check your configuration.");
        Ok(())
    }

    fn validate_command(&self) -> PortalResult<()> {
        let config = ConfigManager::load()?;
        match ConfigManager::validate_config(&config) {
            Ok(()) => {
                log::info!("✅ Configuration is valid");
                log::info!("🌐 API: {}", config.api.base_url);
                Ok(())
            }
            Err(errors) => {
                for error in &errors {
                    log::error!("❌ {}", error);
                }
                Err(PortalError::config_error(
                    &format!("{} configuration problem(s) found", errors.len()),
                    Some("Fix the listed entries or run 'gpulab init'"),
                ))
            }
        }
    }

    async fn portal_command(&self, command: Commands) -> PortalResult<()> {
        let config = ConfigManager::load()?;
        if let Err(errors) = ConfigManager::validate_config(&config) {
            return Err(PortalError::config_error(&errors.join("; "), Some("Run 'gpulab validate'")));
        }
        self.run_with_config(command, &config).await
    }

    /// Runs a session-backed command against an already loaded config.
    /// The session-expired notice is printed whichever call hit the 401,
    /// including the bootstrap `/api/auth/me` check.
    pub async fn run_with_config(&self, command: Commands, config: &Config) -> PortalResult<()> {
        let token_store = Arc::new(FileTokenStore::open(&ConfigManager::token_file_path(config))?);
        let broadcaster = SessionExpiryBroadcaster::new();
        let gateway = HttpGateway::new(&config.api, token_store.clone(), broadcaster.clone())?;
        let api: Arc<dyn PortalApi> = Arc::new(PortalClient::new(gateway));

        let mut auth = AuthSessionController::new(Arc::clone(&api), token_store);
        let _watch = auth.watch(&broadcaster).unsubscribe_on_drop();

        let result = match command {
            Commands::Login { username, password } => auth
                .login(&Credentials::new(&username, &password))
                .await
                .map(|user| log::info!("👋 Welcome, {} ({:?})", user.username, user.role)),
            Commands::Logout => {
                auth.logout();
                log::info!("👋 Logged out");
                Ok(())
            }
            other => {
                auth.bootstrap().await;
                if auth.sync_expiry() {
                    Err(PortalError::SessionExpired {
                        operation: "session restore".to_string(),
                    })
                } else if !auth.is_authenticated() {
                    Err(PortalError::auth("Not logged in. Run 'gpulab login' first."))
                } else {
                    self.authenticated_command(other, config, &auth, &api).await
                }
            }
        };

        auth.sync_expiry();
        if auth.take_expiry_notice() {
            eprintln!("🔒 Your session has expired. Run 'gpulab login' to sign in again.");
        }
        result
    }

    async fn authenticated_command(
        &self,
        command: Commands,
        config: &Config,
        auth: &AuthSessionController,
        api: &Arc<dyn PortalApi>,
    ) -> PortalResult<()> {
        let loader = CatalogLoader::new(Arc::clone(api));

        match command {
            Commands::Whoami => {
                if let Some(user) = auth.current_user() {
                    println!("{} (#{})", user.username, user.user_id);
                    if let Some(email) = &user.email {
                        println!("  email: {}", email);
                    }
                    println!("  role:  {:?}", user.role);
                }
                Ok(())
            }
            Commands::Catalog => {
                let catalog = loader.load_all(&GroupCatalog::default()).await?;
                println!("GPU resource groups:");
                for group in &catalog.resource_groups {
                    println!("  [{}] {}", group.resource_group_id, group.description);
                }
                println!("Container images:");
                for image in &catalog.images {
                    println!("  [{}] {}", image.image_id, image.display_name());
                }
                println!("Unix groups:");
                for group in catalog.groups.snapshot() {
                    println!("  [{}] {}", group.group_id, group.group_name);
                }
                Ok(())
            }
            Commands::Requests { status, sort, search } => {
                let view = RequestListView::new(loader.load_my_requests().await?);
                let query = Self::list_query(config, status, sort, search);
                for request in view.query(&query) {
                    println!(
                        "{} {:<10} {:<24} {}",
                        request.status.emoji(),
                        request.status,
                        request.display_name(),
                        request.resource_group_name.as_deref().unwrap_or("-"),
                    );
                }
                Self::print_counts(view.status_counts().into_iter());
                Ok(())
            }
            Commands::ChangeRequests { status, sort, search } => {
                let view = ChangeRequestListView::new(loader.load_my_change_requests().await?);
                let query = Self::list_query(config, status, sort, search);
                for change in view.query(&query) {
                    println!(
                        "{} {:<10} #{:<5} request #{:<5} {:?} -> {}",
                        change.status.emoji(),
                        change.status,
                        change.change_request_id,
                        change.request_id,
                        change.change_type,
                        change.new_value_text(),
                    );
                }
                Self::print_counts(view.status_counts().into_iter());
                Ok(())
            }
            Commands::Request { resource_group, image, volume, expires, port, group, reason } => {
                let mut form = RequestFormController::new();
                form.select_resource_group(resource_group);
                form.select_image(image);
                form.edit_volume_size(&volume);
                form.edit_expires_at(&expires);
                form.set_justification(&reason);
                for spec in &port {
                    let (number, purpose) = Self::split_port_arg(spec);
                    form.add_port(number, purpose)?;
                }
                Self::select_groups(&group, |id| Ok(form.add_group(id)))?;
                Self::report_outcome("Server request", form.submit(api.as_ref()).await?);
                Ok(())
            }
            Commands::Change { request_id, field, value, group, port, reason } => {
                let mut controller = ChangeRequestController::new(loader.load_my_requests().await?);
                controller.select_target(request_id)?;
                controller.select_field(field);
                if let Some(current) = controller.current_value() {
                    log::info!("📋 Current {}: {}", field.label(), current);
                }

                match field {
                    ChangeableField::GroupMembership => {
                        Self::select_groups(&group, |id| controller.add_group(id))?;
                    }
                    ChangeableField::PortMapping => {
                        for spec in &port {
                            let (number, purpose) = Self::split_port_arg(spec);
                            controller.add_port(number, purpose)?;
                        }
                    }
                    _ => controller.edit_scalar_value(value.as_deref().unwrap_or_default())?,
                }
                controller.set_justification(&reason);
                Self::report_outcome("Change request", controller.submit(api.as_ref()).await?);
                Ok(())
            }
            Commands::CreateGroup { name } => {
                let catalog = GroupCatalog::default();
                loader.load_groups(&catalog).await?;
                let mut selection: Vec<i64> = Vec::new();
                let group = GroupEditor::new(catalog).create_group(api.as_ref(), &name, &mut selection).await?;
                println!("[{}] {}", group.group_id, group.group_name);
                Ok(())
            }
            Commands::Review { action } => {
                if !auth.is_admin() {
                    return Err(PortalError::auth("Administrator role required"));
                }
                let mut review = AdminReviewController::new(Arc::clone(api));
                review.refresh().await?;
                match action {
                    ReviewAction::List => {
                        println!("Pending server requests:");
                        for request in review.pending_requests() {
                            println!(
                                "  {} by {}: {}",
                                request.display_name(),
                                request.user_name.as_deref().unwrap_or("-"),
                                request.reason.as_deref().unwrap_or("-"),
                            );
                        }
                        println!("Pending change requests:");
                        for change in review.pending_change_requests() {
                            println!(
                                "  #{} on request #{}: {:?} -> {}",
                                change.change_request_id,
                                change.request_id,
                                change.change_type,
                                change.new_value_text(),
                            );
                        }
                        Ok(())
                    }
                    ReviewAction::Approve { request, change_request } => {
                        review.approve(Self::review_target(request, change_request)?).await
                    }
                    ReviewAction::Deny { request, change_request, reason } => {
                        review.deny(Self::review_target(request, change_request)?, &reason).await
                    }
                }
            }
            Commands::Init | Commands::Validate | Commands::Login { .. } | Commands::Logout => Ok(()),
        }
    }

    fn list_query(
        config: &Config,
        status: Option<RequestStatus>,
        sort: Option<SortOrder>,
        search: Option<String>,
    ) -> ListQuery {
        ListQuery {
            status,
            search,
            sort: sort.unwrap_or(config.display.default_sort),
            limit: Some(config.display.page_size),
        }
    }

    fn print_counts(counts: impl Iterator<Item = (RequestStatus, usize)>) {
        let summary: Vec<String> = counts.map(|(status, n)| format!("{} {}", status, n)).collect();
        if !summary.is_empty() {
            println!("{}", summary.join(" · "));
        }
    }

    /// `8888:jupyter` -> ("8888", "jupyter"); a bare port gets the default purpose.
    fn split_port_arg(spec: &str) -> (&str, &str) {
        spec.split_once(':').unwrap_or((spec, ""))
    }

    /// Feeds `--group` ids to a selection; ids given twice are logged and skipped.
    /// Returns how many were newly selected.
    fn select_groups(ids: &[i64], mut add: impl FnMut(i64) -> PortalResult<bool>) -> PortalResult<usize> {
        let mut added = 0;
        for &id in ids {
            if add(id)? {
                added += 1;
            } else {
                log::debug!("Group #{} already selected", id);
            }
        }
        Ok(added)
    }

    fn review_target(request: Option<i64>, change_request: Option<i64>) -> PortalResult<ReviewTarget> {
        match (request, change_request) {
            (Some(id), None) => Ok(ReviewTarget::Request(id)),
            (None, Some(id)) => Ok(ReviewTarget::ChangeRequest(id)),
            _ => Err(PortalError::config_error(
                "specify exactly one of --request or --change-request",
                None,
            )),
        }
    }

    fn report_outcome(what: &str, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Submitted => log::info!("✅ {} submitted", what),
            SubmitOutcome::Stale => log::warn!("⚠️ {} response arrived after the draft was discarded", what),
        }
    }
}
