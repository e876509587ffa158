pub mod app;
pub mod config;
pub mod domain;
pub mod http;
pub mod infra;
pub mod views;

use crate::app::auth::AuthContext;
use crate::app::reports::ReportCache;
use crate::app::users::UserService;
use crate::config::AppConfig;
use crate::infra::api::ApiClient;
use crate::infra::session_store::SessionStore;
use crate::views::Links;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub auth: AuthContext,
    pub reports: ReportCache,
    pub users: UserService,
    pub links: Links,
}

impl AppState {
    /// Restores the stored admin session and wires the admin API client to it.
    pub fn build(config: &AppConfig, store: impl SessionStore + 'static) -> anyhow::Result<Self> {
        let auth = AuthContext::init(store);
        let api = ApiClient::new(&config.api_base_url, config.api_timeout(), auth.clone())?;

        Ok(Self {
            api,
            auth,
            reports: ReportCache::new(config.list_cache_ttl()),
            users: UserService::new(config.list_cache_ttl()),
            links: Links {
                public_web_url: config.public_web_url.clone(),
                maps_api_key: config.maps_api_key.clone(),
            },
        })
    }
}
