use std::sync::Arc;

use radrest::{Database, DatabaseSetupError, GroupService, NasService, UserService};
use url::Url;

use crate::ServiceConfig;

/// Shared handle to everything a request handler needs.
#[derive(Clone)]
pub struct State {
    database: Database,
    users: UserService,
    groups: GroupService,
    nas: NasService,
    api_url: Url,
    api_key: Option<Arc<str>>,
}

impl State {
    pub async fn from_config(config: &ServiceConfig) -> Result<Self, StateSetupError> {
        let database = Database::connect(&config.database_url).await?;
        let tables = Arc::new(config.tables.clone());

        Ok(Self {
            users: UserService::new(database.clone(), tables.clone(), config.page_size),
            groups: GroupService::new(database.clone(), tables.clone(), config.page_size),
            nas: NasService::new(database.clone(), tables, config.page_size),
            database,
            api_url: config.api_url.clone(),
            api_key: config.api_key.as_deref().map(Arc::from),
        })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn groups(&self) -> &GroupService {
        &self.groups
    }

    pub fn nas(&self) -> &NasService {
        &self.nas
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Absolute URL under the external base, for Location and Link headers.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.api_url.as_str().trim_end_matches('/'), path)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("failed to set up the database: {0}")]
    DatabaseSetup(#[from] DatabaseSetupError),
}
