//! Main marketplace client state container
//!
//! One database, one transport, one session manager; everything else
//! borrows them. Callers receive this as an explicit instance.

use souk_catalog::CatalogClient;
use souk_http::HttpClient;
use souk_session::{Credentials, Registration, Session, SessionManager};
use souk_storage::Database;

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

/// Keys in the settings table owned by the session manager; not
/// reachable through the settings API.
const RESERVED_KEYS: [&str; 2] = ["auth_token", "user_data"];

pub struct Marketplace {
    /// Configuration
    config: Config,
    /// Database
    db: Database,
    /// Session manager
    session_manager: SessionManager,
    /// Product catalog client
    catalog: CatalogClient,
}

impl Marketplace {
    /// Build a new client instance from configuration.
    pub fn new(config: Config) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        let http = HttpClient::new(&config.api_url)?;

        let session_manager =
            SessionManager::new(db.clone(), http.clone(), config.device_token.clone());
        let catalog = CatalogClient::new(http);

        Ok(Self {
            config,
            db,
            session_manager,
            catalog,
        })
    }

    /// Restore persisted state. Returns the restored session, if a
    /// valid one was on disk.
    pub fn initialize(&self) -> Option<Session> {
        let session = self.session_manager.restore();

        tracing::info!(
            api_url = %self.config.api_url,
            authenticated = session.is_some(),
            "Marketplace client initialized"
        );

        session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session_manager(&self) -> &SessionManager {
        &self.session_manager
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    // === Session operations ===

    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        Ok(self.session_manager.login(credentials).await?)
    }

    pub async fn register(&self, registration: &Registration) -> Result<Session> {
        Ok(self.session_manager.register(registration).await?)
    }

    pub async fn logout(&self) -> Result<()> {
        Ok(self.session_manager.logout().await?)
    }

    pub fn current_session(&self) -> Option<Session> {
        self.session_manager.current_session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session_manager.is_authenticated()
    }

    // === Settings operations ===

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        check_settable(key)?;
        Ok(self.db.get_setting(key)?)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        check_settable(key)?;
        Ok(self.db.set_setting(key, value)?)
    }

    pub fn list_settings(&self) -> Result<Vec<(String, String)>> {
        let entries = self.db.list_settings()?;
        Ok(entries
            .into_iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .collect())
    }
}

fn check_settable(key: &str) -> Result<()> {
    if RESERVED_KEYS.contains(&key) {
        return Err(CoreError::Config(format!(
            "'{key}' is managed by the session manager"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use souk_catalog::ProductDraft;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(api_url: &str, dir: &std::path::Path) -> Config {
        Config {
            api_url: api_url.to_string(),
            database_path: dir.join("souk.db"),
            device_token: None,
        }
    }

    #[tokio::test]
    async fn test_initialize_anonymous_without_record() {
        let tmp = tempfile::TempDir::new().unwrap();
        let market = Marketplace::new(test_config("http://localhost:1", tmp.path())).unwrap();

        assert!(market.initialize().is_none());
        assert!(!market.is_authenticated());
    }

    #[tokio::test]
    async fn test_session_restored_across_instances() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok1",
                "user": {"id": "1", "email": "a@b.com", "name": "A"}
            })))
            .mount(&server)
            .await;

        let tmp = tempfile::TempDir::new().unwrap();
        let config = test_config(&server.uri(), tmp.path());

        {
            let market = Marketplace::new(config.clone()).unwrap();
            market
                .login(&Credentials::new("a@b.com", "secret1"))
                .await
                .unwrap();
        }

        // Fresh instance over the same data directory
        let market = Marketplace::new(config).unwrap();
        let session = market.initialize().unwrap();
        assert_eq!(session.user.email, "a@b.com");
        assert!(market.is_authenticated());
    }

    #[tokio::test]
    async fn test_catalog_mutation_carries_bearer_after_login() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok1",
                "user": {"id": "1", "email": "a@b.com", "name": "A"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/products/create-with-image"))
            .and(header("authorization", "Bearer tok1"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "_id": "p1",
                "name": "Lamp",
                "description": "desc",
                "price": 19.99,
                "seller": {"_id": "1", "name": "A"}
            })))
            .mount(&server)
            .await;

        let tmp = tempfile::TempDir::new().unwrap();
        let market = Marketplace::new(test_config(&server.uri(), tmp.path())).unwrap();

        market
            .login(&Credentials::new("a@b.com", "secret1"))
            .await
            .unwrap();

        let product = market
            .catalog()
            .create(&ProductDraft::new("Lamp", "desc", 19.99))
            .await
            .unwrap();
        assert_eq!(product.id, "p1");
    }

    #[tokio::test]
    async fn test_settings_guard_reserved_keys() {
        let tmp = tempfile::TempDir::new().unwrap();
        let market = Marketplace::new(test_config("http://localhost:1", tmp.path())).unwrap();

        assert!(matches!(
            market.set_setting("auth_token", "x"),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            market.get_setting("user_data"),
            Err(CoreError::Config(_))
        ));

        market.set_setting("page_size", "20").unwrap();
        assert_eq!(
            market.get_setting("page_size").unwrap().as_deref(),
            Some("20")
        );
        assert_eq!(
            market.list_settings().unwrap(),
            vec![("page_size".to_string(), "20".to_string())]
        );
    }
}
