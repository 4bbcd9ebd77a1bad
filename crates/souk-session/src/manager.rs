//! Session Manager
//!
//! Two states, anonymous and authenticated. Login/register success
//! moves anonymous -> authenticated; logout or a discarded persisted
//! record moves back. The persisted record is the single source of
//! truth; this manager is its only writer.

use serde::Serialize;

use souk_http::HttpClient;
use souk_storage::Database;

use crate::credentials::{Credentials, Registration};
use crate::error::SessionError;
use crate::session::{AuthResponse, Session, User};
use crate::Result;

/// Fixed persistence keys for the session record.
const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "user_data";

#[derive(Debug, Serialize)]
struct LogoutRequest {
    #[serde(rename = "deviceToken", skip_serializing_if = "Option::is_none")]
    device_token: Option<String>,
}

pub struct SessionManager {
    /// Database for persistence
    db: Database,
    /// HTTP transport; this manager owns its bearer slot.
    http: HttpClient,
    /// Device identifier forwarded on logout, if configured.
    device_token: Option<String>,
}

impl SessionManager {
    pub fn new(db: Database, http: HttpClient, device_token: Option<String>) -> Self {
        Self {
            db,
            http,
            device_token,
        }
    }

    /// Startup hook: load the persisted session (if any) and attach
    /// the bearer so subsequent requests are authenticated. No network
    /// round trip.
    pub fn restore(&self) -> Option<Session> {
        let session = self.current_session();
        match &session {
            Some(s) => {
                self.http.set_bearer(s.token.clone());
                tracing::info!(user_id = %s.user.id, email = %s.user.email, "Restored session");
            }
            None => self.http.clear_bearer(),
        }
        session
    }

    /// Register a new account and establish a session.
    pub async fn register(&self, registration: &Registration) -> Result<Session> {
        registration.validate()?;

        let resp: AuthResponse = self
            .http
            .post_json("/auth/register", registration)
            .await
            .map_err(SessionError::from)?;

        self.establish(resp)
    }

    /// Log in with existing credentials and establish a session.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        credentials.validate()?;

        let resp: AuthResponse = self
            .http
            .post_json("/auth/login", credentials)
            .await
            .map_err(SessionError::from)?;

        self.establish(resp)
    }

    /// End the session. The remote is notified best-effort; whatever
    /// happens on the wire, local state is cleared and subsequent
    /// requests carry no credential.
    pub async fn logout(&self) -> Result<()> {
        if self.is_authenticated() {
            let body = LogoutRequest {
                device_token: self.device_token.clone(),
            };
            if let Err(e) = self.http.post_no_content("/auth/logout", &body).await {
                tracing::warn!(error = %e, "Remote logout failed; clearing local session anyway");
            }
        }

        self.clear_local()
    }

    /// Read the persisted session synchronously. A record that cannot
    /// be parsed, or where only one of token/user survives, is
    /// discarded and resolves to `None`.
    pub fn current_session(&self) -> Option<Session> {
        match (self.read_key(TOKEN_KEY), self.read_key(USER_KEY)) {
            (Some(token), Some(user_json)) => match serde_json::from_str::<User>(&user_json) {
                Ok(user) => Some(Session { token, user }),
                Err(e) => {
                    tracing::warn!(error = %e, "Corrupt persisted session record; discarding");
                    self.discard_persisted();
                    None
                }
            },
            (None, None) => None,
            _ => {
                tracing::warn!("Partial persisted session record; discarding");
                self.discard_persisted();
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_session().is_some()
    }

    fn establish(&self, resp: AuthResponse) -> Result<Session> {
        let session = Session::from(resp);
        let user_json = serde_json::to_string(&session.user)?;

        // Token and user are written in one transaction so that no
        // persisted state exists where one is set without the other.
        self.db.set_settings_atomic(&[
            (TOKEN_KEY, Some(session.token.as_str())),
            (USER_KEY, Some(user_json.as_str())),
        ])?;

        self.http.set_bearer(session.token.clone());

        tracing::info!(
            user_id = %session.user.id,
            email = %session.user.email,
            "Session established"
        );

        Ok(session)
    }

    fn clear_local(&self) -> Result<()> {
        self.db
            .set_settings_atomic(&[(TOKEN_KEY, None), (USER_KEY, None)])?;
        self.http.clear_bearer();

        tracing::info!("Session cleared");

        Ok(())
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.db.get_setting(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read persisted session");
                None
            }
        }
    }

    /// Self-healing: drop a broken record instead of surfacing it.
    fn discard_persisted(&self) {
        if let Err(e) = self
            .db
            .set_settings_atomic(&[(TOKEN_KEY, None), (USER_KEY, None)])
        {
            tracing::warn!(error = %e, "Failed to discard corrupt session record");
        }
        self.http.clear_bearer();
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            http: self.http.clone(),
            device_token: self.device_token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn manager_for(server_uri: &str) -> (Database, SessionManager) {
        let db = Database::open_in_memory().unwrap();
        let http = HttpClient::new(server_uri).unwrap();
        let manager = SessionManager::new(db.clone(), http, None);
        (db, manager)
    }

    fn auth_body(token: &str) -> serde_json::Value {
        serde_json::json!({
            "access_token": token,
            "user": {"id": "1", "email": "a@b.com", "name": "A"}
        })
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_partial_json(
                serde_json::json!({"email": "a@b.com", "password": "secret1"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("tok1")))
            .mount(&server)
            .await;

        let (db, manager) = manager_for(&server.uri());
        assert!(!manager.is_authenticated());

        let session = manager
            .login(&Credentials::new("a@b.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(session.token, "tok1");
        assert_eq!(session.user.id, "1");

        // Survives a fresh manager over the same database
        let http = HttpClient::new(&server.uri()).unwrap();
        let restored = SessionManager::new(db, http, None);
        let current = restored.current_session().unwrap();
        assert_eq!(current, session);
    }

    #[tokio::test]
    async fn test_login_attaches_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("tok1")))
            .mount(&server)
            .await;

        let db = Database::open_in_memory().unwrap();
        let http = HttpClient::new(&server.uri()).unwrap();
        let manager = SessionManager::new(db, http.clone(), None);

        assert!(http.bearer().is_none());
        manager
            .login(&Credentials::new("a@b.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(http.bearer().as_deref(), Some("tok1"));
    }

    #[tokio::test]
    async fn test_login_rejected_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"message": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let (_db, manager) = manager_for(&server.uri());
        let err = manager
            .login(&Credentials::new("a@b.com", "wrongpass"))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Auth(_)));
        assert!(err.to_string().contains("Invalid credentials"));
        assert!(manager.current_session().is_none());
    }

    #[tokio::test]
    async fn test_login_response_missing_fields_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"access_token": "tok1"})),
            )
            .mount(&server)
            .await;

        let (_db, manager) = manager_for(&server.uri());
        let err = manager
            .login(&Credentials::new("a@b.com", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Auth(_)));
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_validation_happens_before_network() {
        let server = MockServer::start().await;
        let (_db, manager) = manager_for(&server.uri());

        let err = manager
            .login(&Credentials::new("not-an-email", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));

        let err = manager
            .register(&Registration::new("a@b.com", "x", "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_establishes_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .and(body_partial_json(serde_json::json!({"name": "A"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(auth_body("tok2")))
            .mount(&server)
            .await;

        let (_db, manager) = manager_for(&server.uri());
        let session = manager
            .register(&Registration::new("a@b.com", "secret1", "A"))
            .await
            .unwrap();
        assert_eq!(session.token, "tok2");
        assert!(manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_duplicate_account() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(serde_json::json!({"message": "Email already in use"})),
            )
            .mount(&server)
            .await;

        let (_db, manager) = manager_for(&server.uri());
        let err = manager
            .register(&Registration::new("a@b.com", "secret1", "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Auth(_)));
        assert!(err.to_string().contains("Email already in use"));
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_remote_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("tok1")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let db = Database::open_in_memory().unwrap();
        let http = HttpClient::new(&server.uri()).unwrap();
        let manager = SessionManager::new(db, http.clone(), None);

        manager
            .login(&Credentials::new("a@b.com", "secret1"))
            .await
            .unwrap();
        assert!(manager.is_authenticated());

        manager.logout().await.unwrap();
        assert!(manager.current_session().is_none());
        assert!(http.bearer().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_when_network_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("tok1")))
            .mount(&server)
            .await;

        let db = Database::open_in_memory().unwrap();
        let http = HttpClient::new(&server.uri()).unwrap();
        let manager = SessionManager::new(db, http, Some("dev1".to_string()));
        manager
            .login(&Credentials::new("a@b.com", "secret1"))
            .await
            .unwrap();

        // Stop the server; the logout notify now gets connection refused.
        drop(server);

        manager.logout().await.unwrap();
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_corrupt_user_record_self_heals() {
        let db = Database::open_in_memory().unwrap();
        db.set_setting("auth_token", "tok1").unwrap();
        db.set_setting("user_data", "{not valid json").unwrap();

        let http = HttpClient::new("http://localhost:1").unwrap();
        let manager = SessionManager::new(db.clone(), http, None);

        assert!(manager.current_session().is_none());
        // Both keys are gone after the discard
        assert!(db.get_setting("auth_token").unwrap().is_none());
        assert!(db.get_setting("user_data").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_partial_record_treated_as_absent() {
        let db = Database::open_in_memory().unwrap();
        db.set_setting("auth_token", "tok1").unwrap();

        let http = HttpClient::new("http://localhost:1").unwrap();
        let manager = SessionManager::new(db.clone(), http, None);

        assert!(manager.current_session().is_none());
        assert!(db.get_setting("auth_token").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_anonymous_at_startup_without_record() {
        let db = Database::open_in_memory().unwrap();
        let http = HttpClient::new("http://localhost:1").unwrap();
        let manager = SessionManager::new(db, http, None);

        assert!(manager.restore().is_none());
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_attaches_bearer() {
        let db = Database::open_in_memory().unwrap();
        db.set_setting("auth_token", "tok1").unwrap();
        db.set_setting(
            "user_data",
            r#"{"id":"1","email":"a@b.com","name":"A"}"#,
        )
        .unwrap();

        let http = HttpClient::new("http://localhost:1").unwrap();
        let manager = SessionManager::new(db, http.clone(), None);

        let session = manager.restore().unwrap();
        assert_eq!(session.user.name, "A");
        assert_eq!(http.bearer().as_deref(), Some("tok1"));
    }
}
