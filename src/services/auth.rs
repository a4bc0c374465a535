//! Auth service: login, logout and the authentication check.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError};
use crate::auth::AuthManager;

pub const LOGIN_ENDPOINT: &str = "/auth/login";

/// Payload returned by a successful login
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub user: Option<Value>,
}

impl LoginResponse {
    fn from_payload(payload: &Value) -> Self {
        Self {
            token: payload
                .get("token")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            user: payload.get("user").cloned(),
        }
    }

    /// Role of the logged-in user, when the backend reports one
    pub fn role(&self) -> Option<&str> {
        self.user.as_ref()?.get("role")?.as_str()
    }
}

/// Login/logout verbs; the only writer of the session
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
    manager: Arc<AuthManager>,
    demo_login: bool,
}

impl AuthService {
    pub fn new(api: ApiClient, manager: Arc<AuthManager>, demo_login: bool) -> Self {
        Self {
            api,
            manager,
            demo_login,
        }
    }

    pub fn manager(&self) -> &AuthManager {
        &self.manager
    }

    /// Authenticate against the backend and keep the returned token.
    ///
    /// With demo login enabled, a failed call for an `admin` address yields
    /// a fabricated admin session instead of the error.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = json!({ "email": email, "password": password });

        match self.api.post(LOGIN_ENDPOINT, body).await {
            Ok(payload) => {
                let response = LoginResponse::from_payload(&payload);
                if let Some(token) = &response.token {
                    self.manager.set_token(token.clone());
                }
                info!("Login succeeded for {}", email);
                Ok(response)
            }
            Err(e) => {
                warn!("Login API error: {}", e);

                if !self.demo_login || !email.contains("admin") {
                    return Err(e);
                }

                warn!("Falling back to demo session for {}", email);
                let token = demo_token();
                self.manager.set_token(token.clone());
                self.manager.set_signal();

                Ok(LoginResponse {
                    token: Some(token),
                    user: Some(json!({
                        "id": "1",
                        "name": "Admin User",
                        "email": email,
                        "role": "admin",
                    })),
                })
            }
        }
    }

    /// Drop the token and the auth signal; always succeeds
    pub fn logout(&self) {
        info!("Logging out");
        self.manager.clear_session();
    }

    /// Whether a token is held, recovering one from the auth signal when
    /// demo login is enabled
    pub fn is_authenticated(&self) -> bool {
        if self.manager.is_authenticated() {
            return true;
        }

        if self.demo_login && self.manager.has_signal() {
            info!("Recovering session from auth signal");
            self.manager.set_token(demo_token());
            return true;
        }

        false
    }
}

fn demo_token() -> String {
    format!("demo-token-{}", Utc::now().timestamp_millis())
}
