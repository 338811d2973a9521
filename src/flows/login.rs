use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult, ErrorKind};
use crate::flows::{require_email, require_fields};
use crate::guard::post_login_destination;
use crate::request::HttpClient;
use crate::storage::KeyValueStore;
use villa_shared::Session;
use villa_shared::protocol::LoginRequest;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> ClientResult<LoginRequest> {
        require_fields(&[("Email", &self.email), ("Password", &self.password)])?;
        require_email(&self.email)?;
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// 登录并保存会话，返回登录后的目的地
pub async fn submit<C: HttpClient, S: KeyValueStore>(
    api: &ApiClient<C, S>,
    form: &LoginForm,
    from: Option<&str>,
) -> ClientResult<String> {
    let req = form.validate()?;
    let resp = api.send(&req).await.map_err(|e| e.in_op("login.submit"))?;

    let session = Session {
        token: resp.token,
        user: resp.user,
    };
    if !api.session().sign_in(&session) {
        return Err(ClientError::decode("login response did not contain a usable token"));
    }
    log_info!("[Login] Signed in as {}", session.user.email);
    Ok(post_login_destination(Some(&session.user), from))
}

pub fn failure_message(err: &ClientError) -> String {
    match err.kind {
        ErrorKind::Unauthorized | ErrorKind::BadRequest | ErrorKind::NotFound
            if err.message().is_empty() =>
        {
            "Invalid email or password.".to_string()
        }
        ErrorKind::Unauthorized | ErrorKind::BadRequest | ErrorKind::NotFound => {
            err.message().to_string()
        }
        _ => err.user_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::client;
    use crate::request::HttpMethod;
    use crate::storage::MemoryStore;
    use serde_json::json;

    const LOGIN_URL: &str = "http://api.test/api/users/login";

    fn form() -> LoginForm {
        LoginForm {
            email: "ana@example.com".into(),
            password: "secret1".into(),
        }
    }

    fn login_body(user_type: &str) -> serde_json::Value {
        json!({
            "token": "jwt-abc",
            "user": {
                "id": "u1",
                "firstName": "Ana",
                "lastName": "Silva",
                "email": "ana@example.com",
                "type": user_type
            }
        })
    }

    #[tokio::test]
    async fn test_admin_goes_to_admin() {
        let api = client(MemoryStore::new());
        api.http()
            .mock_response(HttpMethod::Post, LOGIN_URL, 200, login_body("admin"));

        let dest = submit(&api, &form(), Some("/booking")).await.unwrap();
        assert_eq!(dest, "/admin");
        assert_eq!(api.session().token().as_deref(), Some("jwt-abc"));
    }

    #[tokio::test]
    async fn test_customer_returns_to_original_path_or_home() {
        let api = client(MemoryStore::new());
        api.http()
            .mock_response(HttpMethod::Post, LOGIN_URL, 200, login_body("customer"));

        assert_eq!(submit(&api, &form(), Some("/feedback")).await.unwrap(), "/feedback");
        assert_eq!(submit(&api, &form(), None).await.unwrap(), "/");
    }

    #[tokio::test]
    async fn test_empty_fields_never_hit_network() {
        let api = client(MemoryStore::new());
        for f in [
            LoginForm {
                email: String::new(),
                ..form()
            },
            LoginForm {
                password: String::new(),
                ..form()
            },
        ] {
            let err = submit(&api, &f, None).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
        assert_eq!(api.http().request_count(), 0);
    }

    #[tokio::test]
    async fn test_bad_credentials_message() {
        let api = client(MemoryStore::new());
        api.http()
            .mock_response(HttpMethod::Post, LOGIN_URL, 401, json!({}));

        let err = submit(&api, &form(), None).await.unwrap_err();
        assert_eq!(failure_message(&err), "Invalid email or password.");
        assert!(!api.session().is_authenticated());
    }
}
