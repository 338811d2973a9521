use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::ClientResult;
use crate::flows::{require_email, require_fields, require_new_password};
use crate::request::HttpClient;
use crate::route::NavState;
use crate::storage::KeyValueStore;
use villa_shared::protocol::RegisterRequest;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> ClientResult<RegisterRequest> {
        require_fields(&[
            ("First name", &self.first_name),
            ("Last name", &self.last_name),
            ("Email", &self.email),
            ("Password", &self.password),
            ("Confirm password", &self.confirm_password),
        ])?;
        require_email(&self.email)?;
        require_new_password(&self.password, &self.confirm_password)?;

        Ok(RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// 注册账户，成功后返回跳转验证页所需的导航状态
///
/// 后端回传的 OTP 只有在显式开启开发预填时才会带入验证页。
pub async fn submit<C: HttpClient, S: KeyValueStore>(
    api: &ApiClient<C, S>,
    config: &AppConfig,
    form: &RegistrationForm,
) -> ClientResult<NavState> {
    let req = form.validate()?;
    let resp = api.send(&req).await.map_err(|e| e.in_op("registration.submit"))?;

    let email = resp.email.unwrap_or(req.email);
    let otp = resp.otp.filter(|_| config.prefill_dev_otp);
    log_info!("[Signup] Account created for {}, awaiting verification", email);
    Ok(NavState::VerifyEmail { email, otp })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::client;
    use crate::config::VAR_PREFILL_DEV_OTP;
    use crate::error::ErrorKind;
    use crate::request::HttpMethod;
    use crate::storage::MemoryStore;
    use serde_json::json;

    const REGISTER_URL: &str = "http://api.test/api/users/register";

    fn form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            email: "ana@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        }
    }

    #[tokio::test]
    async fn test_success_forwards_email_without_otp_by_default() {
        let api = client(MemoryStore::new());
        api.http().mock_response(
            HttpMethod::Post,
            REGISTER_URL,
            201,
            json!({ "message": "Registered", "email": "ana@example.com", "otp": "4821" }),
        );

        let state = submit(&api, &AppConfig::default(), &form()).await.unwrap();
        assert_eq!(
            state,
            NavState::VerifyEmail {
                email: "ana@example.com".into(),
                otp: None
            }
        );

        let body = api.http().last_json().unwrap();
        assert_eq!(body["firstName"], "Ana");
        assert_eq!(body["lastName"], "Silva");
    }

    #[tokio::test]
    async fn test_dev_prefill_forwards_otp() {
        let api = client(MemoryStore::new());
        api.http().mock_response(
            HttpMethod::Post,
            REGISTER_URL,
            201,
            json!({ "email": "ana@example.com", "otp": 4821 }),
        );
        let config =
            AppConfig::from_lookup(|key| (key == VAR_PREFILL_DEV_OTP).then(|| "true".to_string()));

        let state = submit(&api, &config, &form()).await.unwrap();
        assert_eq!(
            state,
            NavState::VerifyEmail {
                email: "ana@example.com".into(),
                otp: Some("4821".into())
            }
        );
    }

    #[tokio::test]
    async fn test_local_validation_blocks_request() {
        let api = client(MemoryStore::new());
        let cases = [
            (
                RegistrationForm {
                    confirm_password: "secret2".into(),
                    ..form()
                },
                "Passwords do not match",
            ),
            (
                RegistrationForm {
                    password: "abc".into(),
                    confirm_password: "abc".into(),
                    ..form()
                },
                "Password must be at least 6 characters",
            ),
            (
                RegistrationForm {
                    last_name: " ".into(),
                    ..form()
                },
                "Last name is required",
            ),
        ];

        for (f, message) in cases {
            let err = submit(&api, &AppConfig::default(), &f).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
            assert_eq!(err.message(), message);
        }
        assert_eq!(api.http().request_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_shows_backend_message() {
        let api = client(MemoryStore::new());
        api.http().mock_response(
            HttpMethod::Post,
            REGISTER_URL,
            400,
            json!({ "message": "User already exists" }),
        );
        let err = submit(&api, &AppConfig::default(), &form()).await.unwrap_err();
        assert_eq!(err.user_message(), "User already exists");
    }
}
