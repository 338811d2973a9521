use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::flows::otp::OTP_LEN;
use crate::flows::{FlowStatus, require_email, require_fields, require_new_password};
use crate::request::HttpClient;
use crate::storage::KeyValueStore;
use std::time::Duration;
use villa_shared::protocol::{ForgotPasswordRequest, ResetPasswordRequest};

/// 重置成功后跳转登录页前的停留时间
pub const RESET_REDIRECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetStep {
    #[default]
    RequestCode,
    EnterCode,
    Completed,
}

/// 找回密码状态机
///
/// 失败时停留在当前步骤，已填写的内容保留。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordReset {
    pub step: ResetStep,
    pub status: FlowStatus,
    pub email: String,
    pub otp: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordReset {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn send_code<C: HttpClient, S: KeyValueStore>(
        &mut self,
        api: &ApiClient<C, S>,
    ) -> ClientResult<()> {
        let result = match self.code_request() {
            Ok(req) => api.send(&req).await.map(|_| ()),
            Err(e) => Err(e),
        };
        self.settle(result, ResetStep::EnterCode, "password_reset.send_code")
    }

    pub async fn reset<C: HttpClient, S: KeyValueStore>(
        &mut self,
        api: &ApiClient<C, S>,
    ) -> ClientResult<()> {
        let result = match self.reset_request() {
            Ok(req) => api.send(&req).await.map(|_| ()),
            Err(e) => Err(e),
        };
        self.settle(result, ResetStep::Completed, "password_reset.reset")
    }

    fn code_request(&self) -> ClientResult<ForgotPasswordRequest> {
        require_fields(&[("Email", &self.email)])?;
        require_email(&self.email)?;
        Ok(ForgotPasswordRequest {
            email: self.email.trim().to_string(),
        })
    }

    fn reset_request(&self) -> ClientResult<ResetPasswordRequest> {
        let otp = self.otp.trim();
        if otp.len() != OTP_LEN || !otp.chars().all(|c| c.is_ascii_digit()) {
            return Err(ClientError::validation("Please enter the 4-digit code"));
        }
        require_new_password(&self.new_password, &self.confirm_password)?;
        Ok(ResetPasswordRequest {
            email: self.email.trim().to_string(),
            otp: otp.to_string(),
            new_password: self.new_password.clone(),
        })
    }

    fn settle(&mut self, result: ClientResult<()>, next: ResetStep, op: &str) -> ClientResult<()> {
        match result {
            Ok(()) => {
                self.step = next;
                self.status = if next == ResetStep::Completed {
                    FlowStatus::Done
                } else {
                    FlowStatus::Idle
                };
                Ok(())
            }
            Err(e) => {
                self.status = FlowStatus::Failed(e.user_message());
                Err(e.in_op(op))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::client;
    use crate::request::HttpMethod;
    use crate::storage::MemoryStore;
    use serde_json::json;

    const FORGOT_URL: &str = "http://api.test/api/users/forgot-password";
    const RESET_URL: &str = "http://api.test/api/users/reset-password";

    #[tokio::test]
    async fn test_full_reset() {
        let api = client(MemoryStore::new());
        api.http()
            .mock_response(HttpMethod::Post, FORGOT_URL, 200, json!({ "message": "sent" }));
        api.http()
            .mock_response(HttpMethod::Post, RESET_URL, 200, json!({ "message": "reset" }));

        let mut flow = PasswordReset::new();
        flow.email = "ana@example.com".into();
        flow.send_code(&api).await.unwrap();
        assert_eq!(flow.step, ResetStep::EnterCode);

        flow.otp = "4821".into();
        flow.new_password = "newpass".into();
        flow.confirm_password = "newpass".into();
        flow.reset(&api).await.unwrap();

        assert_eq!(flow.step, ResetStep::Completed);
        assert_eq!(flow.status, FlowStatus::Done);
        assert_eq!(
            api.http().last_json().unwrap(),
            json!({ "email": "ana@example.com", "otp": "4821", "newPassword": "newpass" })
        );
    }

    #[tokio::test]
    async fn test_failure_keeps_step() {
        let api = client(MemoryStore::new());
        api.http().mock_response(
            HttpMethod::Post,
            RESET_URL,
            400,
            json!({ "message": "Invalid or expired OTP" }),
        );

        let mut flow = PasswordReset {
            step: ResetStep::EnterCode,
            email: "ana@example.com".into(),
            otp: "0000".into(),
            new_password: "newpass".into(),
            confirm_password: "newpass".into(),
            ..PasswordReset::default()
        };
        assert!(flow.reset(&api).await.is_err());
        assert_eq!(flow.step, ResetStep::EnterCode);
        assert_eq!(flow.status.error(), Some("Invalid or expired OTP"));
        assert_eq!(flow.otp, "0000");
    }

    #[tokio::test]
    async fn test_local_checks_send_nothing() {
        let api = client(MemoryStore::new());

        let mut flow = PasswordReset::new();
        flow.email = "not-an-email".into();
        assert!(flow.send_code(&api).await.is_err());
        assert_eq!(flow.step, ResetStep::RequestCode);

        let mut flow = PasswordReset {
            step: ResetStep::EnterCode,
            email: "ana@example.com".into(),
            otp: "48".into(),
            new_password: "newpass".into(),
            confirm_password: "newpass".into(),
            ..PasswordReset::default()
        };
        assert!(flow.reset(&api).await.is_err());
        assert_eq!(flow.status.error(), Some("Please enter the 4-digit code"));

        flow.otp = "4821".into();
        flow.confirm_password = "different".into();
        assert!(flow.reset(&api).await.is_err());
        assert_eq!(flow.status.error(), Some("Passwords do not match"));

        assert_eq!(api.http().request_count(), 0);
    }
}
