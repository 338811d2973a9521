use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::flows::FlowStatus;
use crate::flows::otp::OtpInput;
use crate::request::HttpClient;
use crate::storage::KeyValueStore;
use std::time::Duration;
use villa_shared::protocol::{ResendOtpRequest, VerifyEmailRequest};

/// 验证成功后跳转登录页前的停留时间
pub const VERIFIED_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// 邮箱验证状态机
///
/// `OTP 输入 -> 验证中 -> 成功(延迟跳转) | 失败(可重试)`；
/// 重新发送会清空已输入的数字。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailVerification {
    pub email: String,
    pub otp: OtpInput,
    pub status: FlowStatus,
    /// 重新发送成功后的提示
    pub notice: Option<String>,
}

impl EmailVerification {
    pub fn new(email: &str, prefill: Option<&str>) -> Self {
        Self {
            email: email.trim().to_string(),
            otp: prefill.map(OtpInput::prefilled).unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ClientResult<VerifyEmailRequest> {
        if self.email.is_empty() {
            return Err(ClientError::validation(
                "Email is missing. Please sign up again.",
            ));
        }
        if !self.otp.is_complete() {
            return Err(ClientError::validation("Please enter the 4-digit code"));
        }
        Ok(VerifyEmailRequest {
            email: self.email.clone(),
            otp: self.otp.value(),
        })
    }

    pub async fn verify<C: HttpClient, S: KeyValueStore>(
        &mut self,
        api: &ApiClient<C, S>,
    ) -> ClientResult<()> {
        self.notice = None;
        let result = match self.validate() {
            Ok(req) => api.send(&req).await.map(|_| ()),
            Err(e) => Err(e),
        };
        self.settle(result.map_err(|e| e.in_op("verification.verify")))
    }

    pub async fn resend<C: HttpClient, S: KeyValueStore>(
        &mut self,
        api: &ApiClient<C, S>,
    ) -> ClientResult<()> {
        self.otp.clear();
        self.notice = None;
        let req = ResendOtpRequest {
            email: self.email.clone(),
        };
        match api.send(&req).await {
            Ok(ack) => {
                self.status = FlowStatus::Idle;
                self.notice = Some(
                    ack.message
                        .unwrap_or_else(|| "A new code has been sent to your email.".to_string()),
                );
                Ok(())
            }
            Err(e) => {
                self.status = FlowStatus::Failed(e.user_message());
                Err(e.in_op("verification.resend"))
            }
        }
    }

    fn settle(&mut self, result: ClientResult<()>) -> ClientResult<()> {
        match &result {
            Ok(()) => {
                log_info!("[Verify] {} verified", self.email);
                self.status = FlowStatus::Done;
            }
            Err(e) => self.status = FlowStatus::Failed(e.user_message()),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::client;
    use crate::error::ErrorKind;
    use crate::request::HttpMethod;
    use crate::storage::MemoryStore;
    use serde_json::json;

    const VERIFY_URL: &str = "http://api.test/api/users/verify-email";
    const RESEND_URL: &str = "http://api.test/api/users/resend-otp";

    #[tokio::test]
    async fn test_verify_success() {
        let api = client(MemoryStore::new());
        api.http()
            .mock_response(HttpMethod::Post, VERIFY_URL, 200, json!({ "message": "Verified" }));

        let mut flow = EmailVerification::new("ana@example.com", Some("4821"));
        flow.verify(&api).await.unwrap();

        assert_eq!(flow.status, FlowStatus::Done);
        assert_eq!(
            api.http().last_json().unwrap(),
            json!({ "email": "ana@example.com", "otp": "4821" })
        );
    }

    #[tokio::test]
    async fn test_incomplete_code_is_not_sent() {
        let api = client(MemoryStore::new());
        let mut flow = EmailVerification::new("ana@example.com", None);
        flow.otp.input(0, "4");

        let err = flow.verify(&api).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(flow.status.error(), Some("Please enter the 4-digit code"));
        assert_eq!(api.http().request_count(), 0);
    }

    #[tokio::test]
    async fn test_wrong_code_allows_retry() {
        let api = client(MemoryStore::new());
        api.http().mock_response(
            HttpMethod::Post,
            VERIFY_URL,
            400,
            json!({ "message": "Invalid or expired OTP" }),
        );

        let mut flow = EmailVerification::new("ana@example.com", Some("0000"));
        assert!(flow.verify(&api).await.is_err());
        assert_eq!(flow.status.error(), Some("Invalid or expired OTP"));
        assert!(flow.otp.is_complete());
    }

    #[tokio::test]
    async fn test_resend_clears_digits() {
        let api = client(MemoryStore::new());
        api.http()
            .mock_response(HttpMethod::Post, RESEND_URL, 200, json!({}));

        let mut flow = EmailVerification::new("ana@example.com", Some("4821"));
        flow.status = FlowStatus::Failed("Invalid or expired OTP".into());
        flow.resend(&api).await.unwrap();

        assert_eq!(flow.otp, OtpInput::new());
        assert_eq!(flow.status, FlowStatus::Idle);
        assert!(flow.notice.is_some());
        assert_eq!(
            api.http().last_json().unwrap(),
            json!({ "email": "ana@example.com" })
        );
    }
}
