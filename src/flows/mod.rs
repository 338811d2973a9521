//! 多步表单流程
//!
//! 每个流程都是一个小型线性状态机：
//! 本地校验 -> 请求（加载中）-> 成功或内联错误。
//! 校验失败时绝不发出网络请求；请求结束后（无论成败）都会清除加载状态。

pub mod booking;
pub mod feedback;
pub mod login;
pub mod otp;
pub mod password_reset;
pub mod registration;
pub mod verification;

use crate::error::{ClientError, ClientResult};

pub const MIN_PASSWORD_LEN: usize = 6;

/// 流程状态槽：加载标记 + 错误显示
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Done,
}

impl FlowStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FlowStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FlowStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// 必填字段检查，返回第一个为空的字段
pub fn require_fields(fields: &[(&str, &str)]) -> ClientResult<()> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((label, _)) => Err(ClientError::validation(format!("{} is required", label))),
        None => Ok(()),
    }
}

/// 邮箱只检查含有 `@`，其余交给后端
pub fn require_email(email: &str) -> ClientResult<()> {
    if email.trim().contains('@') {
        Ok(())
    } else {
        Err(ClientError::validation("Please enter a valid email address"))
    }
}

/// 新密码规则：长度与确认一致
pub fn require_new_password(password: &str, confirm: &str) -> ClientResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ClientError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if password != confirm {
        return Err(ClientError::validation("Passwords do not match"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_fields_reports_first_blank() {
        let err = require_fields(&[("Name", "Ana"), ("Email", "  "), ("Phone", "")]).unwrap_err();
        assert_eq!(err.message(), "Email is required");
        assert!(require_fields(&[("Name", "Ana")]).is_ok());
    }

    #[test]
    fn test_email_shape() {
        assert!(require_email("ana@villa.com").is_ok());
        assert!(require_email(" ana@localhost ").is_ok());
        assert!(require_email("ana").is_err());
        assert!(require_email("   ").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(require_new_password("secret", "secret").is_ok());
        assert_eq!(
            require_new_password("short", "short").unwrap_err().message(),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            require_new_password("secret1", "secret2").unwrap_err().message(),
            "Passwords do not match"
        );
    }
}
