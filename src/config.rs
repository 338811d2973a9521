// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

use std::time::Duration;

/// 这些是默认值，如果构建环境中没有定义对应变量，则使用这些值
const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_MEDIA_UPLOAD_BASE: &str = "https://api.cloudinary.com/v1_1";
const DEFAULT_MEDIA_CLOUD_NAME: &str = "villa";
const DEFAULT_MEDIA_UPLOAD_PRESET: &str = "villa_unsigned";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

pub const VAR_API_BASE_URL: &str = "VILLA_API_BASE_URL";
pub const VAR_MEDIA_UPLOAD_BASE: &str = "VILLA_MEDIA_UPLOAD_BASE";
pub const VAR_MEDIA_CLOUD_NAME: &str = "VILLA_MEDIA_CLOUD_NAME";
pub const VAR_MEDIA_UPLOAD_PRESET: &str = "VILLA_MEDIA_UPLOAD_PRESET";
pub const VAR_REQUEST_TIMEOUT_SECS: &str = "VILLA_REQUEST_TIMEOUT_SECS";
pub const VAR_PREFILL_DEV_OTP: &str = "VILLA_PREFILL_DEV_OTP";

/// 媒体上传服务配置
#[derive(Debug, Clone, PartialEq)]
pub struct MediaConfig {
    pub upload_base: String,
    pub cloud_name: String,
    pub upload_preset: String,
}

impl MediaConfig {
    /// 图片上传地址: `<base>/<cloud>/image/upload`
    pub fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.upload_base.trim_end_matches('/'),
            self.cloud_name
        )
    }
}

/// 应用配置
/// 通过注入的查找函数读取变量，实现与构建环境解耦
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub media: MediaConfig,
    pub request_timeout: Duration,
    /// 注册接口返回 OTP 时是否预填到验证页（仅用于未接通邮件的开发后端）
    pub prefill_dev_otp: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let timeout_secs = lookup(VAR_REQUEST_TIMEOUT_SECS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let prefill_dev_otp = lookup(VAR_PREFILL_DEV_OTP)
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            api_base_url: read(VAR_API_BASE_URL, DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            media: MediaConfig {
                upload_base: read(VAR_MEDIA_UPLOAD_BASE, DEFAULT_MEDIA_UPLOAD_BASE),
                cloud_name: read(VAR_MEDIA_CLOUD_NAME, DEFAULT_MEDIA_CLOUD_NAME),
                upload_preset: read(VAR_MEDIA_UPLOAD_PRESET, DEFAULT_MEDIA_UPLOAD_PRESET),
            },
            request_timeout: Duration::from_secs(timeout_secs),
            prefill_dev_otp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert!(!config.prefill_dev_otp);
        assert_eq!(
            config.media.upload_url(),
            "https://api.cloudinary.com/v1_1/villa/image/upload"
        );
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (VAR_API_BASE_URL, "https://api.villa.test/"),
            (VAR_MEDIA_CLOUD_NAME, "resort"),
            (VAR_REQUEST_TIMEOUT_SECS, "30"),
            (VAR_PREFILL_DEV_OTP, "true"),
        ]);
        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.api_base_url, "https://api.villa.test");
        assert_eq!(config.media.cloud_name, "resort");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.prefill_dev_otp);
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = AppConfig::from_lookup(|k| {
            (k == VAR_REQUEST_TIMEOUT_SECS).then(|| "0".to_string())
        });
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }
}
