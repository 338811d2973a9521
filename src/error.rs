use std::fmt;

// =========================================================
// 错误类别枚举
// =========================================================

/// 错误类别
/// 由 HTTP 状态码或本地校验决定，界面据此选择提示文案
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 本地表单校验失败（不会发出请求）
    Validation,
    /// 400 / 422: 后端拒绝了请求内容
    BadRequest,
    /// 401 / 403: 会话失效，需要重新登录
    Unauthorized,
    /// 404: 资源不存在
    NotFound,
    /// 409: 资源冲突（预订无可用房间、重复反馈）
    Conflict,
    /// 其它非 2xx 响应
    Server,
    /// 网络不可达
    Network,
    /// 请求超时
    Timeout,
    /// 响应体无法解析
    Decode,
    /// 媒体上传失败
    Upload,
    /// 所属页面已卸载，结果被丢弃
    Cancelled,
}

impl ErrorKind {
    /// 根据非 2xx 状态码映射错误类别
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => ErrorKind::BadRequest,
            401 | 403 => ErrorKind::Unauthorized,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            _ => ErrorKind::Server,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Server => "SERVER_ERROR",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::Decode => "DECODE_ERROR",
            ErrorKind::Upload => "UPLOAD_FAILED",
            ErrorKind::Cancelled => "CANCELLED",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "api.send", "media.upload"
    pub operation: String,
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端错误
///
/// - kind: 错误类别
/// - status: 触发错误的 HTTP 状态码（本地错误为 None）
/// - message: 后端返回或本地生成的消息
/// - source: 原始错误（可选）
/// - spans: 调用追踪
#[derive(Debug)]
pub struct ClientError {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    pub message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    spans: Vec<ErrorSpan>,
}

impl ClientError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    pub fn upload(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Upload, message)
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "request cancelled")
    }

    /// 从非 2xx 响应构造
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(ErrorKind::from_status(status), message);
        err.status = Some(status);
        err
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    /// 转换为界面内联错误区显示的文本
    ///
    /// 各流程对 404 / 409 有更具体的文案，会在调用前自行处理。
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::Validation | ErrorKind::Upload => self.message.clone(),
            ErrorKind::BadRequest | ErrorKind::Conflict | ErrorKind::NotFound
                if !self.message.is_empty() =>
            {
                self.message.clone()
            }
            ErrorKind::NotFound => "The requested item could not be found.".to_string(),
            ErrorKind::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            ErrorKind::Network | ErrorKind::Timeout => {
                "Network error. Please check your connection and try again.".to_string()
            }
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status)?;
        }

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

// =========================================================
// 类型转换实现
// =========================================================

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::decode(e.to_string()).with_source(e)
    }
}

impl From<url::ParseError> for ClientError {
    fn from(e: url::ParseError) -> Self {
        ClientError::new(ErrorKind::Server, format!("invalid URL: {}", e)).with_source(e)
    }
}

impl From<villa_shared::date::StayDatesError> for ClientError {
    fn from(e: villa_shared::date::StayDatesError) -> Self {
        ClientError::validation(e.to_string())
    }
}
