use std::fmt;

use serde::Deserialize;

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误分类
///
/// 前端只关心“怎么展示、要不要登出”，所以分类比后端粗。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalErrorStatus {
    /// 网络不可达、fetch 被拒绝等
    Network,
    /// 超过单次请求的时间上限
    Timeout,
    /// 401: 会话已失效
    Unauthorized,
    /// 后端返回了非 2xx（401 除外）
    Rejected,
    /// JSON 编解码失败
    Serialization,
    /// 浏览器存储不可用
    Storage,
}

impl PortalErrorStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            PortalErrorStatus::Network => "NETWORK_ERROR",
            PortalErrorStatus::Timeout => "REQUEST_TIMEOUT",
            PortalErrorStatus::Unauthorized => "UNAUTHORIZED",
            PortalErrorStatus::Rejected => "REQUEST_REJECTED",
            PortalErrorStatus::Serialization => "JSON_PARSE_ERROR",
            PortalErrorStatus::Storage => "STORAGE_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

#[derive(Debug, Clone)]
pub struct PortalError {
    pub status: PortalErrorStatus,
    pub message: String,
    /// 服务端响应码（仅当确实收到了响应）
    http_status: Option<u16>,
    /// 后端在 body 中给出的 `message` / `error` 字段
    backend_message: Option<String>,
}

impl PortalError {
    pub fn new(status: PortalErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            http_status: None,
            backend_message: None,
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PortalErrorStatus::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(PortalErrorStatus::Timeout, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(PortalErrorStatus::Unauthorized, message).with_http_status(401)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(PortalErrorStatus::Serialization, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(PortalErrorStatus::Storage, message)
    }

    /// 由非 2xx 响应构造错误，尽量从 body 中取出后端的提示语
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = format!("request failed with status {}", status);
        let mut err = if status == 401 {
            Self::unauthorized(message)
        } else {
            Self::new(PortalErrorStatus::Rejected, message).with_http_status(status)
        };
        err.backend_message = ErrorBody::extract(body);
        err
    }

    // --- Builders ---

    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    pub fn backend_message(&self) -> Option<&str> {
        self.backend_message.as_deref()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == PortalErrorStatus::Unauthorized
    }

    /// 横幅提示文本：后端给了就用后端的，否则用调用方的兜底文案
    pub fn banner_text(&self, fallback: &str) -> String {
        self.backend_message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;
        if let Some(msg) = &self.backend_message {
            write!(f, ": {}", msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for PortalError {}

impl From<serde_json::Error> for PortalError {
    fn from(e: serde_json::Error) -> Self {
        PortalError::serialization(e.to_string())
    }
}

pub type PortalResult<T> = std::result::Result<T, PortalError>;

// =========================================================
// 后端错误 body
// =========================================================

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn extract(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_prefers_message_then_error() {
        let err = PortalError::from_response(400, r#"{"message":"Email taken","error":"x"}"#);
        assert_eq!(err.banner_text("fallback"), "Email taken");

        let err = PortalError::from_response(409, r#"{"error":"Duplicate course"}"#);
        assert_eq!(err.banner_text("fallback"), "Duplicate course");
        assert_eq!(err.status, PortalErrorStatus::Rejected);
        assert_eq!(err.http_status(), Some(409));
    }

    #[test]
    fn unreadable_body_falls_back() {
        let err = PortalError::from_response(500, "<html>Bad Gateway</html>");
        assert_eq!(err.banner_text("Login failed"), "Login failed");

        let err = PortalError::from_response(400, r#"{"message":"   "}"#);
        assert_eq!(err.banner_text("Login failed"), "Login failed");
    }

    #[test]
    fn status_401_is_classified_unauthorized() {
        let err = PortalError::from_response(401, "");
        assert!(err.is_unauthorized());
        assert_eq!(err.error_code(), "UNAUTHORIZED");
        assert_eq!(err.http_status(), Some(401));
    }
}
