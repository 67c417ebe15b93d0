//! API 网关
//!
//! 所有后端请求的唯一出口：
//! 拼接根地址、附带 Bearer token、施加超时，并统一处理 401。

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::HEADER_AUTHORIZATION;
use crate::config::{ClientConfig, DEFAULT_REQUEST_TIMEOUT};
use crate::error::{PortalError, PortalResult};
use crate::protocol::ApiRequest;
use crate::session::{KeyValueStore, SessionStore};

// =========================================================
// HTTP 抽象层
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// 是否携带 JSON body
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
    /// 超过该时长仍未收到响应即放弃
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 空 body 按 `null` 解析
    pub fn json<T: DeserializeOwned>(&self) -> PortalResult<T> {
        let text = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        serde_json::from_str(text).map_err(PortalError::from)
    }
}

/// 实际发送请求的传输层，需自行实现超时
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> PortalResult<HttpResponse>;
}

/// 会话失效后的整页跳转
pub trait Navigator {
    fn redirect_to_login(&self);
}

// =========================================================
// 网关
// =========================================================

#[derive(Debug, Clone)]
pub struct ApiGateway<C, K, N> {
    config: ClientConfig,
    client: C,
    session: SessionStore<K>,
    navigator: N,
}

impl<C, K, N> ApiGateway<C, K, N>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    pub fn new(config: ClientConfig, client: C, store: K, navigator: N) -> Self {
        Self {
            config,
            client,
            session: SessionStore::new(store),
            navigator,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore<K> {
        &self.session
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// 发送一次请求
    ///
    /// - 有 token 时附带 `Authorization: Bearer <token>`
    /// - 401: 先清空会话再跳转登录页，然后以 `Unauthorized` 失败
    /// - 其他非 2xx: 以 `Rejected` 失败，携带后端提示语
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> PortalResult<HttpResponse> {
        let url = self.config.url(path);
        let mut req = HttpRequest::new(&url, method)
            .with_header("Accept", "application/json")
            .with_timeout(self.config.request_timeout);

        if let Some(token) = self.session.token() {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }
        if let Some(body) = body {
            req = req
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        debug!("{} {}", method.as_str(), url);
        let resp = self.client.send(req).await.inspect_err(|e| {
            warn!("{} {} failed: {}", method.as_str(), url, e);
        })?;

        if resp.status == 401 {
            warn!("{} {} returned 401, clearing session", method.as_str(), url);
            self.session.clear();
            self.navigator.redirect_to_login();
            return Err(PortalError::from_response(resp.status, &resp.body));
        }

        if !resp.is_success() {
            let err = PortalError::from_response(resp.status, &resp.body);
            warn!("{} {} rejected: {}", method.as_str(), url, err);
            return Err(err);
        }

        Ok(resp)
    }

    /// 发送类型化请求并解析响应
    pub async fn call<R: ApiRequest>(&self, req: &R) -> PortalResult<R::Response> {
        let body = if R::METHOD.has_body() {
            Some(serde_json::to_string(req)?)
        } else {
            None
        };
        let resp = self.execute(R::METHOD, &req.path(), body).await?;
        resp.json()
    }
}

// =========================================================
// 测试工具
// =========================================================


#[cfg(test)]
mod tests;
