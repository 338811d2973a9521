//! 统一请求分发
//!
//! 所有后端调用都经过 `ApiClient::send`：
//! 拼接地址 -> 附加令牌 -> 发送 -> 状态码映射 -> 鉴权失败时集中清理会话。

use crate::error::{ClientError, ClientResult, ErrorKind};
use crate::request::{HttpClient, HttpRequest};
use crate::session::SessionService;
use crate::storage::KeyValueStore;
use std::rc::Rc;
use url::Url;
use villa_shared::HEADER_AUTHORIZATION;
use villa_shared::protocol::ApiRequest;

/// 鉴权失败回调（前端用于跳转登录页）
pub type AuthFailureHook = Rc<dyn Fn()>;

pub struct ApiClient<C, S> {
    base_url: String,
    http: C,
    session: SessionService<S>,
    on_auth_failure: Option<AuthFailureHook>,
}

impl<C: HttpClient, S: KeyValueStore> ApiClient<C, S> {
    pub fn new(base_url: &str, http: C, session: SessionService<S>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            session,
            on_auth_failure: None,
        }
    }

    /// 注册鉴权失败回调
    pub fn with_auth_failure_hook(mut self, hook: AuthFailureHook) -> Self {
        self.on_auth_failure = Some(hook);
        self
    }

    pub fn session(&self) -> &SessionService<S> {
        &self.session
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// 构造完整请求地址（路径段与查询参数均做编码）
    pub fn endpoint<R: ApiRequest>(&self, req: &R) -> ClientResult<String> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| ClientError::new(ErrorKind::Server, "API base URL cannot hold a path"))?
            .pop_if_empty()
            .extend(req.segments());

        let query = req.query();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.to_string())
    }

    /// 发送类型化请求并解析响应
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ClientResult<R::Response> {
        let op = format!("{} {}", R::METHOD.as_str(), R::PATH);
        let url = self.endpoint(req)?;

        let mut http_req =
            HttpRequest::new(&url, R::METHOD).with_header("Accept", "application/json");

        let token = self.session.token();
        if let Some(token) = &token {
            http_req = http_req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        if R::METHOD.carries_body() {
            let body = serde_json::to_string(req)
                .map_err(|e| ClientError::from(e).in_op_with("api.encode", op.clone()))?;
            http_req = http_req.with_json(body);
        }

        let resp = self
            .http
            .send(http_req)
            .await
            .map_err(|e| e.in_op_with("api.send", op.clone()))?;

        if !resp.ok() {
            let message = resp.error_message().unwrap_or_default();
            let err = ClientError::from_status(resp.status, message).in_op_with("api.send", op);
            // 只有携带了令牌的请求才说明会话失效；登录等凭据接口的 401 是输入错误
            if err.is(ErrorKind::Unauthorized) && token.is_some() && R::REVOKES_SESSION {
                self.handle_auth_failure(&err);
            }
            return Err(err);
        }

        resp.json::<R::Response>()
            .map_err(|e| e.in_op_with("api.decode", op))
    }

    fn handle_auth_failure(&self, err: &ClientError) {
        log_warn!("[Api] Session rejected by backend, signing out: {}", err);
        self.session.sign_out();
        if let Some(hook) = &self.on_auth_failure {
            hook();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::request::{HttpBody, HttpMethod, MockHttpClient};
    use crate::session::tests::sample_session;
    use crate::storage::MemoryStore;
    use serde_json::json;
    use std::cell::Cell;
    use villa_shared::protocol::{
        CreateBookingByCategory, DeleteRoom, ListCategories, ListRooms, LoginRequest,
        ResetPasswordRequest, UpdateCategoryByName,
    };
    use villa_shared::{CalendarDate, Category, CategoryRef, UserType};

    pub(crate) const BASE: &str = "http://api.test";

    pub(crate) fn client(store: MemoryStore) -> ApiClient<MockHttpClient, MemoryStore> {
        ApiClient::new(BASE, MockHttpClient::new(), SessionService::new(store))
    }

    pub(crate) fn signed_in_client(user_type: UserType) -> ApiClient<MockHttpClient, MemoryStore> {
        let store = MemoryStore::new();
        SessionService::new(store.clone()).sign_in(&sample_session(user_type));
        client(store)
    }

    #[test]
    fn test_endpoint_encodes_names() {
        let api = client(MemoryStore::new());
        let rooms = ListRooms {
            category: Some(CategoryRef::new("TREETOP LUXURY")),
        };
        assert_eq!(
            api.endpoint(&rooms).unwrap(),
            "http://api.test/api/rooms?category=TREETOP+LUXURY"
        );

        let by_name = UpdateCategoryByName {
            name: "GARDEN VILLA".into(),
            category: Category {
                id: String::new(),
                name: "GARDEN VILLA".into(),
                price: 1.0,
                description: String::new(),
                features: vec![],
                image: String::new(),
            },
        };
        assert_eq!(
            api.endpoint(&by_name).unwrap(),
            "http://api.test/api/categories/name/GARDEN%20VILLA"
        );
        assert_eq!(
            api.endpoint(&ListRooms::default()).unwrap(),
            "http://api.test/api/rooms"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = ApiClient::new(
            "https://villa.test/backend/",
            MockHttpClient::new(),
            SessionService::new(MemoryStore::new()),
        );
        assert_eq!(
            api.endpoint(&ListCategories).unwrap(),
            "https://villa.test/backend/api/categories"
        );
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_present() {
        let api = signed_in_client(UserType::Customer);
        api.http().mock_response(
            HttpMethod::Delete,
            "http://api.test/api/rooms/12",
            200,
            json!({ "message": "deleted" }),
        );

        let ack = api.send(&DeleteRoom { room_id: 12 }).await.unwrap();
        assert_eq!(ack.message.as_deref(), Some("deleted"));

        let req = api.http().last_request().unwrap();
        assert_eq!(
            req.headers.get("Authorization").map(String::as_str),
            Some("Bearer jwt-token")
        );
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn test_public_list_carries_token_and_tears_down_on_401() {
        let api = signed_in_client(UserType::Admin);
        api.http().mock_response(
            HttpMethod::Get,
            "http://api.test/api/categories",
            401,
            json!({ "message": "jwt expired" }),
        );

        let err = api.send(&ListCategories).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(
            api.http()
                .last_request()
                .unwrap()
                .headers
                .get("Authorization")
                .map(String::as_str),
            Some("Bearer jwt-token")
        );
        assert!(!api.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_credential_endpoint_401_keeps_session() {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let api = signed_in_client(UserType::Customer)
            .with_auth_failure_hook(Rc::new(move || flag.set(true)));
        api.http().mock_response(
            HttpMethod::Post,
            "http://api.test/api/users/reset-password",
            401,
            json!({ "message": "Invalid or expired OTP" }),
        );

        let err = api
            .send(&ResetPasswordRequest {
                email: "guest@villa.test".into(),
                otp: "0000".into(),
                new_password: "secret1".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert!(api.session().is_authenticated());
        assert!(!fired.get());
    }

    #[tokio::test]
    async fn test_no_token_no_header() {
        let api = client(MemoryStore::new());
        api.http().mock_response(
            HttpMethod::Get,
            "http://api.test/api/categories",
            200,
            json!([]),
        );
        let categories = api.send(&ListCategories).await.unwrap();
        assert!(categories.is_empty());
        assert!(
            !api.http()
                .last_request()
                .unwrap()
                .headers
                .contains_key("Authorization")
        );
    }

    #[tokio::test]
    async fn test_json_body_for_post() {
        let api = signed_in_client(UserType::Customer);
        let req = CreateBookingByCategory {
            category: "TREETOP LUXURY".into(),
            start: CalendarDate::parse("2026-11-01").unwrap(),
            end: CalendarDate::parse("2026-11-03").unwrap(),
            notes: String::new(),
        };
        let _ = api.send(&req).await;

        let sent = api.http().last_request().unwrap();
        assert!(matches!(sent.body, Some(HttpBody::Json(_))));
        assert_eq!(
            sent.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(api.http().last_json().unwrap()["category"], "TREETOP LUXURY");
    }

    #[tokio::test]
    async fn test_unauthorized_tears_down_session_and_calls_hook() {
        for status in [401u16, 403] {
            let store = MemoryStore::new();
            SessionService::new(store.clone()).sign_in(&sample_session(UserType::Admin));

            let fired = Rc::new(Cell::new(0));
            let counter = fired.clone();
            let api = client(store.clone())
                .with_auth_failure_hook(Rc::new(move || counter.set(counter.get() + 1)));
            api.http().mock_response(
                HttpMethod::Get,
                "http://api.test/api/categories",
                status,
                json!({ "message": "jwt expired" }),
            );

            let err = api.send(&ListCategories).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Unauthorized);
            assert_eq!(err.status, Some(status));
            assert!(!api.session().is_authenticated());
            assert_eq!(fired.get(), 1);
        }
    }

    #[tokio::test]
    async fn test_login_rejection_is_not_a_teardown() {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let api = client(MemoryStore::new()).with_auth_failure_hook(Rc::new(move || flag.set(true)));
        api.http().mock_response(
            HttpMethod::Post,
            "http://api.test/api/users/login",
            401,
            json!({ "message": "Invalid credentials" }),
        );

        let err = api
            .send(&LoginRequest {
                email: "a@b.c".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message(), "Invalid credentials");
        assert!(!fired.get());
    }

    #[tokio::test]
    async fn test_status_codes_map_to_kinds() {
        let api = signed_in_client(UserType::Admin);
        let cases = [
            (404u16, ErrorKind::NotFound),
            (409, ErrorKind::Conflict),
            (400, ErrorKind::BadRequest),
            (500, ErrorKind::Server),
        ];
        for (status, kind) in cases {
            api.http().mock_response(
                HttpMethod::Delete,
                "http://api.test/api/rooms/1",
                status,
                json!({}),
            );
            let err = api.send(&DeleteRoom { room_id: 1 }).await.unwrap_err();
            assert_eq!(err.kind, kind, "status {}", status);
        }
        assert!(api.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_network_and_decode_failures() {
        let api = client(MemoryStore::new());
        api.http().mock_unreachable("http://api.test/api/categories");
        let err = api.send(&ListCategories).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Network);

        let api = client(MemoryStore::new());
        api.http().mock_response(
            HttpMethod::Get,
            "http://api.test/api/categories",
            200,
            json!({ "unexpected": true }),
        );
        let err = api.send(&ListCategories).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
    }
}
