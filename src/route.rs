//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;
use villa_shared::{Category, GalleryItem, Room};

/// 后台子路由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRoute {
    Dashboard,
    Bookings,
    Categories,
    CategoryForm,
    Rooms,
    RoomForm,
    Gallery,
    GalleryForm,
    Feedback,
    Users,
}

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    Login,
    Signup,
    VerifyEmail,
    ForgotPassword,
    Booking,
    Feedback,
    Retreats,
    Rooms,
    Gallery,
    Admin(AdminRoute),
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举（忽略查询串与结尾斜杠）
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("/");
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/" => Self::Home,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/verify-email" => Self::VerifyEmail,
            "/forgot-password" => Self::ForgotPassword,
            "/booking" => Self::Booking,
            "/feedback" => Self::Feedback,
            "/retreats" => Self::Retreats,
            "/rooms" => Self::Rooms,
            "/gallery" => Self::Gallery,
            "/admin" => Self::Admin(AdminRoute::Dashboard),
            "/admin/bookings" => Self::Admin(AdminRoute::Bookings),
            "/admin/categories" => Self::Admin(AdminRoute::Categories),
            "/admin/categories/form" => Self::Admin(AdminRoute::CategoryForm),
            "/admin/rooms" => Self::Admin(AdminRoute::Rooms),
            "/admin/rooms/form" => Self::Admin(AdminRoute::RoomForm),
            "/admin/gallery" => Self::Admin(AdminRoute::Gallery),
            "/admin/gallery/form" => Self::Admin(AdminRoute::GalleryForm),
            "/admin/feedback" => Self::Admin(AdminRoute::Feedback),
            "/admin/users" => Self::Admin(AdminRoute::Users),
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::VerifyEmail => "/verify-email",
            Self::ForgotPassword => "/forgot-password",
            Self::Booking => "/booking",
            Self::Feedback => "/feedback",
            Self::Retreats => "/retreats",
            Self::Rooms => "/rooms",
            Self::Gallery => "/gallery",
            Self::Admin(admin) => match admin {
                AdminRoute::Dashboard => "/admin",
                AdminRoute::Bookings => "/admin/bookings",
                AdminRoute::Categories => "/admin/categories",
                AdminRoute::CategoryForm => "/admin/categories/form",
                AdminRoute::Rooms => "/admin/rooms",
                AdminRoute::RoomForm => "/admin/rooms/form",
                AdminRoute::Gallery => "/admin/gallery",
                AdminRoute::GalleryForm => "/admin/gallery/form",
                AdminRoute::Feedback => "/admin/feedback",
                AdminRoute::Users => "/admin/users",
            },
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Booking | Self::Feedback | Self::Admin(_))
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 读取 `path?key=value` 中的查询参数（已解码）
pub fn query_value(path: &str, key: &str) -> Option<String> {
    let (_, query) = path.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// 房型页地址，按名称过滤
pub fn rooms_path_for(category: &str) -> String {
    with_category(AppRoute::Rooms, category)
}

/// 预订页地址，预选房型
pub fn booking_path_for(category: &str) -> String {
    with_category(AppRoute::Booking, category)
}

fn with_category(route: AppRoute, category: &str) -> String {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("category", category)
        .finish();
    format!("{}?{}", route.to_path(), query)
}

// =========================================================
// 导航状态 (随导航携带的数据)
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub enum NavState {
    #[default]
    Empty,
    /// 被守卫拦截前的原始地址
    From(String),
    /// 注册成功后转交给验证页
    VerifyEmail { email: String, otp: Option<String> },
    EditCategory(Category),
    EditRoom(Room),
    EditGallery(GalleryItem),
}

impl NavState {
    pub fn from_path(&self) -> Option<&str> {
        match self {
            NavState::From(path) => Some(path),
            _ => None,
        }
    }
}
