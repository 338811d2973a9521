use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;

pub use date::CalendarDate;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const STORAGE_TOKEN_KEY: &str = "token";
pub const STORAGE_USER_KEY: &str = "user";
pub const STORAGE_SPLASH_KEY: &str = "hasVisited";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 预订表单可选的房型（固定三种，后端按名称分配具体房间）
pub const BOOKABLE_CATEGORIES: [&str; 3] = ["TREETOP LUXURY", "GARDEN VILLA", "RIVERSIDE SUITE"];

// =========================================================
// 会话 (Session)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Admin,
    #[default]
    Customer,
}

/// 登录后缓存在浏览器中的用户资料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(alias = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(rename = "type", default)]
    pub user_type: UserType,
}

impl UserType {
    pub fn label(&self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::Customer => "customer",
        }
    }
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    #[default]
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "confirmed")]
    Confirmed,
    #[serde(alias = "cancelled")]
    Cancelled,
}

impl BookingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: u64,
    #[serde(default)]
    pub room_id: Option<u64>,
    #[serde(default)]
    pub category: String,
    pub start: CalendarDate,
    pub end: CalendarDate,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: u64,
    pub category: String,
    pub max_guests: u32,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub special_description: String,
    #[serde(default)]
    pub notes: String,
}

impl Room {
    pub fn category_ref(&self) -> CategoryRef {
        CategoryRef::new(&self.category)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub category: String,
}

impl GalleryItem {
    pub fn category_ref(&self) -> CategoryRef {
        CategoryRef::new(&self.category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FeedbackStatus {
    #[default]
    #[serde(alias = "visible")]
    Visible,
    #[serde(alias = "hidden")]
    Hidden,
}

impl FeedbackStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FeedbackStatus::Visible => "Visible",
            FeedbackStatus::Hidden => "Hidden",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            FeedbackStatus::Visible => FeedbackStatus::Hidden,
            FeedbackStatus::Hidden => FeedbackStatus::Visible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(rename = "_id")]
    pub id: String,
    pub booking_id: u64,
    #[serde(default)]
    pub room_id: Option<u64>,
    pub email: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub status: FeedbackStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(rename = "type", default)]
    pub user_type: UserType,
}

// =========================================================
// 房型引用 (Category reference by name)
// =========================================================

/// 按显示名称引用房型
///
/// 后端以名称字符串关联房间/图库与房型，而非外键。
/// 所有名称比较都收敛到这里，避免各处各自做字符串匹配。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef(String);

impl CategoryRef {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_string())
    }

    /// 作为 `?category=` 过滤参数发送的原始名称
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name.trim())
    }

    pub fn matches(&self, category: &Category) -> bool {
        self.matches_name(&category.name)
    }
}

impl From<&Category> for CategoryRef {
    fn from(category: &Category) -> Self {
        Self::new(&category.name)
    }
}
