use crate::{
    Booking, CalendarDate, Category, CategoryRef, Feedback, FeedbackStatus, GalleryItem, Room,
    SessionUser, User,
};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or prefix, when the request adds path parameters).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether a 401/403 here means the stored session is no longer valid.
    /// Credential endpoints (login, reset, ...) answer 401 for bad input instead.
    const REVOKES_SESSION: bool = true;

    /// Path segments, un-encoded. Requests with path parameters override this.
    fn segments(&self) -> Vec<String> {
        split_path(Self::PATH)
    }

    /// Query pairs, un-encoded.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn path_with(path: &str, params: &[&str]) -> Vec<String> {
    let mut segments = split_path(path);
    segments.extend(params.iter().map(|p| p.to_string()));
    segments
}

// =========================================================
// Common Responses
// =========================================================

/// Generic acknowledgement (`{ "message": ... }` or an empty body)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Only present when the backend runs without mail delivery.
    #[serde(default, deserialize_with = "code_as_string")]
    pub otp: Option<String>,
}

/// OTP codes come back either as a JSON string or a number.
fn code_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Code>::deserialize(deserializer)?.map(|code| match code {
        Code::Text(s) => s,
        Code::Number(n) => format!("{:04}", n),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_users: u64,
}

impl UserPage {
    /// Drops a user from this page and keeps the total in step.
    pub fn remove(&mut self, id: &str) -> Option<User> {
        let index = self.users.iter().position(|u| u.id == id)?;
        self.total_users = self.total_users.saturating_sub(1);
        Some(self.users.remove(index))
    }

    /// The page was emptied by local removals and an earlier page exists.
    pub fn should_step_back(&self) -> bool {
        self.users.is_empty() && self.current_page > 1
    }
}

// =========================================================
// Account Requests
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/api/users/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const REVOKES_SESSION: bool = false;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;
    const PATH: &'static str = "/api/users/register";
    const METHOD: HttpMethod = HttpMethod::Post;
    const REVOKES_SESSION: bool = false;
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub otp: String,
}

impl ApiRequest for VerifyEmailRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/users/verify-email";
    const METHOD: HttpMethod = HttpMethod::Post;
    const REVOKES_SESSION: bool = false;
}

#[derive(Debug, Clone, Serialize)]
pub struct ResendOtpRequest {
    pub email: String,
}

impl ApiRequest for ResendOtpRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/users/resend-otp";
    const METHOD: HttpMethod = HttpMethod::Post;
    const REVOKES_SESSION: bool = false;
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ApiRequest for ForgotPasswordRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/users/forgot-password";
    const METHOD: HttpMethod = HttpMethod::Post;
    const REVOKES_SESSION: bool = false;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

impl ApiRequest for ResetPasswordRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/users/reset-password";
    const METHOD: HttpMethod = HttpMethod::Post;
    const REVOKES_SESSION: bool = false;
}

// =========================================================
// Category Requests
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListCategories;

impl ApiRequest for ListCategories {
    type Response = Vec<Category>;
    const PATH: &'static str = "/api/categories";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCategory(pub Category);

impl ApiRequest for CreateCategory {
    type Response = Category;
    const PATH: &'static str = "/api/categories";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateCategory {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub category: Category,
}

impl ApiRequest for UpdateCategory {
    type Response = Category;
    const PATH: &'static str = "/api/categories";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn segments(&self) -> Vec<String> {
        path_with(Self::PATH, &[&self.id])
    }
}

/// Update addressed by the category's current display name.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCategoryByName {
    #[serde(skip)]
    pub name: String,
    #[serde(flatten)]
    pub category: Category,
}

impl ApiRequest for UpdateCategoryByName {
    type Response = Category;
    const PATH: &'static str = "/api/categories/name";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn segments(&self) -> Vec<String> {
        path_with(Self::PATH, &[&self.name])
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteCategory {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteCategory {
    type Response = Ack;
    const PATH: &'static str = "/api/categories";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn segments(&self) -> Vec<String> {
        path_with(Self::PATH, &[&self.id])
    }
}

// =========================================================
// Room Requests
// =========================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListRooms {
    #[serde(skip)]
    pub category: Option<CategoryRef>,
}

impl ApiRequest for ListRooms {
    type Response = Vec<Room>;
    const PATH: &'static str = "/api/rooms";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn query(&self) -> Vec<(&'static str, String)> {
        self.category
            .iter()
            .map(|c| ("category", c.as_str().to_string()))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRoom(pub Room);

impl ApiRequest for CreateRoom {
    type Response = Room;
    const PATH: &'static str = "/api/rooms";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateRoom {
    #[serde(skip)]
    pub room_id: u64,
    #[serde(flatten)]
    pub room: Room,
}

impl ApiRequest for UpdateRoom {
    type Response = Room;
    const PATH: &'static str = "/api/rooms";
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn segments(&self) -> Vec<String> {
        path_with(Self::PATH, &[&self.room_id.to_string()])
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteRoom {
    #[serde(skip)]
    pub room_id: u64,
}

impl ApiRequest for DeleteRoom {
    type Response = Ack;
    const PATH: &'static str = "/api/rooms";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn segments(&self) -> Vec<String> {
        path_with(Self::PATH, &[&self.room_id.to_string()])
    }
}

// =========================================================
// Booking Requests
// =========================================================

/// Book by room type; the backend allocates a concrete free room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateBookingByCategory {
    pub category: String,
    pub start: CalendarDate,
    pub end: CalendarDate,
    pub notes: String,
}

impl ApiRequest for CreateBookingByCategory {
    type Response = Booking;
    const PATH: &'static str = "/api/bookings/create-by-category";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize)]
pub struct ListBookings;

impl ApiRequest for ListBookings {
    type Response = Vec<Booking>;
    const PATH: &'static str = "/api/bookings";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteBooking {
    #[serde(skip)]
    pub booking_id: u64,
}

impl ApiRequest for DeleteBooking {
    type Response = Ack;
    const PATH: &'static str = "/api/bookings";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn segments(&self) -> Vec<String> {
        path_with(Self::PATH, &[&self.booking_id.to_string()])
    }
}

// =========================================================
// Gallery Requests
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListGallery;

impl ApiRequest for ListGallery {
    type Response = Vec<GalleryItem>;
    const PATH: &'static str = "/api/gallery";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateGalleryItem(pub GalleryItem);

impl ApiRequest for CreateGalleryItem {
    type Response = GalleryItem;
    const PATH: &'static str = "/api/gallery";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateGalleryItem {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub item: GalleryItem,
}

impl ApiRequest for UpdateGalleryItem {
    type Response = GalleryItem;
    const PATH: &'static str = "/api/gallery";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn segments(&self) -> Vec<String> {
        path_with(Self::PATH, &[&self.id])
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteGalleryItem {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteGalleryItem {
    type Response = Ack;
    const PATH: &'static str = "/api/gallery";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn segments(&self) -> Vec<String> {
        path_with(Self::PATH, &[&self.id])
    }
}

// =========================================================
// Feedback Requests
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListFeedbacks;

impl ApiRequest for ListFeedbacks {
    type Response = Vec<Feedback>;
    const PATH: &'static str = "/api/feedbacks";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize)]
pub struct ListPublicFeedbacks;

impl ApiRequest for ListPublicFeedbacks {
    type Response = Vec<Feedback>;
    const PATH: &'static str = "/api/feedbacks/public";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedback {
    pub booking_id: u64,
    pub email: String,
    pub rating: u8,
    pub comment: String,
}

impl ApiRequest for CreateFeedback {
    type Response = Feedback;
    const PATH: &'static str = "/api/feedbacks";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize)]
pub struct SetFeedbackStatus {
    #[serde(skip)]
    pub id: String,
    pub status: FeedbackStatus,
}

impl ApiRequest for SetFeedbackStatus {
    type Response = Ack;
    const PATH: &'static str = "/api/feedbacks";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn segments(&self) -> Vec<String> {
        path_with(Self::PATH, &[&self.id])
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteFeedback {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteFeedback {
    type Response = Ack;
    const PATH: &'static str = "/api/feedbacks";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn segments(&self) -> Vec<String> {
        path_with(Self::PATH, &[&self.id])
    }
}

// =========================================================
// User Requests (admin)
// =========================================================

/// Server-side paginated user listing
#[derive(Debug, Clone, Serialize)]
pub struct ListUsers {
    pub page: u32,
    pub limit: u32,
}

impl ApiRequest for ListUsers {
    type Response = UserPage;
    const PATH: &'static str = "/api/users/all";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteUser {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteUser {
    type Response = Ack;
    const PATH: &'static str = "/api/users/admin-delete";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn segments(&self) -> Vec<String> {
        path_with(Self::PATH, &[&self.id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_parameters_are_appended_as_segments() {
        let req = UpdateCategoryByName {
            name: "TREETOP LUXURY".into(),
            category: Category {
                id: String::new(),
                name: "TREETOP LUXURY".into(),
                price: 320.0,
                description: String::new(),
                features: vec![],
                image: String::new(),
            },
        };
        assert_eq!(
            req.segments(),
            vec!["api", "categories", "name", "TREETOP LUXURY"]
        );
        assert_eq!(
            DeleteUser { id: "u9".into() }.segments(),
            vec!["api", "users", "admin-delete", "u9"]
        );
    }

    #[test]
    fn test_user_page_remove_keeps_total() {
        let user = |id: &str| User {
            id: id.into(),
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            email: format!("{}@example.com", id),
            user_type: Default::default(),
        };
        let mut page = UserPage {
            users: vec![user("u1"), user("u2")],
            total_pages: 1,
            current_page: 1,
            total_users: 2,
        };

        assert!(page.remove("missing").is_none());
        assert_eq!(page.total_users, 2);
        assert_eq!(page.remove("u1").map(|u| u.id), Some("u1".to_string()));
        assert_eq!(page.total_users, 1);
        assert_eq!(page.users.len(), 1);
        assert!(!page.should_step_back());
    }

    #[test]
    fn test_room_filter_uses_category_name() {
        let all = ListRooms::default();
        assert!(all.query().is_empty());

        let filtered = ListRooms {
            category: Some(CategoryRef::new("GARDEN VILLA")),
        };
        assert_eq!(
            filtered.query(),
            vec![("category", "GARDEN VILLA".to_string())]
        );
    }

    #[test]
    fn test_path_only_fields_are_not_serialized() {
        let req = SetFeedbackStatus {
            id: "f1".into(),
            status: FeedbackStatus::Hidden,
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "status": "Hidden" }));
    }

    #[test]
    fn test_register_response_accepts_numeric_otp() {
        let resp: RegisterResponse =
            serde_json::from_value(json!({ "email": "a@b.c", "otp": 482 })).unwrap();
        assert_eq!(resp.otp.as_deref(), Some("0482"));

        let resp: RegisterResponse = serde_json::from_value(json!({ "message": "ok" })).unwrap();
        assert!(resp.otp.is_none());
    }

    #[test]
    fn test_booking_payload_shape() {
        let req = CreateBookingByCategory {
            category: "TREETOP LUXURY".into(),
            start: CalendarDate::parse("2026-11-02").unwrap(),
            end: CalendarDate::parse("2026-11-04").unwrap(),
            notes: "Guests: 2".into(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "category": "TREETOP LUXURY",
                "start": "2026-11-02",
                "end": "2026-11-04",
                "notes": "Guests: 2"
            })
        );
    }
}
