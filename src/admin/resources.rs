//! 后台资源：列表取数、确认删除、反馈显隐切换、用户分页

use crate::admin::list::{ListView, Listed, PAGE_SIZE};
use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::request::HttpClient;
use crate::storage::KeyValueStore;
use villa_shared::protocol::{
    ApiRequest, DeleteBooking, DeleteCategory, DeleteFeedback, DeleteGalleryItem, DeleteRoom,
    DeleteUser, ListBookings, ListCategories, ListFeedbacks, ListGallery, ListRooms, ListUsers,
    SetFeedbackStatus, UserPage,
};
use villa_shared::{Booking, Category, CategoryRef, Feedback, GalleryItem, Room, User};

/// 可删除的后台资源
pub trait Resource: Listed {
    const LABEL: &'static str;
    type Delete: ApiRequest;

    fn delete_request(key: &Self::Key) -> Self::Delete;
}

/// 一次性取回全部数据的资源（用户除外）
pub trait FetchAll: Resource + Sized {
    type List: ApiRequest<Response = Vec<Self>>;

    fn list_request() -> Self::List;
}

pub async fn load<R, C, S>(api: &ApiClient<C, S>) -> ClientResult<ListView<R>>
where
    R: FetchAll,
    C: HttpClient,
    S: KeyValueStore,
{
    let items = api
        .send(&R::list_request())
        .await
        .map_err(|e| e.in_op_with("admin.load", R::LABEL))?;
    Ok(ListView::new(items))
}

/// 删除一条记录
///
/// 未确认时不发请求并返回 `Ok(false)`；成功返回 `Ok(true)`，
/// 调用方随后用 `ListView::remove` 本地移除。失败时列表保持不变。
pub async fn delete<R, C, S>(api: &ApiClient<C, S>, key: &R::Key, confirmed: bool) -> ClientResult<bool>
where
    R: Resource,
    C: HttpClient,
    S: KeyValueStore,
{
    if !confirmed {
        return Ok(false);
    }
    api.send(&R::delete_request(key)).await.map_err(|e| {
        log_error!("[Admin] Failed to delete {} {}: {}", R::LABEL, key, e);
        e.in_op_with("admin.delete", format!("{} {}", R::LABEL, key))
    })?;
    log_info!("[Admin] Deleted {} {}", R::LABEL, key);
    Ok(true)
}

/// 删除成功后在本地移除记录的容器
pub trait LocalRemove {
    type Item: Resource;

    fn remove_local(&mut self, key: &<Self::Item as Listed>::Key);
}

impl<R: Resource> LocalRemove for ListView<R> {
    type Item = R;

    fn remove_local(&mut self, key: &R::Key) {
        self.remove(key);
    }
}

/// 用户分页：移除本页条目并按新总数重算页数
impl LocalRemove for UserPage {
    type Item = User;

    fn remove_local(&mut self, key: &String) {
        if self.remove(key).is_some() {
            self.total_pages = self.total_users.div_ceil(PAGE_SIZE as u64).max(1) as u32;
        }
    }
}

/// 确认删除并在成功后从容器中移除，不重新拉取
pub async fn delete_from_view<V, C, S>(
    api: &ApiClient<C, S>,
    view: &mut V,
    key: &<V::Item as Listed>::Key,
    confirmed: bool,
) -> ClientResult<bool>
where
    V: LocalRemove,
    C: HttpClient,
    S: KeyValueStore,
{
    let deleted = delete::<V::Item, C, S>(api, key, confirmed).await?;
    if deleted {
        view.remove_local(key);
    }
    Ok(deleted)
}

/// 切换反馈在公开页面的可见性，返回更新后的反馈
pub async fn toggle_feedback<C: HttpClient, S: KeyValueStore>(
    api: &ApiClient<C, S>,
    feedback: &Feedback,
) -> ClientResult<Feedback> {
    let status = feedback.status.toggled();
    let req = SetFeedbackStatus {
        id: feedback.id.clone(),
        status,
    };
    api.send(&req)
        .await
        .map_err(|e| e.in_op_with("admin.toggle_feedback", feedback.id.clone()))?;
    Ok(Feedback {
        status,
        ..feedback.clone()
    })
}

/// 用户列表由后端分页
pub async fn load_users<C: HttpClient, S: KeyValueStore>(
    api: &ApiClient<C, S>,
    page: u32,
) -> ClientResult<UserPage> {
    let req = ListUsers {
        page: page.max(1),
        limit: PAGE_SIZE as u32,
    };
    api.send(&req)
        .await
        .map_err(|e| e.in_op_with("admin.load_users", page.to_string()))
}

/// 后台首页的数量统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub bookings: usize,
    pub categories: usize,
    pub rooms: usize,
    pub gallery: usize,
    pub feedback: usize,
    pub users: u64,
}

pub async fn load_dashboard<C: HttpClient, S: KeyValueStore>(
    api: &ApiClient<C, S>,
) -> ClientResult<DashboardCounts> {
    let bookings = api.send(&ListBookings).await?.len();
    let categories = api.send(&ListCategories).await?.len();
    let rooms = api.send(&ListRooms::default()).await?.len();
    let gallery = api.send(&ListGallery).await?.len();
    let feedback = api.send(&ListFeedbacks).await?.len();
    let users = api.send(&ListUsers { page: 1, limit: 1 }).await?.total_users;
    Ok(DashboardCounts {
        bookings,
        categories,
        rooms,
        gallery,
        feedback,
        users,
    })
}

// =========================================================
// 各实体的列表属性
// =========================================================

impl Listed for Booking {
    type Key = u64;

    fn key(&self) -> u64 {
        self.booking_id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.booking_id.to_string(),
            self.category.clone(),
            self.notes.clone(),
        ]
    }

    fn matches_filter(&self, filter: &str) -> bool {
        self.status.label().eq_ignore_ascii_case(filter)
    }
}

impl Resource for Booking {
    const LABEL: &'static str = "booking";
    type Delete = DeleteBooking;

    fn delete_request(key: &u64) -> DeleteBooking {
        DeleteBooking { booking_id: *key }
    }
}

impl FetchAll for Booking {
    type List = ListBookings;

    fn list_request() -> ListBookings {
        ListBookings
    }
}

impl Listed for Category {
    type Key = String;

    /// 没有 `_id` 的旧数据以名称作为键
    fn key(&self) -> String {
        if self.id.is_empty() {
            self.name.clone()
        } else {
            self.id.clone()
        }
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.description.clone()]
    }
}

impl Resource for Category {
    const LABEL: &'static str = "category";
    type Delete = DeleteCategory;

    fn delete_request(key: &String) -> DeleteCategory {
        DeleteCategory { id: key.clone() }
    }
}

impl FetchAll for Category {
    type List = ListCategories;

    fn list_request() -> ListCategories {
        ListCategories
    }
}

impl Listed for Room {
    type Key = u64;

    fn key(&self) -> u64 {
        self.room_id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.room_id.to_string(),
            self.category.clone(),
            self.special_description.clone(),
        ]
    }

    fn matches_filter(&self, filter: &str) -> bool {
        CategoryRef::new(filter).matches_name(&self.category)
    }
}

impl Resource for Room {
    const LABEL: &'static str = "room";
    type Delete = DeleteRoom;

    fn delete_request(key: &u64) -> DeleteRoom {
        DeleteRoom { room_id: *key }
    }
}

impl FetchAll for Room {
    type List = ListRooms;

    fn list_request() -> ListRooms {
        ListRooms::default()
    }
}

impl Listed for GalleryItem {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone(),
            self.category.clone(),
        ]
    }

    fn matches_filter(&self, filter: &str) -> bool {
        CategoryRef::new(filter).matches_name(&self.category)
    }
}

impl Resource for GalleryItem {
    const LABEL: &'static str = "gallery item";
    type Delete = DeleteGalleryItem;

    fn delete_request(key: &String) -> DeleteGalleryItem {
        DeleteGalleryItem { id: key.clone() }
    }
}

impl FetchAll for GalleryItem {
    type List = ListGallery;

    fn list_request() -> ListGallery {
        ListGallery
    }
}

impl Listed for Feedback {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.booking_id.to_string(),
            self.email.clone(),
            self.comment.clone(),
        ]
    }

    fn matches_filter(&self, filter: &str) -> bool {
        self.status.label().eq_ignore_ascii_case(filter)
    }
}

impl Resource for Feedback {
    const LABEL: &'static str = "feedback";
    type Delete = DeleteFeedback;

    fn delete_request(key: &String) -> DeleteFeedback {
        DeleteFeedback { id: key.clone() }
    }
}

impl FetchAll for Feedback {
    type List = ListFeedbacks;

    fn list_request() -> ListFeedbacks {
        ListFeedbacks
    }
}

impl Listed for User {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            format!("{} {}", self.first_name, self.last_name),
            self.email.clone(),
        ]
    }

    fn matches_filter(&self, filter: &str) -> bool {
        self.user_type.label().eq_ignore_ascii_case(filter)
    }
}

impl Resource for User {
    const LABEL: &'static str = "user";
    type Delete = DeleteUser;

    fn delete_request(key: &String) -> DeleteUser {
        DeleteUser { id: key.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::signed_in_client;
    use crate::error::ErrorKind;
    use crate::request::HttpMethod;
    use serde_json::json;
    use villa_shared::{FeedbackStatus, UserType};

    fn room_json(id: u64, category: &str) -> serde_json::Value {
        json!({ "roomId": id, "category": category, "maxGuests": 2 })
    }

    #[tokio::test]
    async fn test_load_and_filter_rooms_by_category_name() {
        let api = signed_in_client(UserType::Admin);
        api.http().mock_response(
            HttpMethod::Get,
            "http://api.test/api/rooms",
            200,
            json!([
                room_json(1, "TREETOP LUXURY"),
                room_json(2, "GARDEN VILLA"),
                room_json(3, "treetop luxury ")
            ]),
        );

        let mut view: ListView<Room> = load(&api).await.unwrap();
        view.set_filter("TREETOP LUXURY");
        let ids: Vec<u64> = view.filtered().iter().map(|r| r.room_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_unconfirmed_delete_sends_nothing() {
        let api = signed_in_client(UserType::Admin);
        let mut view = ListView::new(vec![Booking {
            booking_id: 7,
            room_id: Some(1),
            category: "GARDEN VILLA".into(),
            start: villa_shared::CalendarDate::parse("2026-11-01").unwrap(),
            end: villa_shared::CalendarDate::parse("2026-11-02").unwrap(),
            status: Default::default(),
            notes: String::new(),
        }]);

        let deleted = delete_from_view(&api, &mut view, &7, false).await.unwrap();
        assert!(!deleted);
        assert_eq!(view.items().len(), 1);
        assert_eq!(api.http().request_count(), 0);
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_locally_without_refetch() {
        let api = signed_in_client(UserType::Admin);
        api.http().mock_response(
            HttpMethod::Delete,
            "http://api.test/api/gallery/g2",
            200,
            json!({ "message": "deleted" }),
        );
        let item = |id: &str| GalleryItem {
            id: id.into(),
            name: format!("Item {}", id),
            description: String::new(),
            image: "https://img.test/x.jpg".into(),
            category: "GARDEN VILLA".into(),
        };
        let mut view = ListView::new(vec![item("g1"), item("g2")]);

        assert!(delete_from_view(&api, &mut view, &"g2".to_string(), true).await.unwrap());
        assert_eq!(view.items(), &[item("g1")]);
        assert_eq!(api.http().request_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_list_untouched() {
        let api = signed_in_client(UserType::Admin);
        api.http().mock_response(
            HttpMethod::Delete,
            "http://api.test/api/rooms/4",
            500,
            json!({ "message": "db down" }),
        );
        let mut view = ListView::new(vec![
            serde_json::from_value::<Room>(room_json(4, "GARDEN VILLA")).unwrap(),
        ]);

        let err = delete_from_view(&api, &mut view, &4, true).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Server);
        assert_eq!(view.items().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_feedback_visibility() {
        let api = signed_in_client(UserType::Admin);
        api.http().mock_response(
            HttpMethod::Put,
            "http://api.test/api/feedbacks/f1",
            200,
            json!({ "message": "updated" }),
        );
        let feedback = Feedback {
            id: "f1".into(),
            booking_id: 12,
            room_id: None,
            email: "ana@example.com".into(),
            rating: 4,
            comment: "Lovely".into(),
            status: FeedbackStatus::Visible,
        };

        let updated = toggle_feedback(&api, &feedback).await.unwrap();
        assert_eq!(updated.status, FeedbackStatus::Hidden);
        assert_eq!(api.http().last_json().unwrap(), json!({ "status": "Hidden" }));
    }

    #[tokio::test]
    async fn test_users_are_paged_by_backend() {
        let api = signed_in_client(UserType::Admin);
        api.http().mock_response(
            HttpMethod::Post,
            "http://api.test/api/users/all",
            200,
            json!({
                "users": [{
                    "_id": "u2",
                    "firstName": "Rui",
                    "lastName": "Costa",
                    "email": "rui@example.com",
                    "type": "customer"
                }],
                "totalPages": 3,
                "currentPage": 2,
                "totalUsers": 21
            }),
        );

        let page = load_users(&api, 2).await.unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.users[0].id, "u2");
        assert_eq!(api.http().last_json().unwrap(), json!({ "page": 2, "limit": 10 }));
    }

    #[tokio::test]
    async fn test_user_delete_updates_page_without_refetch() {
        let api = signed_in_client(UserType::Admin);
        api.http().mock_response(
            HttpMethod::Post,
            "http://api.test/api/users/all",
            200,
            json!({
                "users": [{
                    "_id": "u11",
                    "firstName": "Ines",
                    "lastName": "Lopes",
                    "email": "ines@example.com",
                    "type": "customer"
                }],
                "totalPages": 2,
                "currentPage": 2,
                "totalUsers": 11
            }),
        );
        api.http().mock_response(
            HttpMethod::Delete,
            "http://api.test/api/users/admin-delete/u11",
            200,
            json!({ "message": "deleted" }),
        );

        let mut page = load_users(&api, 2).await.unwrap();
        assert_eq!(api.http().request_count(), 1);

        assert!(delete_from_view(&api, &mut page, &"u11".to_string(), true).await.unwrap());
        assert_eq!(api.http().request_count(), 2);
        assert!(page.users.is_empty());
        assert_eq!(page.total_users, 10);
        assert_eq!(page.total_pages, 1);
        assert!(page.should_step_back());
    }

    #[test]
    fn test_category_without_id_is_keyed_by_name() {
        let category = Category {
            id: String::new(),
            name: "RIVERSIDE SUITE".into(),
            price: 280.0,
            description: String::new(),
            features: vec![],
            image: String::new(),
        };
        assert_eq!(category.key(), "RIVERSIDE SUITE");
    }
}
