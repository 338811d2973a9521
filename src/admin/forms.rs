//! 后台新建/编辑表单
//!
//! 编辑时由列表页通过导航状态带入实体预填。
//! 提交顺序：本地校验 -> 可选的图片上传 -> 实体接口。上传失败则不调用实体接口。

use crate::api::ApiClient;
use crate::config::MediaConfig;
use crate::error::{ClientError, ClientResult};
use crate::flows::require_fields;
use crate::media::{MediaFolder, MediaUploader};
use crate::request::{HttpClient, MediaFile};
use crate::storage::KeyValueStore;
use villa_shared::protocol::{
    CreateCategory, CreateGalleryItem, CreateRoom, UpdateCategory, UpdateCategoryByName,
    UpdateGalleryItem, UpdateRoom,
};
use villa_shared::{Category, GalleryItem, Room};

fn split_list(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// =========================================================
// Category
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    /// 编辑目标的 `_id`，新建时为空
    pub id: String,
    /// 编辑目标的原名称（无 `_id` 时按名称更新）
    pub original_name: Option<String>,
    pub name: String,
    pub price: String,
    pub description: String,
    /// 逗号或换行分隔
    pub features: String,
    pub image: String,
    pub upload: Option<MediaFile>,
}

impl CategoryForm {
    pub fn edit(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            original_name: Some(category.name.clone()),
            name: category.name.clone(),
            price: category.price.to_string(),
            description: category.description.clone(),
            features: category.features.join(", "),
            image: category.image.clone(),
            upload: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.original_name.is_some()
    }

    pub fn validate(&self) -> ClientResult<Category> {
        require_fields(&[("Name", &self.name), ("Price", &self.price)])?;
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| ClientError::validation("Price must be a positive number"))?;
        if self.image.trim().is_empty() && self.upload.is_none() {
            return Err(ClientError::validation("Please choose an image"));
        }

        Ok(Category {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            price,
            description: self.description.trim().to_string(),
            features: split_list(&self.features),
            image: self.image.trim().to_string(),
        })
    }

    pub async fn submit<C: HttpClient, S: KeyValueStore>(
        &self,
        api: &ApiClient<C, S>,
        media: &MediaConfig,
    ) -> ClientResult<Category> {
        let mut category = self.validate()?;
        if let Some(file) = &self.upload {
            category.image = MediaUploader::new(api.http(), media)
                .upload(file.clone(), MediaFolder::Categories)
                .await?;
        }

        let result = match (&self.original_name, self.id.is_empty()) {
            (None, _) => api.send(&CreateCategory(category)).await,
            (Some(_), false) => {
                api.send(&UpdateCategory {
                    id: self.id.clone(),
                    category,
                })
                .await
            }
            (Some(name), true) => {
                api.send(&UpdateCategoryByName {
                    name: name.clone(),
                    category,
                })
                .await
            }
        };
        result.map_err(|e| e.in_op_with("admin.category_form", self.name.clone()))
    }
}

// =========================================================
// Room
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RoomForm {
    /// 编辑时不可修改
    pub editing: Option<u64>,
    pub room_id: String,
    pub category: String,
    pub max_guests: String,
    pub available: bool,
    pub photos: Vec<String>,
    pub special_description: String,
    pub notes: String,
    pub uploads: Vec<MediaFile>,
}

impl Default for RoomForm {
    fn default() -> Self {
        Self {
            editing: None,
            room_id: String::new(),
            category: String::new(),
            max_guests: "2".to_string(),
            available: true,
            photos: Vec::new(),
            special_description: String::new(),
            notes: String::new(),
            uploads: Vec::new(),
        }
    }
}

impl RoomForm {
    pub fn edit(room: &Room) -> Self {
        Self {
            editing: Some(room.room_id),
            room_id: room.room_id.to_string(),
            category: room.category.clone(),
            max_guests: room.max_guests.to_string(),
            available: room.available,
            photos: room.photos.clone(),
            special_description: room.special_description.clone(),
            notes: room.notes.clone(),
            uploads: Vec::new(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn remove_photo(&mut self, url: &str) {
        self.photos.retain(|p| p != url);
    }

    pub fn validate(&self) -> ClientResult<Room> {
        require_fields(&[
            ("Room ID", &self.room_id),
            ("Category", &self.category),
            ("Max guests", &self.max_guests),
        ])?;
        let room_id = match self.editing {
            Some(id) => id,
            None => self
                .room_id
                .trim()
                .parse::<u64>()
                .map_err(|_| ClientError::validation("Room ID must be a number"))?,
        };
        let max_guests = self
            .max_guests
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|g| *g >= 1)
            .ok_or_else(|| ClientError::validation("Max guests must be at least 1"))?;

        Ok(Room {
            room_id,
            category: self.category.trim().to_string(),
            max_guests,
            available: self.available,
            photos: self.photos.clone(),
            special_description: self.special_description.trim().to_string(),
            notes: self.notes.trim().to_string(),
        })
    }

    pub async fn submit<C: HttpClient, S: KeyValueStore>(
        &self,
        api: &ApiClient<C, S>,
        media: &MediaConfig,
    ) -> ClientResult<Room> {
        let mut room = self.validate()?;
        let uploader = MediaUploader::new(api.http(), media);
        for file in &self.uploads {
            room.photos
                .push(uploader.upload(file.clone(), MediaFolder::Rooms).await?);
        }

        let result = match self.editing {
            Some(room_id) => api.send(&UpdateRoom { room_id, room }).await,
            None => api.send(&CreateRoom(room)).await,
        };
        result.map_err(|e| e.in_op_with("admin.room_form", self.room_id.clone()))
    }
}

// =========================================================
// Gallery
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryForm {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub upload: Option<MediaFile>,
}

impl GalleryForm {
    pub fn edit(item: &GalleryItem) -> Self {
        Self {
            id: Some(item.id.clone()),
            name: item.name.clone(),
            description: item.description.clone(),
            category: item.category.clone(),
            image: item.image.clone(),
            upload: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn validate(&self) -> ClientResult<GalleryItem> {
        require_fields(&[("Name", &self.name), ("Category", &self.category)])?;
        if self.image.trim().is_empty() && self.upload.is_none() {
            return Err(ClientError::validation("Please choose an image"));
        }
        Ok(GalleryItem {
            id: self.id.clone().unwrap_or_default(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            image: self.image.trim().to_string(),
            category: self.category.trim().to_string(),
        })
    }

    pub async fn submit<C: HttpClient, S: KeyValueStore>(
        &self,
        api: &ApiClient<C, S>,
        media: &MediaConfig,
    ) -> ClientResult<GalleryItem> {
        let mut item = self.validate()?;
        if let Some(file) = &self.upload {
            item.image = MediaUploader::new(api.http(), media)
                .upload(file.clone(), MediaFolder::Gallery)
                .await?;
        }

        let result = match &self.id {
            Some(id) => {
                api.send(&UpdateGalleryItem {
                    id: id.clone(),
                    item,
                })
                .await
            }
            None => api.send(&CreateGalleryItem(item)).await,
        };
        result.map_err(|e| e.in_op_with("admin.gallery_form", self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::signed_in_client;
    use crate::error::ErrorKind;
    use crate::media::tests::{UPLOAD_URL, photo};
    use crate::request::{HttpBody, HttpMethod};
    use serde_json::json;
    use villa_shared::UserType;

    fn media() -> MediaConfig {
        crate::config::AppConfig::default().media
    }

    fn category(id: &str) -> Category {
        Category {
            id: id.into(),
            name: "GARDEN VILLA".into(),
            price: 240.0,
            description: "Among the palms".into(),
            features: vec!["Pool".into(), "Breakfast".into()],
            image: "https://img.test/garden.jpg".into(),
        }
    }

    fn category_json(id: &str) -> serde_json::Value {
        json!({
            "_id": id,
            "name": "GARDEN VILLA",
            "price": 260.0,
            "description": "Among the palms",
            "features": ["Pool", "Breakfast"],
            "image": "https://img.test/garden.jpg"
        })
    }

    #[tokio::test]
    async fn test_category_upload_then_create() {
        let api = signed_in_client(UserType::Admin);
        api.http().mock_response(
            HttpMethod::Post,
            UPLOAD_URL,
            200,
            json!({ "secure_url": "https://cdn.test/new.jpg" }),
        );
        api.http().mock_response(
            HttpMethod::Post,
            "http://api.test/api/categories",
            201,
            category_json("c9"),
        );

        let form = CategoryForm {
            name: "GARDEN VILLA".into(),
            price: "260".into(),
            features: "Pool,\nBreakfast, ".into(),
            upload: Some(photo()),
            ..CategoryForm::default()
        };
        let created = form.submit(&api, &media()).await.unwrap();
        assert_eq!(created.id, "c9");

        let requests = api.http().requests.borrow();
        assert_eq!(requests.len(), 2);
        assert!(matches!(requests[0].body, Some(HttpBody::Multipart(_))));
        drop(requests);

        let body = api.http().last_json().unwrap();
        assert_eq!(body["image"], "https://cdn.test/new.jpg");
        assert_eq!(body["features"], json!(["Pool", "Breakfast"]));
        assert!(body.get("_id").is_none());
    }

    #[tokio::test]
    async fn test_upload_failure_stops_entity_call() {
        let api = signed_in_client(UserType::Admin);
        api.http()
            .mock_response(HttpMethod::Post, UPLOAD_URL, 500, json!({}));

        let form = GalleryForm {
            name: "Sunset deck".into(),
            category: "RIVERSIDE SUITE".into(),
            upload: Some(photo()),
            ..GalleryForm::default()
        };
        let err = form.submit(&api, &media()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Upload);
        assert_eq!(api.http().request_count(), 1);
    }

    #[tokio::test]
    async fn test_category_update_by_id_or_by_name() {
        let api = signed_in_client(UserType::Admin);
        api.http().mock_response(
            HttpMethod::Put,
            "http://api.test/api/categories/c1",
            200,
            category_json("c1"),
        );
        api.http().mock_response(
            HttpMethod::Put,
            "http://api.test/api/categories/name/GARDEN%20VILLA",
            200,
            category_json("c2"),
        );

        let mut form = CategoryForm::edit(&category("c1"));
        form.price = "260".into();
        assert_eq!(form.submit(&api, &media()).await.unwrap().price, 260.0);
        assert_eq!(
            api.http().last_request().unwrap().url,
            "http://api.test/api/categories/c1"
        );

        let form = CategoryForm::edit(&category(""));
        form.submit(&api, &media()).await.unwrap();
        assert_eq!(
            api.http().last_request().unwrap().url,
            "http://api.test/api/categories/name/GARDEN%20VILLA"
        );
    }

    #[tokio::test]
    async fn test_room_edit_appends_uploaded_photos() {
        let api = signed_in_client(UserType::Admin);
        api.http().mock_response(
            HttpMethod::Post,
            UPLOAD_URL,
            200,
            json!({ "secure_url": "https://cdn.test/room.jpg" }),
        );
        api.http().mock_response(
            HttpMethod::Patch,
            "http://api.test/api/rooms/4",
            200,
            json!({
                "roomId": 4,
                "category": "GARDEN VILLA",
                "maxGuests": 3,
                "photos": ["https://img.test/a.jpg", "https://cdn.test/room.jpg"]
            }),
        );

        let room = Room {
            room_id: 4,
            category: "GARDEN VILLA".into(),
            max_guests: 2,
            available: true,
            photos: vec!["https://img.test/a.jpg".into(), "https://img.test/b.jpg".into()],
            special_description: String::new(),
            notes: String::new(),
        };
        let mut form = RoomForm::edit(&room);
        form.max_guests = "3".into();
        form.remove_photo("https://img.test/b.jpg");
        form.uploads.push(photo());

        let updated = form.submit(&api, &media()).await.unwrap();
        assert_eq!(updated.max_guests, 3);
        let body = api.http().last_json().unwrap();
        assert_eq!(
            body["photos"],
            json!(["https://img.test/a.jpg", "https://cdn.test/room.jpg"])
        );
    }

    #[tokio::test]
    async fn test_form_validation_sends_nothing() {
        let api = signed_in_client(UserType::Admin);

        let err = CategoryForm {
            name: "GARDEN VILLA".into(),
            price: "-3".into(),
            image: "https://img.test/x.jpg".into(),
            ..CategoryForm::default()
        }
        .submit(&api, &media())
        .await
        .unwrap_err();
        assert_eq!(err.message(), "Price must be a positive number");

        let err = RoomForm {
            room_id: "R-1".into(),
            category: "GARDEN VILLA".into(),
            ..RoomForm::default()
        }
        .submit(&api, &media())
        .await
        .unwrap_err();
        assert_eq!(err.message(), "Room ID must be a number");

        let err = GalleryForm {
            name: "Deck".into(),
            category: "GARDEN VILLA".into(),
            ..GalleryForm::default()
        }
        .submit(&api, &media())
        .await
        .unwrap_err();
        assert_eq!(err.message(), "Please choose an image");

        assert_eq!(api.http().request_count(), 0);
    }
}
