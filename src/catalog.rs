//! 公开页面数据：房型、按房型的房间、图库分组、公开评价

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::request::HttpClient;
use crate::storage::KeyValueStore;
use villa_shared::protocol::{ListCategories, ListGallery, ListPublicFeedbacks, ListRooms};
use villa_shared::{Category, CategoryRef, Feedback, GalleryItem, Room};

const UNCATEGORISED: &str = "OTHER";

pub async fn categories<C: HttpClient, S: KeyValueStore>(
    api: &ApiClient<C, S>,
) -> ClientResult<Vec<Category>> {
    api.send(&ListCategories).await
}

/// 按房型名称取房间，`None` 取全部
pub async fn rooms<C: HttpClient, S: KeyValueStore>(
    api: &ApiClient<C, S>,
    category: Option<CategoryRef>,
) -> ClientResult<Vec<Room>> {
    api.send(&ListRooms { category }).await
}

pub async fn gallery<C: HttpClient, S: KeyValueStore>(
    api: &ApiClient<C, S>,
) -> ClientResult<Vec<(String, Vec<GalleryItem>)>> {
    let items = api.send(&ListGallery).await?;
    Ok(group_gallery(items))
}

pub async fn public_feedback<C: HttpClient, S: KeyValueStore>(
    api: &ApiClient<C, S>,
) -> ClientResult<Vec<Feedback>> {
    api.send(&ListPublicFeedbacks).await
}

pub fn find_category<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    let wanted = CategoryRef::new(name);
    categories.iter().find(|c| wanted.matches(c))
}

/// 后台下拉框的房型选项
///
/// 取后端房型的显示名称，忽略空名并按名称去重；
/// 编辑中的记录若引用了已不存在的房型，仍保留该值作为选项。
pub fn category_options(categories: &[Category], current: &str) -> Vec<String> {
    let mut options: Vec<String> = Vec::with_capacity(categories.len() + 1);
    let names = categories
        .iter()
        .map(|c| c.name.trim())
        .chain(std::iter::once(current.trim()));
    for name in names {
        let wanted = CategoryRef::new(name);
        if !name.is_empty() && !options.iter().any(|o| wanted.matches_name(o)) {
            options.push(name.to_string());
        }
    }
    options
}

/// 图库按房型名称分组，保持首次出现的顺序；名称比较不区分大小写
pub fn group_gallery(items: Vec<GalleryItem>) -> Vec<(String, Vec<GalleryItem>)> {
    let mut groups: Vec<(String, Vec<GalleryItem>)> = Vec::new();
    for item in items {
        let name = match item.category_ref().as_str() {
            "" => UNCATEGORISED.to_string(),
            name => name.to_string(),
        };
        let wanted = CategoryRef::new(&name);
        match groups.iter_mut().find(|(label, _)| wanted.matches_name(label)) {
            Some((_, group)) => group.push(item),
            None => groups.push((name, vec![item])),
        }
    }
    groups
}

/// 评价的平均分，没有评价时为 None
pub fn average_rating(feedback: &[Feedback]) -> Option<f32> {
    if feedback.is_empty() {
        return None;
    }
    let total: u32 = feedback.iter().map(|f| u32::from(f.rating)).sum();
    Some(total as f32 / feedback.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::client;
    use crate::request::HttpMethod;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn item(name: &str, category: &str) -> GalleryItem {
        GalleryItem {
            id: name.into(),
            name: name.into(),
            description: String::new(),
            image: format!("https://img.test/{}.jpg", name),
            category: category.into(),
        }
    }

    #[test]
    fn test_gallery_groups_by_name_in_first_seen_order() {
        let groups = group_gallery(vec![
            item("a", "GARDEN VILLA"),
            item("b", "TREETOP LUXURY"),
            item("c", "garden villa"),
            item("d", ""),
        ]);
        let summary: Vec<(&str, usize)> = groups
            .iter()
            .map(|(name, items)| (name.as_str(), items.len()))
            .collect();
        assert_eq!(
            summary,
            vec![("GARDEN VILLA", 2), ("TREETOP LUXURY", 1), ("OTHER", 1)]
        );
    }

    #[tokio::test]
    async fn test_rooms_for_category_use_name_filter() {
        let api = client(MemoryStore::new());
        api.http().mock_response(
            HttpMethod::Get,
            "http://api.test/api/rooms?category=RIVERSIDE+SUITE",
            200,
            json!([{ "roomId": 8, "category": "RIVERSIDE SUITE", "maxGuests": 4 }]),
        );

        let found = rooms(&api, Some(CategoryRef::new("RIVERSIDE SUITE")))
            .await
            .unwrap();
        assert_eq!(found[0].room_id, 8);
    }

    #[tokio::test]
    async fn test_category_options_follow_backend_categories() {
        let api = client(MemoryStore::new());
        api.http().mock_response(
            HttpMethod::Get,
            "http://api.test/api/categories",
            200,
            json!([
                { "_id": "c1", "name": "TREETOP LUXURY", "price": 320 },
                { "_id": "c2", "name": "RIVERSIDE SUITE", "price": 280 },
                { "_id": "c3", "name": " riverside suite", "price": 280 }
            ]),
        );

        let loaded = categories(&api).await.unwrap();
        assert_eq!(
            category_options(&loaded, ""),
            vec!["TREETOP LUXURY", "RIVERSIDE SUITE"]
        );
        assert_eq!(
            category_options(&loaded, "GARDEN VILLA"),
            vec!["TREETOP LUXURY", "RIVERSIDE SUITE", "GARDEN VILLA"]
        );
        assert_eq!(category_options(&loaded, "treetop luxury").len(), 2);
    }

    #[test]
    fn test_find_category_and_average() {
        let categories = vec![Category {
            id: "c1".into(),
            name: "TREETOP LUXURY".into(),
            price: 320.0,
            description: String::new(),
            features: vec![],
            image: String::new(),
        }];
        assert!(find_category(&categories, "treetop luxury").is_some());
        assert!(find_category(&categories, "GARDEN VILLA").is_none());
        assert_eq!(average_rating(&[]), None);
    }
}
