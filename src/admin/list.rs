//! 后台列表视图
//!
//! 一次取回的集合 + 搜索词 + 过滤条件 + 客户端分页。
//! 搜索或过滤变化时回到第一页；页码始终夹在有效范围内。

use std::fmt::Display;

pub const PAGE_SIZE: usize = 10;

/// 可在后台列表中展示的实体
pub trait Listed {
    type Key: PartialEq + Clone + Display;

    fn key(&self) -> Self::Key;

    /// 参与搜索的文本字段
    fn search_fields(&self) -> Vec<String>;

    /// 过滤条件（由下拉框给出的原始值）
    fn matches_filter(&self, _filter: &str) -> bool {
        true
    }

    fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    items: Vec<T>,
    search: String,
    filter: Option<String>,
    page: usize,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search: String::new(),
            filter: None,
            page: 1,
        }
    }
}

impl<T: Listed> ListView<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// 重新加载后替换数据，保留搜索与过滤
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.clamp_page();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
        self.page = 1;
    }

    /// 空字符串视为“全部”
    pub fn set_filter(&mut self, filter: &str) {
        self.filter = Some(filter.trim().to_string()).filter(|f| !f.is_empty());
        self.page = 1;
    }

    pub fn filtered(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| self.filter.as_deref().is_none_or(|f| item.matches_filter(f)))
            .filter(|item| item.matches_search(&self.search))
            .collect()
    }

    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.clamp_page();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub fn page_items(&self) -> Vec<&T> {
        self.filtered()
            .into_iter()
            .skip((self.page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    /// 删除成功后本地移除，不重新拉取
    pub fn remove(&mut self, key: &T::Key) -> Option<T> {
        let index = self.items.iter().position(|item| item.key() == *key)?;
        let removed = self.items.remove(index);
        self.clamp_page();
        Some(removed)
    }

    /// 用更新后的实体替换同键条目
    pub fn replace(&mut self, item: T) -> bool {
        let key = item.key();
        match self.items.iter_mut().find(|existing| existing.key() == key) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: String,
        kind: &'static str,
    }

    impl Listed for Row {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }

        fn search_fields(&self) -> Vec<String> {
            vec![self.name.clone()]
        }

        fn matches_filter(&self, filter: &str) -> bool {
            self.kind == filter
        }
    }

    fn rows(n: u32) -> Vec<Row> {
        (1..=n)
            .map(|id| Row {
                id,
                name: format!("Row {}", id),
                kind: if id % 2 == 0 { "even" } else { "odd" },
            })
            .collect()
    }

    #[test]
    fn test_pages_are_fixed_size_slices() {
        let mut view = ListView::new(rows(23));
        assert_eq!(view.total_pages(), 3);
        assert_eq!(view.page_items().len(), 10);

        view.set_page(3);
        let last: Vec<u32> = view.page_items().iter().map(|r| r.id).collect();
        assert_eq!(last, vec![21, 22, 23]);

        view.set_page(9);
        assert_eq!(view.page(), 3);
        view.set_page(0);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_search_and_filter_reset_to_first_page() {
        let mut view = ListView::new(rows(30));
        view.set_page(3);
        view.set_search("row 1");
        assert_eq!(view.page(), 1);
        // Row 1, Row 10..19
        assert_eq!(view.filtered().len(), 11);

        view.set_page(2);
        view.set_filter("even");
        assert_eq!(view.page(), 1);
        let ids: Vec<u32> = view.filtered().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![10, 12, 14, 16, 18]);

        view.set_filter("");
        view.set_search("");
        assert_eq!(view.filtered().len(), 30);
    }

    #[test]
    fn test_remove_keeps_page_valid() {
        let mut view = ListView::new(rows(11));
        view.set_page(2);
        assert_eq!(view.remove(&11).map(|r| r.id), Some(11));
        assert_eq!(view.page(), 1);
        assert!(view.remove(&11).is_none());
        assert_eq!(view.items().len(), 10);
    }

    #[test]
    fn test_replace_by_key() {
        let mut view = ListView::new(rows(2));
        let mut updated = rows(2)[1].clone();
        updated.name = "Renamed".into();
        assert!(view.replace(updated));
        assert_eq!(view.items()[1].name, "Renamed");
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let view: ListView<Row> = ListView::default();
        assert_eq!(view.total_pages(), 1);
        assert!(view.page_items().is_empty());
    }
}
