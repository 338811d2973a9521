//! 键值存储抽象
//!
//! 浏览器端由 `localStorage` 实现；这里提供内存实现供测试与非浏览器环境使用。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 同步键值存储（语义与 `window.localStorage` 一致）
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// 写入失败（如配额耗尽）返回 false
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// 内存存储，克隆后共享同一份数据
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.data.borrow_mut().remove(key);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_data() {
        let store = MemoryStore::new();
        let view = store.clone();
        store.set("token", "abc");
        assert_eq!(view.get("token").as_deref(), Some("abc"));

        view.delete("token");
        assert!(store.is_empty());
    }
}
