//! 后台管理
//!
//! 六类资源（预订、房型、房间、图库、反馈、用户）共用同一套列表视图与删除流程。

pub mod forms;
pub mod list;
pub mod resources;

pub use list::{ListView, Listed, PAGE_SIZE};
pub use resources::{DashboardCounts, FetchAll, LocalRemove, Resource};
