//! 路由守卫
//!
//! 纯函数：输入目标地址与认证状态，输出渲染或重定向。
//! 所有受保护页面都只经过这里，页面内部不再各自检查令牌。

use crate::route::{AdminRoute, AppRoute, NavState};
use villa_shared::SessionUser;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// 原样渲染目标路由
    Render(AppRoute),
    /// 重定向，并携带导航状态
    Redirect { to: AppRoute, state: NavState },
}

pub struct RouteGuard;

impl RouteGuard {
    /// 解析一次导航
    ///
    /// - 受保护路由且未认证：跳转登录页，记录原始地址
    /// - 已认证访问登录/注册页：跳转登录后的默认目的地
    /// - 其余情况原样渲染
    pub fn resolve(path: &str, is_authenticated: bool, user: Option<&SessionUser>) -> Resolution {
        let target = AppRoute::from_path(path);

        if target.requires_auth() && !is_authenticated {
            log_info!("[Router] Access denied to {}. Redirecting to login.", path);
            return Resolution::Redirect {
                to: AppRoute::auth_failure_redirect(),
                state: NavState::From(path.to_string()),
            };
        }

        if target.should_redirect_when_authenticated() && is_authenticated {
            let to = AppRoute::from_path(&post_login_destination(user, None));
            return Resolution::Redirect {
                to,
                state: NavState::Empty,
            };
        }

        Resolution::Render(target)
    }
}

/// 登录成功后的目的地
///
/// 管理员进入后台；其他用户回到被拦截前的地址，没有则回首页。
pub fn post_login_destination(user: Option<&SessionUser>, from: Option<&str>) -> String {
    if user.is_some_and(|u| u.is_admin()) {
        return AppRoute::Admin(AdminRoute::Dashboard).to_path().to_string();
    }
    let returnable = |path: &&str| {
        !path.is_empty() && !AppRoute::from_path(path).should_redirect_when_authenticated()
    };
    match from.filter(returnable) {
        Some(path) => path.to_string(),
        None => AppRoute::Home.to_path().to_string(),
    }
}
