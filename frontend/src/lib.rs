//! Villa 前端应用
//!
//! 业务逻辑在 `villa` 核心 crate，这里只负责把它接到浏览器：
//! - `web`: fetch / localStorage / 定时器适配器与路由服务
//! - `auth`: 认证状态信号
//! - `hooks`: 页面作用域与一次性加载
//! - `components`: UI 组件层

mod auth;
mod hooks;
mod components {
    pub mod admin;
    pub mod booking;
    pub mod common;
    pub mod feedback;
    pub mod forgot_password;
    pub mod gallery;
    pub mod home;
    pub mod login;
    pub mod retreats;
    pub mod rooms;
    pub mod shell;
    pub mod signup;
    pub mod verify_email;
}
pub(crate) mod web;

use crate::auth::{AuthContext, session};
use crate::components::admin::{
    BookingsPage, CategoriesPage, CategoryFormPage, DashboardPage, FeedbackAdminPage,
    GalleryAdminPage, GalleryFormPage, RoomFormPage, RoomsAdminPage, UsersPage,
};
use crate::components::booking::BookingPage;
use crate::components::feedback::FeedbackPage;
use crate::components::forgot_password::ForgotPasswordPage;
use crate::components::gallery::GalleryPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::retreats::RetreatsPage;
use crate::components::rooms::RoomsPage;
use crate::components::shell::{Footer, Navbar, Splash};
use crate::components::signup::SignupPage;
use crate::components::verify_email::VerifyEmailPage;

use leptos::prelude::*;
use villa::route::{AdminRoute, AppRoute};
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::VerifyEmail => view! { <VerifyEmailPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::Booking => view! { <BookingPage /> }.into_any(),
        AppRoute::Feedback => view! { <FeedbackPage /> }.into_any(),
        AppRoute::Retreats => view! { <RetreatsPage /> }.into_any(),
        AppRoute::Rooms => view! { <RoomsPage /> }.into_any(),
        AppRoute::Gallery => view! { <GalleryPage /> }.into_any(),
        AppRoute::Admin(admin) => match admin {
            AdminRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
            AdminRoute::Bookings => view! { <BookingsPage /> }.into_any(),
            AdminRoute::Categories => view! { <CategoriesPage /> }.into_any(),
            AdminRoute::CategoryForm => view! { <CategoryFormPage /> }.into_any(),
            AdminRoute::Rooms => view! { <RoomsAdminPage /> }.into_any(),
            AdminRoute::RoomForm => view! { <RoomFormPage /> }.into_any(),
            AdminRoute::Gallery => view! { <GalleryAdminPage /> }.into_any(),
            AdminRoute::GalleryForm => view! { <GalleryFormPage /> }.into_any(),
            AdminRoute::Feedback => view! { <FeedbackAdminPage /> }.into_any(),
            AdminRoute::Users => view! { <UsersPage /> }.into_any(),
        },
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[70vh] bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to=AppRoute::Home.to_path() class="btn btn-primary mt-6">"Back to home"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 认证上下文（从 localStorage 恢复会话）
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 认证信号注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();
    let user = auth_ctx.user_signal();

    // 3. 首次访问先播放开屏
    let (show_splash, set_show_splash) = signal(!session().has_seen_splash());
    let on_splash_done = Callback::new(move |_| {
        session().mark_splash_seen();
        set_show_splash.set(false);
    });

    view! {
        <Show
            when=move || !show_splash.get()
            fallback=move || view! { <Splash on_done=on_splash_done /> }
        >
            <Router is_authenticated=is_authenticated user=user>
                <div class="min-h-screen flex flex-col">
                    <Navbar />
                    <main class="flex-1">
                        <RouterOutlet matcher=route_matcher />
                    </main>
                    <Footer />
                </div>
            </Router>
        </Show>
    }
}
