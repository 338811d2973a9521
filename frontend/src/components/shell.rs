use crate::auth::{logout, use_auth};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use std::time::Duration;
use villa::route::{AdminRoute, AppRoute};

const SPLASH_DURATION: Duration = Duration::from_millis(2500);

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let is_authenticated = move || auth.state.get().is_authenticated;
    let is_admin = move || auth.state.get().is_admin();
    let greeting = move || {
        auth.state
            .get()
            .user
            .map(|u| u.first_name)
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        logout(&auth);
        router.navigate(AppRoute::Home.to_path());
    };

    view! {
        <div class="navbar bg-base-100 shadow-md sticky top-0 z-40">
            <div class="flex-1">
                <Link to=AppRoute::Home.to_path() class="btn btn-ghost text-xl tracking-widest">
                    "VILLA"
                </Link>
            </div>
            <div class="flex-none">
                <ul class="menu menu-horizontal px-1 gap-1">
                    <li><Link to=AppRoute::Retreats.to_path()>"Retreats"</Link></li>
                    <li><Link to=AppRoute::Rooms.to_path()>"Rooms"</Link></li>
                    <li><Link to=AppRoute::Gallery.to_path()>"Gallery"</Link></li>
                    <li><Link to=AppRoute::Booking.to_path()>"Book"</Link></li>
                    <li><Link to=AppRoute::Feedback.to_path()>"Feedback"</Link></li>
                    <Show when=is_admin>
                        <li>
                            <Link to=AppRoute::Admin(AdminRoute::Dashboard).to_path()>"Admin"</Link>
                        </li>
                    </Show>
                </ul>
                <Show
                    when=is_authenticated
                    fallback=|| view! {
                        <Link to=AppRoute::Login.to_path() class="btn btn-primary btn-sm">"Login"</Link>
                    }
                >
                    <span class="hidden md:inline text-sm mx-2">{greeting}</span>
                    <button class="btn btn-outline btn-sm" on:click=on_logout>"Logout"</button>
                </Show>
            </div>
        </div>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer footer-center p-8 bg-neutral text-neutral-content">
            <aside>
                <p class="font-bold tracking-widest">"VILLA"</p>
                <p>"Treetop, garden and riverside retreats."</p>
            </aside>
            <nav class="grid grid-flow-col gap-4">
                <Link to=AppRoute::Retreats.to_path() class="link link-hover">"Retreats"</Link>
                <Link to=AppRoute::Gallery.to_path() class="link link-hover">"Gallery"</Link>
                <Link to=AppRoute::Booking.to_path() class="link link-hover">"Book a stay"</Link>
            </nav>
        </footer>
    }
}

/// 首次访问的开屏动画，结束后调用 `on_done`
#[component]
pub fn Splash(on_done: Callback<()>) -> impl IntoView {
    set_timeout(move || on_done.run(()), SPLASH_DURATION);

    view! {
        <div class="hero min-h-screen bg-neutral text-neutral-content">
            <div class="hero-content text-center flex-col gap-4">
                <h1 class="text-5xl font-bold tracking-[0.5em] animate-pulse">"VILLA"</h1>
                <p class="opacity-70">"Boutique retreats"</p>
                <span class="loading loading-dots loading-lg"></span>
            </div>
        </div>
    }
}
