use super::AdminLayout;
use crate::components::common::{ErrorAlert, Spinner};
use crate::hooks::{Load, load_once, use_scope};
use crate::web::router::Link;
use leptos::prelude::*;
use villa::admin::resources::{self, DashboardCounts};
use villa::route::{AdminRoute, AppRoute};

fn stat_cards(counts: &DashboardCounts) -> Vec<(&'static str, String, AdminRoute)> {
    vec![
        ("Bookings", counts.bookings.to_string(), AdminRoute::Bookings),
        ("Categories", counts.categories.to_string(), AdminRoute::Categories),
        ("Rooms", counts.rooms.to_string(), AdminRoute::Rooms),
        ("Gallery images", counts.gallery.to_string(), AdminRoute::Gallery),
        ("Feedback", counts.feedback.to_string(), AdminRoute::Feedback),
        ("Users", counts.users.to_string(), AdminRoute::Users),
    ]
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let scope = use_scope();
    let counts = load_once(&scope, "Admin.Dashboard", |api| async move {
        resources::load_dashboard(&api).await
    });
    let error = Signal::derive(move || counts.with(Load::error));

    view! {
        <AdminLayout title="Dashboard">
            <ErrorAlert message=error />
            <Show when=move || counts.with(Load::is_loading)>
                <Spinner />
            </Show>
            <div class="stats stats-vertical lg:stats-horizontal shadow w-full">
                {move || counts.with(|state| {
                    state
                        .ready()
                        .map(stat_cards)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|(label, value, route)| view! {
                            <div class="stat">
                                <div class="stat-title">{label}</div>
                                <div class="stat-value">{value}</div>
                                <div class="stat-actions">
                                    <Link to=AppRoute::Admin(route).to_path() class="btn btn-xs btn-ghost">"Manage"</Link>
                                </div>
                            </div>
                        })
                        .collect_view()
                })}
            </div>
        </AdminLayout>
    }
}
