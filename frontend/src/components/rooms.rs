use crate::components::common::{ErrorAlert, Spinner};
use crate::hooks::{Load, load_once, use_scope};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use villa::catalog;
use villa::route::{AppRoute, booking_path_for, query_value};
use villa_shared::{CategoryRef, Room};

#[component]
pub fn RoomsPage() -> impl IntoView {
    let router = use_router();
    let scope = use_scope();

    let category = query_value(&router.current_path().get_untracked(), "category")
        .filter(|c| !c.trim().is_empty());
    let filter = category.as_deref().map(CategoryRef::new);
    let rooms = load_once(&scope, "Rooms", move |api| async move {
        catalog::rooms(&api, filter).await
    });
    let error = Signal::derive(move || rooms.with(Load::error));
    let title = category.unwrap_or_else(|| "All rooms".to_string());

    view! {
        <div class="container mx-auto p-4 md:p-8">
            <div class="flex justify-between items-center mb-6">
                <h1 class="text-3xl font-bold">{title}</h1>
                <Link to=AppRoute::Retreats.to_path() class="btn btn-ghost btn-sm">"All retreats"</Link>
            </div>
            <ErrorAlert message=error />
            <Show when=move || rooms.with(Load::is_loading)>
                <Spinner />
            </Show>
            <Show when=move || rooms.with(|s| s.ready().is_some_and(Vec::is_empty))>
                <p class="text-base-content/60">"No rooms in this category yet."</p>
            </Show>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                {move || rooms.with(|state| {
                    state
                        .ready()
                        .cloned()
                        .unwrap_or_default()
                        .into_iter()
                        .map(|room| view! { <RoomCard room=room /> })
                        .collect_view()
                })}
            </div>
        </div>
    }
}

#[component]
fn RoomCard(room: Room) -> impl IntoView {
    let cover = room.photos.first().cloned().unwrap_or_default();
    let booking_path = booking_path_for(&room.category);
    let badge = if room.available {
        view! { <span class="badge badge-success">"Available"</span> }.into_any()
    } else {
        view! { <span class="badge badge-ghost">"Unavailable"</span> }.into_any()
    };

    view! {
        <div class="card lg:card-side bg-base-100 shadow-xl">
            <figure class="lg:w-1/2 h-56">
                <img src=cover alt=format!("Room {}", room.room_id) class="object-cover w-full h-full" />
            </figure>
            <div class="card-body">
                <h2 class="card-title">{format!("Room {}", room.room_id)} {badge}</h2>
                <p class="text-sm text-base-content/70">{room.category.clone()}</p>
                <p>{room.special_description.clone()}</p>
                <p class="text-sm">{format!("Up to {} guests", room.max_guests)}</p>
                <div class="card-actions justify-end">
                    <Link to=booking_path class="btn btn-primary btn-sm">"Book this category"</Link>
                </div>
            </div>
        </div>
    }
}
