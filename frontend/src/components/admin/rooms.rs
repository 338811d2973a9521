use super::{AdminLayout, AdminList, Toolbar};
use crate::web::router::use_router;
use leptos::prelude::*;
use villa::route::{AdminRoute, AppRoute, NavState};
use villa_shared::{BOOKABLE_CATEGORIES, Room};

#[component]
pub fn RoomsAdminPage() -> impl IntoView {
    let router = use_router();
    let list = AdminList::<Room>::new("Admin.Rooms");
    let form_path = AppRoute::Admin(AdminRoute::RoomForm).to_path();

    let rows = {
        let list = list.clone();
        move || {
            let list = list.clone();
            view! {
                <table class="table table-zebra">
                    <thead>
                        <tr>
                            <th>"Room"</th>
                            <th>"Category"</th>
                            <th>"Guests"</th>
                            <th>"Photos"</th>
                            <th>"Available"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {list
                            .rows()
                            .into_iter()
                            .map(|room| {
                                let list = list.clone();
                                let id = room.room_id;
                                let editing = room.clone();
                                view! {
                                    <tr>
                                        <td class="font-semibold">{id}</td>
                                        <td>{room.category.clone()}</td>
                                        <td>{room.max_guests}</td>
                                        <td>{room.photos.len()}</td>
                                        <td>
                                            {if room.available {
                                                view! { <span class="badge badge-success">"Yes"</span> }.into_any()
                                            } else {
                                                view! { <span class="badge badge-ghost">"No"</span> }.into_any()
                                            }}
                                        </td>
                                        <td class="flex gap-1">
                                            <button
                                                class="btn btn-outline btn-xs"
                                                on:click=move |_| {
                                                    router.navigate_with(form_path, NavState::EditRoom(editing.clone()))
                                                }
                                            >
                                                "Edit"
                                            </button>
                                            <button class="btn btn-error btn-xs" on:click=move |_| list.delete(id)>
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            }
            .into_any()
        }
    };

    view! {
        <AdminLayout title="Rooms">
            <Toolbar
                on_search=list.on_search()
                filters=BOOKABLE_CATEGORIES.to_vec()
                on_filter=list.on_filter()
            >
                <button class="btn btn-primary btn-sm" on:click=move |_| router.navigate(form_path)>
                    "Add room"
                </button>
            </Toolbar>
            {list.frame(rows)}
        </AdminLayout>
    }
}
