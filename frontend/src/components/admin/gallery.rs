use super::{AdminLayout, AdminList, Toolbar};
use crate::web::router::use_router;
use leptos::prelude::*;
use villa::route::{AdminRoute, AppRoute, NavState};
use villa_shared::{BOOKABLE_CATEGORIES, GalleryItem};

#[component]
pub fn GalleryAdminPage() -> impl IntoView {
    let router = use_router();
    let list = AdminList::<GalleryItem>::new("Admin.Gallery");
    let form_path = AppRoute::Admin(AdminRoute::GalleryForm).to_path();

    let cards = {
        let list = list.clone();
        move || {
            let list = list.clone();
            view! {
                <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 p-4">
                    {list
                        .rows()
                        .into_iter()
                        .map(|item| {
                            let list = list.clone();
                            let id = item.id.clone();
                            let editing = item.clone();
                            view! {
                                <div class="card card-compact bg-base-100 shadow">
                                    <figure class="h-40">
                                        <img src=item.image.clone() alt=item.name.clone() class="object-cover w-full h-full" />
                                    </figure>
                                    <div class="card-body">
                                        <h3 class="card-title text-base">{item.name.clone()}</h3>
                                        <p class="text-xs text-base-content/60">{item.category.clone()}</p>
                                        <div class="card-actions justify-end">
                                            <button
                                                class="btn btn-outline btn-xs"
                                                on:click=move |_| {
                                                    router.navigate_with(form_path, NavState::EditGallery(editing.clone()))
                                                }
                                            >
                                                "Edit"
                                            </button>
                                            <button
                                                class="btn btn-error btn-xs"
                                                on:click=move |_| list.delete(id.clone())
                                            >
                                                "Delete"
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            }
            .into_any()
        }
    };

    view! {
        <AdminLayout title="Gallery">
            <Toolbar
                on_search=list.on_search()
                filters=BOOKABLE_CATEGORIES.to_vec()
                on_filter=list.on_filter()
            >
                <button class="btn btn-primary btn-sm" on:click=move |_| router.navigate(form_path)>
                    "Add image"
                </button>
            </Toolbar>
            {list.frame(cards)}
        </AdminLayout>
    }
}
