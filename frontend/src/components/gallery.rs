use crate::components::common::{ErrorAlert, Spinner};
use crate::hooks::{Load, load_once, use_scope};
use leptos::prelude::*;
use villa::catalog;
use villa_shared::GalleryItem;

#[component]
pub fn GalleryPage() -> impl IntoView {
    let scope = use_scope();
    let groups = load_once(&scope, "Gallery", |api| async move { catalog::gallery(&api).await });
    let error = Signal::derive(move || groups.with(Load::error));

    view! {
        <div class="container mx-auto p-4 md:p-8">
            <h1 class="text-3xl font-bold mb-6">"Gallery"</h1>
            <ErrorAlert message=error />
            <Show when=move || groups.with(Load::is_loading)>
                <Spinner />
            </Show>
            {move || groups.with(|state| {
                state
                    .ready()
                    .cloned()
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(name, items)| view! { <GallerySection name=name items=items /> })
                    .collect_view()
            })}
        </div>
    }
}

#[component]
fn GallerySection(name: String, items: Vec<GalleryItem>) -> impl IntoView {
    view! {
        <section class="mb-10">
            <h2 class="text-2xl font-semibold mb-4">{name}</h2>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                {items
                    .into_iter()
                    .map(|item| view! {
                        <figure class="rounded-box overflow-hidden shadow">
                            <img src=item.image alt=item.name.clone() class="object-cover w-full h-48" />
                            <figcaption class="p-2 text-sm">{item.name}</figcaption>
                        </figure>
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
