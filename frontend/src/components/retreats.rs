use crate::components::common::{ErrorAlert, Spinner};
use crate::hooks::{Load, load_once, use_scope};
use crate::web::router::Link;
use leptos::prelude::*;
use villa::catalog;
use villa::route::rooms_path_for;
use villa_shared::Category;

#[component]
pub fn RetreatsPage() -> impl IntoView {
    let scope = use_scope();
    let categories = load_once(&scope, "Retreats", |api| async move {
        catalog::categories(&api).await
    });
    let error = Signal::derive(move || categories.with(Load::error));

    view! {
        <div class="container mx-auto p-4 md:p-8">
            <h1 class="text-3xl font-bold mb-6">"Our retreats"</h1>
            <ErrorAlert message=error />
            <Show when=move || categories.with(Load::is_loading)>
                <Spinner />
            </Show>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                {move || categories.with(|state| {
                    state
                        .ready()
                        .cloned()
                        .unwrap_or_default()
                        .into_iter()
                        .map(|category| view! { <CategoryCard category=category /> })
                        .collect_view()
                })}
            </div>
        </div>
    }
}

#[component]
fn CategoryCard(category: Category) -> impl IntoView {
    let rooms_path = rooms_path_for(&category.name);
    view! {
        <div class="card bg-base-100 shadow-xl">
            <figure class="h-56 overflow-hidden">
                <img src=category.image.clone() alt=category.name.clone() class="object-cover w-full h-full" />
            </figure>
            <div class="card-body">
                <h2 class="card-title">{category.name.clone()}</h2>
                <p class="text-base-content/70">{category.description.clone()}</p>
                <ul class="list-disc list-inside text-sm">
                    {category.features.iter().map(|f| view! { <li>{f.clone()}</li> }).collect_view()}
                </ul>
                <div class="card-actions justify-between items-center mt-2">
                    <span class="text-lg font-semibold">{format!("${:.0} / night", category.price)}</span>
                    <Link to=rooms_path class="btn btn-primary btn-sm">"View rooms"</Link>
                </div>
            </div>
        </div>
    }
}
