use crate::components::common::{ErrorAlert, Spinner};
use crate::hooks::{Load, load_once, use_scope};
use crate::web::router::Link;
use leptos::prelude::*;
use villa::catalog;
use villa::route::AppRoute;
use villa_shared::Feedback;

/// 首页展示的评价条数
const FEATURED_REVIEWS: usize = 6;

#[component]
pub fn HomePage() -> impl IntoView {
    let scope = use_scope();
    let reviews = load_once(&scope, "Home", |api| async move {
        catalog::public_feedback(&api).await
    });
    let error = Signal::derive(move || reviews.with(Load::error));

    view! {
        <div>
            <div class="hero min-h-[70vh] bg-base-200">
                <div class="hero-content text-center">
                    <div class="max-w-2xl">
                        <h1 class="text-5xl font-bold">"Escape to nature, in comfort"</h1>
                        <p class="py-6 text-base-content/70">
                            "Treetop lodges, garden villas and riverside suites tucked away from the noise."
                        </p>
                        <div class="flex justify-center gap-2">
                            <Link to=AppRoute::Booking.to_path() class="btn btn-primary">"Book now"</Link>
                            <Link to=AppRoute::Retreats.to_path() class="btn btn-outline">"Explore retreats"</Link>
                        </div>
                    </div>
                </div>
            </div>

            <section class="container mx-auto p-4 md:p-8">
                <h2 class="text-3xl font-bold mb-2">"What our guests say"</h2>
                <ErrorAlert message=error />
                <Show when=move || reviews.with(Load::is_loading)>
                    <Spinner />
                </Show>
                {move || reviews.with(|state| {
                    state.ready().cloned().map(|list| view! { <ReviewList reviews=list /> })
                })}
            </section>
        </div>
    }
}

#[component]
fn ReviewList(reviews: Vec<Feedback>) -> impl IntoView {
    if reviews.is_empty() {
        return view! { <p class="text-base-content/60">"No reviews yet."</p> }.into_any();
    }
    let average = catalog::average_rating(&reviews)
        .map(|avg| format!("{:.1} / 5 from {} reviews", avg, reviews.len()))
        .unwrap_or_default();

    view! {
        <p class="text-base-content/70 mb-6">{average}</p>
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            {reviews
                .into_iter()
                .take(FEATURED_REVIEWS)
                .map(|review| view! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <div class="text-warning">{stars(review.rating)}</div>
                            <p>{review.comment}</p>
                        </div>
                    </div>
                })
                .collect_view()}
        </div>
    }
    .into_any()
}

fn stars(rating: u8) -> String {
    (1..=5).map(|i| if i <= rating { '★' } else { '☆' }).collect()
}
