use leptos::prelude::*;
use leptos::task::spawn_local;
use marketplace_client::catalog::{ProductDetail, load_detail};
use marketplace_client::route::AppRoute;
use marketplace_client::stock::{self, StockLevel, clamp_quantity};

use crate::components::navbar::NavBar;
use crate::components::{ErrorAlert, Spinner};
use crate::context::use_app;
use crate::web::router::{Link, use_router};

#[component]
pub fn ProductDetailPage(id: String) -> impl IntoView {
    let app = use_app();

    let (detail, set_detail) = signal(Option::<ProductDetail>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    spawn_local(async move {
        let client = app.client();
        match load_detail(&client.products, &client.media, &id).await {
            Ok(d) => set_detail.set(Some(d)),
            Err(e) => {
                log::error!("product {id} failed to load: {e}");
                set_error_msg.set(Some("Could not load this product".to_string()));
            }
        }
        set_loading.set(false);
    });

    view! {
        <div class="min-h-screen bg-base-200">
            <NavBar />
            <div class="max-w-6xl mx-auto p-4 md:p-8 space-y-4">
                <Link route=AppRoute::Products class="btn btn-ghost btn-sm">"← Back to products"</Link>
                <ErrorAlert message=error_msg />
                <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                    {move || detail.get().map(|d| view! { <DetailView detail=d /> })}
                </Show>
            </div>
        </div>
    }
}

#[component]
fn DetailView(detail: ProductDetail) -> impl IntoView {
    let app = use_app();
    let router = use_router();
    let ProductDetail { product, images } = detail;
    let image_count = images.len();
    let images = StoredValue::new(images);

    let (selected, set_selected) = signal(0usize);
    let (quantity, set_quantity) = signal(1u32);
    let stock_count = product.stock;
    let level = StockLevel::of(stock_count);

    let current_image = move || images.with_value(|imgs| imgs.get(selected.get()).cloned());

    let product = StoredValue::new(product);
    let on_add = move |_| {
        let qty = quantity.get_untracked();
        let cover = images.with_value(|imgs| imgs.first().cloned());
        let client = app.client();
        let result = product.with_value(|p| stock::add_product(&client.cart, p, qty, cover));
        match result {
            Ok(()) => {
                let name = product.with_value(|p| p.name.clone());
                app.success(format!("{qty} x {name} added to cart"));
                set_quantity.set(1);
            }
            Err(e) => app.error(e.user_message("Could not add to cart")),
        }
    };

    view! {
        <div class="card lg:card-side bg-base-100 shadow-xl">
            <figure class="lg:w-1/2 bg-base-300 relative min-h-80">
                {move || match current_image() {
                    Some(src) => view! { <img src=src class="w-full h-full object-contain" /> }.into_any(),
                    None => view! { <span class="opacity-40">"No image"</span> }.into_any(),
                }}
                <Show when=move || { image_count > 1 }>
                    <button
                        class="btn btn-circle btn-sm absolute left-2"
                        disabled=move || selected.get() == 0
                        on:click=move |_| set_selected.update(|i| *i = i.saturating_sub(1))
                    >"❮"</button>
                    <button
                        class="btn btn-circle btn-sm absolute right-2"
                        disabled=move || selected.get() + 1 >= image_count
                        on:click=move |_| set_selected.update(|i| if *i + 1 < image_count { *i += 1 })
                    >"❯"</button>
                </Show>
            </figure>
            <div class="card-body lg:w-1/2">
                <h1 class="card-title text-3xl">{product.with_value(|p| p.name.clone())}</h1>
                <div class="flex gap-2">
                    <span class="badge badge-outline">{product.with_value(|p| p.category.clone())}</span>
                    <span class=format!("badge {}", level.css_class())>{level.label()}</span>
                </div>
                <p class="text-2xl font-bold">{product.with_value(|p| format!("{:.2} €", p.price))}</p>
                <p class="whitespace-pre-line">{product.with_value(|p| p.description.clone())}</p>
                <p class="text-sm opacity-70">
                    {product.with_value(|p| format!("Sold by {} · {} in stock", p.seller_name, p.stock))}
                </p>

                <Show when=move || { stock_count > 0 }>
                    <div class="flex items-center gap-4 mt-4">
                        <div class="join">
                            <button
                                class="btn join-item"
                                disabled=move || quantity.get() <= 1
                                on:click=move |_| set_quantity.update(|q| *q = clamp_quantity(q.saturating_sub(1), stock_count))
                            >"−"</button>
                            <span class="btn join-item no-animation">{move || quantity.get()}</span>
                            <button
                                class="btn join-item"
                                disabled=move || quantity.get() >= stock_count
                                on:click=move |_| set_quantity.update(|q| *q = clamp_quantity(q.saturating_add(1), stock_count))
                            >"+"</button>
                        </div>
                        <button class="btn btn-primary" on:click=on_add>"Add to cart"</button>
                        <button class="btn btn-ghost" on:click=move |_| router.navigate_to(AppRoute::Cart)>
                            "View cart"
                        </button>
                    </div>
                </Show>

                <Show when=move || { image_count > 1 }>
                    <div class="flex gap-2 mt-4 overflow-x-auto">
                        {images.with_value(|imgs| {
                            imgs.iter()
                                .cloned()
                                .enumerate()
                                .map(|(i, src)| view! {
                                    <img
                                        src=src
                                        class=move || if selected.get() == i { "w-16 h-16 object-cover rounded ring ring-primary" } else { "w-16 h-16 object-cover rounded opacity-70 cursor-pointer" }
                                        on:click=move |_| set_selected.set(i)
                                    />
                                })
                                .collect_view()
                        })}
                    </div>
                </Show>
            </div>
        </div>
    }
}
