use leptos::prelude::*;
use leptos::task::spawn_local;
use marketplace_client::catalog::{ListedProduct, load_listing};
use marketplace_client::route::AppRoute;
use marketplace_client::stock::{self, StockLevel};

use crate::components::navbar::NavBar;
use crate::components::{ErrorAlert, Spinner};
use crate::context::use_app;
use crate::web::router::use_router;

#[component]
pub fn ProductListPage() -> impl IntoView {
    let app = use_app();

    let (keyword, set_keyword) = signal(String::new());
    let (products, set_products) = signal(Vec::<ListedProduct>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let load = move || {
        set_loading.set(true);
        set_error_msg.set(None);
        let keyword = keyword.get_untracked();
        spawn_local(async move {
            let client = app.client();
            match load_listing(&client.products, &client.media, &keyword).await {
                Ok(list) => set_products.set(list),
                Err(e) => {
                    log::error!("product listing failed: {e}");
                    let fallback = if keyword.trim().is_empty() {
                        "Could not load products. Is the backend running?"
                    } else {
                        "Search failed"
                    };
                    set_error_msg.set(Some(fallback.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    load();

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        load();
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <NavBar />
            <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-6">
                <form class="join w-full" on:submit=on_search>
                    <input
                        type="search"
                        placeholder="Search products"
                        class="input input-bordered join-item w-full"
                        on:input=move |ev| set_keyword.set(event_target_value(&ev))
                        prop:value=keyword
                    />
                    <button class="btn btn-primary join-item">"Search"</button>
                </form>

                <ErrorAlert message=error_msg />

                <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                    <Show
                        when=move || products.with(|p| !p.is_empty())
                        fallback=|| view! { <p class="text-center opacity-60 py-16">"No products found"</p> }
                    >
                        <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4">
                            <For
                                each=move || products.get()
                                key=|item| item.product.id.clone()
                                children=move |item| view! { <ProductCard item=item /> }
                            />
                        </div>
                    </Show>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn ProductCard(item: ListedProduct) -> impl IntoView {
    let app = use_app();
    let router = use_router();
    let ListedProduct { product, image_url } = item;
    let level = StockLevel::of(product.stock);
    let detail = AppRoute::ProductDetail(product.id.clone());
    let out_of_stock = level == StockLevel::OutOfStock;

    let name = product.name.clone();
    let category = product.category.clone();
    let price = format!("{:.2} €", product.price);
    let stock_text = format!("{} ({})", level.label(), product.stock);

    let image = image_url.clone();
    let on_add = move |ev: leptos::web_sys::MouseEvent| {
        ev.stop_propagation();
        let client = app.client();
        match stock::add_product(&client.cart, &product, 1, image.clone()) {
            Ok(()) => app.success(format!("{} added to cart", product.name)),
            Err(e) => app.error(e.user_message("Could not add to cart")),
        }
    };

    view! {
        <div
            class="card bg-base-100 shadow hover:shadow-xl transition cursor-pointer"
            on:click=move |_| router.navigate_to(detail.clone())
        >
            <figure class="h-48 bg-base-300">
                {match image_url {
                    Some(src) => view! { <img src=src alt=name.clone() class="h-full w-full object-cover" /> }.into_any(),
                    None => view! { <span class="opacity-40">"No image"</span> }.into_any(),
                }}
            </figure>
            <div class="card-body p-4">
                <h2 class="card-title text-base">{name.clone()}</h2>
                <span class="badge badge-ghost badge-sm">{category}</span>
                <div class="flex items-center justify-between mt-2">
                    <span class="text-lg font-bold">{price}</span>
                    <span class=format!("text-xs {}", level.css_class())>{stock_text}</span>
                </div>
                <div class="card-actions justify-end">
                    <button class="btn btn-primary btn-sm" disabled=out_of_stock on:click=on_add>
                        "Add to cart"
                    </button>
                </div>
            </div>
        </div>
    }
}
