use leptos::prelude::*;
use leptos::task::spawn_local;
use marketplace_client::route::AppRoute;
use marketplace_client::seller::{delete_product, my_products};
use marketplace_client::stock::StockLevel;
use marketplace_shared::Product;

use crate::components::product_form_dialog::{FormTarget, ProductFormDialog};
use crate::components::navbar::NavBar;
use crate::components::ErrorAlert;
use crate::context::use_app;
use crate::web::confirm;
use crate::web::router::Link;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = use_app();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let form_target = RwSignal::new(Option::<FormTarget>::None);

    let load_products = move || {
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match my_products(&app.client().products).await {
                Ok(list) => set_products.set(list),
                Err(e) => {
                    log::error!("loading seller products failed: {e}");
                    set_error_msg.set(Some("Could not load your products".to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    load_products();

    let on_saved = move |(_, was_edit): (String, bool)| {
        app.success(if was_edit { "Product updated!" } else { "Product created!" });
        load_products();
    };

    let handle_delete = move |product: Product| {
        let prompt = format!("Delete \"{}\"? All of its images will be deleted too.", product.name);
        if !confirm(&prompt) {
            return;
        }
        spawn_local(async move {
            match delete_product(&app.client().products, &product.id).await {
                Ok(()) => {
                    app.success("Product deleted!");
                    load_products();
                }
                Err(e) => {
                    log::error!("deleting product {} failed: {e}", product.id);
                    app.error("Could not delete the product");
                }
            }
        });
    };

    let total_products = move || products.with(|p| p.len());
    let total_units = move || products.with(|p| p.iter().map(|p| p.stock).sum::<u32>());
    let out_of_stock = move || products.with(|p| p.iter().filter(|p| p.stock == 0).count());

    view! {
        <div class="min-h-screen bg-base-200">
            <NavBar />
            <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">
                <div class="flex items-center justify-between">
                    <h1 class="text-2xl font-bold">"Seller dashboard"</h1>
                    <div class="flex gap-2">
                        <Link route=AppRoute::Products class="btn btn-ghost">"View shop"</Link>
                        <button class="btn btn-primary" on:click=move |_| form_target.set(Some(FormTarget::Create))>
                            "Add product"
                        </button>
                    </div>
                </div>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-title">"Products"</div>
                        <div class="stat-value text-primary">{total_products}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Units in stock"</div>
                        <div class="stat-value">{total_units}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Out of stock"</div>
                        <div class="stat-value text-error">{out_of_stock}</div>
                    </div>
                </div>

                <ErrorAlert message=error_msg />

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <h3 class="card-title">"My products"</h3>
                            <button
                                on:click=move |_| load_products()
                                disabled=move || loading.get()
                                class="btn btn-ghost btn-sm"
                            >
                                {move || if loading.get() { "Loading..." } else { "Refresh" }}
                            </button>
                        </div>
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Name"</th>
                                        <th>"Category"</th>
                                        <th>"Price"</th>
                                        <th>"Stock"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || total_products() == 0 && !loading.get()>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                "No products yet. Add one to start selling."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || products.get()
                                        key=|p| (p.id.clone(), p.updated_at)
                                        children=move |product| {
                                            let level = StockLevel::of(product.stock);
                                            let for_edit = product.clone();
                                            let for_delete = product.clone();
                                            view! {
                                                <tr>
                                                    <td class="font-semibold">{product.name.clone()}</td>
                                                    <td>{product.category.clone()}</td>
                                                    <td>{format!("{:.2} €", product.price)}</td>
                                                    <td>
                                                        <span class=format!("badge {}", level.css_class())>
                                                            {product.stock}
                                                        </span>
                                                    </td>
                                                    <td class="flex gap-2 justify-end">
                                                        <button
                                                            class="btn btn-ghost btn-xs"
                                                            on:click=move |_| form_target.set(Some(FormTarget::Edit(for_edit.clone())))
                                                        >"Edit"</button>
                                                        <button
                                                            class="btn btn-ghost btn-xs text-error"
                                                            on:click=move |_| handle_delete(for_delete.clone())
                                                        >"Delete"</button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </div>
            <ProductFormDialog target=form_target on_saved=on_saved />
        </div>
    }
}
