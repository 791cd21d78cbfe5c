use leptos::prelude::*;
use marketplace_client::route::AppRoute;
use marketplace_client::stock;
use marketplace_shared::CartItem;

use crate::components::navbar::NavBar;
use crate::context::use_app;
use crate::web::confirm;
use crate::web::router::Link;

#[component]
pub fn CartPage() -> impl IntoView {
    let app = use_app();
    let cart = app.cart;
    let total = move || cart.with(|items| items.iter().map(CartItem::line_total).sum::<f64>());

    let on_clear = move |_| {
        if !confirm("Empty the whole cart?") {
            return;
        }
        match app.client().cart.clear_cart() {
            Ok(()) => app.info("Cart emptied"),
            Err(e) => app.error(e.user_message("Could not save the cart")),
        }
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <NavBar />
            <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-6">
                <div class="flex items-center justify-between">
                    <h1 class="text-2xl font-bold">"Your cart"</h1>
                    <Link route=AppRoute::Products class="btn btn-ghost btn-sm">"Continue shopping"</Link>
                </div>

                <Show
                    when=move || cart.with(|items| !items.is_empty())
                    fallback=|| view! {
                        <div class="card bg-base-100 shadow">
                            <div class="card-body items-center text-center">
                                <p class="opacity-60">"Your cart is empty"</p>
                                <Link route=AppRoute::Products class="btn btn-primary btn-sm">"Browse products"</Link>
                            </div>
                        </div>
                    }
                >
                    <div class="card bg-base-100 shadow overflow-x-auto">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th></th>
                                    <th>"Product"</th>
                                    <th>"Price"</th>
                                    <th>"Quantity"</th>
                                    <th>"Total"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || cart.get()
                                    key=|item| (item.product_id.clone(), item.quantity)
                                    children=move |item| view! { <CartRow item=item /> }
                                />
                            </tbody>
                        </table>
                    </div>

                    <div class="card bg-base-100 shadow">
                        <div class="card-body flex-row items-center justify-between">
                            <span class="text-xl font-bold">{move || format!("Total: {:.2} €", total())}</span>
                            <div class="flex gap-2">
                                <button class="btn btn-outline btn-error" on:click=on_clear>"Empty cart"</button>
                                <button class="btn btn-primary" on:click=move |_| app.info("Checkout is coming soon!")>
                                    "Checkout"
                                </button>
                            </div>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn CartRow(item: CartItem) -> impl IntoView {
    let app = use_app();
    let item = StoredValue::new(item);
    let can_increase = item.with_value(stock::can_increase);
    let can_decrease = item.with_value(|i| i.quantity > 1);

    let on_increase = move |_| {
        let result = item.with_value(|i| stock::increase_line(&app.client().cart, i));
        if let Err(e) = result {
            app.error(e.user_message("Could not update the cart"));
        }
    };
    let on_decrease = move |_| {
        let result = item.with_value(|i| stock::decrease_line(&app.client().cart, i));
        if let Err(e) = result {
            app.error(e.user_message("Could not update the cart"));
        }
    };
    let on_remove = move |_| {
        let (id, name) = item.with_value(|i| (i.product_id.clone(), i.name.clone()));
        match app.client().cart.remove_from_cart(&id) {
            Ok(()) => app.success(format!("{name} removed from cart")),
            Err(e) => app.error(e.user_message("Could not update the cart")),
        }
    };

    item.with_value(|i| {
        let image = i.image_url.clone();
        let product_id = i.product_id.clone();
        let name = i.name.clone();
        let unit_price = i.unit_price;
        let quantity = i.quantity;
        let line_total = i.line_total();
        view! {
            <tr>
                <td>
                    {image.map(|src| view! {
                        <div class="avatar"><div class="w-12 rounded"><img src=src /></div></div>
                    })}
                </td>
                <td>
                    <Link route=AppRoute::ProductDetail(product_id) class="link link-hover">
                        {name}
                    </Link>
                </td>
                <td>{format!("{:.2} €", unit_price)}</td>
                <td>
                    <div class="join">
                        <button class="btn btn-xs join-item" disabled=!can_decrease on:click=on_decrease>"−"</button>
                        <span class="btn btn-xs join-item no-animation">{quantity}</span>
                        <button
                            class=if can_increase { "btn btn-xs join-item" } else { "btn btn-xs join-item opacity-50" }
                            on:click=on_increase
                        >"+"</button>
                    </div>
                </td>
                <td class="font-semibold">{format!("{:.2} €", line_total)}</td>
                <td>
                    <button class="btn btn-ghost btn-xs text-error" on:click=on_remove>"Remove"</button>
                </td>
            </tr>
        }
    })
}
