use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use marketplace_client::config::MAX_AVATAR_BYTES;
use marketplace_client::route::AppRoute;
use marketplace_client::session::RegistrationOutcome;
use marketplace_client::validation::{validate_image, validate_registration};
use marketplace_shared::Role;

use crate::components::ErrorAlert;
use crate::context::use_app;
use crate::web::router::{Link, use_router};
use crate::web::{preview_url, read_file, revoke_preview, selected_files};

const REDIRECT_DELAY_MS: u32 = 2000;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let app = use_app();
    let router = use_router();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (role, set_role) = signal(Role::Client);
    let avatar = RwSignal::new(None::<marketplace_client::request::FilePart>);
    let (avatar_preview, set_avatar_preview) = signal(Option::<String>::None);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);

    let clear_avatar = move || {
        avatar.set(None);
        if let Some(url) = avatar_preview.get_untracked() {
            revoke_preview(&url);
        }
        set_avatar_preview.set(None);
    };

    let on_avatar = move |ev: leptos::web_sys::Event| {
        let Some(file) = selected_files(&ev).into_iter().next() else {
            return;
        };
        let preview = preview_url(&file);
        spawn_local(async move {
            let part = match read_file(&file).await {
                Ok(part) => part,
                Err(e) => {
                    set_error_msg.set(Some(e));
                    return;
                }
            };
            if let Err(e) = validate_image(&part, MAX_AVATAR_BYTES) {
                set_error_msg.set(Some(e.to_string()));
                if let Some(url) = preview {
                    revoke_preview(&url);
                }
                return;
            }
            clear_avatar();
            set_error_msg.set(None);
            avatar.set(Some(part));
            set_avatar_preview.set(preview);
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match validate_registration(&name.get(), &email.get(), &password.get(), role.get()) {
            Ok(r) => r,
            Err(e) => {
                set_error_msg.set(Some(e.to_string()));
                return;
            }
        };

        set_is_submitting.set(true);
        set_error_msg.set(None);
        set_success_msg.set(None);

        spawn_local(async move {
            let result = app
                .client()
                .session
                .register_with_avatar(&request, avatar.get_untracked())
                .await;
            match result {
                Ok(outcome) => {
                    if outcome == RegistrationOutcome::AvatarSkipped {
                        log::warn!("account created without avatar");
                    }
                    set_success_msg.set(Some(
                        "Account created! Redirecting to sign in...".to_string(),
                    ));
                    Timeout::new(REDIRECT_DELAY_MS, move || router.navigate_to(AppRoute::Login))
                        .forget();
                }
                Err(e) => {
                    set_error_msg.set(Some(
                        e.user_message("Something went wrong during registration"),
                    ));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Create an account"</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorAlert message=error_msg />
                        <Show when=move || success_msg.get().is_some()>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <span>{move || success_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="flex flex-col items-center gap-2">
                            {move || match avatar_preview.get() {
                                Some(src) => view! {
                                    <div class="avatar">
                                        <div class="w-20 rounded-full">
                                            <img src=src alt="avatar preview" />
                                        </div>
                                    </div>
                                    <button type="button" class="btn btn-ghost btn-xs" on:click=move |_| clear_avatar()>
                                        "Remove"
                                    </button>
                                }.into_any(),
                                None => view! {
                                    <div class="avatar placeholder">
                                        <div class="bg-neutral text-neutral-content w-20 rounded-full">
                                            <span>"?"</span>
                                        </div>
                                    </div>
                                }.into_any(),
                            }}
                            <input
                                type="file"
                                accept="image/*"
                                class="file-input file-input-bordered file-input-sm w-full"
                                on:change=on_avatar
                            />
                            <span class="text-xs opacity-60">"Optional, 5 MB max"</span>
                        </div>

                        <div class="form-control">
                            <label class="label" for="name"><span class="label-text">"Name"</span></label>
                            <input
                                id="name"
                                class="input input-bordered"
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                                prop:value=name
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="email"><span class="label-text">"Email"</span></label>
                            <input
                                id="email"
                                type="email"
                                class="input input-bordered"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password"><span class="label-text">"Password"</span></label>
                            <input
                                id="password"
                                type="password"
                                minlength="6"
                                class="input input-bordered"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="role"><span class="label-text">"I want to"</span></label>
                            <select
                                id="role"
                                class="select select-bordered"
                                on:change=move |ev| {
                                    let role = if event_target_value(&ev) == "SELLER" { Role::Seller } else { Role::Client };
                                    set_role.set(role);
                                }
                                prop:value=move || role.get().as_str()
                            >
                                <option value="CLIENT">"Buy products"</option>
                                <option value="SELLER">"Sell products"</option>
                            </select>
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Already registered? "
                            <Link route=AppRoute::Login class="link link-primary">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
