use leptos::prelude::*;
use leptos::task::spawn_local;
use marketplace_client::config::MAX_PRODUCT_IMAGE_BYTES;
use marketplace_client::request::FilePart;
use marketplace_client::seller::{ProductSave, SaveMode, StoredImage, UploadProgress, save_product, stored_images};
use marketplace_client::validation::{ProductDraft, ValidationError, validate_image};
use marketplace_client::ClientError;
use marketplace_shared::{PRODUCT_CATEGORIES, Product};

use crate::components::ErrorAlert;
use crate::context::use_app;
use crate::web::{preview_url, read_file, revoke_preview, selected_files};

/// What the dialog is open for.
#[derive(Debug, Clone, PartialEq)]
pub enum FormTarget {
    Create,
    Edit(Product),
}

#[derive(Debug, Clone, PartialEq)]
struct PendingImage {
    file: FilePart,
    preview: Option<String>,
}

#[component]
pub fn ProductFormDialog(
    /// `Some` opens the dialog.
    target: RwSignal<Option<FormTarget>>,
    /// Called with the product id, and whether it was an edit, after a
    /// successful save.
    #[prop(into)]
    on_saved: Callback<(String, bool)>,
) -> impl IntoView {
    let app = use_app();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let draft = RwSignal::new(ProductDraft::default());
    let existing = RwSignal::new(Vec::<StoredImage>::new());
    let to_delete = RwSignal::new(Vec::<String>::new());
    let pending = RwSignal::new(Vec::<PendingImage>::new());
    let (loading, set_loading) = signal(false);
    let (progress, set_progress) = signal(Option::<UploadProgress>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let field_error = RwSignal::new(Option::<ValidationError>::None);

    let release_previews = move || {
        pending.with_untracked(|list| {
            list.iter()
                .filter_map(|p| p.preview.as_deref())
                .for_each(revoke_preview)
        });
        pending.set(Vec::new());
    };

    // Reset and open whenever a new target arrives.
    Effect::new(move |_| {
        let current = target.get();
        let Some(dialog) = dialog_ref.get() else {
            return;
        };
        let Some(current) = current else {
            if dialog.open() {
                dialog.close();
            }
            return;
        };

        release_previews();
        existing.set(Vec::new());
        to_delete.set(Vec::new());
        set_error_msg.set(None);
        set_progress.set(None);
        field_error.set(None);
        set_loading.set(false);
        match current {
            FormTarget::Create => draft.set(ProductDraft::default()),
            FormTarget::Edit(product) => {
                draft.set(ProductDraft::from(&product));
                spawn_local(async move {
                    let images = stored_images(&app.client().media, &product.id).await;
                    existing.set(images);
                });
            }
        }
        if !dialog.open() {
            let _ = dialog.show_modal();
        }
    });

    let close = move || {
        release_previews();
        target.set(None);
    };

    let remove_existing = move |id: String| {
        existing.update(|list| list.retain(|img| img.id != id));
        to_delete.update(|ids| ids.push(id));
    };

    let on_files = move |ev: leptos::web_sys::Event| {
        let files = selected_files(&ev);
        spawn_local(async move {
            let mut accepted = Vec::new();
            for file in files {
                let part = match read_file(&file).await {
                    Ok(part) => part,
                    Err(e) => {
                        set_error_msg.set(Some(e));
                        return;
                    }
                };
                if let Err(e) = validate_image(&part, MAX_PRODUCT_IMAGE_BYTES) {
                    set_error_msg.set(Some(e.to_string()));
                    return;
                }
                accepted.push(PendingImage {
                    preview: preview_url(&file),
                    file: part,
                });
            }
            set_error_msg.set(None);
            pending.update(|list| list.extend(accepted));
        });
    };

    let remove_pending = move |index: usize| {
        pending.update(|list| {
            if index < list.len() {
                let removed = list.remove(index);
                if let Some(url) = removed.preview {
                    revoke_preview(&url);
                }
            }
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let current_draft = draft.get_untracked();
        if let Err(e) = current_draft.validate() {
            field_error.set(Some(e));
            return;
        }
        field_error.set(None);

        let Some(current) = target.get_untracked() else {
            return;
        };
        let (mode, is_edit) = match current {
            FormTarget::Create => (SaveMode::Create, false),
            FormTarget::Edit(product) => (SaveMode::Edit { product_id: product.id }, true),
        };
        let save = ProductSave {
            draft: current_draft,
            mode,
            images_to_delete: to_delete.get_untracked(),
            new_images: pending.with_untracked(|list| list.iter().map(|p| p.file.clone()).collect()),
        };

        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            let client = app.client();
            let result = save_product(&client.products, &client.media, save, |p| {
                set_progress.set(Some(p))
            })
            .await;
            set_loading.set(false);
            match result {
                Ok(product_id) => {
                    close();
                    on_saved.run((product_id, is_edit));
                }
                Err(ClientError::Validation(e)) => field_error.set(Some(e)),
                Err(e) => {
                    log::error!("saving product failed: {e}");
                    set_error_msg.set(Some(e.user_message("An error occurred while saving")));
                }
            }
        });
    };

    let error_for = move |field: &'static str| {
        move || {
            field_error.with(|e| {
                e.as_ref()
                    .filter(|e| e.field() == Some(field))
                    .map(|e| e.to_string())
            })
        }
    };
    // Errors not tied to a form field go to the banner.
    let banner = Signal::derive(move || {
        field_error
            .with(|e| e.as_ref().filter(|e| e.field().is_none()).map(|e| e.to_string()))
            .or_else(|| error_msg.get())
    });

    let text_field = move |label: &'static str, field: &'static str, get: fn(&ProductDraft) -> String, set: fn(&mut ProductDraft, String)| {
        view! {
            <div class="form-control">
                <label class="label"><span class="label-text">{label}</span></label>
                <input
                    class="input input-bordered"
                    prop:value=move || draft.with(get)
                    on:input=move |ev| draft.update(|d| set(d, event_target_value(&ev)))
                />
                <span class="text-error text-xs mt-1">{error_for(field)}</span>
            </div>
        }
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| close()>
            <div class="modal-box max-w-2xl">
                <h3 class="font-bold text-lg mb-4">
                    {move || match target.get() {
                        Some(FormTarget::Edit(_)) => "Edit product",
                        _ => "New product",
                    }}
                </h3>
                <form class="space-y-3" on:submit=on_submit>
                    <ErrorAlert message=banner />

                    {text_field("Name", "name", |d| d.name.clone(), |d, v| d.name = v)}

                    <div class="form-control">
                        <label class="label"><span class="label-text">"Description"</span></label>
                        <textarea
                            class="textarea textarea-bordered h-24"
                            prop:value=move || draft.with(|d| d.description.clone())
                            on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                        ></textarea>
                        <span class="text-error text-xs mt-1">{error_for("description")}</span>
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        {text_field("Price (€)", "price", |d| d.price.clone(), |d, v| d.price = v)}
                        {text_field("Stock", "stock", |d| d.stock.clone(), |d, v| d.stock = v)}
                    </div>

                    <div class="form-control">
                        <label class="label"><span class="label-text">"Category"</span></label>
                        <select
                            class="select select-bordered"
                            prop:value=move || draft.with(|d| d.category.clone())
                            on:change=move |ev| draft.update(|d| d.category = event_target_value(&ev))
                        >
                            <option value="" disabled=true>"Choose a category"</option>
                            {PRODUCT_CATEGORIES
                                .iter()
                                .map(|c| view! { <option value=*c>{*c}</option> })
                                .collect_view()}
                        </select>
                        <span class="text-error text-xs mt-1">{error_for("category")}</span>
                    </div>

                    <div class="form-control">
                        <label class="label"><span class="label-text">"Images (2 MB max each)"</span></label>
                        <input
                            type="file"
                            accept="image/*"
                            multiple=true
                            class="file-input file-input-bordered w-full"
                            on:change=on_files
                        />
                        <div class="flex flex-wrap gap-2 mt-2">
                            <For
                                each=move || existing.get()
                                key=|img| img.id.clone()
                                children=move |img| {
                                    let id = img.id.clone();
                                    view! {
                                        <div class="relative">
                                            <img src=img.url class="w-20 h-20 object-cover rounded" />
                                            <button
                                                type="button"
                                                class="btn btn-circle btn-xs btn-error absolute -top-2 -right-2"
                                                on:click=move |_| remove_existing(id.clone())
                                            >"✕"</button>
                                        </div>
                                    }
                                }
                            />
                            {move || {
                                pending
                                    .get()
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, p)| view! {
                                        <div class="relative">
                                            {match p.preview {
                                                Some(src) => view! { <img src=src class="w-20 h-20 object-cover rounded ring ring-primary" /> }.into_any(),
                                                None => view! { <span class="badge">{p.file.filename.clone()}</span> }.into_any(),
                                            }}
                                            <button
                                                type="button"
                                                class="btn btn-circle btn-xs absolute -top-2 -right-2"
                                                on:click=move |_| remove_pending(i)
                                            >"✕"</button>
                                        </div>
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </div>

                    <Show when=move || progress.get().is_some()>
                        <div class="space-y-1">
                            <progress
                                class="progress progress-primary w-full"
                                value=move || progress.get().map_or(0, |p| p.done).to_string()
                                max=move || progress.get().map_or(1, |p| p.total).to_string()
                            ></progress>
                            <span class="text-xs opacity-70">
                                {move || progress.get().map(|p| format!("Uploading images {}/{}", p.done, p.total))}
                            </span>
                        </div>
                    </Show>

                    <div class="modal-action">
                        <button type="button" class="btn" on:click=move |_| close() disabled=move || loading.get()>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                            {move || if loading.get() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else {
                                "Save".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
