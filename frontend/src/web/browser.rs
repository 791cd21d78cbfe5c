//! Page location and file inputs.

use marketplace_client::config::PageLocation;
use marketplace_client::request::FilePart;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement, Url};

/// `window.location`, or an empty location outside a page.
pub fn page_location() -> PageLocation {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return PageLocation::default();
    };
    PageLocation {
        protocol: location.protocol().ok(),
        hostname: location.hostname().ok(),
    }
}

/// Files picked in the `<input type="file">` that fired `ev`. The input is
/// reset so picking the same file again fires another change event.
pub fn selected_files(ev: &Event) -> Vec<File> {
    let Some(input) = ev
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
    else {
        return Vec::new();
    };
    let files = input
        .files()
        .map(|list| (0..list.length()).filter_map(|i| list.item(i)).collect())
        .unwrap_or_default();
    input.set_value("");
    files
}

/// Reads the whole of `file` into memory for upload.
///
/// # Arguments
/// - `file`: a file taken from [`selected_files`]
///
/// # Returns
/// - `Ok(FilePart)` carrying the name, MIME type and bytes
/// - `Err(String)` with a displayable reason when the read is rejected
pub async fn read_file(file: &File) -> Result<FilePart, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("could not read {}: {e:?}", file.name()))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(FilePart::new(file.name(), file.type_(), bytes))
}

/// Object URL for previewing `file`; release it with [`revoke_preview`].
pub fn preview_url(file: &File) -> Option<String> {
    Url::create_object_url_with_blob(file).ok()
}

/// Releases a URL made by [`preview_url`]. Unknown URLs are ignored.
pub fn revoke_preview(url: &str) {
    let _ = Url::revoke_object_url(url);
}

/// Blocking `window.confirm` dialog.
///
/// # Returns
/// - `true` if the user pressed OK
/// - `false` on Cancel, or when no window is available
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
