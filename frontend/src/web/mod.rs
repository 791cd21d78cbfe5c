//! Browser adapters: storage, fetch transport, History-API router and file
//! inputs. Everything that touches `web_sys` lives here.

mod browser;
mod fetch;
pub mod router;
mod storage;

pub use browser::{confirm, page_location, preview_url, read_file, revoke_preview, selected_files};
pub use fetch::FetchHttpClient;
pub use storage::BrowserStorage;
