//! `fetch` transport for the core API clients.

use gloo_net::http::{Method, RequestBuilder};
use marketplace_client::error::{ClientError, ClientResult};
use marketplace_client::request::{
    FilePart, HttpBody, HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartPart,
};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

/// [`HttpClient`] backed by the browser's `fetch`.
///
/// Status codes are passed through untouched; turning a non-2xx status into
/// an error is left to the API clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn js_error(context: &str, e: JsValue) -> ClientError {
    ClientError::Network(format!("{context}: {e:?}"))
}

fn file_blob(file: &FilePart) -> Result<Blob, JsValue> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&file.content_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

/// Multipart body as `FormData`. The browser adds the boundary header.
fn form_data(parts: &[MultipartPart]) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    for part in parts {
        match part {
            MultipartPart::Text { name, value } => form.append_with_str(name, value)?,
            MultipartPart::File { name, file } => {
                form.append_with_blob_and_filename(name, &file_blob(file)?, &file.filename)?
            }
        }
    }
    Ok(form)
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    /// # Returns
    /// - `Ok(HttpResponse)` for any response, whatever its status
    /// - `Err(ClientError::Network)` if the request could not be built or sent
    /// - `Err(ClientError::Decode)` if the body could not be read as text
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let mut builder = RequestBuilder::new(&req.url).method(method(req.method));
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            HttpBody::Empty => builder.build(),
            HttpBody::Json(body) => builder.body(body),
            HttpBody::Multipart(parts) => {
                let form = form_data(&parts).map_err(|e| js_error("building form data", e))?;
                builder.body(form)
            }
        }
        .map_err(|e| ClientError::Network(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
