//! `fetch`-backed form transport.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, RequestInit, Response, Window};

use crate::error::{Error, Result};
use crate::form::{SubmitRequest, Transport};

/// Posts forms as `multipart/form-data` with `fetch`.
#[derive(Clone, Debug)]
pub struct FetchTransport {
    window: Window,
}

impl FetchTransport {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

fn network(err: &JsValue) -> Error {
    Error::Network(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl Transport for FetchTransport {
    async fn post(&self, request: &SubmitRequest) -> Result<u16> {
        let body = FormData::new().map_err(|e| network(&e))?;
        for (name, value) in &request.fields {
            body.append_with_str(name, value).map_err(|e| network(&e))?;
        }
        let headers = Headers::new().map_err(|e| network(&e))?;
        headers
            .set("Accept", request.accept)
            .map_err(|e| network(&e))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&body);
        init.set_headers(&headers);

        let promise = self.window.fetch_with_str_and_init(&request.action, &init);
        let response = JsFuture::from(promise).await.map_err(|e| network(&e))?;
        let response: Response = response.dyn_into().map_err(|e| network(&e))?;
        Ok(response.status())
    }
}
