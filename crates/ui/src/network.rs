//! Fetch helpers for the portal's JSON endpoints

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Request, RequestInit, Response};

use exam_portal_protocol::SubjectsResponse;

use crate::error::{Result, UiError};

/// Issue an AJAX-style GET and return the response text
///
/// Sends `X-Requested-With: XMLHttpRequest` so the server treats it as an
/// XHR, and asks for JSON. Non-2xx statuses are errors.
pub async fn get_json_text(url: &str) -> Result<String> {
    let win = window().ok_or(UiError::MissingWindow)?;

    let opts = RequestInit::new();
    opts.set_method("GET");

    let req = Request::new_with_str_and_init(url, &opts)?;
    req.headers().set("X-Requested-With", "XMLHttpRequest")?;
    req.headers().set("Accept", "application/json")?;

    let resp_val = JsFuture::from(win.fetch_with_request(&req)).await?;
    let resp: Response = resp_val.dyn_into()?;

    if !resp.ok() {
        return Err(UiError::Status(resp.status()));
    }

    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| UiError::Js("response body is not text".to_string()))
}

/// Fetch and decode a subjects-by-department response
pub async fn fetch_subjects(url: &str) -> Result<SubjectsResponse> {
    let body = get_json_text(url).await?;
    Ok(SubjectsResponse::from_json(&body)?)
}
