//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心层的 `HttpClient`：
//! JSON 请求体直接作为字符串发送，上传表单转换为 `FormData` + `Blob`，
//! 超时后通过 `AbortController` 中止请求。

use super::timer::sleep;
use async_trait::async_trait;
use std::time::Duration;
use villa::error::{ClientError, ClientResult};
use villa::lifecycle::with_timeout;
use villa::request::{HttpBody, HttpClient, HttpRequest, HttpResponse, MediaFile, MultipartForm};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, AbortSignal, Blob, BlobPropertyBag, File, FormData, Headers, Request,
    RequestInit, Response,
};

fn js_detail(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// 浏览器 HTTP 客户端
#[derive(Clone, Copy)]
pub struct BrowserHttpClient {
    timeout: Duration,
}

impl BrowserHttpClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn build_request(req: &HttpRequest, signal: &AbortSignal) -> Result<Request, JsValue> {
        let headers = Headers::new()?;
        for (key, value) in &req.headers {
            headers.set(key, value)?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        opts.set_signal(Some(signal));

        match &req.body {
            Some(HttpBody::Json(body)) => opts.set_body(&JsValue::from_str(body)),
            Some(HttpBody::Multipart(form)) => opts.set_body(&form_data(form)?.into()),
            None => {}
        }

        Request::new_with_str_and_init(&req.url, &opts)
    }
}

fn form_data(form: &MultipartForm) -> Result<FormData, JsValue> {
    let data = FormData::new()?;
    for (name, value) in &form.fields {
        data.append_with_str(name, value)?;
    }
    if let Some((name, file)) = &form.file {
        data.append_with_blob_and_filename(name, &to_blob(file)?, &file.file_name)?;
    }
    Ok(data)
}

fn to_blob(file: &MediaFile) -> Result<Blob, JsValue> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let props = BlobPropertyBag::new();
    props.set_type(&file.content_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &props)
}

async fn fetch(request: Request) -> ClientResult<HttpResponse> {
    let window = web_sys::window().ok_or_else(|| ClientError::network("window is not available"))?;

    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ClientError::network(js_detail(&e)))?;
    let response: Response = value
        .dyn_into()
        .map_err(|e| ClientError::decode(format!("not a Response: {}", js_detail(&e))))?;

    let status = response.status();
    let promise = response
        .text()
        .map_err(|e| ClientError::decode(js_detail(&e)))?;
    let body = JsFuture::from(promise)
        .await
        .map_err(|e| ClientError::network(js_detail(&e)))?
        .as_string()
        .unwrap_or_default();

    Ok(HttpResponse { status, body })
}

#[async_trait(?Send)]
impl HttpClient for BrowserHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let controller = AbortController::new()
            .map_err(|e| ClientError::network(js_detail(&e)).in_op("http.abort_controller"))?;
        let request = Self::build_request(&req, &controller.signal())
            .map_err(|e| ClientError::network(js_detail(&e)).in_op_with("http.build", req.url.clone()))?;

        match with_timeout(fetch(request), sleep(self.timeout)).await {
            Ok(result) => result,
            Err(err) => {
                controller.abort();
                villa::log_warn!("[Http] {} {} timed out", req.method.as_str(), req.url);
                Err(err.in_op_with("http.send", req.url))
            }
        }
    }
}

/// 读取 `<input type="file">` 选中的文件
pub async fn read_file(file: File) -> ClientResult<MediaFile> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ClientError::upload(format!("Could not read {}: {}", file.name(), js_detail(&e))))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Ok(MediaFile {
        file_name: file.name(),
        content_type,
        bytes,
    })
}
