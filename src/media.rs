//! 媒体上传客户端
//!
//! 图片先上传到外部资源服务，拿到公开 URL 后再写入实体记录。

use crate::config::MediaConfig;
use crate::error::{ClientError, ClientResult};
use crate::request::{HttpClient, HttpMethod, HttpRequest, MediaFile, MultipartForm};
use serde::Deserialize;

/// 上传目录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFolder {
    Categories,
    Gallery,
    Rooms,
}

impl MediaFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFolder::Categories => "villa/categories",
            MediaFolder::Gallery => "villa/gallery",
            MediaFolder::Rooms => "villa/rooms",
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

pub struct MediaUploader<'a, C> {
    http: &'a C,
    config: &'a MediaConfig,
}

impl<'a, C: HttpClient> MediaUploader<'a, C> {
    pub fn new(http: &'a C, config: &'a MediaConfig) -> Self {
        Self { http, config }
    }

    /// 上传文件并返回公开 URL
    ///
    /// 任何失败（网络、非 2xx、响应缺少 URL）都返回 `ErrorKind::Upload`，
    /// 调用方必须中止提交而不是带着空图片继续。
    pub async fn upload(&self, file: MediaFile, folder: MediaFolder) -> ClientResult<String> {
        if file.bytes.is_empty() {
            return Err(ClientError::upload("The selected image is empty."));
        }
        let file_name = file.file_name.clone();

        let form = MultipartForm::new()
            .text("upload_preset", &self.config.upload_preset)
            .text("folder", folder.as_str())
            .file("file", file);
        let req = HttpRequest::new(&self.config.upload_url(), HttpMethod::Post).with_multipart(form);

        let resp = self.http.send(req).await.map_err(|e| {
            log_error!("[Media] Upload of {} failed: {}", file_name, e);
            ClientError::upload("Image upload failed. Please try again.")
                .in_op_with("media.upload", file_name.clone())
        })?;

        if !resp.ok() {
            log_error!("[Media] Upload of {} rejected: HTTP {}", file_name, resp.status);
            return Err(ClientError::upload(format!(
                "Image upload failed (HTTP {}).",
                resp.status
            ))
            .in_op_with("media.upload", file_name));
        }

        let parsed: UploadResponse = resp
            .json()
            .map_err(|_| ClientError::upload("Image upload returned an unreadable response."))?;

        parsed
            .secure_url
            .or(parsed.url)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                ClientError::upload("Image upload did not return a URL.")
                    .in_op_with("media.upload", file_name)
            })
    }
}
