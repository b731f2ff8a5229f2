//! HTTP client for the upscaling server.
//!
//! Three endpoints: multipart `POST /upload`, JSON `POST /process` and raw
//! `GET /download/{filename}`. The server reports failures either as
//! `success: false` with an error message or by omitting `success` entirely on
//! its 4xx/5xx paths, so the body is parsed the same way regardless of status.
//! Previews arrive as `data:<mime>;base64,` URLs and are decoded to encoded
//! image bytes here. No request timeout is set: a hung call simply keeps the
//! loading indicator up.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::{log_error, log_message};

#[derive(Debug, Clone, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    preview: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProcessResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    output_filename: String,
    #[serde(default)]
    preview: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
struct ProcessRequest<'a> {
    filename: &'a str,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub preview: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub output_filename: String,
    pub preview: Vec<u8>,
}

fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent("upscale-studio/0.1")
        .build()
        .context("failed to build HTTP client")
}

/// Extracts the base64 payload of a `data:<mime>;base64,...` URL and decodes
/// it into the underlying encoded image bytes.
fn decode_data_url(preview: &str) -> Result<Vec<u8>> {
    let payload = preview
        .split_once("base64,")
        .map(|(_, rest)| rest)
        .ok_or_else(|| anyhow!("preview is not a base64 data URL"))?;
    BASE64
        .decode(payload.trim())
        .context("preview payload is not valid base64")
}

pub async fn upload_file(server: String, path: PathBuf) -> Result<UploadedImage, String> {
    upload_inner(&server, &path).await.map_err(|e| {
        log_error(&format!("Upload failed for {}: {e:#}", path.display()));
        e.to_string()
    })
}

async fn upload_inner(server: &str, path: &Path) -> Result<UploadedImage> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow!("file has no usable name: {}", path.display()))?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    log_message(&format!("Uploading {} ({} bytes)", name, bytes.len()));

    let part = reqwest::multipart::Part::bytes(bytes).file_name(name);
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = client()?
        .post(format!("{server}/upload"))
        .multipart(form)
        .send()
        .await
        .context("upload request failed")?;

    let body: UploadResponse = response
        .json()
        .await
        .context("invalid upload response")?;

    if !body.success {
        return Err(anyhow!(body
            .error
            .unwrap_or_else(|| "upload rejected by server".to_string())));
    }

    let preview = decode_data_url(&body.preview)?;
    log_message(&format!(
        "Upload accepted: {} ({}x{})",
        body.filename, body.width, body.height
    ));

    Ok(UploadedImage {
        filename: body.filename,
        width: body.width,
        height: body.height,
        preview,
    })
}

pub async fn process_file(
    server: String,
    filename: String,
    width: u32,
    height: u32,
) -> Result<ProcessedImage, String> {
    process_inner(&server, &filename, width, height)
        .await
        .map_err(|e| {
            log_error(&format!("Processing failed for {filename}: {e:#}"));
            e.to_string()
        })
}

async fn process_inner(
    server: &str,
    filename: &str,
    width: u32,
    height: u32,
) -> Result<ProcessedImage> {
    log_message(&format!("Processing {filename} -> {width}x{height}"));

    let response = client()?
        .post(format!("{server}/process"))
        .json(&ProcessRequest {
            filename,
            width,
            height,
        })
        .send()
        .await
        .context("process request failed")?;

    let body: ProcessResponse = response
        .json()
        .await
        .context("invalid process response")?;

    if !body.success {
        return Err(anyhow!(body
            .error
            .unwrap_or_else(|| "processing rejected by server".to_string())));
    }

    let preview = decode_data_url(&body.preview)?;
    log_message(&format!("Processing complete: {}", body.output_filename));

    Ok(ProcessedImage {
        output_filename: body.output_filename,
        preview,
    })
}

pub async fn download_file(
    server: String,
    output_filename: String,
    destination: PathBuf,
) -> Result<PathBuf, String> {
    download_inner(&server, &output_filename, &destination)
        .await
        .map_err(|e| {
            log_error(&format!("Download failed for {output_filename}: {e:#}"));
            e.to_string()
        })
}

async fn download_inner(
    server: &str,
    output_filename: &str,
    destination: &Path,
) -> Result<PathBuf> {
    let response = client()?
        .get(format!("{server}/download/{output_filename}"))
        .send()
        .await
        .context("download request failed")?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "HTTP {} for /download/{output_filename}",
            response.status()
        ));
    }

    let bytes = response.bytes().await.context("download body failed")?;
    tokio::fs::write(destination, &bytes)
        .await
        .with_context(|| format!("failed to write {}", destination.display()))?;

    log_message(&format!(
        "Downloaded {} -> {}",
        output_filename,
        destination.display()
    ));
    Ok(destination.to_path_buf())
}
