use std::path::Path;

use futures::StreamExt;
use log::debug;
use reqwest::{header::CONTENT_TYPE, Client};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWriteExt, BufWriter};
use wpdl_common::error::DownloadError;
use wpdl_common::ImageDescriptor;

use crate::progress::SharedProgressListener;

use super::{DownloadStatus, Queue, SkipReason};

impl Queue {
    /// Downloads a single image into the output folder.
    ///
    /// A file name is always assigned first, even if the image ends up skipped or failing.
    /// Existing files are never overwritten or verified, a partial file from an earlier run
    /// counts as present.
    pub async fn download(
        &mut self,
        image: &ImageDescriptor,
    ) -> Result<DownloadStatus, DownloadError> {
        let file_name = self.context.used_filenames.generate(&image.url);
        let out_path = self.output_dir.join(&file_name);

        if out_path.exists() {
            debug!("Skipping {} ({})", file_name, SkipReason::FileExists);
            return Ok(DownloadStatus::Skipped {
                file_name,
                reason: SkipReason::FileExists,
            });
        }

        if self.context.downloaded_images.contains(&image.url) {
            debug!("Skipping {} ({})", file_name, SkipReason::UrlDownloaded);
            return Ok(DownloadStatus::Skipped {
                file_name,
                reason: SkipReason::UrlDownloaded,
            });
        }

        Self::fetch(&self.client, image, &out_path, &self.progress_listener).await?;

        self.context.downloaded_images.insert(image.url.clone());
        Ok(DownloadStatus::Downloaded { file_name })
    }

    async fn fetch(
        client: &Client,
        image: &ImageDescriptor,
        out_path: &Path,
        progress_listener: &SharedProgressListener,
    ) -> Result<(), DownloadError> {
        debug!(
            "Fetching {} from post {} ({}) into {}",
            image.url,
            image.post_id,
            image.origin,
            out_path.display()
        );

        let res = client.get(&image.url).send().await?;

        if !res.status().is_success() {
            return Err(DownloadError::RemoteStatus {
                status: res.status().as_u16(),
            });
        }

        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !content_type.starts_with("image/") {
            return Err(DownloadError::NotAnImage { content_type });
        }

        let fname = out_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let dl_updater = progress_listener.add_download_task(fname, res.content_length());
        let mut downloaded_bytes = 0;

        let mut stream = res.bytes_stream();

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(out_path)
            .await?;

        let mut bw = BufWriter::new(file);

        while let Some(item) = stream.next().await {
            let mut chunk = match item {
                Ok(chunk) => chunk,
                Err(e) => {
                    dl_updater.finish();
                    return Err(DownloadError::ChunkDownloadFail {
                        message: e.to_string(),
                    });
                }
            };
            downloaded_bytes += chunk.len() as u64;
            dl_updater.set_progress(downloaded_bytes);

            if let Err(e) = bw.write_all_buf(&mut chunk).await {
                dl_updater.finish();
                return Err(e.into());
            }
        }

        if let Err(e) = bw.flush().await {
            dl_updater.finish();
            return Err(e.into());
        }

        dl_updater.finish();
        debug!("Finished downloading {} successfully.", out_path.display());
        Ok(())
    }
}
