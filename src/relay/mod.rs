//! Streaming video relay.
//!
//! Streams the resolved file straight from the upstream host into Telegram.
//! Nothing is written to disk: the response body is piped into the outbound
//! media upload chunk by chunk.

use std::io;

use futures::TryStreamExt;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile};
use tokio_util::io::StreamReader;

use crate::bot::dispatcher::ThrottledBot;
use crate::resolver::Resolution;

/// Telegram bot uploads cap out; anything above this goes back to the user
/// as a plain link for manual download.
pub const MAX_VIDEO_BYTES: u64 = 50_000_000;

/// Strictly greater: a file of exactly `MAX_VIDEO_BYTES` still gets relayed.
pub fn exceeds_ceiling(size_bytes: u64) -> bool {
    size_bytes > MAX_VIDEO_BYTES
}

/// Relays resolved downloads into chats over a shared HTTP pool.
#[derive(Clone)]
pub struct StreamRelay {
    http: reqwest::Client,
}

impl StreamRelay {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch the resolved URL with a streamed body and forward it as video
    /// media, notification suppressed, file name (when known) as caption.
    pub async fn send_video(
        &self,
        bot: &ThrottledBot,
        chat_id: ChatId,
        resolution: &Resolution,
    ) -> anyhow::Result<()> {
        let response = self
            .http
            .get(&resolution.download_url)
            .send()
            .await?
            .error_for_status()?;

        // The reader is handed to the upload as-is: a mid-stream transport
        // error must fail the send, not truncate the file.
        let stream = response.bytes_stream().map_err(io::Error::other);
        let reader = StreamReader::new(Box::pin(stream));

        let mut video = InputFile::read(reader);
        if let Some(name) = &resolution.file_name {
            video = video.file_name(name.clone());
        }

        let mut request = bot.send_video(chat_id, video).disable_notification(true);
        if let Some(name) = &resolution.file_name {
            request = request.caption(name.clone());
        }
        request.await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_is_strict() {
        assert!(!exceeds_ceiling(MAX_VIDEO_BYTES));
        assert!(exceeds_ceiling(MAX_VIDEO_BYTES + 1));
    }

    #[test]
    fn test_small_sizes_pass() {
        assert!(!exceeds_ceiling(0));
        assert!(!exceeds_ceiling(15 * 1024 * 1024));
    }

    #[tokio::test]
    async fn test_midstream_error_fails_the_read() {
        use futures::stream;
        use tokio::io::AsyncReadExt;

        // One good chunk, then the connection dies. The reader fed to the
        // upload must report the error instead of a clean EOF.
        let chunks: Vec<Result<&[u8], io::Error>> = vec![
            Ok(b"partial".as_slice()),
            Err(io::Error::other("connection reset by peer")),
        ];
        let mut reader = StreamReader::new(Box::pin(stream::iter(chunks)));

        let mut buf = Vec::new();
        let err = reader
            .read_to_end(&mut buf)
            .await
            .expect_err("truncated stream must not read to completion");
        assert_eq!(err.to_string(), "connection reset by peer");
    }
}
