use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use pdfgate::export::ResponseSink;
use tokio::io::AsyncWrite;

/// Writer that accepts `limit` bytes and then fails with `BrokenPipe`,
/// like a client hanging up mid-download.
#[derive(Debug, Default)]
pub struct FailingWriter {
    limit: usize,
    pub written: Vec<u8>,
}

impl AsyncWrite for FailingWriter {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let room = self.limit.saturating_sub(self.written.len());
        if room == 0 {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "client went away",
            )));
        }
        let n = room.min(buf.len());
        self.written.extend_from_slice(&buf[..n]);
        Poll::Ready(Ok(n))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Sink whose body breaks after `limit` bytes; records any headers set.
#[derive(Debug, Default)]
pub struct FailingSink {
    pub writer: FailingWriter,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
}

impl FailingSink {
    pub fn after(limit: usize) -> Self {
        Self {
            writer: FailingWriter {
                limit,
                written: Vec::new(),
            },
            ..Self::default()
        }
    }
}

impl ResponseSink for FailingSink {
    fn body(&mut self) -> &mut (dyn AsyncWrite + Unpin + Send) {
        &mut self.writer
    }

    fn set_content_type(&mut self, value: &str) {
        self.content_type = Some(value.to_string());
    }

    fn set_content_disposition(&mut self, value: &str) {
        self.content_disposition = Some(value.to_string());
    }
}
