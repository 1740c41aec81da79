//! Response body types
//!
//! Files are streamed through a fixed-size buffer as a body of known length,
//! so hyper can emit `Content-Length` before the first byte and large files
//! are never held in memory.

use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes, Frame, SizeHint};
use std::convert::Infallible;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::fs::File;
use tokio::io::{AsyncRead, ReadBuf};

use crate::logger;

/// Size of the intermediate copy buffer
pub const CHUNK_SIZE: usize = 8192;

/// Body type shared by every response the server produces
pub type ResponseBody = UnsyncBoxBody<Bytes, io::Error>;

/// In-memory body
pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into())
        .map_err(|never: Infallible| match never {})
        .boxed_unsync()
}

pub fn empty() -> ResponseBody {
    full(Bytes::new())
}

/// Streams exactly `remaining` bytes from an open file
pub struct FileBody {
    file: File,
    buf: Box<[u8]>,
    remaining: u64,
    path: PathBuf,
}

impl FileBody {
    pub fn new(file: File, len: u64, path: PathBuf) -> Self {
        Self {
            file,
            buf: vec![0; CHUNK_SIZE].into_boxed_slice(),
            remaining: len,
            path,
        }
    }

    fn abort(&mut self, err: io::Error) -> Poll<Option<Result<Frame<Bytes>, io::Error>>> {
        logger::log_stream_aborted(&self.path, &err);
        self.remaining = 0;
        Poll::Ready(Some(Err(err)))
    }
}

impl Body for FileBody {
    type Data = Bytes;
    type Error = io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        if this.remaining == 0 {
            return Poll::Ready(None);
        }

        // Never read past the advertised length, even if the file grew
        let want = usize::try_from(this.remaining).map_or(this.buf.len(), |r| r.min(this.buf.len()));
        let mut read_buf = ReadBuf::new(&mut this.buf[..want]);

        match Pin::new(&mut this.file).poll_read(cx, &mut read_buf) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Err(err)) => this.abort(err),
            Poll::Ready(Ok(())) => {
                let filled = read_buf.filled();
                if filled.is_empty() {
                    return this.abort(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("file shrank with {} bytes still to send", this.remaining),
                    ));
                }
                let chunk = Bytes::copy_from_slice(filled);
                this.remaining -= chunk.len() as u64;
                Poll::Ready(Some(Ok(Frame::data(chunk))))
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        self.remaining == 0
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(self.remaining)
    }
}
