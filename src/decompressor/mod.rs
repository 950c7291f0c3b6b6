//!High level Decompression API

extern crate alloc;

use alloc::vec::Vec;

use crate::decoder::ZstdOptions;
use crate::error::Error;
use crate::frame::{self, Frame};

mod fixed;
pub use fixed::fixed;
mod stream;
pub use stream::streaming;
mod growing;
pub use growing::growing;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
///Decompression options
pub struct Options {
    output_limit: usize,
    decoder: ZstdOptions,
}

impl Options {
    ///Largest buffer that can be allocated.
    pub const MAX_OUTPUT_LIMIT: usize = isize::MAX as usize;

    #[inline(always)]
    ///Creates new default value
    pub const fn new() -> Self {
        Self {
            output_limit: Self::MAX_OUTPUT_LIMIT,
            decoder: ZstdOptions::new(),
        }
    }

    #[inline(always)]
    ///Sets maximum size of decompressed data.
    ///
    ///Frames declaring larger size are rejected before any allocation happens, while frames
    ///of unknown size are rejected as soon as output reaches limit.
    ///
    ///Defaults to [MAX_OUTPUT_LIMIT](Self::MAX_OUTPUT_LIMIT)
    pub const fn output_limit(mut self, limit: usize) -> Self {
        assert!(limit <= Self::MAX_OUTPUT_LIMIT);
        self.output_limit = limit;
        self
    }

    #[inline(always)]
    ///Sets options of underlying decoder
    pub const fn decoder(mut self, decoder: ZstdOptions) -> Self {
        self.decoder = decoder;
        self
    }

    #[inline(always)]
    ///Returns maximum size of decompressed data.
    pub const fn limit(&self) -> usize {
        self.output_limit
    }
}

impl Default for Options {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

///Decompresses `data` with default options.
///
///See [decompress_with] for details.
#[inline]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, Error> {
    decompress_with(data, &Options::new())
}

///Decompresses `data` and returns buffer of exactly decompressed size.
///
///- Frames with recorded content size are decompressed at once into buffer of that size.
///- Frames without it are decompressed incrementally into growing buffer.
///- Frames of formats 0.1 to 0.3, which cannot be decompressed incrementally, are decompressed at
///once, retrying with doubled buffer until it fits.
///- Frames prefixed by legacy length header are decompressed at once into buffer of declared size.
///
///Returns [Error::InvalidInput] if `data` is not recognized, otherwise it is up to zstd to judge
///content.
pub fn decompress_with(data: &[u8], opts: &Options) -> Result<Vec<u8>, Error> {
    let frame = Frame::parse(data)?;
    match frame.content_size() {
        Some(size) => fixed(frame.payload(), size, opts),
        None if frame::is_early_legacy(frame.payload()) => growing(frame.payload(), opts),
        None => streaming(frame.payload(), opts),
    }
}
