//!Zstandard compression with exact-size frame decoding
//!
//![compress] produces single frame with recorded content size.
//![decompress] reads content size from frame header and decompresses into buffer of exactly that
//!size, falling back to incremental decoding with growing buffer for frames that do not record it.
//!Buffers with legacy 4 byte length prefix are accepted too.
//!
//!```rust
//!let data = b"pack my box with five dozen liquor jugs\n";
//!let compressed = zstd_frame::compress(data, zstd_frame::CLEVEL_DEFAULT).expect("to compress");
//!let decompressed = zstd_frame::decompress(&compressed).expect("to decompress");
//!assert_eq!(decompressed, data);
//!```
//!
//!## Features
//!
//!All features are off by default.
//!This crate requires `alloc` to be available with system allocator set.
//!
//!- `legacy` - Enables decompression of formats produced by zstd before 1.0.

#![no_std]
#![warn(missing_docs)]
#![allow(clippy::style)]

use zstd_sys as sys;

pub(crate) mod utils;
pub mod mem;
mod error;
pub use error::{Error, CodecError};
pub mod frame;
mod legacy;
pub use legacy::min_legacy_format;
pub mod decoder;
pub mod encoder;
pub mod compressor;
pub use compressor::compress;
pub mod decompressor;
pub use decompressor::{decompress, decompress_with};

///Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///Lowest compression level, the fastest.
pub const CLEVEL_MIN: i32 = -5;
///Highest compression level, the slowest.
pub const CLEVEL_MAX: i32 = 22;
///Default compression level, used when level is 0.
pub const CLEVEL_DEFAULT: i32 = sys::ZSTD_CLEVEL_DEFAULT as i32;

///Version of zstd headers this crate is compiled against.
///
///Format is `major * 10000 + minor * 100 + release`
pub const LIBRARY_VERSION_NUMBER: u32 = sys::ZSTD_VERSION_MAJOR * 100 * 100 + sys::ZSTD_VERSION_MINOR * 100 + sys::ZSTD_VERSION_RELEASE;

const LIBRARY_VERSION_LEN: usize = utils::version_len(sys::ZSTD_VERSION_MAJOR, sys::ZSTD_VERSION_MINOR, sys::ZSTD_VERSION_RELEASE);
const LIBRARY_VERSION_BYTES: [u8; LIBRARY_VERSION_LEN] = utils::version_string(sys::ZSTD_VERSION_MAJOR, sys::ZSTD_VERSION_MINOR, sys::ZSTD_VERSION_RELEASE);

///Version of zstd headers this crate is compiled against, as string.
///
///Format is `major.minor.release`, same as `ZSTD_VERSION_STRING`.
pub const LIBRARY_VERSION: &str = match core::str::from_utf8(&LIBRARY_VERSION_BYTES) {
    Ok(version) => version,
    Err(_) => panic!("version string must be ASCII"),
};

#[inline]
///Returns version of zstd in use, as string.
///
///It will be different from [LIBRARY_VERSION] if library in use at runtime is not the one
///this crate is compiled against.
pub fn library_version() -> &'static str {
    let version = unsafe {
        sys::ZSTD_versionString()
    };
    utils::convert_c_str(version).unwrap_or_default()
}

#[inline]
///Returns version of zstd in use, as number.
///
///Format is `major * 10000 + minor * 100 + release`
pub fn library_version_number() -> u32 {
    unsafe {
        sys::ZSTD_versionNumber() as u32
    }
}
