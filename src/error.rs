//! Errors

extern crate alloc;

use core::fmt;
use alloc::collections::TryReserveError;

#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
///Raw error code reported by zstd.
pub struct CodecError(usize);

impl CodecError {
    #[inline(always)]
    pub(crate) const fn new(code: usize) -> Self {
        Self(code)
    }

    #[inline(always)]
    ///Returns raw code, as returned by zstd function.
    pub const fn code(&self) -> usize {
        self.0
    }

    #[inline]
    ///Returns whether zstd failed because output buffer is too small.
    pub fn is_dst_too_small(&self) -> bool {
        crate::utils::error_code(self.0) == crate::utils::ERROR_DST_SIZE_TOO_SMALL
    }

    #[inline]
    ///Returns zstd's description of the error.
    pub fn name(&self) -> &'static str {
        crate::utils::error_name(self.0).unwrap_or("Unspecified error code")
    }
}

impl fmt::Debug for CodecError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_tuple("CodecError").field(&self.name()).finish()
    }
}

impl fmt::Display for CodecError {
    #[inline(always)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.name())
    }
}

///Compression and decompression errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    ///Compression level is lower than [CLEVEL_MIN](crate::CLEVEL_MIN)
    #[error("bad compression level - less than {min}: {level}")]
    LevelBelowMin {
        ///Lowest accepted level
        min: i32,
        ///Rejected level
        level: i32,
    },

    ///Compression level is higher than [CLEVEL_MAX](crate::CLEVEL_MAX)
    #[error("bad compression level - more than {max}: {level}")]
    LevelAboveMax {
        ///Highest accepted level
        max: i32,
        ///Rejected level
        level: i32,
    },

    ///Input is neither zstd frame, nor frame with legacy length prefix.
    #[error("compressed data is invalid")]
    InvalidInput,

    ///zstd reported failure.
    #[error("zstd error: {0}")]
    Codec(CodecError),

    ///Frame declared one size, but decoded to another.
    #[error("decompression error: length mismatch (expected {expected}, got {actual} bytes)")]
    LengthMismatch {
        ///Size declared by frame
        expected: usize,
        ///Number of bytes produced
        actual: usize,
    },

    ///Decompressed data does not fit output limit.
    #[error("decompressed data exceeds limit of {limit} bytes")]
    OutputTooLarge {
        ///Limit in effect
        limit: usize,
    },

    ///Input ended in the middle of a frame.
    #[error("compressed data is truncated")]
    IncompleteFrame,

    ///Unable to allocate memory for output or zstd context.
    #[error("memory allocation failed")]
    Allocation,
}

impl Error {
    #[inline]
    ///Returns whether error is caused by compression level out of range.
    pub const fn is_invalid_level(&self) -> bool {
        matches!(self, Self::LevelBelowMin { .. } | Self::LevelAboveMax { .. })
    }
}

impl From<CodecError> for Error {
    #[inline(always)]
    fn from(error: CodecError) -> Self {
        Self::Codec(error)
    }
}

impl From<TryReserveError> for Error {
    #[inline(always)]
    fn from(_: TryReserveError) -> Self {
        Self::Allocation
    }
}
