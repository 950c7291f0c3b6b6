//! `zstd` decompression context implementation

use zstd_sys as sys;

use core::ptr;

use super::{Decode, DecodeStatus};
use crate::error::{CodecError, Error};
use crate::utils::is_error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
///ZSTD decompression options.
///
///For details refer to their documentation: `http://facebook.github.io/zstd/zstd_manual.html#Chapter6`
pub struct ZstdOptions {
    window_log: i32,
}

impl ZstdOptions {
    #[inline(always)]
    ///Creates new default value
    pub const fn new() -> Self {
        Self {
            window_log: 0
        }
    }

    #[inline(always)]
    ///Sets window_log
    ///
    ///This acts as cap on window_log, refusing to decompress anything above it.
    ///Normally, default value is all you need.
    ///
    ///Only incremental decoding is affected.
    pub const fn window_log(mut self, window_log: i32) -> Self {
        #[cfg(any(target_pointer_width = "16", target_pointer_width = "32"))]
        assert!(window_log <= sys::ZSTD_WINDOWLOG_MAX_32 as i32);
        #[cfg(not(any(target_pointer_width = "16", target_pointer_width = "32")))]
        assert!(window_log <= sys::ZSTD_WINDOWLOG_MAX_64 as i32);
        assert!(window_log >= sys::ZSTD_WINDOWLOG_MIN as i32);
        self.window_log = window_log;
        self
    }

    #[inline(always)]
    fn apply(&self, ctx: ptr::NonNull<sys::ZSTD_DCtx>) -> Result<(), CodecError> {
        //0 means library default
        if self.window_log != 0 {
            let result = unsafe {
                sys::ZSTD_DCtx_setParameter(ctx.as_ptr(), sys::ZSTD_dParameter::ZSTD_d_windowLogMax, self.window_log as _)
            };
            if is_error(result) {
                return Err(CodecError::new(result));
            }
        }

        Ok(())
    }
}

impl Default for ZstdOptions {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

pub(super) fn create(opts: ZstdOptions) -> Result<ptr::NonNull<sys::ZSTD_DCtx>, Error> {
    let ctx = unsafe {
        sys::ZSTD_createDStream_advanced(crate::mem::custom_mem())
    };
    let ctx = ptr::NonNull::new(ctx).ok_or(Error::Allocation)?;

    match opts.apply(ctx) {
        Ok(()) => Ok(ctx),
        Err(error) => {
            log::debug!("zstd: unable to configure decoder: {}", error);
            free(ctx);
            Err(Error::Codec(error))
        }
    }
}

#[inline]
pub(super) unsafe fn decode_stream(ctx: ptr::NonNull<sys::ZSTD_DCtx>, input: *const u8, input_remain: usize, output: *mut u8, output_remain: usize) -> Decode {
    let mut input = sys::ZSTD_inBuffer_s {
        src: input as _,
        size: input_remain,
        pos: 0,
    };
    let mut output = sys::ZSTD_outBuffer_s {
        dst: output as _,
        size: output_remain,
        pos: 0,
    };
    let result = unsafe {
        sys::ZSTD_decompressStream(ctx.as_ptr(), &mut output, &mut input)
    };

    Decode {
        input_remain: input.size - input.pos,
        output_remain: output.size - output.pos,
        status: match result {
            size if is_error(size) => Err(CodecError::new(size)),
            //Frame is complete and fully flushed
            0 => Ok(DecodeStatus::Finished),
            //Non-zero is hint for size of next input.
            //ZSTD_decompressStream() always flushes to maximum, so if output is full we assume
            //there is more to flush, otherwise it consumed whole input and needs more.
            _ => if output.pos == output.size {
                Ok(DecodeStatus::NeedOutput)
            } else {
                Ok(DecodeStatus::NeedInput)
            },
        },
    }
}

#[inline]
pub(super) unsafe fn decode_frame(ctx: ptr::NonNull<sys::ZSTD_DCtx>, input: *const u8, input_len: usize, output: *mut u8, output_len: usize) -> Result<usize, CodecError> {
    let result = unsafe {
        sys::ZSTD_decompressDCtx(ctx.as_ptr(), output as _, output_len, input as _, input_len)
    };

    if is_error(result) {
        Err(CodecError::new(result))
    } else {
        Ok(result)
    }
}

#[inline]
pub(super) fn reset(ctx: ptr::NonNull<sys::ZSTD_DCtx>) -> bool {
    let result = unsafe {
        sys::ZSTD_DCtx_reset(ctx.as_ptr(), sys::ZSTD_ResetDirective::ZSTD_reset_session_only)
    };
    !is_error(result)
}

#[inline]
pub(super) fn free(ctx: ptr::NonNull<sys::ZSTD_DCtx>) {
    let result = unsafe {
        sys::ZSTD_freeDStream(ctx.as_ptr())
    };
    debug_assert_eq!(result, 0);
}
