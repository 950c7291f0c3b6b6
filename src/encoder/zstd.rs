//! `zstd` compression context implementation

use zstd_sys as sys;

use core::ptr;

use super::{Encode, EncodeOp, EncodeStatus};
use crate::error::{CodecError, Error};
use crate::utils::{error_code, is_error, ERROR_DST_SIZE_TOO_SMALL};

impl EncodeOp {
    #[inline(always)]
    const fn into_zstd(self) -> sys::ZSTD_EndDirective {
        match self {
            Self::Process => sys::ZSTD_EndDirective::ZSTD_e_continue,
            Self::Flush => sys::ZSTD_EndDirective::ZSTD_e_flush,
            Self::Finish => sys::ZSTD_EndDirective::ZSTD_e_end,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
///ZSTD compression options.
///
///For details refer to their documentation: `http://facebook.github.io/zstd/zstd_manual.html#Chapter5`
pub struct ZstdOptions {
    level: i32,
    window_log: i32,
    content_size: bool,
    checksum: bool,
}

impl ZstdOptions {
    #[inline(always)]
    ///Creates new default value
    pub const fn new() -> Self {
        Self {
            level: crate::CLEVEL_DEFAULT,
            window_log: 0,
            content_size: true,
            checksum: false,
        }
    }

    #[inline(always)]
    ///Sets level
    ///
    ///Must be within [CLEVEL_MIN](crate::CLEVEL_MIN)..=[CLEVEL_MAX](crate::CLEVEL_MAX).
    ///0 means [CLEVEL_DEFAULT](crate::CLEVEL_DEFAULT).
    pub const fn level(mut self, level: i32) -> Self {
        assert!(level <= crate::CLEVEL_MAX);
        assert!(level >= crate::CLEVEL_MIN);
        self.level = level;
        self
    }

    #[inline(always)]
    ///Sets window_log
    ///
    ///0 means value derived from level.
    pub const fn window_log(mut self, window_log: i32) -> Self {
        if window_log != 0 {
            #[cfg(any(target_pointer_width = "16", target_pointer_width = "32"))]
            assert!(window_log <= sys::ZSTD_WINDOWLOG_MAX_32 as i32);
            #[cfg(not(any(target_pointer_width = "16", target_pointer_width = "32")))]
            assert!(window_log <= sys::ZSTD_WINDOWLOG_MAX_64 as i32);
            assert!(window_log >= sys::ZSTD_WINDOWLOG_MIN as i32);
        }
        self.window_log = window_log;
        self
    }

    #[inline(always)]
    ///Sets whether to record content size in frame header, when it is known.
    ///
    ///Enabled by default.
    ///Frames without content size can only be decompressed incrementally.
    pub const fn content_size(mut self, content_size: bool) -> Self {
        self.content_size = content_size;
        self
    }

    #[inline(always)]
    ///Sets whether to append checksum of content at the end of frame.
    ///
    ///Disabled by default.
    pub const fn checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }

    #[inline(always)]
    fn apply(&self, ctx: ptr::NonNull<sys::ZSTD_CCtx>) -> Result<(), CodecError> {
        macro_rules! set {
            ($param:ident => $value:expr) => {{
                let result = unsafe {
                    sys::ZSTD_CCtx_setParameter(ctx.as_ptr(), sys::ZSTD_cParameter::$param, $value as _)
                };
                if is_error(result) {
                    return Err(CodecError::new(result));
                }
            }};
        }

        set!(ZSTD_c_compressionLevel => self.level);
        set!(ZSTD_c_windowLog => self.window_log);
        set!(ZSTD_c_contentSizeFlag => self.content_size as i32);
        set!(ZSTD_c_checksumFlag => self.checksum as i32);

        Ok(())
    }
}

impl Default for ZstdOptions {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

pub(super) fn create(opts: ZstdOptions) -> Result<ptr::NonNull<sys::ZSTD_CCtx>, Error> {
    let ctx = unsafe {
        sys::ZSTD_createCStream_advanced(crate::mem::custom_mem())
    };
    let ctx = ptr::NonNull::new(ctx).ok_or(Error::Allocation)?;

    match opts.apply(ctx) {
        Ok(()) => Ok(ctx),
        Err(error) => {
            log::debug!("zstd: unable to configure encoder: {}", error);
            free(ctx);
            Err(Error::Codec(error))
        }
    }
}

pub(super) unsafe fn encode_stream(ctx: ptr::NonNull<sys::ZSTD_CCtx>, input: *const u8, input_remain: usize, output: *mut u8, output_remain: usize, op: EncodeOp) -> Encode {
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
        sys::ZSTD_compressStream2(ctx.as_ptr(), &mut output, &mut input, op.into_zstd())
    };

    Encode {
        input_remain: input.size - input.pos,
        output_remain: output.size - output.pos,
        status: match result {
            size if is_error(size) => match error_code(size) {
                ERROR_DST_SIZE_TOO_SMALL => EncodeStatus::NeedOutput,
                _ => EncodeStatus::Error,
            },
            //0 always mean there is nothing else to do.
            //so if user requested finish, then frame is done
            0 => match op {
                EncodeOp::Finish => EncodeStatus::Finished,
                _ => EncodeStatus::Continue,
            },
            //Made some progress, but zstd still holds data it could not flush.
            _ => if output.pos == output.size {
                EncodeStatus::NeedOutput
            } else {
                EncodeStatus::Continue
            },
        },
    }
}

#[inline]
pub(super) unsafe fn compress_frame(ctx: ptr::NonNull<sys::ZSTD_CCtx>, input: *const u8, input_len: usize, output: *mut u8, output_len: usize, level: i32) -> Result<usize, CodecError> {
    let result = unsafe {
        sys::ZSTD_compressCCtx(ctx.as_ptr(), output as _, output_len, input as _, input_len, level)
    };

    if is_error(result) {
        Err(CodecError::new(result))
    } else {
        Ok(result)
    }
}

#[inline]
pub(super) fn reset(ctx: ptr::NonNull<sys::ZSTD_CCtx>) -> bool {
    let result = unsafe {
        sys::ZSTD_CCtx_reset(ctx.as_ptr(), sys::ZSTD_ResetDirective::ZSTD_reset_session_only)
    };
    !is_error(result)
}

#[inline]
pub(super) fn free(ctx: ptr::NonNull<sys::ZSTD_CCtx>) {
    let result = unsafe {
        sys::ZSTD_freeCStream(ctx.as_ptr())
    };
    debug_assert_eq!(result, 0);
}
