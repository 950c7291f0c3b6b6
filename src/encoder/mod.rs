//! Encoder

extern crate alloc;

use core::{mem, ptr};

use alloc::vec::Vec;
use alloc::collections::TryReserveError;

use zstd_sys as sys;

use crate::error::{CodecError, Error};

mod zstd;
pub use zstd::ZstdOptions;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
///Encoder operation
pub enum EncodeOp {
    ///Just compress as usual.
    Process,
    ///Flush as much data as possible
    ///
    ///Potentially may incur overhead
    Flush,
    ///Finish compression.
    ///
    ///After issuing FINISH, no new data should be added.
    Finish,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
///Encode status
pub enum EncodeStatus {
    ///Encoded, carry on.
    Continue,
    ///Encoded at least partially, but needs more space to write.
    NeedOutput,
    ///Result after `EncodeOp::Finish` issued
    Finished,
    ///Failed to encode.
    Error,
}

#[derive(Debug)]
///Encode output
pub struct Encode {
    ///Number of bytes left unprocessed in `input`
    pub input_remain: usize,
    ///Number of bytes left unprocessed in `output`
    pub output_remain: usize,
    ///Status after `encode`
    pub status: EncodeStatus,
}

///zstd compression context.
///
///Serves both as one-shot frame encoder and as incremental stream encoder.
///Context is freed on drop.
///
///## Example
///
///Brief example for chunked encoding.
///
///```rust
///use zstd_frame::encoder::{Encoder, EncodeStatus, EncodeOp, ZstdOptions};
///
///fn compress(encoder: &mut Encoder, input: &[&[u8]], output: &mut Vec<u8>) {
///   for chunk in input {
///     let result = encoder.encode_vec_full(chunk, output, EncodeOp::Flush).expect("to allocate");
///
///     assert_eq!(result.input_remain, 0);
///     assert_eq!(result.status, EncodeStatus::Continue);
///   }
///
///   let result = encoder.encode_vec_full(&[], output, EncodeOp::Finish).expect("to allocate");
///   assert_eq!(result.status, EncodeStatus::Finished);
///
///   //Make sure to reset state, if you want to re-use encoder.
///   encoder.reset();
///}
///
///let mut output = Vec::with_capacity(100);
///let mut encoder = Encoder::new(ZstdOptions::new()).expect("to create zstd encoder");
///compress(&mut encoder, &[&[1, 2, 3, 4], &[5, 6, 7 ,8], &[9, 10]], &mut output);
///assert_eq!(zstd_frame::decompress(&output).expect("to decompress"), [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
///```
pub struct Encoder {
    ctx: ptr::NonNull<sys::ZSTD_CCtx>,
}

//Context is not shared with anything, hence it can be moved between threads
unsafe impl Send for Encoder {}

impl Encoder {
    #[inline]
    ///Creates encoder with provided options.
    ///
    ///Returns `None` if unable to initialize it, see [try_new](Self::try_new) for the reason.
    pub fn new(opts: ZstdOptions) -> Option<Self> {
        Self::try_new(opts).ok()
    }

    #[inline]
    ///Creates encoder with provided options.
    ///
    ///## Errors
    ///
    ///- [Error::Allocation] if zstd context cannot be allocated;
    ///- [Error::Codec] if zstd rejects `opts`.
    pub fn try_new(opts: ZstdOptions) -> Result<Self, Error> {
        zstd::create(opts).map(|ctx| Self {
            ctx,
        })
    }

    #[inline(always)]
    ///Returns worst case size of compressed `input_len` bytes, when compressed as single frame.
    pub fn compress_bound(input_len: usize) -> usize {
        unsafe {
            sys::ZSTD_compressBound(input_len)
        }
    }

    #[inline(always)]
    ///Recommended size of output buffer for incremental encoding.
    pub fn output_size() -> usize {
        unsafe {
            sys::ZSTD_CStreamOutSize()
        }
    }

    #[inline(always)]
    ///Raw encoding function, with no checks.
    ///
    ///Intended to be used as building block of higher level interfaces
    ///
    ///Arguments
    ///
    ///- `input` - Pointer to start of input to process. MUST NOT be null.
    ///- `input_len` - Size of data to process in `input`
    ///- `ouput` - Pointer to start of buffer where to write result. MUST NOT be null
    ///- `output_len` - Size of buffer pointed by `output`
    ///- `op` - Encoding operation to perform.
    pub unsafe fn raw_encode(&mut self, input: *const u8, input_len: usize, output: *mut u8, output_len: usize, op: EncodeOp) -> Encode {
        zstd::encode_stream(self.ctx, input, input_len, output, output_len, op)
    }

    #[inline(always)]
    ///Encodes `input` into uninit `output`.
    ///
    ///`Encode` will contain number of bytes written into `output`. This number always indicates number of bytes written hence which can be assumed initialized.
    pub fn encode_uninit(&mut self, input: &[u8], output: &mut [mem::MaybeUninit<u8>], op: EncodeOp) -> Encode {
        let input_len = input.len();
        let output_len = output.len();
        unsafe {
            self.raw_encode(input.as_ptr(), input_len, output.as_mut_ptr() as _, output_len, op)
        }
    }

    #[inline(always)]
    ///Encodes `input` into `output`.
    pub fn encode(&mut self, input: &[u8], output: &mut [u8], op: EncodeOp) -> Encode {
        let input_len = input.len();
        let output_len = output.len();
        unsafe {
            self.raw_encode(input.as_ptr(), input_len, output.as_mut_ptr(), output_len, op)
        }
    }

    #[inline(always)]
    ///Encodes `input` into spare space in `output`.
    ///
    ///Function require user to alloc spare capacity himself.
    ///
    ///`Encode::output_remain` will be relative to spare capacity length.
    pub fn encode_vec(&mut self, input: &[u8], output: &mut Vec<u8>, op: EncodeOp) -> Encode {
        let spare_capacity = output.spare_capacity_mut();
        let spare_capacity_len = spare_capacity.len();
        let result = self.encode_uninit(input, spare_capacity, op);

        let new_len = output.len() + spare_capacity_len - result.output_remain;
        unsafe {
            output.set_len(new_len);
        }
        result
    }

    ///Encodes `input` into `output` Vec, performing allocation when necessary
    ///
    ///This function will continue encoding as long as encoder requires more output.
    ///
    ///## Allocation
    ///
    ///Initially reserves [compress_bound](Self::compress_bound) of `input`, which is enough to
    ///finish frame at once.
    ///Whenever encoder runs out of space, reserves [output_size](Self::output_size) more.
    ///
    ///Note that the best strategy is always to re-use buffer
    ///
    ///## Result
    ///
    ///- `Encode::output_remain` will be relative to spare capacity of the `output`.
    pub fn encode_vec_full(&mut self, mut input: &[u8], output: &mut Vec<u8>, op: EncodeOp) -> Result<Encode, TryReserveError> {
        output.try_reserve_exact(Self::compress_bound(input.len()))?;
        let reserve_size = Self::output_size();

        loop {
            let result = self.encode_vec(input, output, op);
            match result.status {
                EncodeStatus::NeedOutput => {
                    input = &input[input.len() - result.input_remain..];
                    output.try_reserve_exact(reserve_size)?;
                    continue;
                },
                EncodeStatus::Continue if op == EncodeOp::Finish => {
                    input = &input[input.len() - result.input_remain..];
                    continue;
                },
                _ => break Ok(result),
            }
        }
    }

    #[inline]
    ///Compresses whole `input` as single frame into uninit `output` using `level`.
    ///
    ///Content size is always recorded, regardless of options.
    ///Returns number of bytes written into `output`, which can be assumed initialized.
    ///
    ///Ongoing incremental encoding is aborted, so make sure to not mix it with `encode` calls.
    pub fn compress_frame_uninit(&mut self, input: &[u8], output: &mut [mem::MaybeUninit<u8>], level: i32) -> Result<usize, CodecError> {
        unsafe {
            zstd::compress_frame(self.ctx, input.as_ptr(), input.len(), output.as_mut_ptr() as _, output.len(), level)
        }
    }

    #[inline(always)]
    ///Resets `Encoder` state to initial.
    ///
    ///Returns `true` if successfully reset, otherwise `false`
    pub fn reset(&mut self) -> bool {
        zstd::reset(self.ctx)
    }
}

impl Drop for Encoder {
    #[inline]
    fn drop(&mut self) {
        zstd::free(self.ctx);
    }
}
