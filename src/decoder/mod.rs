//! Decoder
extern crate alloc;

use core::{mem, ptr};
use alloc::vec::Vec;

use zstd_sys as sys;

use crate::error::{CodecError, Error};

mod zstd;
pub use zstd::ZstdOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
///Result of decoding
pub enum DecodeStatus {
    ///Cannot finish due to lack of input data
    NeedInput,
    ///Need to flush data somewhere before continuing
    NeedOutput,
    ///Successfully finished decoding current frame.
    Finished,
}

#[derive(Debug)]
///Decode output
pub struct Decode {
    ///Number of bytes left unprocessed in `input`
    pub input_remain: usize,
    ///Number of bytes left unprocessed in `output`
    pub output_remain: usize,
    ///Result of decoding
    pub status: Result<DecodeStatus, CodecError>,
}

///zstd decompression context.
///
///Serves both as one-shot frame decoder and as incremental stream decoder.
///Context is freed on drop.
///
///## Example
///
///Brief example for chunked decoding.
///```rust
///use zstd_frame::decoder::{Decoder, DecodeStatus, ZstdOptions};
///
///fn decompress(decoder: &mut Decoder, input: core::slice::Chunks<'_, u8>, output: &mut Vec<u8>) {
///   for chunk in input {
///     let result = decoder.decode_vec(chunk, output);
///
///     assert_eq!(result.input_remain, 0);
///     let status = result.status.expect("success");
///     if status == DecodeStatus::Finished {
///         break;
///     }
///   }
///
///   //Make sure to reset state, if you want to re-use decoder.
///   decoder.reset();
///}
///
///const DATA: &[u8] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
///
///let compressed = zstd_frame::compress(DATA, 0).expect("to compress");
///let mut output = Vec::with_capacity(100);
///let mut decoder = Decoder::new(ZstdOptions::new()).expect("to create zstd decoder");
///decompress(&mut decoder, compressed.chunks(4), &mut output);
///assert_eq!(output, DATA);
///```
pub struct Decoder {
    ctx: ptr::NonNull<sys::ZSTD_DCtx>,
}

//Context is not shared with anything, hence it can be moved between threads
unsafe impl Send for Decoder {}

impl Decoder {
    #[inline]
    ///Creates decoder with provided options.
    ///
    ///Returns `None` if unable to initialize it, see [try_new](Self::try_new) for the reason.
    pub fn new(opts: ZstdOptions) -> Option<Self> {
        Self::try_new(opts).ok()
    }

    #[inline]
    ///Creates decoder with provided options.
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
    ///Recommended size of output buffer for incremental decoding.
    ///
    ///It is guaranteed to fit at least one full block.
    pub fn output_size() -> usize {
        unsafe {
            sys::ZSTD_DStreamOutSize()
        }
    }

    #[inline(always)]
    ///Raw decoding function, with no checks.
    ///
    ///Intended to be used as building block of higher level interfaces
    ///
    ///Arguments
    ///
    ///- `input` - Pointer to start of input to process. MUST NOT be null.
    ///- `input_len` - Size of data to process in `input`
    ///- `ouput` - Pointer to start of buffer where to write result. MUST NOT be null
    ///- `output_len` - Size of buffer pointed by `output`
    pub unsafe fn raw_decode(&mut self, input: *const u8, input_len: usize, output: *mut u8, output_len: usize) -> Decode {
        zstd::decode_stream(self.ctx, input, input_len, output, output_len)
    }

    #[inline(always)]
    ///Decodes `input` into uninit `output`.
    ///
    ///`Decode` will contain number of bytes written into `output`. This number always indicates
    ///number of bytes written hence which can be assumed initialized.
    pub fn decode_uninit(&mut self, input: &[u8], output: &mut [mem::MaybeUninit<u8>]) -> Decode {
        let input_len = input.len();
        let output_len = output.len();
        unsafe {
            self.raw_decode(input.as_ptr(), input_len, output.as_mut_ptr() as _, output_len)
        }
    }

    #[inline(always)]
    ///Decodes `input` into `output`.
    pub fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Decode {
        let input_len = input.len();
        let output_len = output.len();
        unsafe {
            self.raw_decode(input.as_ptr(), input_len, output.as_mut_ptr(), output_len)
        }
    }

    #[inline(always)]
    ///Decodes `input` into spare capacity of `output`, increasing its length by number of bytes
    ///written.
    ///
    ///Function require user to alloc spare capacity himself.
    ///
    ///`Decode::output_remain` will be relative to spare capacity length.
    pub fn decode_vec(&mut self, input: &[u8], output: &mut Vec<u8>) -> Decode {
        let spare_capacity = output.spare_capacity_mut();
        let spare_capacity_len = spare_capacity.len();
        let result = self.decode_uninit(input, spare_capacity);

        let new_len = output.len() + spare_capacity_len - result.output_remain;
        unsafe {
            output.set_len(new_len);
        }
        result
    }

    #[inline]
    ///Decodes complete frame(s) in `input` at once into uninit `output`.
    ///
    ///Returns number of bytes written into `output`, which can be assumed initialized.
    ///
    ///This does not use streaming state, but in order to avoid messing with it, make sure to
    ///`reset()` decoder after partial incremental decoding.
    pub fn decode_frame_uninit(&mut self, input: &[u8], output: &mut [mem::MaybeUninit<u8>]) -> Result<usize, CodecError> {
        unsafe {
            zstd::decode_frame(self.ctx, input.as_ptr(), input.len(), output.as_mut_ptr() as _, output.len())
        }
    }

    #[inline(always)]
    ///Resets `Decoder` state to initial.
    ///
    ///Returns `true` if successfully reset, otherwise `false`
    pub fn reset(&mut self) -> bool {
        zstd::reset(self.ctx)
    }
}

impl Drop for Decoder {
    #[inline]
    fn drop(&mut self) {
        zstd::free(self.ctx);
    }
}
