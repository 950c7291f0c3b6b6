use core::ffi::{c_char, CStr};

use zstd_sys as sys;

extern "C" {
    fn ZSTD_getErrorCode(result: usize) -> i32;
}

//https://github.com/facebook/zstd/blob/dev/lib/zstd_errors.h
pub(crate) const ERROR_DST_SIZE_TOO_SMALL: i32 = 70;

#[inline]
pub(crate) fn convert_c_str(ptr: *const c_char) -> Option<&'static str> {
    if ptr.is_null() {
        return None;
    }

    //zstd only hands out pointers to static strings
    let text = unsafe {
        CStr::from_ptr(ptr)
    };
    text.to_str().ok()
}

#[inline(always)]
pub(crate) fn is_error(code: usize) -> bool {
    unsafe {
        sys::ZSTD_isError(code) != 0
    }
}

#[inline]
pub(crate) fn error_name(code: usize) -> Option<&'static str> {
    let name = unsafe {
        sys::ZSTD_getErrorName(code)
    };
    convert_c_str(name)
}

#[inline(always)]
pub(crate) fn error_code(code: usize) -> i32 {
    unsafe {
        ZSTD_getErrorCode(code)
    }
}

const fn digits(mut num: u32) -> usize {
    let mut len = 1;
    while num >= 10 {
        num /= 10;
        len += 1;
    }
    len
}

//Writes decimal `num` so that it ends right before `end`
const fn write_decimal<const N: usize>(mut buf: [u8; N], end: usize, mut num: u32) -> [u8; N] {
    let mut idx = end;
    loop {
        idx -= 1;
        buf[idx] = b'0' + (num % 10) as u8;
        num /= 10;
        if num == 0 {
            break buf;
        }
    }
}

pub(crate) const fn version_len(major: u32, minor: u32, release: u32) -> usize {
    digits(major) + 1 + digits(minor) + 1 + digits(release)
}

///Formats `major.minor.release`, `N` must be equal to [version_len].
pub(crate) const fn version_string<const N: usize>(major: u32, minor: u32, release: u32) -> [u8; N] {
    let major_end = digits(major);
    let minor_end = major_end + 1 + digits(minor);

    let buf = write_decimal([b'.'; N], major_end, major);
    let buf = write_decimal(buf, minor_end, minor);
    write_decimal(buf, N, release)
}
