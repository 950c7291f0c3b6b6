//!Allocator hooks routing every zstd context allocation through Rust's global allocator.
use core::ffi::c_void;

extern crate alloc;

use core::{mem, ptr};
use alloc::alloc::Layout;

use zstd_sys as sys;

//Linux & win 32 bit are 8
#[cfg(not(any(target_os = "macos", all(windows, target_pointer_width = "64"))))]
const MIN_ALIGN: usize = 8;
//Mac and  win 64 bit are 16
#[cfg(any(target_os = "macos", all(windows, target_pointer_width = "64")))]
const MIN_ALIGN: usize = 16;

//Size of allocation is stored in front of the block, as zstd's `free` does not tell it.
const LAYOUT_OFFSET: usize = mem::size_of::<usize>();

#[cold]
#[inline(never)]
fn unlikely_null() -> *mut c_void {
    ptr::null_mut()
}

#[inline]
///`malloc` impl with Rust allocator
pub unsafe extern "C" fn zstd_malloc(size: usize) -> *mut c_void {
    let total = match size.checked_add(LAYOUT_OFFSET) {
        Some(total) => total,
        None => return unlikely_null(),
    };

    if let Ok(layout) = Layout::from_size_align(total, MIN_ALIGN) {
        let mem = alloc::alloc::alloc(layout);
        if !mem.is_null() {
            ptr::write(mem as *mut usize, total);
            return mem.add(LAYOUT_OFFSET) as _
        }
    }

    unlikely_null()
}

#[inline]
///`free` impl with Rust allocator
///
///`mem` MUST be either null or pointer returned by [zstd_malloc]
pub unsafe extern "C" fn zstd_free(mem: *mut c_void) {
    if !mem.is_null() {
        let mem = (mem as *mut u8).sub(LAYOUT_OFFSET);
        let total = ptr::read(mem as *const usize);
        let layout = Layout::from_size_align_unchecked(total, MIN_ALIGN);
        alloc::alloc::dealloc(mem, layout);
    }
}

unsafe extern "C" fn zstd_malloc_with_state(_: *mut c_void, size: usize) -> *mut c_void {
    zstd_malloc(size)
}

unsafe extern "C" fn zstd_free_with_state(_: *mut c_void, mem: *mut c_void) {
    zstd_free(mem)
}

#[inline(always)]
///Returns allocator descriptor to pass into `ZSTD_create*_advanced` functions.
pub(crate) fn custom_mem() -> sys::ZSTD_customMem {
    sys::ZSTD_customMem {
        customAlloc: Some(zstd_malloc_with_state),
        customFree: Some(zstd_free_with_state),
        opaque: ptr::null_mut(),
    }
}
