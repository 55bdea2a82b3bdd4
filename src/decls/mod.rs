//! The declared types and the free functions that operate on them.
//!
//! Every record is `#[repr(C)]` with fields in declaration order, so the
//! layouts match what a C compiler produces for the same declarations.

pub mod car;
pub mod ivec;
pub mod my_math;
pub mod my_struct;
pub mod wrapper;

pub use car::{do_thing_to_car, init_car, Car, CarType, ObfuscatedCar};
pub use ivec::{vector_fun, Ivec};
pub use my_math::{checked_sum, init_rec, sum, MyRec, REC_OK};
pub use my_struct::{my_payload, MyStruct, MyStructT, PAYLOAD_LEN};
pub use wrapper::{tw_fun, TypeWrapper};

use std::ffi::{c_char, CStr};

/// Text stored in a fixed char buffer, up to the first NUL.
///
/// `None` when the buffer holds no NUL or the bytes are not UTF-8.
pub(crate) fn buffer_text(buf: &[c_char]) -> Option<&str> {
    let bytes = as_bytes(buf);
    CStr::from_bytes_until_nul(bytes).ok()?.to_str().ok()
}

pub(crate) fn as_bytes(buf: &[c_char]) -> &[u8] {
    // c_char is i8 or u8 depending on the target; both are one byte wide.
    unsafe { std::slice::from_raw_parts(buf.as_ptr().cast::<u8>(), buf.len()) }
}
