//! C ABI surface for the declarations in [`crate::decls`].
//!
//! Symbols keep their C header spellings. Namespaced functions are
//! flattened to `myMath_*`.
//!
//! Every pointer parameter must point to a live, correctly typed object.
//! Violations are fail-fast: the call logs the error and aborts the process.
//! No signature gains a status return for it. The one exception is
//! `ivec_free`, which follows `free(NULL)` and ignores null.

#![allow(non_snake_case)]

use std::ffi::{c_char, c_int};
use std::mem::{align_of, size_of, MaybeUninit};

use crate::decls::{self, Car, Ivec, MyRec, MyStruct, ObfuscatedCar, TypeWrapper};
use crate::utils::error::{MiddleError, Result};

/// Bytes a C caller must allocate before calling [`initCar`].
#[no_mangle]
pub static CAR_SIZE: usize = size_of::<Car>();

#[no_mangle]
pub static CAR_ALIGN: usize = align_of::<Car>();

/// Borrow `ptr` mutably, or report which argument was null.
///
/// # Safety
///
/// A non-null `ptr` must be valid for reads and writes of `T` for `'a`, and
/// nothing else may access it during that time.
pub unsafe fn require<'a, T>(ptr: *mut T, arg: &'static str) -> Result<&'a mut T> {
    ptr.as_mut().ok_or(MiddleError::InvalidArgument { arg })
}

/// Shared-borrow counterpart of [`require`].
///
/// # Safety
///
/// A non-null `ptr` must be valid for reads of `T` for `'a`.
pub unsafe fn require_ref<'a, T>(ptr: *const T, arg: &'static str) -> Result<&'a T> {
    ptr.as_ref().ok_or(MiddleError::InvalidArgument { arg })
}

fn fail_fast(symbol: &str, err: MiddleError) -> ! {
    tracing::error!(symbol, error = %err, "precondition violated, aborting");
    // a C host loading the cdylib may never install a subscriber
    eprintln!("middle-c: {}: {}", symbol, err);
    std::process::abort()
}

fn checked<T>(symbol: &str, res: Result<T>) -> T {
    res.unwrap_or_else(|err| fail_fast(symbol, err))
}

/// # Safety
///
/// `wrapped_int` must point to a live, initialized `TypeWrapper<int>`.
#[no_mangle]
pub unsafe extern "C" fn twFun(wrapped_int: *mut TypeWrapper<c_int>) {
    let wrapped = checked("twFun", require(wrapped_int, "wrappedInt"));
    decls::tw_fun(wrapped);
}

/// Allocate an empty integer sequence. Release it with [`ivec_free`].
#[no_mangle]
#[allow(improper_ctypes_definitions)]
pub extern "C" fn ivec_new() -> *mut Ivec {
    Box::into_raw(Box::default())
}

/// # Safety
///
/// `iv` must come from [`ivec_new`] and not have been freed.
#[no_mangle]
#[allow(improper_ctypes_definitions)]
pub unsafe extern "C" fn ivec_push(iv: *mut Ivec, value: c_int) {
    checked("ivec_push", require(iv, "iv")).push(value);
}

/// # Safety
///
/// `iv` must come from [`ivec_new`] and not have been freed.
#[no_mangle]
#[allow(improper_ctypes_definitions)]
pub unsafe extern "C" fn ivec_len(iv: *const Ivec) -> usize {
    checked("ivec_len", require_ref(iv, "iv")).len()
}

/// # Safety
///
/// `iv` must be null or come from [`ivec_new`], and must not be used again.
#[no_mangle]
#[allow(improper_ctypes_definitions)]
pub unsafe extern "C" fn ivec_free(iv: *mut Ivec) {
    if !iv.is_null() {
        drop(Box::from_raw(iv));
    }
}

/// # Safety
///
/// `iv` must come from [`ivec_new`] and not have been freed.
#[no_mangle]
#[allow(improper_ctypes_definitions)]
pub unsafe extern "C" fn vectorFun(iv: *const Ivec) -> c_int {
    decls::vector_fun(checked("vectorFun", require_ref(iv, "iv")))
}

/// Returns a pointer into the record's own 80-byte payload.
///
/// # Safety
///
/// `rec` must point to a live `MY_STRUCT`. The result is valid only while
/// that record is.
#[no_mangle]
pub unsafe extern "C" fn myPayload(rec: *mut MyStruct) -> *mut c_char {
    decls::my_payload(checked("myPayload", require(rec, "rec"))).as_mut_ptr()
}

#[no_mangle]
pub extern "C" fn myMath_sum(a: c_int, b: c_int) -> c_int {
    decls::sum(a, b)
}

/// # Safety
///
/// `rec` must point to writable storage for a `myMath::myRec`.
#[no_mangle]
pub unsafe extern "C" fn myMath_initRec(rec: *mut MyRec<'_>) -> c_int {
    decls::init_rec(checked("myMath_initRec", require(rec, "rec")))
}

/// # Safety
///
/// `rec` must point to an initialized `myMath::myRec` whose `name` is null
/// or a live NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn myMath_myRec_doSomethingToThis(rec: *mut MyRec<'_>) {
    checked("myMath_myRec_doSomethingToThis", require(rec, "this")).do_something_to_this();
}

/// # Safety
///
/// `car` must point to at least [`CAR_SIZE`] writable bytes aligned to
/// [`CAR_ALIGN`]. Its prior contents are ignored.
#[no_mangle]
pub unsafe extern "C" fn initCar(car: *mut Car) {
    let slot = checked("initCar", require(car.cast::<MaybeUninit<Car>>(), "car"));
    decls::init_car(slot);
}

/// # Safety
///
/// `car` must point to a car previously set up by [`initCar`].
#[no_mangle]
pub unsafe extern "C" fn doThingToCar(car: *mut ObfuscatedCar) {
    decls::do_thing_to_car(checked("doThingToCar", require(car, "car")));
}
