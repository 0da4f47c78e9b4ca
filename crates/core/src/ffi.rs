//! C FFI bindings
//!
//! Every function taking a state pointer returns `-1` when it is null.
//! Other return codes: `0` success, `-2` engine error (bad parameters,
//! allocation failure, non UTF-8 suffix), `-3` call out of protocol order.

use core::ffi::c_char;
use core::slice;
use std::ffi::CStr;

use crate::spec::ConcreteSpec;
use crate::state::{Phase, SpongeState};

const OK: i32 = 0;
const NULL_POINTER: i32 = -1;
const ENGINE_ERROR: i32 = -2;
const OUT_OF_ORDER: i32 = -3;

/// Opaque sponge handle for FFI
pub struct KekState {
    inner: SpongeState,
}

/// Create a new sponge; all sizes in bits
///
/// Returns null if the parameters are invalid or allocation fails. The
/// caller must release the handle with `kek_state_free`.
#[unsafe(no_mangle)]
pub extern "C" fn kek_state_new(bitrate: usize, capacity: usize, output: usize) -> *mut KekState {
    let Ok(spec) = ConcreteSpec::new(bitrate, capacity, output) else {
        return core::ptr::null_mut();
    };
    match SpongeState::new(&spec) {
        Ok(inner) => Box::into_raw(Box::new(KekState { inner })),
        Err(_) => core::ptr::null_mut(),
    }
}

/// Free a sponge, overwriting its contents first when `erase` is set
#[unsafe(no_mangle)]
pub extern "C" fn kek_state_free(state: *mut KekState, erase: bool) {
    if !state.is_null() {
        let state = unsafe { Box::from_raw(state) };
        state.inner.destroy(erase);
    }
}

/// Absorb `len` bytes at `msg`; `msg` may be null when `len` is 0
#[unsafe(no_mangle)]
pub extern "C" fn kek_update(state: *mut KekState, msg: *const u8, len: usize) -> i32 {
    if state.is_null() || (msg.is_null() && len > 0) {
        return NULL_POINTER;
    }

    unsafe {
        let state = &mut (*state).inner;
        if state.phase() == Phase::Squeezing {
            return OUT_OF_ORDER;
        }
        match state.update(bytes(msg, len)) {
            Ok(()) => OK,
            Err(_) => ENGINE_ERROR,
        }
    }
}

/// Finish the message and write one digest
///
/// - msg, len: final bytes; with `bits > 0` the last byte holds `bits` extra bits
/// - suffix: NUL-terminated string of '0'/'1', null for no suffix
/// - output: `kek_digest_len` bytes, or null to advance without output
#[unsafe(no_mangle)]
pub extern "C" fn kek_digest(
    state: *mut KekState,
    msg: *const u8,
    len: usize,
    bits: usize,
    suffix: *const c_char,
    output: *mut u8,
) -> i32 {
    if state.is_null() || (msg.is_null() && len > 0) {
        return NULL_POINTER;
    }

    unsafe {
        let state = &mut (*state).inner;
        if state.phase() == Phase::Squeezing || bits >= 8 || (bits > 0 && len == 0) {
            return OUT_OF_ORDER;
        }

        let suffix = if suffix.is_null() {
            ""
        } else {
            match CStr::from_ptr(suffix).to_str() {
                Ok(s) => s,
                Err(_) => return ENGINE_ERROR,
            }
        };

        let out = if output.is_null() {
            None
        } else {
            Some(slice::from_raw_parts_mut(output, state.digest_len()))
        };

        match state.digest_into(bytes(msg, len), bits, suffix, out) {
            Ok(()) => OK,
            Err(_) => ENGINE_ERROR,
        }
    }
}

/// Squeeze another digest into `output` (`kek_digest_len` bytes)
#[unsafe(no_mangle)]
pub extern "C" fn kek_squeeze(state: *mut KekState, output: *mut u8) -> i32 {
    if state.is_null() || output.is_null() {
        return NULL_POINTER;
    }

    unsafe {
        let state = &mut (*state).inner;
        if state.phase() != Phase::Squeezing {
            return OUT_OF_ORDER;
        }
        let out = slice::from_raw_parts_mut(output, state.digest_len());
        state.squeeze_into(out);
    }
    OK
}

/// Skip `times` digests
#[unsafe(no_mangle)]
pub extern "C" fn kek_fast_squeeze(state: *mut KekState, times: usize) -> i32 {
    if state.is_null() {
        return NULL_POINTER;
    }

    let state = unsafe { &mut (*state).inner };
    if state.phase() != Phase::Squeezing {
        return OUT_OF_ORDER;
    }
    state.fast_squeeze(times);
    OK
}

/// Bytes written by `kek_digest` and `kek_squeeze`
#[unsafe(no_mangle)]
pub extern "C" fn kek_digest_len(state: *const KekState) -> isize {
    if state.is_null() {
        return NULL_POINTER as isize;
    }
    unsafe { (*state).inner.digest_len() as isize }
}

unsafe fn bytes<'a>(ptr: *const u8, len: usize) -> &'a [u8] {
    if len == 0 {
        &[]
    } else {
        unsafe { slice::from_raw_parts(ptr, len) }
    }
}
