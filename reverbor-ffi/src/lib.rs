//! C ABI wrapper for the Reverbor engine.
//!
//! Mirrors the host lifecycle one-to-one: create an engine for a topology,
//! `init` it, then call `process` once per block, `param` between blocks and
//! `resume` on transport restarts.
//!
//! ABI notes
//! - All functions are `extern "C"` and `#[no_mangle]`.
//! - Opaque handle type: `ReverbHandle` (heap-allocated; release it with `reverbor_destroy`).
//! - Buffers are interleaved stereo f32; the left sample is the input, the
//!   processed sample is written to both channels.
//! - Null handles and buffers are no-ops returning 0.
//!
//! Threading
//! - The object is NOT thread-safe; call `process` and `param` from the same
//!   thread, or serialize them on the host side.

use reverbor_engine::engine::CHANNELS;
use reverbor_engine::{Network, ReverbEngine, Topology};

/// Opaque engine wrapper we hand to C.
pub struct ReverbHandle {
    inner: ReverbEngine<Network>,
}

/// Topology id for the six-comb bank (also the fallback for unknown ids).
pub const REVERBOR_TOPOLOGY_COMB_BANK: u32 = 0;
/// Topology id for the four-tap bank.
pub const REVERBOR_TOPOLOGY_MULTI_TAP: u32 = 1;

// --- Creation / destruction -------------------------------------------------------

/// Create an engine running `topology` (see `REVERBOR_TOPOLOGY_*`).
/// Unknown ids select the comb bank. The engine starts in its power-on state.
#[no_mangle]
pub extern "C" fn reverbor_create(topology: u32) -> *mut ReverbHandle {
    let topology = Topology::from_id(topology);
    log::debug!("reverbor_create: {topology}");
    Box::into_raw(Box::new(ReverbHandle { inner: ReverbEngine::with_topology(topology) }))
}

/// Destroy an engine previously returned by `reverbor_create`.
#[no_mangle]
pub extern "C" fn reverbor_destroy(handle: *mut ReverbHandle) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)); }
    }
}

// --- Lifecycle ----------------------------------------------------------------------

/// Return the engine to its power-on state. Idempotent.
#[no_mangle]
pub extern "C" fn reverbor_init(handle: *mut ReverbHandle, platform: u32, api: u32) {
    if handle.is_null() { return; }
    let h = unsafe { &mut *handle };
    h.inner.initialize(platform, api);
}

/// Zero every delay line and restart the input ramp. Call between blocks.
#[no_mangle]
pub extern "C" fn reverbor_resume(handle: *mut ReverbHandle) {
    if handle.is_null() { return; }
    let h = unsafe { &mut *handle };
    h.inner.resume();
}

// --- Rendering -------------------------------------------------------------------

/// Process `frames` interleaved stereo frames of `xn` in place.
///
/// `xn` must point to at least `2 * frames` floats.
/// Returns the number of frames processed (0 on error).
#[no_mangle]
pub extern "C" fn reverbor_process(handle: *mut ReverbHandle, xn: *mut f32, frames: u32) -> u32 {
    if handle.is_null() || xn.is_null() || frames == 0 {
        return 0;
    }
    let h = unsafe { &mut *handle };
    let block = unsafe { std::slice::from_raw_parts_mut(xn, frames as usize * CHANNELS) };
    let done = h.inner.process(block, frames as usize);
    u32::try_from(done).unwrap_or(0)
}

// --- Parameters ------------------------------------------------------------------

/// Set a parameter from its host encoding (Q31, decoded to `[0, 1]`).
///
/// Ids: 0 = time, 1 = depth, 2 = shift-depth (dry/wet mix). Others are ignored.
#[no_mangle]
pub extern "C" fn reverbor_param(handle: *mut ReverbHandle, index: u8, value: i32) {
    if handle.is_null() { return; }
    let h = unsafe { &mut *handle };
    h.inner.set_parameter(index, value);
}

/// Topology id the engine was created with, or `u32::MAX` for a null handle.
#[no_mangle]
pub extern "C" fn reverbor_topology(handle: *const ReverbHandle) -> u32 {
    if handle.is_null() { return u32::MAX; }
    let h = unsafe { &*handle };
    h.inner.topology().id()
}
