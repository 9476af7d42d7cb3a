//! FFI bindings
//!
//! C-compatible functions for calling the pipeline from the mobile client.
//! All functions use null-terminated C strings and return allocated memory
//! that must be freed by the caller using `neuro_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::{OrchestratorConfig, TelemetryDefaults};
use crate::pipeline::{telemetry_to_report, OrchestrationService};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Analyze one telemetry JSON object and return the report JSON.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `neuro_free_string`.
/// - Returns NULL on error; call `neuro_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn neuro_orchestrate(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match telemetry_to_report(json_str) {
        Ok(report) => string_to_cstr(&report),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Configured Service API
// ============================================================================

/// Opaque handle to an OrchestrationService
pub struct NeuroServiceHandle {
    service: OrchestrationService,
}

/// Create a service from a configuration JSON (`{"defaults": {...}, "locale": "en"}`).
/// NULL `config_json` uses the documented defaults.
///
/// # Safety
/// - `config_json` must be NULL or a valid null-terminated C string.
/// - Must be freed with `neuro_service_free`.
/// - Returns NULL on error.
#[no_mangle]
pub unsafe extern "C" fn neuro_service_new(config_json: *const c_char) -> *mut NeuroServiceHandle {
    clear_last_error();

    let config = if config_json.is_null() {
        OrchestratorConfig::default()
    } else {
        let json_str = match cstr_to_string(config_json) {
            Some(s) => s,
            None => {
                set_last_error("Invalid config string pointer");
                return ptr::null_mut();
            }
        };
        match serde_json::from_str::<OrchestratorConfig>(&json_str) {
            Ok(config) => config,
            Err(e) => {
                set_last_error(&format!("Invalid configuration: {e}"));
                return ptr::null_mut();
            }
        }
    };

    let handle = Box::new(NeuroServiceHandle {
        service: OrchestrationService::with_config(config),
    });
    Box::into_raw(handle)
}

/// Free a service.
///
/// # Safety
/// - `service` must be a valid pointer returned by `neuro_service_new`, or NULL.
#[no_mangle]
pub unsafe extern "C" fn neuro_service_free(service: *mut NeuroServiceHandle) {
    if !service.is_null() {
        drop(Box::from_raw(service));
    }
}

/// Analyze telemetry with a configured service.
///
/// # Safety
/// - `service` must be a valid pointer returned by `neuro_service_new`.
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `neuro_free_string`.
/// - Returns NULL on error; call `neuro_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn neuro_service_process(
    service: *const NeuroServiceHandle,
    json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if service.is_null() {
        set_last_error("Null service pointer");
        return ptr::null_mut();
    }

    let handle = &*service;

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match handle.service.process(&json_str) {
        Ok(report) => string_to_cstr(&report),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Return the documented telemetry defaults as JSON.
///
/// # Safety
/// - Returns a newly allocated string that must be freed with `neuro_free_string`.
#[no_mangle]
pub unsafe extern "C" fn neuro_default_telemetry() -> *mut c_char {
    clear_last_error();

    match TelemetryDefaults::default().to_json() {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by this library.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a `neuro_*` function, or NULL.
#[no_mangle]
pub unsafe extern "C" fn neuro_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - The returned pointer is valid until the next `neuro_*` call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn neuro_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn neuro_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
