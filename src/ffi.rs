//! C-compatible Foreign Function Interface (FFI).
//!
//! Requests and responses travel as JSON strings.
//!
//! # Memory Management
//!
//! - The request must be a null-terminated UTF-8 C string.
//! - Returned strings are allocated by Rust and must be freed with
//!   [`u_tour_free_string`].
//!
//! # Response
//!
//! `{"ok": <solution>}` on success, `{"error": {"kind", "location", "message"}}`
//! on failure. Malformed requests report kind `"request"`.

use std::ffi::{CStr, CString};
use std::ptr;

use libc::c_char;
use serde_json::json;

use crate::solver::ConfiguredRequest;

/// Solves a JSON request and returns the JSON response.
pub fn solve_json(request: &str) -> String {
    let request: ConfiguredRequest = match serde_json::from_str(request) {
        Ok(r) => r,
        Err(e) => {
            return json!({
                "error": {
                    "kind": "request",
                    "location": format!("line {}, column {}", e.line(), e.column()),
                    "message": e.to_string(),
                }
            })
            .to_string()
        }
    };
    match request.solve() {
        Ok(solution) => json!({ "ok": solution }).to_string(),
        Err(err) => json!({ "error": err.report() }).to_string(),
    }
}

/// Solves a tour request given as JSON.
///
/// Returns a newly allocated JSON response, or NULL if `request` is NULL or
/// not valid UTF-8.
///
/// # Safety
///
/// `request` must be NULL or point to a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn u_tour_solve_json(request: *const c_char) -> *mut c_char {
    if request.is_null() {
        return ptr::null_mut();
    }
    let text = match CStr::from_ptr(request).to_str() {
        Ok(s) => s,
        Err(_) => return ptr::null_mut(),
    };
    match CString::new(solve_json(text)) {
        Ok(s) => s.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Frees a string returned by [`u_tour_solve_json`].
///
/// # Safety
///
/// `s` must be NULL or a pointer previously returned by this library and not
/// yet freed.
#[no_mangle]
pub unsafe extern "C" fn u_tour_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_json_ok() {
        let out = solve_json(r#"{"cells": [[0, 2], [3, 0]], "labels": ["A", "B"]}"#);
        let v: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(v["ok"]["route"]["total_cost"], json!(5.0));
    }

    #[test]
    fn test_solve_json_error_report() {
        let out = solve_json(r#"{"cells": [[0, "-m"], [3, 0]], "labels": ["A", "B"], "variable": 1}"#);
        let v: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(v["error"]["kind"], json!("range"));
        assert_eq!(v["error"]["location"], json!("cell (row 0, column 1)"));
    }

    #[test]
    fn test_solve_json_bad_request() {
        let out = solve_json("{not json");
        let v: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(v["error"]["kind"], json!("request"));
    }

    #[test]
    fn test_c_roundtrip() {
        let req = CString::new(r#"{"cells": [[0, 1], [1, 0]], "labels": ["A", "B"]}"#)
            .expect("cstring");
        unsafe {
            let out = u_tour_solve_json(req.as_ptr());
            assert!(!out.is_null());
            let text = CStr::from_ptr(out).to_str().expect("utf8").to_owned();
            u_tour_free_string(out);
            assert!(text.contains("\"ok\""));
            assert!(u_tour_solve_json(ptr::null()).is_null());
        }
    }
}
