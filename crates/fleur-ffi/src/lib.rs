//! fleur-ffi
//!
//! Minimal FFI surface that exposes selected fleur-core APIs to the
//! storefront and back-office shells. Records travel as JSON strings, the
//! shape the shells already hold; errors come back through a `char**`
//! out-parameter. Every returned string must be released with
//! [`fleur_string_free`].

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_double};
use std::ptr;

use fleur_core::{
    api_balance_due, api_build_info, api_submit_payment, api_track_record, api_unified_records,
    CoreError,
};
use fleur_domain::record::FulfillmentRecord;
use fleur_domain::rows::{OrderRow, RequestRow};
use fleur_domain::timeline::RiderAssignment;

/// Merges order and request rows (JSON arrays) into the unified record list.
#[no_mangle]
pub extern "C" fn fleur_records_unify(
    orders_json: *const c_char,
    requests_json: *const c_char,
    out_error: *mut *mut c_char,
) -> *mut c_char {
    clear_error(out_error);
    let orders: Vec<OrderRow> = match unsafe { parse_json_argument(orders_json) } {
        Ok(value) => value,
        Err(err) => {
            unsafe {
                write_core_error(out_error, err);
            }
            return ptr::null_mut();
        }
    };
    let requests: Vec<RequestRow> = match unsafe { parse_json_argument(requests_json) } {
        Ok(value) => value,
        Err(err) => {
            unsafe {
                write_core_error(out_error, err);
            }
            return ptr::null_mut();
        }
    };

    let unified = api_unified_records(orders, requests);
    into_json(&unified, out_error)
}

/// Derives the progress timeline for one record. `rider_json` may be null.
#[no_mangle]
pub extern "C" fn fleur_record_timeline(
    record_json: *const c_char,
    rider_json: *const c_char,
    out_error: *mut *mut c_char,
) -> *mut c_char {
    clear_error(out_error);
    let record: FulfillmentRecord = match unsafe { parse_json_argument(record_json) } {
        Ok(value) => value,
        Err(err) => {
            unsafe {
                write_core_error(out_error, err);
            }
            return ptr::null_mut();
        }
    };
    let rider: Option<RiderAssignment> = if rider_json.is_null() {
        None
    } else {
        match unsafe { parse_json_argument(rider_json) } {
            Ok(value) => Some(value),
            Err(err) => {
                unsafe {
                    write_core_error(out_error, err);
                }
                return ptr::null_mut();
            }
        }
    };

    let steps = api_track_record(&record, rider.as_ref());
    into_json(&steps, out_error)
}

/// Validates a receipt submission and returns the resulting submission JSON.
/// `receipt_ref` may be null, which fails with the missing-receipt error.
#[no_mangle]
pub extern "C" fn fleur_payment_submit(
    record_json: *const c_char,
    amount: c_double,
    receipt_ref: *const c_char,
    out_error: *mut *mut c_char,
) -> *mut c_char {
    clear_error(out_error);
    let record: FulfillmentRecord = match unsafe { parse_json_argument(record_json) } {
        Ok(value) => value,
        Err(err) => {
            unsafe {
                write_core_error(out_error, err);
            }
            return ptr::null_mut();
        }
    };
    let receipt = match unsafe { optional_string_argument(receipt_ref) } {
        Ok(value) => value,
        Err(err) => {
            unsafe {
                write_core_error(out_error, err);
            }
            return ptr::null_mut();
        }
    };

    match api_submit_payment(&record, amount, receipt.as_deref()) {
        Ok(submission) => into_json(&submission, out_error),
        Err(err) => {
            unsafe {
                write_core_error(out_error, err);
            }
            ptr::null_mut()
        }
    }
}

/// Remaining balance for one record; returns -1.0 on error.
#[no_mangle]
pub extern "C" fn fleur_balance_due(
    record_json: *const c_char,
    out_error: *mut *mut c_char,
) -> c_double {
    clear_error(out_error);
    match unsafe { parse_json_argument::<FulfillmentRecord>(record_json) } {
        Ok(record) => api_balance_due(&record).to_decimal(),
        Err(err) => {
            unsafe {
                write_core_error(out_error, err);
            }
            -1.0
        }
    }
}

/// One-line build description for about screens.
#[no_mangle]
pub extern "C" fn fleur_build_info() -> *mut c_char {
    match CString::new(api_build_info().describe()) {
        Ok(cstring) => cstring.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Releases a string previously returned by this library.
#[no_mangle]
pub extern "C" fn fleur_string_free(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(ptr));
    }
}

fn into_json<T: serde::Serialize>(value: &T, out_error: *mut *mut c_char) -> *mut c_char {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(err) => {
            unsafe {
                write_error(out_error, &err.to_string());
            }
            return ptr::null_mut();
        }
    };
    match CString::new(json) {
        Ok(cstring) => cstring.into_raw(),
        Err(err) => {
            unsafe {
                write_error(out_error, &err.to_string());
            }
            ptr::null_mut()
        }
    }
}

fn clear_error(out_error: *mut *mut c_char) {
    if out_error.is_null() {
        return;
    }
    unsafe {
        *out_error = ptr::null_mut();
    }
}

unsafe fn write_error(out_error: *mut *mut c_char, message: &str) {
    if out_error.is_null() {
        return;
    }
    if let Ok(cstring) = CString::new(message) {
        *out_error = cstring.into_raw();
    }
}

unsafe fn write_core_error(out_error: *mut *mut c_char, err: CoreError) {
    write_error(out_error, &err.to_string());
}

unsafe fn c_string_argument(ptr: *const c_char) -> Result<String, CoreError> {
    if ptr.is_null() {
        return Err(CoreError::Validation("null string pointer received".into()));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(|s| s.to_string())
        .map_err(|err| CoreError::Validation(err.to_string()))
}

unsafe fn optional_string_argument(ptr: *const c_char) -> Result<Option<String>, CoreError> {
    if ptr.is_null() {
        return Ok(None);
    }
    c_string_argument(ptr).map(Some)
}

unsafe fn parse_json_argument<T: serde::de::DeserializeOwned>(
    ptr: *const c_char,
) -> Result<T, CoreError> {
    let raw = c_string_argument(ptr)?;
    serde_json::from_str(&raw)
        .map_err(|err| CoreError::Validation(format!("invalid JSON payload: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cstring(value: &str) -> CString {
        CString::new(value).expect("no interior NUL")
    }

    fn take_string(ptr: *mut c_char) -> String {
        assert!(!ptr.is_null());
        let value = unsafe { CStr::from_ptr(ptr) }
            .to_str()
            .expect("valid utf-8")
            .to_string();
        fleur_string_free(ptr);
        value
    }

    fn take_error(ptr: *mut c_char) -> String {
        take_string(ptr)
    }

    const RECORD: &str = r#"{
        "kind": "order",
        "id": "ord-1",
        "displayNumber": "ORD-0001",
        "status": "accepted",
        "deliveryMethod": "delivery",
        "total": 2000.0,
        "amountPaid": 0,
        "paymentMethod": "gcash",
        "paymentStatus": "unpaid",
        "createdAt": "2024-03-01T09:00:00Z"
    }"#;

    #[test]
    fn unify_round_trips_json() {
        let orders = cstring(
            r#"[{
                "id": "ord-1",
                "order_number": "ORD-0001",
                "status": "processing",
                "delivery_method": "delivery",
                "total_price": 1500.0,
                "created_at": "2024-03-04T10:00:00Z",
                "request_id": "req-1"
            }]"#,
        );
        let requests = cstring(
            r#"[{
                "id": "req-1",
                "request_number": "REQ-0001",
                "request_type": "booking",
                "status": "accepted",
                "delivery_method": "pickup",
                "created_at": "2024-03-01T09:00:00Z"
            }]"#,
        );
        let mut error: *mut c_char = ptr::null_mut();
        let out = fleur_records_unify(orders.as_ptr(), requests.as_ptr(), &mut error);
        assert!(error.is_null());
        let json = take_string(out);
        let unified: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        let list = unified.as_array().expect("array");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["id"], "ord-1");
    }

    #[test]
    fn timeline_reports_current_step() {
        let record = cstring(RECORD);
        let mut error: *mut c_char = ptr::null_mut();
        let out = fleur_record_timeline(record.as_ptr(), ptr::null(), &mut error);
        assert!(error.is_null());
        let json = take_string(out);
        let steps: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        let steps = steps.as_array().expect("array");
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[1]["state"], "current");
    }

    #[test]
    fn payment_submit_surfaces_core_errors() {
        let record = cstring(RECORD);
        let mut error: *mut c_char = ptr::null_mut();
        let out = fleur_payment_submit(record.as_ptr(), 1200.0, ptr::null(), &mut error);
        assert!(out.is_null());
        let message = take_error(error);
        assert!(message.contains("Receipt"), "got: {message}");
    }

    #[test]
    fn payment_submit_returns_submission_json() {
        let record = cstring(RECORD);
        let receipt = cstring("https://receipts.test/gc-1.jpg");
        let mut error: *mut c_char = ptr::null_mut();
        let out = fleur_payment_submit(record.as_ptr(), 1200.0, receipt.as_ptr(), &mut error);
        assert!(error.is_null());
        let json = take_string(out);
        let submission: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(submission["balanceDue"], 800.0);
        assert_eq!(submission["record"]["paymentStatus"], "waiting_for_confirmation");
    }

    #[test]
    fn balance_due_handles_malformed_json() {
        let garbage = cstring("{not json");
        let mut error: *mut c_char = ptr::null_mut();
        let balance = fleur_balance_due(garbage.as_ptr(), &mut error);
        assert_eq!(balance, -1.0);
        let message = take_error(error);
        assert!(message.contains("invalid JSON"), "got: {message}");

        let record = cstring(RECORD);
        let mut error: *mut c_char = ptr::null_mut();
        let balance = fleur_balance_due(record.as_ptr(), &mut error);
        assert!(error.is_null());
        assert_eq!(balance, 2000.0);
    }

    #[test]
    fn build_info_is_a_valid_string() {
        let out = fleur_build_info();
        let description = take_string(out);
        assert!(description.starts_with("fleur-core"));
    }
}
