#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use formwire::{FormBuilder, SubmissionError, ValidatedData};
use formwire_router::Response;

/// What a form's callbacks saw while handling requests.
#[derive(Debug, Default)]
pub struct Calls {
    pub successes: usize,
    pub errors: Vec<String>,
    pub side_effects: Vec<ValidatedData>,
    pub validation_failures: Vec<Vec<String>>,
}

pub type Recorder = Arc<Mutex<Calls>>;

/// Wires recording callbacks onto `builder`: the success handler answers
/// `Success`, the error handler answers 422 `Error`.
pub fn recorded(builder: FormBuilder) -> (FormBuilder, Recorder) {
    let calls: Recorder = Arc::default();
    let on_success = Arc::clone(&calls);
    let on_error = Arc::clone(&calls);
    let on_side_effect = Arc::clone(&calls);

    let builder = builder
        .side_effect(move |_req, data| {
            let calls = Arc::clone(&on_side_effect);
            async move {
                calls.lock().unwrap().side_effects.push(data);
                Ok(())
            }
        })
        .on_success(move |_req| {
            let calls = Arc::clone(&on_success);
            async move {
                calls.lock().unwrap().successes += 1;
                Response::text("Success")
            }
        })
        .on_error(move |_req, err: SubmissionError| {
            let calls = Arc::clone(&on_error);
            async move {
                let mut calls = calls.lock().unwrap();
                if let Some(errors) = err.validation_errors() {
                    calls
                        .validation_failures
                        .push(errors.fields().map(str::to_string).collect());
                }
                calls.errors.push(err.to_string());
                Response::unprocessable_entity().body("Error")
            }
        });
    (builder, calls)
}

/// Builds a form that answers fixed responses and records nothing.
pub fn silent(builder: FormBuilder) -> FormBuilder {
    builder
        .on_success(|_req| async { Response::text("Success") })
        .on_error(|_req, _err| async { Response::text("Error") })
}
