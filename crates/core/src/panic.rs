// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helpers for code that isolates job bodies with `catch_unwind`.

use std::any::Any;

/// Text of a caught panic payload (`panic!("..")` yields `&str` or `String`)
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}

#[cfg(test)]
#[path = "panic_tests.rs"]
mod tests;
