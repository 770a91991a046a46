// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Renders the contents of a view for debugging.
//!
//! Each logical element becomes one line describing what is stored, what reading it yields and,
//! for mutable views, what writing that value back would store:
//!
//! ```text
//! -25 -Get-> 25 -Set-> -25
//! ```
//!
//! Panics raised by conversion functions are caught and rendered in place of the value. Catching
//! happens after the panic hook has run, so the default hook still reports each panic on stderr.

use std::any::Any;
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};

use crate::telemetry;

/// Renders one element of a read-only view.
pub(crate) fn render_read<S, V>(index: usize, stored: &S, get: impl FnOnce() -> V) -> String
where
    S: Debug + ?Sized,
    V: Debug,
{
    match catch(index, get) {
        Ok(value) => format!("{stored:?} -Get-> {value:?}"),
        Err(message) => format!("{stored:?} -Get-> panicked: {message}"),
    }
}

/// Renders one element of a mutable view, including the write path.
///
/// The write path is only attempted if the read path succeeded.
pub(crate) fn render_round_trip<S, V, W>(
    index: usize,
    stored: &S,
    get: impl FnOnce() -> V,
    set: impl FnOnce(V) -> W,
) -> String
where
    S: Debug + ?Sized,
    V: Debug,
    W: Debug,
{
    let value = match catch(index, get) {
        Ok(value) => value,
        Err(message) => return format!("{stored:?} -Get-> panicked: {message}"),
    };

    let rendered_value = format!("{value:?}");

    match catch(index, || set(value)) {
        Ok(stored_again) => format!("{stored:?} -Get-> {rendered_value} -Set-> {stored_again:?}"),
        Err(message) => format!("{stored:?} -Get-> {rendered_value} -Set-> panicked: {message}"),
    }
}

fn catch<R>(index: usize, f: impl FnOnce() -> R) -> Result<R, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        telemetry::inspect_panicked(index, &message);
        message
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "<non-string panic payload>".to_owned()
    }
}
