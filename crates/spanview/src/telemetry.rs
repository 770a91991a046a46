// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Log events emitted by the views. Only compiled in with the `logs` feature (or in tests).

use crate::Error;

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
pub(crate) fn record_size_rejected(error: &Error) {
    #[cfg(any(feature = "logs", test))]
    if let Error::RecordSize {
        from,
        to,
        from_size,
        to_size,
    } = error
    {
        tracing::event!(
            name: "spanview.record_size_rejected",
            tracing::Level::WARN,
            view.from = from,
            view.to = to,
            view.from_size = from_size,
            view.to_size = to_size,
            "record type is not a whole multiple of the storage type",
        );
    }
}

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
pub(crate) fn copy_rejected(source_len: usize, destination_len: usize) {
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "spanview.copy_rejected",
        tracing::Level::DEBUG,
        copy.source_len = source_len,
        copy.destination_len = destination_len,
        "destination is too short",
    );
}

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
pub(crate) fn inspect_panicked(index: usize, message: &str) {
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "spanview.inspect_panicked",
        tracing::Level::DEBUG,
        inspect.index = index,
        inspect.message = message,
        "conversion function panicked during inspection",
    );
}
