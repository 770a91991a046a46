// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Working with a converting view over a buffer of integers.
//!
//! 1. We present a buffer of integers with their signs flipped, without a second buffer.
//! 2. We write through the view and observe the effect on the underlying buffer.
//! 3. We copy part of the view into a plain slice.

use spanview::{ConvertingViewMut, Position};

fn main() -> spanview::Result<()> {
    let mut readings: Vec<i32> = (-50..=50).collect();
    let negate = |x: i32| -x;

    let mut negated = ConvertingViewMut::new(&mut readings, &negate, &negate);

    println!(
        "The view holds {} readings, from {} to {}.",
        negated.len(),
        negated.get(0)?,
        negated.get(Position::FromEnd(1))?
    );

    // Writes pass through the backward function, so the buffer receives the negated value.
    negated.set(0, -21)?;
    println!("After writing -21 through the view, the view reads {}.", negated.get(0)?);

    // Only the first ten readings are copied; the destination may be longer than the source.
    let mut first_ten = [0_i32; 12];
    negated.slice(..10)?.copy_to(&mut first_ten)?;
    println!("First ten readings as seen through the view: {first_ten:?}");

    println!("The buffer itself now starts with {}.", readings[0]);

    Ok(())
}
