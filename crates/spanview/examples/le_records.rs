// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Working with a buffered view over a byte buffer.
//!
//! 1. We encode a sequence of 16-bit integers into a byte buffer.
//! 2. We read the integers back through a buffered view, without copying the bytes.
//! 3. We update records in place and print the debug rendering of the view.

use spanview::{BufferedViewMutFactory, Position, codec};

fn main() -> spanview::Result<()> {
    let mut message: Vec<u8> = (-25_i16..=25).flat_map(i16::to_le_bytes).collect();

    let unpack = codec::unpack_le::<i16>;
    let pack = codec::pack_le::<i16>;

    // The factory checks once that an i16 record is made of whole bytes.
    let factory = BufferedViewMutFactory::new(&unpack, &pack)?;

    let mut view = factory.build(&mut message);
    println!(
        "{} bytes hold {} records of {} bytes each.",
        view.storage().len(),
        view.len(),
        view.record_size()
    );

    let middle = view.slice(Position::FromStart(15)..Position::FromEnd(15))?;
    println!("The middle {} records start at {}.", middle.len(), middle.get(0)?);

    let sum: i32 = view.iter().map(i32::from).sum();
    println!("The sum of all records is {sum}.");

    view.set(0, 1000)?;
    view.set(Position::FromEnd(1), -1000)?;

    for line in view.slice_at(0, 3)?.inspect() {
        println!("{line}");
    }

    println!("The message now starts with bytes {:?}.", &message[..2]);

    Ok(())
}
