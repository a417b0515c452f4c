//! Basic tour of sparse tensors and views
//!
//! This example demonstrates:
//! - Building a COO tensor and converting it to the hash backend
//! - Slicing, unfolding and transposing without copying values
//! - Writing the text format and reading it back
//! - Pretty-printing a view
//!
//! Run with: cargo run --example basic_usage

use std::io::Cursor;

use anyhow::Result;
use sptensor::prelude::*;
use sptensor::sparse::io;
use sptensor::view::print::pretty_print;

fn main() -> Result<()> {
    println!("=== Sparse Tensor Basics ===\n");

    // Example 1: COO backend
    println!("Example 1: COO tensor (3 x 4 x 5)");
    println!("---------------------------------");

    let mut coo = CooTensor::<f64>::new(vec![3, 4, 5])?;
    coo.set(&[1, 1, 1], 99.0);
    coo.set(&[2, 3, 1], 44.0);
    coo.set(&[2, 4, 4], 100.0);
    coo.set(&[3, 2, 2], 1.0);

    println!("nnz = {}, density = {:.4}", coo.nnz(), coo.density());
    for (idx, value) in coo.entries() {
        println!("  {:?} -> {}", idx.as_slice(), value);
    }
    println!("absent (1,1,2) reads as {}", coo.get(&[1, 1, 2]));

    // Example 2: Hash backend
    println!("\nExample 2: Hash backend");
    println!("-----------------------");

    let hash = HashTensor::from_tensor(&coo, HashConfig::new().initial_buckets(4))?;
    println!(
        "nnz = {}, buckets = {}, load factor = {:.2}",
        hash.nnz(),
        hash.nbuckets(),
        hash.load_factor()
    );
    for (idx, value) in hash.entries() {
        println!("  {:?} key={} -> {}", idx.as_slice(), hash.encode(&idx), value);
    }

    // Example 3: Views
    println!("\nExample 3: Views");
    println!("----------------");

    {
        let slab = (&mut coo).slice(SliceSpec::full(&[3, 4, 5]).fix(0, 2))?;
        println!("slice mode0=2: dims {:?}, nnz {}", slab.dims(), slab.nnz());
        pretty_print(&mut std::io::stdout(), &slab, 0)?;
    }
    {
        let unfolded = (&mut coo).unfold(0)?;
        println!("\nmode-0 unfolding: dims {:?}", unfolded.dims());
        for (idx, value) in unfolded.entries() {
            println!("  {:?} -> {}", idx.as_slice(), value);
        }
    }
    {
        let transposed = (&mut coo).transpose(0, 2)?;
        println!("\ntranspose(0, 2): dims {:?}", transposed.dims());
        println!("  (1, 3, 2) -> {}", transposed.get(&[1, 3, 2]));
    }

    // Example 4: Text round trip
    println!("\nExample 4: Text format");
    println!("----------------------");

    let mut text = Vec::new();
    io::write_tensor(&mut text, &coo)?;
    print!("{}", String::from_utf8_lossy(&text));

    let back = io::read_hash::<f64>(
        Cursor::new(text),
        &ReadOptions::strict(),
        HashConfig::default(),
    )?;
    let same = coo.iter().indices().all(|idx| back.get(&idx) == coo.get(&idx));
    println!("round trip preserved every cell: {}", same);

    // Example 5: Identity and deep copy
    println!("\nExample 5: Identity tensor");
    println!("--------------------------");

    let eye = IdentityTensor::<f64>::new(vec![3, 3])?;
    let mut copy = deep_copy(&eye)?;
    copy.set(&[1, 3], 0.5);
    pretty_print(&mut std::io::stdout(), &copy, 1)?;

    Ok(())
}
