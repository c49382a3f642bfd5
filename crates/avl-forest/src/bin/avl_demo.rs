//! `avl-demo` — exercise the tree with a fixed key schedule.
//!
//! Usage:
//!   avl-demo [count]
//!
//! Inserts `(i * 97) % count` for `i in 0..count` (count defaults to 1024),
//! prints the resulting height, drains all but one key through `delete_min`,
//! and prints the remaining keys in order.

use avl_forest::AvlSet;

const MULTIPLIER: i64 = 97;
const DEFAULT_COUNT: i64 = 1024;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: avl-demo [count]");
        std::process::exit(1);
    }
    let count: i64 = match args.get(1) {
        Some(raw) => match raw.parse() {
            Ok(n) if n > 0 => n,
            _ => {
                eprintln!("count must be a positive integer");
                std::process::exit(1);
            }
        },
        None => DEFAULT_COUNT,
    };

    let mut set = AvlSet::new();
    for i in 0..count {
        set.insert((i * MULTIPLIER) % count);
    }

    println!("height {}", set.height());
    set.sanity_check();

    for _ in 1..set.len() {
        set.delete_min();
    }
    set.sanity_check();

    for key in set.iter() {
        println!("{key}");
    }
}
