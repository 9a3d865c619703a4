//! Generate a random grid and print the route found through it.
//!
//! Run: cargo run --bin route -- [seed] [size]

use wormpath_demos::{Options, run};

fn main() {
    let opts = match Options::from_args(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("usage: route [seed] [size]");
            std::process::exit(2);
        }
    };
    print!("{}", run(&opts, true));
}
