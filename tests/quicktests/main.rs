#[macro_use]
extern crate quickcheck_macros;

// The unit fuzzers' generator, so both sets of properties draw the same mix of operations.
#[path = "../../src/test/quick.rs"]
mod quick;
mod tree;

use quick::Op;
