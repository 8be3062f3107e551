//! Integration tests for the genesis binary.

mod cli;
