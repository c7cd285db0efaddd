//! CLI library surface, split out so argument parsing and command
//! handling stay testable without spawning the binary.

pub mod commands;
