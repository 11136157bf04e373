//! CLI subcommand modules.
//!
//! This module contains the implementations for all valora CLI subcommands.

pub(crate) mod aggregate;
pub(crate) mod dcf;
pub(crate) mod llm;
pub(crate) mod methods;
pub(crate) mod stage;
pub(crate) mod tools;

const BANNER_WIDTH: usize = 62;

/// Print a boxed section title.
pub(crate) fn banner(title: &str) {
    println!("\n╔{}╗", "═".repeat(BANNER_WIDTH));
    println!("║{title:^BANNER_WIDTH$}║");
    println!("╚{}╝\n", "═".repeat(BANNER_WIDTH));
}
