//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `homework_core` linkage.
//! - Print a deterministic summary of the seeded demo books.

use homework_core::{AlwaysConfirm, TrackerConfig, TrackerService};

fn main() {
    println!("homework_core ping={}", homework_core::ping());
    println!("homework_core version={}", homework_core::core_version());

    let service = TrackerService::new(TrackerConfig::default(), AlwaysConfirm);
    for book in service.store().books() {
        let progress = book.progress();
        println!(
            "book id={} pages={} completed={} remaining={}",
            book.id, progress.total, progress.completed, progress.remaining
        );
    }
}
