//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `remindo_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use remindo_core::{Activity, SqliteKvStore, StateStore};
use std::sync::Arc;

fn main() {
    println!("remindo_core ping={}", remindo_core::ping());
    println!("remindo_core version={}", remindo_core::core_version());

    // Exercise the store end to end against a throwaway in-memory backend.
    match SqliteKvStore::open_in_memory() {
        Ok(kv) => {
            let mut store = StateStore::open(Arc::new(kv));
            store.login("smoke");
            store.add_activity(Activity::new("smoke-1", "probe activity"));
            store.flush();
            println!(
                "remindo_core smoke session={} activities={}",
                store.session().is_logged_in,
                store.activities().len()
            );
        }
        Err(err) => {
            eprintln!("remindo_core smoke failed: {err}");
            std::process::exit(1);
        }
    }
}
