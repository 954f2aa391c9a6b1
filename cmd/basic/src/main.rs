//! Basic ice example
//!
//! Producers post work onto one context from several threads; the main
//! thread runs it. A suspendable chain then shows error propagation.
//!
//! # Environment Variables
//!
//! - `ICE_FLUSH_EPRINT=1` - Flush debug output immediately (useful for crash debugging)
//! - `ICE_LOG_LEVEL=debug` - Set log level (off, error, warn, info, debug, trace)
//! - `ICE_CONTEXT_IDLE_SPINS=<n>` - Empty polls before the consumer parks

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use ice::{info, kdebug, kinfo, suspendable, Context, Error, Generic, Result, Task};

// ICE_LOG_LEVEL=debug ICE_FLUSH_EPRINT=1 cargo run -p ice-basic
fn main() {
    println!("=== ice Basic Example ===\n");

    info::load_defaults();

    let producers: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(4);
    let per_producer = 1_000;

    let ctx = Arc::new(Context::new());
    let completed = Arc::new(AtomicUsize::new(0));
    let consumer = thread::current().id();

    // Keep run() alive until every producer has posted.
    let work = ctx.work();
    let start = Instant::now();

    thread::scope(|s| {
        let handles: Vec<_> = (0..producers)
            .map(|p| {
                let ctx = Arc::clone(&ctx);
                let completed = Arc::clone(&completed);
                s.spawn(move || {
                    for _ in 0..per_producer {
                        let completed = Arc::clone(&completed);
                        ctx.post(move || {
                            debug_assert_eq!(thread::current().id(), consumer);
                            completed.fetch_add(1, Ordering::Relaxed);
                        });
                    }
                    kdebug!("[producer {}] posted {} callbacks", p, per_producer);
                })
            })
            .collect();

        s.spawn(move || {
            for h in handles {
                let _ = h.join();
            }
            work.release();
        });

        let r = ctx.run();
        kinfo!("run returned ok={}", r.is_ok());
    });

    let elapsed = start.elapsed();
    let done = completed.load(Ordering::Relaxed);
    println!("Callbacks run:  {}/{}", done, producers * per_producer);
    println!("Elapsed:        {:?}", elapsed);
    println!(
        "Throughput:     {:.0} callbacks/sec\n",
        done as f64 / elapsed.as_secs_f64()
    );

    // Error propagation through a suspendable chain.
    let out = Arc::new(Mutex::new(None));
    {
        let ctx = Arc::clone(&ctx);
        let out = Arc::clone(&out);
        Task::spawn(async move {
            let r = suspendable(async {
                let port = lookup(&ctx, "port").await?;
                let host = lookup(&ctx, "host").await?;
                Ok(format!("{}:{}", host, port))
            })
            .await;
            if let Ok(mut slot) = out.lock() {
                *slot = Some(Result::from_std(r));
            }
            Ok(())
        });
    }
    let _ = ctx.run();

    let r = out.lock().ok().and_then(|mut slot| slot.take());
    match r {
        Some(r) if r.is_ok() => println!("Resolved:       {}", r.value()),
        Some(r) => match r.error() {
            Some(e) => println!("Failed:         [{}] {}", e.error_type(), e),
            None => println!("Failed:         {:?}", r),
        },
        None => println!("Chain did not finish"),
    }

    println!("\n=== Example Complete ===");
}

/// Resolve `key` on the consumer thread; only "port" is known.
async fn lookup(ctx: &Context, key: &str) -> core::result::Result<u16, Error> {
    ctx.schedule().await;
    let r: Result<u16> = match key {
        "port" => Result::new(8080),
        _ => Generic::NoSuchFileOrDirectory.into(),
    };
    r.await
}
