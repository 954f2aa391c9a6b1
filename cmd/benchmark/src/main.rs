//! MPSC handoff benchmark
//!
//! N producer threads push M items each; the main thread consumes them.
//! Compares the intrusive `ice::Queue` against `crossbeam_queue::SegQueue`,
//! then measures end-to-end `Context::post` throughput.
//!
//! Usage: `benchmark [producers] [items-per-producer]`

use std::ptr;
use std::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_queue::SegQueue;
use ice::{kinfo, Context, Node, Queue};

struct Item {
    value: usize,
    next: AtomicPtr<Item>,
}

unsafe impl Node for Item {
    fn next(&self) -> &AtomicPtr<Self> {
        &self.next
    }
}

struct Report {
    name: &'static str,
    items: usize,
    elapsed: Duration,
    checksum: usize,
}

impl Report {
    fn print(&self) {
        println!(
            "{:<12} {:>10} items  {:>12?}  {:>8.2} Mops/s  (checksum {})",
            self.name,
            self.items,
            self.elapsed,
            self.items as f64 / self.elapsed.as_secs_f64() / 1e6,
            self.checksum,
        );
    }
}

fn bench_ice(producers: usize, per_producer: usize) -> Report {
    let queue: Queue<Item> = Queue::new();
    let total = producers * per_producer;
    let start = Instant::now();
    let mut checksum = 0usize;

    thread::scope(|s| {
        for p in 0..producers {
            let queue = &queue;
            s.spawn(move || {
                for i in 0..per_producer {
                    queue.enqueue(Box::new(Item {
                        value: p * per_producer + i,
                        next: AtomicPtr::new(ptr::null_mut()),
                    }));
                }
            });
        }

        let mut received = 0;
        while received < total {
            // Safety: the main thread is the only consumer.
            match unsafe { queue.dequeue() } {
                Some(item) => {
                    checksum = checksum.wrapping_add(item.value);
                    received += 1;
                }
                None => std::hint::spin_loop(),
            }
        }
    });

    Report {
        name: "ice::Queue",
        items: total,
        elapsed: start.elapsed(),
        checksum,
    }
}

fn bench_segqueue(producers: usize, per_producer: usize) -> Report {
    let queue: SegQueue<Box<usize>> = SegQueue::new();
    let total = producers * per_producer;
    let start = Instant::now();
    let mut checksum = 0usize;

    thread::scope(|s| {
        for p in 0..producers {
            let queue = &queue;
            s.spawn(move || {
                for i in 0..per_producer {
                    queue.push(Box::new(p * per_producer + i));
                }
            });
        }

        let mut received = 0;
        while received < total {
            match queue.pop() {
                Some(value) => {
                    checksum = checksum.wrapping_add(*value);
                    received += 1;
                }
                None => std::hint::spin_loop(),
            }
        }
    });

    Report {
        name: "SegQueue",
        items: total,
        elapsed: start.elapsed(),
        checksum,
    }
}

fn bench_context(producers: usize, per_producer: usize) -> Report {
    let ctx = Arc::new(Context::new());
    let sum = Arc::new(AtomicUsize::new(0));
    let total = producers * per_producer;
    let start = Instant::now();

    thread::scope(|s| {
        let work = ctx.work();
        let handles: Vec<_> = (0..producers)
            .map(|p| {
                let ctx = Arc::clone(&ctx);
                let sum = Arc::clone(&sum);
                s.spawn(move || {
                    for i in 0..per_producer {
                        let sum = Arc::clone(&sum);
                        let value = p * per_producer + i;
                        ctx.post(move || {
                            sum.fetch_add(value, Ordering::Relaxed);
                        });
                    }
                })
            })
            .collect();
        s.spawn(move || {
            for h in handles {
                let _ = h.join();
            }
            work.release();
        });

        if let Some(e) = ctx.run().error() {
            kinfo!("context run failed: {}", e);
        }
    });

    Report {
        name: "Context",
        items: total,
        elapsed: start.elapsed(),
        checksum: sum.load(Ordering::Relaxed),
    }
}

fn main() {
    println!("=== ice MPSC Benchmark ===\n");

    let mut args = std::env::args().skip(1);
    let producers: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(4);
    let per_producer: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(250_000);

    println!("Producers:      {}", producers);
    println!("Per producer:   {}\n", per_producer);

    let ice = bench_ice(producers, per_producer);
    let seg = bench_segqueue(producers, per_producer);
    let ctx = bench_context(producers, per_producer);

    for report in [&ice, &seg, &ctx] {
        report.print();
    }

    if ice.checksum != seg.checksum || ice.checksum != ctx.checksum {
        println!("\nWARNING: checksums differ");
    }

    println!("\n=== Benchmark Complete ===");
}
