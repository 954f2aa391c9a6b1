//! End-to-end scenarios across queue, context, errors and tasks.

use std::collections::HashSet;
use std::future::Future;
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicPtr, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use ice::{
    error_code_type, info, suspendable, Context, Errc, Error, ErrorCode, ErrorCodeType, ErrorInfo,
    Generic, Node, Queue, Result, Task,
};

struct Tagged {
    producer: usize,
    seq: usize,
    next: AtomicPtr<Tagged>,
}

impl Tagged {
    fn boxed(producer: usize, seq: usize) -> Box<Self> {
        Box::new(Tagged {
            producer,
            seq,
            next: AtomicPtr::new(ptr::null_mut()),
        })
    }
}

unsafe impl Node for Tagged {
    fn next(&self) -> &AtomicPtr<Self> {
        &self.next
    }
}

#[test]
fn single_producer_dequeues_in_order() {
    let queue = Queue::new();
    for seq in 0..3 {
        queue.enqueue(Tagged::boxed(0, seq));
    }
    let order: Vec<usize> = std::iter::from_fn(|| unsafe { queue.dequeue() })
        .map(|node| node.seq)
        .collect();
    assert_eq!(order, vec![0, 1, 2]);
    assert!(unsafe { queue.dequeue() }.is_none());
}

#[test]
fn two_producers_one_consumer_lose_nothing() {
    const PER_PRODUCER: usize = 10_000;

    let queue: Queue<Tagged> = Queue::new();
    let mut seen = HashSet::new();

    thread::scope(|s| {
        for producer in 0..2 {
            let queue = &queue;
            s.spawn(move || {
                for seq in 0..PER_PRODUCER {
                    queue.enqueue(Tagged::boxed(producer, seq));
                }
            });
        }

        let mut last = [None::<usize>; 2];
        while seen.len() < 2 * PER_PRODUCER {
            // Safety: this thread is the only consumer.
            match unsafe { queue.dequeue() } {
                Some(node) => {
                    if let Some(prev) = last[node.producer] {
                        assert!(node.seq > prev, "producer order broken");
                    }
                    last[node.producer] = Some(node.seq);
                    assert!(seen.insert((node.producer, node.seq)), "duplicate node");
                }
                None => thread::yield_now(),
            }
        }
    });

    assert_eq!(seen.len(), 2 * PER_PRODUCER);
    assert!(queue.is_empty());
}

#[test]
fn result_holds_value() {
    let r = Result::new(42);
    assert!(r.is_ok());
    assert_eq!(*r.value(), 42);
}

#[test]
fn result_holds_errno() {
    let r: Result<i32> = Generic::NoSuchFileOrDirectory.into();
    assert!(!r.is_ok());
    assert_eq!(r.error().map(Error::code), Some(libc::ENOENT));
    assert_eq!(r.error_type(), Generic::TYPE);
}

#[test]
fn zero_values_never_build_success() {
    let from_enum: Result<()> = Generic::Success.into();
    let from_code: Result<()> = ErrorCode::<Generic>::from_raw(0).into();
    let from_error: Result<()> = Error::new(Generic::TYPE, 0).into();
    for r in [from_enum, from_code, from_error] {
        assert!(r.is_err());
        assert_eq!(r, Errc::InvalidResultValue);
    }
}

type Body = core::result::Result<i32, Error>;

fn h(ctx: Arc<Context>) -> impl Future<Output = Body> + Send {
    suspendable(async move {
        ctx.schedule().await;
        Err(Error::from(Generic::TimedOut))
    })
}

fn g(ctx: Arc<Context>, reached: Arc<AtomicBool>) -> impl Future<Output = Body> + Send {
    suspendable(async move {
        let v = h(ctx).await?;
        reached.store(true, Ordering::SeqCst);
        Ok(v * 2)
    })
}

fn f(ctx: Arc<Context>, reached: Arc<AtomicBool>) -> impl Future<Output = Body> + Send {
    suspendable(async move {
        let v = g(ctx, reached).await?;
        Ok(v + 1)
    })
}

#[test]
fn failing_chain_short_circuits_across_suspension() {
    let ctx = Arc::new(Context::new());
    let reached = Arc::new(AtomicBool::new(false));
    let out = Arc::new(Mutex::new(None));

    {
        let (ctx, reached, out) = (Arc::clone(&ctx), Arc::clone(&reached), Arc::clone(&out));
        Task::spawn(async move {
            let r = f(ctx, reached).await;
            *out.lock().unwrap() = Some(r);
            Ok(())
        });
    }
    // h is parked on the context until the consumer runs.
    assert!(out.lock().unwrap().is_none());
    assert_eq!(ctx.len(), 1);

    assert!(ctx.run().is_ok());
    assert!(!reached.load(Ordering::SeqCst));
    let r = out.lock().unwrap().take().unwrap();
    assert_eq!(r, Err(Error::from(Generic::TimedOut)));
}

#[test]
fn stopped_context_reports_leftover_work() {
    let empty = Context::new();
    empty.stop();
    assert!(empty.run().is_ok());

    let ctx = Arc::new(Context::new());
    let delivered = Arc::new(AtomicBool::new(false));
    let d = Arc::clone(&delivered);
    ctx.post(move || d.store(true, Ordering::SeqCst));
    ctx.stop();
    let r = ctx.run();
    assert!(r.is_err());
    assert_eq!(r, Errc::ContextNotEmpty);
    assert!(!delivered.load(Ordering::SeqCst));
}

error_code_type! {
    enum Parse: u8 {
        Success = 0,
        BadDigit = 1,
        Overflow = 2,
    }
}

impl info::Describe for Parse {
    fn describe() -> ErrorInfo {
        fn text(code: i32) -> String {
            match Parse::from_code(code) {
                Some(Parse::BadDigit) => "bad digit".to_string(),
                Some(Parse::Overflow) => "overflow".to_string(),
                _ => ErrorInfo::format(code),
            }
        }
        ErrorInfo::new(Some("parse"), Some(text))
    }
}

#[test]
fn unload_restores_fallback_text() {
    let before = Error::from(Parse::Overflow).to_string();
    let name_before = Parse::TYPE.to_string();

    info::load::<Parse>();
    assert_eq!(Error::from(Parse::Overflow).to_string(), "overflow");
    assert_eq!(Parse::TYPE.to_string(), "parse");

    info::unload::<Parse>();
    assert_eq!(Error::from(Parse::Overflow).to_string(), before);
    assert_eq!(Parse::TYPE.to_string(), name_before);
    assert_eq!(ErrorInfo::name(Parse::TYPE), None);
}
