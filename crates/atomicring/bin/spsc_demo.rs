//! One producer thread, one consumer thread, random pacing on both sides.
//!
//! Usage: `spsc_demo [capacity] [count]` (defaults: 10, 100)

use atomicring_rs::{Config, RingBuffer};
use rand::Rng;
use std::thread;
use std::time::{Duration, Instant};

const DEFAULT_CAPACITY: usize = 10;
const DEFAULT_COUNT: u64 = 100;
const MAX_PAUSE_MS: u64 = 100;

fn parse_arg<T: std::str::FromStr>(arg: Option<String>, default: T) -> T {
    arg.and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn pause() {
    let ms = rand::thread_rng().gen_range(0..MAX_PAUSE_MS);
    thread::sleep(Duration::from_millis(ms));
}

fn main() {
    let mut args = std::env::args().skip(1);
    let capacity = parse_arg(args.next(), DEFAULT_CAPACITY);
    let count = parse_arg(args.next(), DEFAULT_COUNT);

    println!("AtomicRing SPSC Demo");
    println!("====================\n");
    println!("Configuration:");
    println!("  Capacity: {}", capacity);
    println!("  Attempts per side: {}\n", count);

    let ring = RingBuffer::<u64>::with_config(Config::new(capacity, true));
    let (mut tx, mut rx) = ring.split();
    let start = Instant::now();

    let producer = thread::spawn(move || {
        for i in 0..count {
            // Dropped on Full; the consumer just sees a gap
            let _ = tx.push_back(i);
            pause();
        }
        tx
    });

    let consumer = thread::spawn(move || {
        let mut received = 0u64;
        for _ in 0..count {
            if let Ok(value) = rx.pop_front() {
                println!("{}", value);
                received += 1;
            }
            pause();
        }
        received
    });

    let tx = producer.join().expect("producer thread panicked");
    let received = consumer.join().expect("consumer thread panicked");
    let metrics = tx.metrics();

    println!("\nResults:");
    println!("  Pushed: {}", metrics.pushed);
    println!("  Dropped (full): {}", metrics.full_rejections);
    println!("  Received: {}", received);
    println!("  Empty polls: {}", metrics.empty_rejections);
    println!("  Duration: {:.2?}", start.elapsed());
}
