//! Shared fixtures for unit tests.

use std::io;
use std::sync::{Arc, Mutex};

use crate::{Arena, Node, Queue};

pub(crate) type TestStorage = Arena<Node<String>>;
pub(crate) type TestQueue = Queue<String, TestStorage>;

pub(crate) fn queue_of(storage: &mut TestStorage, values: &[&str]) -> TestQueue {
    let mut queue = TestQueue::new();
    for &v in values {
        queue.try_push_back(storage, v.to_string()).unwrap();
    }
    queue
}

pub(crate) fn values(queue: &TestQueue, storage: &TestStorage) -> Vec<String> {
    let forward: Vec<String> = queue.iter(storage).cloned().collect();

    // Every fixture read also checks the links both ways
    let mut backward: Vec<String> = queue.iter(storage).rev().cloned().collect();
    backward.reverse();
    assert_eq!(forward, backward, "prev links disagree with next links");
    assert!(queue.ring().is_well_formed(storage));

    forward
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a TRACE-level subscriber and returns everything it logged.
pub(crate) fn capture_traces(f: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = captured.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}
