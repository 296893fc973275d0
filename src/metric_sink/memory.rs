// src/metric_sink/memory.rs
//! A recording [`Emitter`](crate::metric_sink::Emitter) for tests.
use std::cell::RefCell;
use std::rc::Rc;

use crate::metric_sink::{self, EmitError, MetricPoint};

/// An emitter that keeps every point it is given.
///
/// Clones share the same storage, so a test can hand one clone to a
/// [`Pipeline`](crate::pipeline::Pipeline) and inspect the other.
#[derive(Clone, Default)]
pub(crate) struct Emitter {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    points: Vec<MetricPoint>,
    failures: usize,
}

impl Emitter {
    /// Create a new instance.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reject the next `count` points with an error instead of recording them.
    pub(crate) fn fail_next(&self, count: usize) {
        self.inner.borrow_mut().failures = count;
    }

    /// The points recorded so far.
    pub(crate) fn points(&self) -> Vec<MetricPoint> {
        self.inner.borrow().points.clone()
    }
}

impl metric_sink::Emitter for Emitter {
    fn emit(&mut self, point: &MetricPoint) -> Result<(), EmitError> {
        let mut inner = self.inner.borrow_mut();
        if inner.failures > 0 {
            inner.failures -= 1;
            return Err(EmitError::Status {
                status: 503,
                message: "injected failure".to_string(),
            });
        }
        inner.points.push(point.clone());
        Ok(())
    }
}
