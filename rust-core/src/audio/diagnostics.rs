//! Lock-free diagnostic events from the audio thread
//!
//! Conditions detected on the sample-rate path are pushed into a ring buffer
//! instead of being formatted in place; the host drains them elsewhere.

use ringbuf::{HeapConsumer, HeapProducer, HeapRb};

/// Number of events kept before new ones are dropped
pub const DIAGNOSTIC_CAPACITY: usize = 64;

/// Which filter array a stability check was run on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTarget {
    Coefficients,
    Memory,
}

/// Condition signalled by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// A block completed before the previous one was analyzed
    Overrun {
        /// Overruns since construction or the last reset
        total: u64,
    },

    /// NaN or infinity found and the array cleared
    UnstableFilter { target: FilterTarget },
}

/// Producer end, owned by the engine
pub struct DiagnosticSender {
    producer: HeapProducer<Diagnostic>,
}

impl DiagnosticSender {
    /// Queue an event; drops it if the host has not kept up
    ///
    /// # Returns
    /// `false` if the queue was full
    pub fn send(&mut self, event: Diagnostic) -> bool {
        self.producer.push(event).is_ok()
    }
}

/// Consumer end, handed to the host
pub struct DiagnosticReceiver {
    consumer: HeapConsumer<Diagnostic>,
}

impl DiagnosticReceiver {
    /// Next pending event
    pub fn try_recv(&mut self) -> Option<Diagnostic> {
        self.consumer.pop()
    }

    /// Drain all pending events
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        let mut events = Vec::with_capacity(self.consumer.len());
        while let Some(event) = self.consumer.pop() {
            events.push(event);
        }
        events
    }

    /// Get number of pending events
    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    /// Check if no events are pending
    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }
}

/// Create a connected sender/receiver pair
pub fn channel(capacity: usize) -> (DiagnosticSender, DiagnosticReceiver) {
    let rb = HeapRb::<Diagnostic>::new(capacity);
    let (producer, consumer) = rb.split();

    (
        DiagnosticSender { producer },
        DiagnosticReceiver { consumer },
    )
}
