//! Interrupt request surface peripherals signal into.

/// Fire-and-forget interrupt sink; prioritization and delivery live in the
/// host's interrupt controller, not here.
pub trait InterruptController {
    /// Requests interrupt `number`.
    fn request_interrupt(&mut self, number: u8);
}

/// Recording controller for tests and headless runs: keeps every request
/// in arrival order.
#[derive(Debug, Clone, Default)]
pub struct LatchedInterrupts {
    requests: Vec<u8>,
}

impl LatchedInterrupts {
    /// New recorder with no pending requests.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requests: Vec::new(),
        }
    }

    /// All requests seen so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> &[u8] {
        &self.requests
    }

    /// Count of requests for one interrupt number.
    #[must_use]
    pub fn count_of(&self, number: u8) -> usize {
        self.requests.iter().filter(|&&n| n == number).count()
    }

    /// Forgets all recorded requests.
    pub fn clear(&mut self) {
        self.requests.clear();
    }
}

impl InterruptController for LatchedInterrupts {
    fn request_interrupt(&mut self, number: u8) {
        self.requests.push(number);
    }
}

#[cfg(test)]
mod tests {
    use super::{InterruptController, LatchedInterrupts};

    #[test]
    fn records_requests_in_order() {
        let mut irq = LatchedInterrupts::new();
        irq.request_interrupt(81);
        irq.request_interrupt(80);
        irq.request_interrupt(81);
        assert_eq!(irq.requests(), &[81, 80, 81]);
        assert_eq!(irq.count_of(81), 2);
        irq.clear();
        assert!(irq.requests().is_empty());
    }
}
