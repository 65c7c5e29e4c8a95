use std::sync::atomic::{AtomicU8, Ordering};

/// Sequence numbers for interface commands: 1, 2, ..., 255, 1, ...
///
/// Zero is never handed out.
#[derive(Debug)]
pub struct InterfaceSequence {
    next: AtomicU8,
}

impl InterfaceSequence {
    pub fn new() -> Self {
        Self {
            next: AtomicU8::new(1),
        }
    }

    pub fn next(&self) -> u8 {
        let advance = |seq: u8| Some(if seq == u8::MAX { 1 } else { seq + 1 });
        match self.next.fetch_update(Ordering::Relaxed, Ordering::Relaxed, advance) {
            Ok(seq) | Err(seq) => seq,
        }
    }
}

impl Default for InterfaceSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one_and_skips_zero_on_wrap() {
        let seq = InterfaceSequence::new();
        assert_eq!(seq.next(), 1);
        assert_eq!(seq.next(), 2);
        for _ in 3..=255 {
            seq.next();
        }
        assert_eq!(seq.next(), 1);
        assert_eq!(seq.next(), 2);
    }

    #[test]
    fn never_yields_zero() {
        let seq = InterfaceSequence::new();
        assert!((0..1000).all(|_| seq.next() != 0));
    }
}
