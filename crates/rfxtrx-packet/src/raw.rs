use std::fmt::Write;

/// Operator-facing rendering of an undecoded RF capture.
///
/// Three lines: decimal bytes, nibble pairs as `[low high]`, and bits MSB
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDump {
    pub decimal: String,
    pub nibbles: String,
    pub bits: String,
}

impl RawDump {
    pub fn new(bytes: &[u8]) -> Self {
        let mut decimal = String::new();
        let mut nibbles = String::new();
        let mut bits = String::new();
        for (i, b) in bytes.iter().enumerate() {
            if i > 0 {
                decimal.push(' ');
                nibbles.push(' ');
                bits.push(' ');
            }
            let _ = write!(decimal, "{b}");
            let _ = write!(nibbles, "[{} {}]", b & 0x0F, b >> 4);
            let _ = write!(bits, "{b:08b}");
        }
        Self {
            decimal,
            nibbles,
            bits,
        }
    }
}

impl std::fmt::Display for RawDump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.decimal)?;
        writeln!(f, "{}", self.nibbles)?;
        write!(f, "{}", self.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_three_views() {
        let dump = RawDump::new(&[0x04, 0xA5, 0x00]);
        assert_eq!(dump.decimal, "4 165 0");
        assert_eq!(dump.nibbles, "[4 0] [5 10] [0 0]");
        assert_eq!(dump.bits, "00000100 10100101 00000000");
        assert_eq!(
            dump.to_string(),
            "4 165 0\n[4 0] [5 10] [0 0]\n00000100 10100101 00000000"
        );
    }

    #[test]
    fn empty_input() {
        let dump = RawDump::new(&[]);
        assert!(dump.decimal.is_empty());
        assert!(dump.bits.is_empty());
    }
}
