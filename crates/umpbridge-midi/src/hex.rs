//! Hex rendering for log lines.

use std::fmt;

/// Space-separated lowercase byte pairs: `7e 00 06 01`.
#[derive(Clone, Copy, Debug)]
pub struct HexBytes<'a>(pub &'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Space-separated 8-digit words: `30047e00 06010000`.
#[derive(Clone, Copy, Debug)]
pub struct HexWords<'a>(pub &'a [u32]);

impl fmt::Display for HexWords<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:08x}", word)?;
        }
        Ok(())
    }
}
