use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Largest payload a single length byte can describe.
pub const MAX_PAYLOAD: usize = u8::MAX as usize;

/// A complete frame, length byte included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Bytes,
}

impl Frame {
    /// Wrap bytes that are already known to form a complete frame.
    pub(crate) fn from_complete(bytes: Bytes) -> Self {
        debug_assert_eq!(bytes.len(), bytes[0] as usize + 1);
        Self { bytes }
    }

    /// Build an outbound frame around `payload`.
    pub fn encode(payload: &[u8]) -> Result<Self> {
        let mut buf = BytesMut::with_capacity(payload.len() + 1);
        encode_frame(payload, &mut buf)?;
        Ok(Self {
            bytes: buf.freeze(),
        })
    }

    /// The raw wire bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total wire size, length byte included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Frames always carry at least their length byte.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The value of the length byte.
    pub fn declared_len(&self) -> u8 {
        self.bytes[0]
    }

    /// Everything after the length byte.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// Message type (offset 1), if present.
    pub fn packet_type(&self) -> Option<u8> {
        self.bytes.get(1).copied()
    }

    /// Message subtype (offset 2), if present.
    pub fn subtype(&self) -> Option<u8> {
        self.bytes.get(2).copied()
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Encode a payload into the wire format.
///
/// Wire format:
/// ```text
/// ┌────────────┬──────────┬──────────┬────────────────────┐
/// │ Length (1B)│ Type (1B)│ Sub (1B) │ Type-specific data │
/// └────────────┴──────────┴──────────┴────────────────────┘
///   counts every byte after itself
/// ```
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }
    dst.reserve(payload.len() + 1);
    dst.put_u8(payload.len() as u8);
    dst.put_slice(payload);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_prefixes_single_length_byte() {
        let mut buf = BytesMut::new();
        encode_frame(&[0x00, 0x00, 0x01, 0x02], &mut buf).unwrap();
        assert_eq!(buf.as_ref(), &[0x04, 0x00, 0x00, 0x01, 0x02]);
    }

    #[test]
    fn encode_rejects_oversized_payload() {
        let mut buf = BytesMut::new();
        let err = encode_frame(&[0u8; 256], &mut buf).unwrap_err();
        assert!(matches!(
            err,
            FrameError::PayloadTooLarge { size: 256, max: 255 }
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn encode_accepts_largest_payload() {
        let frame = Frame::encode(&[0xAB; 255]).unwrap();
        assert_eq!(frame.len(), 256);
        assert_eq!(frame.declared_len(), 255);
    }

    #[test]
    fn frame_accessors() {
        let frame = Frame::encode(&[0x50, 0x05, 0x01]).unwrap();
        assert_eq!(frame.as_bytes(), &[0x03, 0x50, 0x05, 0x01]);
        assert_eq!(frame.payload(), &[0x50, 0x05, 0x01]);
        assert_eq!(frame.packet_type(), Some(0x50));
        assert_eq!(frame.subtype(), Some(0x05));
        assert!(!frame.is_empty());
    }

    #[test]
    fn empty_payload_frame_has_no_type() {
        let frame = Frame::encode(&[]).unwrap();
        assert_eq!(frame.as_bytes(), &[0x00]);
        assert_eq!(frame.packet_type(), None);
        assert_eq!(frame.subtype(), None);
    }
}
