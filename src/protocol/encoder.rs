//! Chunked payload encoder.
//!
//! The payload is base64-encoded once, then cut into consecutive chunks of
//! at most `max_chunk_bytes`. The first command carries the caller's full
//! control frame; every later command carries only `m`. `m=1` marks all
//! but the last command.

use super::command::GraphicsCommand;
use super::control::{ControlFrame, ControlKey};
use crate::buffer::BYTES_PER_PIXEL;
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Largest chunk the terminal accepts.
pub const MAX_CHUNK_SIZE: usize = 4096;

/// Chunk size used unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = MAX_CHUNK_SIZE;

/// Reject chunk sizes outside `1..=MAX_CHUNK_SIZE`.
pub fn check_chunk_size(size: usize) -> Result<()> {
    if size == 0 || size > MAX_CHUNK_SIZE {
        return Err(Error::InvalidChunkSize {
            size,
            max: MAX_CHUNK_SIZE,
        });
    }
    Ok(())
}

/// Encode an RGB24 bitmap of `width x height` pixels.
///
/// Fails if the bitmap length is not `width * height * 3`.
pub fn encode(
    bitmap: &[u8],
    width: u16,
    height: u16,
    control: &ControlFrame,
    max_chunk_bytes: usize,
) -> Result<Vec<GraphicsCommand>> {
    let expected = width as usize * height as usize * BYTES_PER_PIXEL;
    if bitmap.len() != expected {
        return Err(Error::BitmapLength {
            width,
            height,
            expected,
            actual: bitmap.len(),
        });
    }
    encode_payload(bitmap, control, max_chunk_bytes)
}

/// Encode an arbitrary payload into chunked commands.
pub fn encode_payload(
    payload: &[u8],
    control: &ControlFrame,
    max_chunk_bytes: usize,
) -> Result<Vec<GraphicsCommand>> {
    check_chunk_size(max_chunk_bytes)?;
    let data = STANDARD.encode(payload);

    if data.is_empty() {
        let mut first = control.clone();
        first.set(ControlKey::More, false);
        return Ok(vec![GraphicsCommand::new(first, String::new())]);
    }

    let count = data.len().div_ceil(max_chunk_bytes);
    let mut commands = Vec::with_capacity(count);
    // base64 output is ASCII, so every byte offset is a char boundary
    for (i, start) in (0..data.len()).step_by(max_chunk_bytes).enumerate() {
        let end = (start + max_chunk_bytes).min(data.len());
        let more = i + 1 < count;
        let frame = if i == 0 {
            let mut first = control.clone();
            first.set(ControlKey::More, more);
            first
        } else {
            ControlFrame::continuation(more)
        };
        commands.push(GraphicsCommand::new(frame, &data[start..end]));
    }

    tracing::trace!(
        payload_bytes = payload.len(),
        base64_bytes = data.len(),
        chunks = commands.len(),
        "encoded payload"
    );
    Ok(commands)
}

/// Concatenate the payloads of `commands` and base64-decode them.
pub fn decode_payload(commands: &[GraphicsCommand]) -> Result<Vec<u8>> {
    let joined: String = commands.iter().map(|c| c.payload.as_str()).collect();
    Ok(STANDARD.decode(joined)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::control::Action;
    use proptest::prelude::*;

    fn transmit_frame() -> ControlFrame {
        ControlFrame::new()
            .with(ControlKey::Action, Action::Transmit)
            .with(ControlKey::Format, 24u32)
            .with(ControlKey::ImageId, 1u32)
            .with(ControlKey::Width, 128u16)
            .with(ControlKey::Height, 32u16)
    }

    #[test]
    fn test_forty_chars_in_chunks_of_sixteen() {
        // 30 bytes -> 40 base64 characters
        let payload = [0xABu8; 30];
        let commands = encode_payload(&payload, &transmit_frame(), 16).unwrap();

        let sizes: Vec<usize> = commands.iter().map(|c| c.payload.len()).collect();
        assert_eq!(sizes, vec![16, 16, 8]);

        let flags: Vec<Option<bool>> = commands.iter().map(|c| c.control.more()).collect();
        assert_eq!(flags, vec![Some(true), Some(true), Some(false)]);
    }

    #[test]
    fn test_only_first_chunk_carries_metadata() {
        let commands = encode_payload(&[7u8; 300], &transmit_frame(), 64).unwrap();
        assert!(commands.len() > 2);
        assert_eq!(commands[0].control.len(), transmit_frame().len() + 1);
        assert_eq!(commands[0].control.action(), Some(Action::Transmit));
        for cmd in &commands[1..] {
            assert_eq!(cmd.control.len(), 1);
            assert!(cmd.control.contains(ControlKey::More));
        }
    }

    #[test]
    fn test_single_chunk_has_more_zero() {
        let commands = encode_payload(b"abc", &transmit_frame(), MAX_CHUNK_SIZE).unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].control.more(), Some(false));
        assert_eq!(
            commands[0].to_string(),
            "\x1b_Ga=T,f=24,i=1,s=128,v=32,m=0;YWJj\x1b\\"
        );
    }

    #[test]
    fn test_empty_payload_omits_separator() {
        let commands = encode_payload(&[], &transmit_frame(), 16).unwrap();
        assert_eq!(commands.len(), 1);
        assert!(commands[0].payload.is_empty());
        assert_eq!(commands[0].to_string(), "\x1b_Ga=T,f=24,i=1,s=128,v=32,m=0\x1b\\");
    }

    #[test]
    fn test_invalid_chunk_sizes() {
        assert!(matches!(
            encode_payload(b"x", &transmit_frame(), 0),
            Err(Error::InvalidChunkSize { size: 0, .. })
        ));
        assert!(matches!(
            encode_payload(b"x", &transmit_frame(), MAX_CHUNK_SIZE + 1),
            Err(Error::InvalidChunkSize { .. })
        ));
    }

    #[test]
    fn test_bitmap_length_checked() {
        let err = encode(&[0; 10], 2, 2, &transmit_frame(), 16).unwrap_err();
        assert!(matches!(err, Error::BitmapLength { expected: 12, actual: 10, .. }));
    }

    #[test]
    fn test_full_canvas_chunk_count() {
        let bitmap = vec![0u8; 128 * 32 * 3];
        let commands = encode(&bitmap, 128, 32, &transmit_frame(), DEFAULT_CHUNK_SIZE).unwrap();
        // 12288 bytes -> 16384 base64 characters
        assert_eq!(commands.len(), 4);
        assert!(commands.iter().all(|c| c.payload.len() == 4096));
        assert_eq!(decode_payload(&commands).unwrap(), bitmap);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let bad = vec![GraphicsCommand::new(ControlFrame::continuation(false), "@@@")];
        assert!(matches!(decode_payload(&bad), Err(Error::Base64Decode(_))));
    }

    proptest! {
        #[test]
        fn round_trip_any_chunk_size(
            payload in proptest::collection::vec(any::<u8>(), 0..2048),
            chunk in 1usize..=MAX_CHUNK_SIZE,
        ) {
            let commands = encode_payload(&payload, &transmit_frame(), chunk).unwrap();
            prop_assert_eq!(decode_payload(&commands).unwrap(), payload);

            let last = commands.len() - 1;
            for (i, cmd) in commands.iter().enumerate() {
                prop_assert!(cmd.payload.len() <= chunk);
                prop_assert_eq!(cmd.control.more(), Some(i != last));
                prop_assert_eq!(cmd.control.action().is_some(), i == 0);
            }
        }
    }
}
