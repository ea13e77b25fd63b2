use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ProtocolError, ProtocolResult};
use crate::message::{RpcMessage, MAX_MESSAGE_SIZE};

/// Codec for FileStore protocol messages.
///
/// HTTP bodies carry a bare bincode payload ([`encode_body`](Self::encode_body)).
/// Stream transports use framing: `[4 bytes len][1 byte tag][payload]`.
pub struct FileStoreCodec;

impl FileStoreCodec {
    /// Encode a single message body (no framing).
    pub fn encode_body<T: Serialize>(msg: &T) -> ProtocolResult<Vec<u8>> {
        let payload =
            bincode::serialize(msg).map_err(|e| ProtocolError::Serialization(e.to_string()))?;
        if payload.len() > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::MessageTooLarge {
                size: payload.len(),
                max: MAX_MESSAGE_SIZE,
            });
        }
        Ok(payload)
    }

    /// Decode a single message body (no framing).
    pub fn decode_body<T: DeserializeOwned>(data: &[u8]) -> ProtocolResult<T> {
        if data.len() > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::MessageTooLarge {
                size: data.len(),
                max: MAX_MESSAGE_SIZE,
            });
        }
        bincode::deserialize(data).map_err(|e| ProtocolError::Deserialization(e.to_string()))
    }

    /// Encode a message with framing.
    pub fn encode(msg: &RpcMessage) -> ProtocolResult<Vec<u8>> {
        let payload = Self::encode_body(msg)?;
        let len = (payload.len() + 1) as u32;
        let mut buf = Vec::with_capacity(4 + 1 + payload.len());
        buf.extend_from_slice(&len.to_be_bytes());
        buf.push(msg.type_tag());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    /// Decode a framed message. Returns (message, bytes_consumed).
    pub fn decode(data: &[u8]) -> ProtocolResult<(RpcMessage, usize)> {
        if data.len() < 5 {
            return Err(ProtocolError::FramingError("too short".into()));
        }
        let len = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
        if len < 1 {
            return Err(ProtocolError::FramingError("zero-length frame".into()));
        }
        if len - 1 > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::MessageTooLarge {
                size: len - 1,
                max: MAX_MESSAGE_SIZE,
            });
        }
        let total = 4 + len;
        if data.len() < total {
            return Err(ProtocolError::FramingError(format!(
                "incomplete: have {}, need {}",
                data.len(),
                total
            )));
        }
        let tag = data[4];
        if !RpcMessage::is_known_tag(tag) {
            return Err(ProtocolError::UnknownTag(tag));
        }
        let msg: RpcMessage = Self::decode_body(&data[5..total])?;
        if msg.type_tag() != tag {
            return Err(ProtocolError::FramingError(format!(
                "tag {} does not match payload {}",
                tag,
                msg.type_name()
            )));
        }
        Ok((msg, total))
    }
}
