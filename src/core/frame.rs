//! Octet-counting frame decoder (RFC 6587 §3.4.1).
//!
//! Each frame is `<decimal length> SP <length bytes>`; the next frame starts
//! right after the last payload byte. Decoding walks a cursor over the
//! borrowed payload and never copies until the parser materializes a record.

use crate::domain::model::RawFrame;
use crate::utils::error::FrameError;

const SEPARATOR: u8 = b' ';

/// Bytes of a bad length token kept in the error
const TOKEN_PREVIEW_LEN: usize = 32;

pub struct FrameSplitter<'a> {
    payload: &'a [u8],
    cursor: usize,
    emitted: usize,
    failed: bool,
}

impl<'a> FrameSplitter<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            payload,
            cursor: 0,
            emitted: 0,
            failed: false,
        }
    }

    fn next_frame(&mut self) -> Result<RawFrame<'a>, FrameError> {
        let offset = self.cursor;
        let rest = &self.payload[offset..];

        let sep = rest.iter().position(|&b| b == SEPARATOR).ok_or_else(|| {
            FrameError::InvalidLength {
                offset,
                token: token_preview(rest),
            }
        })?;

        let token = &rest[..sep];
        let declared = parse_length(token).ok_or_else(|| FrameError::InvalidLength {
            offset,
            token: token_preview(token),
        })?;

        let body = &rest[sep + 1..];
        if body.len() < declared {
            return Err(FrameError::Truncated {
                offset,
                declared,
                remaining: body.len(),
            });
        }

        let text = std::str::from_utf8(&body[..declared])
            .map_err(|source| FrameError::InvalidEncoding { offset, source })?;

        self.cursor = offset + sep + 1 + declared;
        self.emitted += 1;

        Ok(RawFrame {
            index: self.emitted,
            offset,
            text,
        })
    }
}

impl<'a> Iterator for FrameSplitter<'a> {
    type Item = Result<RawFrame<'a>, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor >= self.payload.len() {
            return None;
        }

        let frame = self.next_frame();
        if frame.is_err() {
            self.failed = true;
        }
        Some(frame)
    }
}

impl std::iter::FusedIterator for FrameSplitter<'_> {}

fn token_preview(token: &[u8]) -> String {
    let end = token.len().min(TOKEN_PREVIEW_LEN);
    String::from_utf8_lossy(&token[..end]).into_owned()
}

/// Non-empty run of ASCII digits, rejected on overflow.
fn parse_length(token: &[u8]) -> Option<usize> {
    if token.is_empty() {
        return None;
    }
    token.iter().try_fold(0usize, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(usize::from(b - b'0'))
    })
}
