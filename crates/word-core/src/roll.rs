//! Canonical recursive length-prefixed encoding ("rolling").
//!
//! The byte layout is RLP:
//! - A single byte below `0x80` encodes as itself
//! - A blob of 0-55 bytes: `0x80 + len`, then the bytes
//! - A longer blob: `0xb7 + width(len)`, the big-endian length, then the bytes
//! - A list of 0-55 payload bytes: `0xc0 + len`, then the item encodings
//! - A longer list: `0xf7 + width(len)`, the big-endian length, then the items
//!
//! Lengths always use the fewest bytes possible. The decoder rejects every
//! other spelling, so each [`Roll`] has exactly one encoding.

use crate::aver;
use crate::error::DecodeError;
use crate::types::Blob;

/// Header tags.
mod tags {
    pub const BLOB: u8 = 0x80;
    pub const BLOB_LONG: u8 = 0xb7;
    pub const LIST: u8 = 0xc0;
    pub const LIST_LONG: u8 = 0xf7;

    /// Longest payload whose length fits in the tag byte.
    pub const SHORT_MAX: usize = 55;
}

/// A blob, or an ordered list of rolls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Roll {
    Blob(Blob),
    List(Vec<Roll>),
}

impl Roll {
    /// A leaf.
    pub fn blob(blob: impl Into<Blob>) -> Self {
        Self::Blob(blob.into())
    }

    /// A list of rolls.
    pub fn list(items: impl IntoIterator<Item = Roll>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// The empty list, `[]`. Not the same as the empty blob.
    pub fn empty_list() -> Self {
        Self::List(Vec::new())
    }

    pub fn is_blob(&self) -> bool {
        matches!(self, Self::Blob(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Self::Blob(b) => Some(b),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Roll]> {
        match self {
            Self::Blob(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// Apply `f` to every leaf, keeping the shape.
    pub fn map_blobs<F>(self, f: &mut F) -> Roll
    where
        F: FnMut(Blob) -> Blob,
    {
        match self {
            Self::Blob(b) => Self::Blob(f(b)),
            Self::List(items) => Self::List(items.into_iter().map(|r| r.map_blobs(f)).collect()),
        }
    }

    /// Nesting depth: 0 for a blob, 1 for a list of blobs, and so on.
    pub fn depth(&self) -> usize {
        match self {
            Self::Blob(_) => 0,
            Self::List(items) => 1 + items.iter().map(Roll::depth).max().unwrap_or(0),
        }
    }
}

impl From<Blob> for Roll {
    fn from(blob: Blob) -> Self {
        Self::Blob(blob)
    }
}

impl From<Vec<Roll>> for Roll {
    fn from(items: Vec<Roll>) -> Self {
        Self::List(items)
    }
}

/// Bounds applied while decoding untrusted input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnrollLimits {
    /// Deepest list nesting accepted (`None` for unbounded).
    pub max_depth: Option<usize>,
    /// Largest input accepted, in bytes (`None` for unbounded).
    pub max_len: Option<usize>,
}

impl UnrollLimits {
    /// No limits.
    pub const NONE: Self = Self {
        max_depth: None,
        max_len: None,
    };
}

/// Encode a roll to its canonical bytes.
pub fn roll(r: &Roll) -> Blob {
    let mut buf = Vec::new();
    encode_to(&mut buf, r);
    Blob::from(buf)
}

/// Recursively encode a roll.
fn encode_to(buf: &mut Vec<u8>, r: &Roll) {
    match r {
        Roll::Blob(b) => encode_blob(buf, b.as_bytes()),
        Roll::List(items) => {
            let mut payload = Vec::new();
            for item in items {
                encode_to(&mut payload, item);
            }
            encode_header(buf, tags::LIST, tags::LIST_LONG, payload.len());
            buf.extend_from_slice(&payload);
        }
    }
}

fn encode_blob(buf: &mut Vec<u8>, bytes: &[u8]) {
    if let [b] = bytes {
        if *b < tags::BLOB {
            buf.push(*b);
            return;
        }
    }
    encode_header(buf, tags::BLOB, tags::BLOB_LONG, bytes.len());
    buf.extend_from_slice(bytes);
}

/// Write a length header with the smallest valid encoding.
fn encode_header(buf: &mut Vec<u8>, short: u8, long: u8, len: usize) {
    if len <= tags::SHORT_MAX {
        buf.push(short + len as u8);
        return;
    }
    let be = (len as u64).to_be_bytes();
    let skip = be.iter().take_while(|&&b| b == 0).count();
    let width = be.len() - skip;
    aver!((1..=8).contains(&width), "length prefix of {} bytes", width);
    buf.push(long + width as u8);
    buf.extend_from_slice(&be[skip..]);
}

/// Decode canonical bytes back into a roll.
pub fn unroll(bytes: &[u8]) -> Result<Roll, DecodeError> {
    unroll_with(bytes, &UnrollLimits::NONE)
}

/// A list whose payload is still being read.
struct Frame {
    items: Vec<Roll>,
    end: usize,
}

/// Decode with caller-supplied bounds on depth and size.
///
/// Uses an explicit stack, so hostile nesting can't exhaust the call stack.
pub fn unroll_with(bytes: &[u8], limits: &UnrollLimits) -> Result<Roll, DecodeError> {
    if let Some(max_len) = limits.max_len {
        if bytes.len() > max_len {
            return Err(DecodeError::TooLarge {
                len: bytes.len(),
                max_len,
            });
        }
    }

    let mut stack: Vec<Frame> = Vec::new();
    let result = decode(bytes, limits, &mut stack);

    // Partial trees on the error path are torn down without recursion.
    for frame in stack {
        frame.items.into_iter().for_each(dismantle);
    }

    let (root, consumed) = result?;
    if consumed != bytes.len() {
        dismantle(root);
        return Err(DecodeError::TrailingBytes {
            consumed,
            trailing: bytes.len() - consumed,
        });
    }
    Ok(root)
}

/// Read one top-level value. Returns it with the offset just past its end.
///
/// On error, `stack` holds every list still open.
fn decode(
    bytes: &[u8],
    limits: &UnrollLimits,
    stack: &mut Vec<Frame>,
) -> Result<(Roll, usize), DecodeError> {
    let mut pos = 0;

    loop {
        let bound = stack.last().map_or(bytes.len(), |f| f.end);
        let header = read_header(bytes, pos, bound)?;
        let body_end = header.body + header.len;

        if header.kind == Kind::List {
            if let Some(max_depth) = limits.max_depth {
                if stack.len() >= max_depth {
                    return Err(DecodeError::TooDeep { max_depth });
                }
            }
        }

        let value = match header.kind {
            Kind::Blob => Roll::Blob(Blob::copy_from_slice(&bytes[header.body..body_end])),
            Kind::List if header.len == 0 => Roll::empty_list(),
            Kind::List => {
                stack.push(Frame {
                    items: Vec::new(),
                    end: body_end,
                });
                pos = header.body;
                continue;
            }
        };
        pos = body_end;

        if stack.is_empty() {
            return Ok((value, pos));
        }
        if let Some(root) = attach(stack, value, pos) {
            return Ok((root, pos));
        }
    }
}

/// Drop a roll of any depth using a work list instead of the call stack.
fn dismantle(root: Roll) {
    let mut work = vec![root];
    while let Some(r) = work.pop() {
        if let Roll::List(items) = r {
            work.extend(items);
        }
    }
}

/// Add a finished value to the innermost open list, closing every list
/// whose payload is now fully consumed. Returns the root once the stack empties.
fn attach(stack: &mut Vec<Frame>, mut value: Roll, pos: usize) -> Option<Roll> {
    while let Some(mut frame) = stack.pop() {
        frame.items.push(value);
        if frame.end != pos {
            stack.push(frame);
            return None;
        }
        value = Roll::List(frame.items);
    }
    Some(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Blob,
    List,
}

/// A parsed header: what follows, where its payload starts, and how long it is.
#[derive(Debug)]
struct Header {
    kind: Kind,
    body: usize,
    len: usize,
}

/// Parse the header at `pos`, checking that it and its payload end by `bound`.
fn read_header(bytes: &[u8], pos: usize, bound: usize) -> Result<Header, DecodeError> {
    let Some(&tag) = bytes[..bound].get(pos) else {
        return Err(DecodeError::Truncated {
            offset: pos,
            needed: 1,
            available: 0,
        });
    };

    let (kind, body, len) = match tag {
        0x00..=0x7f => return Ok(Header { kind: Kind::Blob, body: pos, len: 1 }),
        0x80..=0xb7 => (Kind::Blob, pos + 1, usize::from(tag - tags::BLOB)),
        0xb8..=0xbf => {
            let (body, len) = read_long_len(bytes, pos, bound, tag - tags::BLOB_LONG)?;
            (Kind::Blob, body, len)
        }
        0xc0..=0xf7 => (Kind::List, pos + 1, usize::from(tag - tags::LIST)),
        0xf8..=0xff => {
            let (body, len) = read_long_len(bytes, pos, bound, tag - tags::LIST_LONG)?;
            (Kind::List, body, len)
        }
    };

    let available = bound - body;
    if len > available {
        return Err(DecodeError::Overrun {
            offset: pos,
            declared: len,
            available,
        });
    }

    if kind == Kind::Blob && len == 1 && bytes[body] < tags::BLOB {
        return Err(DecodeError::WrappedSingleByte {
            offset: pos,
            byte: bytes[body],
        });
    }

    Ok(Header { kind, body, len })
}

/// Read a long-form big-endian length of `width` bytes following the tag at `pos`.
fn read_long_len(
    bytes: &[u8],
    pos: usize,
    bound: usize,
    width: u8,
) -> Result<(usize, usize), DecodeError> {
    let width = usize::from(width);
    let start = pos + 1;
    let available = bound - start;
    if width > available {
        return Err(DecodeError::Truncated {
            offset: start,
            needed: width,
            available,
        });
    }

    let prefix = &bytes[start..start + width];
    if prefix[0] == 0 {
        return Err(DecodeError::LeadingZero { offset: pos });
    }

    let mut len: usize = 0;
    for &b in prefix {
        len = len
            .checked_mul(256)
            .and_then(|l| l.checked_add(usize::from(b)))
            .ok_or(DecodeError::LengthOverflow { offset: pos })?;
    }

    if len <= tags::SHORT_MAX {
        return Err(DecodeError::LongFormTooShort { offset: pos, len });
    }

    Ok((start + width, len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn b(hex: &str) -> Roll {
        Roll::Blob(Blob::from_hex(hex).unwrap())
    }

    fn text(s: &str) -> Roll {
        Roll::Blob(Blob::from_text(s))
    }

    fn rolled_hex(r: &Roll) -> String {
        roll(r).to_hex()
    }

    #[test]
    fn test_fixed_vector() {
        let x = Roll::list([b("00"), b(""), Roll::list([b("ffff"), Roll::empty_list()])]);
        assert_eq!(rolled_hex(&x), "c70080c482ffffc0");
        assert_eq!(unroll(roll(&x).as_bytes()).unwrap(), x);
    }

    #[test]
    fn test_standard_vectors() {
        assert_eq!(rolled_hex(&text("dog")), "83646f67");
        assert_eq!(
            rolled_hex(&Roll::list([text("cat"), text("dog")])),
            "c88363617483646f67"
        );
        assert_eq!(rolled_hex(&b("")), "80");
        assert_eq!(rolled_hex(&Roll::empty_list()), "c0");
        assert_eq!(rolled_hex(&b("00")), "00");
        assert_eq!(rolled_hex(&b("0f")), "0f");
        assert_eq!(rolled_hex(&b("80")), "8180");
        assert_eq!(rolled_hex(&b("0400")), "820400");
    }

    #[test]
    fn test_set_theoretic_vector() {
        let zero = Roll::empty_list();
        let one = Roll::list([zero.clone()]);
        let two = Roll::list([zero.clone(), one.clone()]);
        let x = Roll::list([zero, one, two]);
        assert_eq!(rolled_hex(&x), "c7c0c1c0c3c0c1c0");
        assert_eq!(unroll(roll(&x).as_bytes()).unwrap(), x);
    }

    #[test]
    fn test_long_blob_vector() {
        let lorem = "Lorem ipsum dolor sit amet, consectetur adipisicing elit";
        assert_eq!(lorem.len(), 56);
        let encoded = roll(&text(lorem));
        assert_eq!(&encoded.as_bytes()[..2], &[0xb8, 0x38]);
        assert_eq!(&encoded.as_bytes()[2..], lorem.as_bytes());
    }

    #[test]
    fn test_length_boundaries() {
        let short = roll(&Roll::blob(vec![0x01u8; 55]));
        assert_eq!(short.as_bytes()[0], 0x80 + 55);
        assert_eq!(short.len(), 56);

        let long = roll(&Roll::blob(vec![0x01u8; 1024]));
        assert_eq!(&long.as_bytes()[..3], &[0xb9, 0x04, 0x00]);

        let list = roll(&Roll::list([Roll::blob(vec![0x01u8; 58])]));
        assert_eq!(&list.as_bytes()[..4], &[0xf8, 0x3c, 0xb8, 0x3a]);
        assert_eq!(list.len(), 62);
    }

    #[test]
    fn test_empty_shapes_are_distinct() {
        let shapes = [
            b(""),
            Roll::empty_list(),
            Roll::list([Roll::empty_list()]),
            Roll::list([Roll::list([Roll::empty_list()])]),
            Roll::list([b("")]),
        ];
        let encodings: Vec<_> = shapes.iter().map(rolled_hex).collect();
        assert_eq!(encodings, vec!["80", "c0", "c1c0", "c2c1c0", "c180"]);
        for shape in &shapes {
            assert_eq!(&unroll(roll(shape).as_bytes()).unwrap(), shape);
        }
    }

    #[test]
    fn test_reject_empty_input() {
        assert!(matches!(unroll(&[]), Err(DecodeError::Truncated { offset: 0, .. })));
    }

    #[test]
    fn test_reject_leading_zero_length() {
        // 56-byte blob with its one-byte length padded to two bytes
        let mut bytes = vec![0xb9, 0x00, 0x38];
        bytes.extend_from_slice(&[0x61; 56]);
        assert_eq!(unroll(&bytes), Err(DecodeError::LeadingZero { offset: 0 }));

        let mut list = vec![0xf9, 0x00, 0x38];
        list.extend_from_slice(&[0x01; 56]);
        assert_eq!(unroll(&list), Err(DecodeError::LeadingZero { offset: 0 }));
    }

    #[test]
    fn test_reject_long_form_for_short_length() {
        assert_eq!(
            unroll(&hex::decode("b803646f67").unwrap()),
            Err(DecodeError::LongFormTooShort { offset: 0, len: 3 })
        );
        assert_eq!(
            unroll(&hex::decode("f800").unwrap()),
            Err(DecodeError::LeadingZero { offset: 0 })
        );
        assert_eq!(
            unroll(&hex::decode("f801c0").unwrap()),
            Err(DecodeError::LongFormTooShort { offset: 0, len: 1 })
        );
    }

    #[test]
    fn test_reject_wrapped_single_byte() {
        assert_eq!(
            unroll(&[0x81, 0x05]),
            Err(DecodeError::WrappedSingleByte { offset: 0, byte: 0x05 })
        );
        assert_eq!(unroll(&[0x81, 0x80]).unwrap(), b("80"));
    }

    #[test]
    fn test_reject_overrun() {
        assert_eq!(
            unroll(&hex::decode("83646f").unwrap()),
            Err(DecodeError::Overrun {
                offset: 0,
                declared: 3,
                available: 2
            })
        );
        // Inner item runs past the end of its list even though the input is long enough
        assert_eq!(
            unroll(&hex::decode("c283646f67").unwrap()),
            Err(DecodeError::Overrun {
                offset: 1,
                declared: 3,
                available: 1
            })
        );
    }

    #[test]
    fn test_reject_truncated_length_prefix() {
        assert!(matches!(
            unroll(&[0xb9, 0x04]),
            Err(DecodeError::Truncated { offset: 1, needed: 2, available: 1 })
        ));
    }

    #[test]
    fn test_reject_length_overflow() {
        let bytes = [0xbf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
        let err = unroll(&bytes).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Overrun { .. } | DecodeError::LengthOverflow { .. }
        ));
    }

    #[test]
    fn test_reject_trailing_bytes() {
        assert_eq!(
            unroll(&hex::decode("83646f6700").unwrap()),
            Err(DecodeError::TrailingBytes {
                consumed: 4,
                trailing: 1
            })
        );
        assert_eq!(
            unroll(&hex::decode("c0c0").unwrap()),
            Err(DecodeError::TrailingBytes {
                consumed: 1,
                trailing: 1
            })
        );
    }

    /// `depth` lists wrapped around an empty one. Headers are built inside-out.
    fn nested_empty(depth: usize) -> Vec<u8> {
        let mut headers = Vec::with_capacity(depth);
        let mut len = 1;
        for _ in 0..depth {
            let mut header = Vec::new();
            encode_header(&mut header, tags::LIST, tags::LIST_LONG, len);
            len += header.len();
            headers.push(header);
        }
        let mut bytes = Vec::with_capacity(len);
        for header in headers.iter().rev() {
            bytes.extend_from_slice(header);
        }
        bytes.push(0xc0);
        assert_eq!(bytes.len(), len);
        bytes
    }

    #[test]
    fn test_deep_nesting_without_recursion() {
        let depth = 100_000;
        let bytes = nested_empty(depth);

        let limited = UnrollLimits {
            max_depth: Some(64),
            max_len: None,
        };
        assert_eq!(
            unroll_with(&bytes, &limited),
            Err(DecodeError::TooDeep { max_depth: 64 })
        );

        let mut r = unroll(&bytes).unwrap();
        let mut seen = 0;
        while let Roll::List(mut items) = r {
            if items.is_empty() {
                break;
            }
            assert_eq!(items.len(), 1);
            r = items.pop().unwrap();
            seen += 1;
        }
        assert_eq!(seen, depth);
    }

    #[test]
    fn test_deep_nesting_then_trailing_byte() {
        let mut bytes = nested_empty(100_000);
        let consumed = bytes.len();
        bytes.push(0x00);
        assert_eq!(
            unroll(&bytes),
            Err(DecodeError::TrailingBytes {
                consumed,
                trailing: 1
            })
        );
    }

    #[test]
    fn test_deep_sibling_then_bad_item() {
        // [<100k-deep list>, 0x81 0x05]: the deep item is complete when the
        // wrapped byte is rejected, with the outer list still open.
        let deep = nested_empty(100_000);
        let mut payload = deep.clone();
        payload.extend_from_slice(&[0x81, 0x05]);
        let mut bytes = Vec::new();
        encode_header(&mut bytes, tags::LIST, tags::LIST_LONG, payload.len());
        let offset = bytes.len() + deep.len();
        bytes.extend_from_slice(&payload);

        assert_eq!(
            unroll(&bytes),
            Err(DecodeError::WrappedSingleByte { offset, byte: 0x05 })
        );
    }

    #[test]
    fn test_deep_nesting_then_truncated() {
        let mut bytes = nested_empty(100_000);
        bytes.pop();
        assert!(unroll(&bytes).is_err());
    }

    #[test]
    fn test_dismantle_deep_roll() {
        let r = unroll(&nested_empty(100_000)).unwrap();
        dismantle(r);
    }

    #[test]
    fn test_depth_limit_allows_exact_depth() {
        let x = Roll::list([Roll::list([Roll::list([b("01")])])]);
        assert_eq!(x.depth(), 3);
        let bytes = roll(&x);

        let exact = UnrollLimits {
            max_depth: Some(3),
            max_len: None,
        };
        assert_eq!(unroll_with(bytes.as_bytes(), &exact).unwrap(), x);

        let shallow = UnrollLimits {
            max_depth: Some(2),
            max_len: None,
        };
        assert_eq!(
            unroll_with(bytes.as_bytes(), &shallow),
            Err(DecodeError::TooDeep { max_depth: 2 })
        );

        // Empty lists count toward depth too
        let empty_inside = roll(&Roll::list([Roll::list([Roll::empty_list()])]));
        assert_eq!(
            unroll_with(empty_inside.as_bytes(), &shallow),
            Err(DecodeError::TooDeep { max_depth: 2 })
        );
    }

    #[test]
    fn test_size_limit() {
        let bytes = roll(&text("dog"));
        let limits = UnrollLimits {
            max_depth: None,
            max_len: Some(3),
        };
        assert_eq!(
            unroll_with(bytes.as_bytes(), &limits),
            Err(DecodeError::TooLarge { len: 4, max_len: 3 })
        );
    }

    #[test]
    fn test_map_blobs_keeps_shape() {
        let x = Roll::list([b("01"), Roll::list([b("0203"), Roll::empty_list()])]);
        let upper = x.clone().map_blobs(&mut |blob| Blob::from(blob.to_hex().into_bytes()));
        assert_eq!(
            upper,
            Roll::list([text("01"), Roll::list([text("0203"), Roll::empty_list()])])
        );
        assert_eq!(upper.depth(), x.depth());
    }

    fn arb_roll() -> impl Strategy<Value = Roll> {
        let leaf = prop::collection::vec(any::<u8>(), 0..80).prop_map(Roll::blob);
        leaf.prop_recursive(6, 128, 8, |inner| {
            prop::collection::vec(inner, 0..8).prop_map(Roll::List)
        })
    }

    proptest! {
        #[test]
        fn prop_roll_unroll_roundtrip(r in arb_roll()) {
            let bytes = roll(&r);
            prop_assert_eq!(unroll(bytes.as_bytes()).unwrap(), r);
        }

        #[test]
        fn prop_unroll_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            if let Ok(r) = unroll(&bytes) {
                // Anything accepted is canonical
                let again = roll(&r);
                prop_assert_eq!(again.as_bytes(), &bytes[..]);
            }
        }
    }
}
