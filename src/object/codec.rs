//! Converts objects to and from the bytes stored in a loose object file.
//!
//! An object is first *framed* as `<kind> <size>\0<payload>`. The framed
//! bytes are what gets hashed to produce the object's ID, and they are
//! compressed with zlib to produce the stored form.

use std::io::Write;

use flate2::{write::ZlibEncoder, Compression, Decompress, FlushDecompress, Status};

use super::{Kind, Object};
use crate::{Corruption, Error, Result};

// Growth step for the inflate buffer once the initial guess is exhausted.
const INFLATE_CHUNK: usize = 32 * 1024;

/// Build the framed form `<kind> <size>\0<payload>`.
pub fn frame(kind: Kind, payload: &[u8]) -> Vec<u8> {
    let header = format!("{} {}\0", kind, payload.len());

    let mut framed = Vec::with_capacity(header.len() + payload.len());
    framed.extend_from_slice(header.as_bytes());
    framed.extend_from_slice(payload);
    framed
}

/// Split a framed object back into its kind and payload.
///
/// The header ends at the first null byte. Everything after it is payload,
/// which may itself contain null bytes.
pub fn unframe(framed: &[u8]) -> Result<Object> {
    let nul = framed
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::malformed("missing null byte after header"))?;

    let (kind, declared) = parse_header(&framed[..nul])?;

    let payload = &framed[nul + 1..];
    if payload.len() != declared {
        return Err(Error::corrupt(Corruption::SizeMismatch {
            declared,
            actual: payload.len(),
        }));
    }

    Ok(Object::new(kind, payload.to_vec()))
}

fn parse_header(header: &[u8]) -> Result<(Kind, usize)> {
    let header = std::str::from_utf8(header)
        .map_err(|_| Error::malformed("header is not valid UTF-8"))?;

    let mut parts = header.splitn(2, ' ');
    let kind = parts.next().unwrap_or_default();
    let size = parts
        .next()
        .ok_or_else(|| Error::malformed(format!("header `{}` has no size", header)))?;

    let kind: Kind = kind
        .parse()
        .map_err(|err| Error::malformed(format!("{}", err)))?;

    if size.is_empty() || !size.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::malformed(format!("invalid object size `{}`", size)));
    }

    // Only the canonical form reframes to the bytes that were hashed.
    if size.len() > 1 && size.starts_with('0') {
        return Err(Error::malformed(format!(
            "object size `{}` has leading zeros",
            size
        )));
    }

    let size = size
        .parse()
        .map_err(|_| Error::malformed(format!("object size `{}` is too large", size)))?;

    Ok((kind, size))
}

/// Compress bytes with zlib at the given level.
pub fn compress(data: &[u8], level: Compression) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2 + 16), level);
    encoder.write_all(data).map_err(Error::Encoding)?;
    encoder.finish().map_err(Error::Encoding)
}

/// Inflate a complete zlib stream.
///
/// Fails unless the stream reaches its end-of-stream marker and consumes all
/// of `stored`. A truncated file never yields the bytes decoded so far.
pub fn decompress(stored: &[u8]) -> Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(stored.len() * 2 + 64);

    loop {
        if out.len() == out.capacity() {
            out.reserve(INFLATE_CHUNK);
        }

        let before = (inflater.total_in(), inflater.total_out());
        let input = &stored[inflater.total_in() as usize..];

        let status = inflater
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|err| Error::corrupt(Corruption::Inflate(err.to_string())))?;

        if let Status::StreamEnd = status {
            break;
        }

        if (inflater.total_in(), inflater.total_out()) == before {
            return Err(Error::corrupt(Corruption::Truncated));
        }
    }

    if (inflater.total_in() as usize) < stored.len() {
        return Err(Error::corrupt(Corruption::TrailingGarbage));
    }

    Ok(out)
}

/// Frame and compress an object into its stored form.
pub fn encode(object: &Object, level: Compression) -> Result<Vec<u8>> {
    compress(&object.framed(), level)
}

/// Decompress and unframe a stored object.
pub fn decode(stored: &[u8]) -> Result<Object> {
    unframe(&decompress(stored)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_malformed(r: Result<Object>, reason_part: &str) {
        match r {
            Err(Error::MalformedObject { id: None, reason }) => assert!(
                reason.contains(reason_part),
                "\nunexpected reason: {}",
                reason
            ),
            other => panic!("expected malformed object, got {:?}", other.map(|o| o.id())),
        }
    }

    fn assert_corrupt<T>(r: Result<T>, expected: Corruption) {
        match r {
            Err(Error::CorruptObject { id: None, reason }) => assert_eq!(reason, expected),
            Err(err) => panic!("expected corrupt object, got {:?}", err),
            Ok(_) => panic!("expected corrupt object, got Ok"),
        }
    }

    #[test]
    fn frame_hello_world() {
        let framed = frame(Kind::Blob, b"hello world\n");
        assert_eq!(framed, b"blob 12\0hello world\n".to_vec());
        assert_eq!(framed.len(), 20);
    }

    #[test]
    fn frame_empty() {
        assert_eq!(frame(Kind::Blob, b""), b"blob 0\0".to_vec());
    }

    #[test]
    fn frame_other_kinds() {
        assert_eq!(frame(Kind::Commit, b"abcd"), b"commit 4\0abcd".to_vec());
    }

    #[test]
    fn unframe_splits_at_first_null() {
        let o = unframe(b"blob 5\0a\0b\0\0").unwrap();
        assert_eq!(o.kind(), Kind::Blob);
        assert_eq!(o.payload(), b"a\0b\0\0");
    }

    #[test]
    fn unframe_empty_payload() {
        let o = unframe(b"blob 0\0").unwrap();
        assert_eq!(o.kind(), Kind::Blob);
        assert!(o.is_empty());
    }

    #[test]
    fn unframe_missing_null() {
        assert_malformed(unframe(b"blob 12"), "missing null byte");
        assert_malformed(unframe(b""), "missing null byte");
    }

    #[test]
    fn unframe_bad_headers() {
        assert_malformed(unframe(b"blob\0"), "has no size");
        assert_malformed(unframe(b"blob \0"), "invalid object size");
        assert_malformed(unframe(b"blob +1\0x"), "invalid object size");
        assert_malformed(unframe(b"blob 1 \0x"), "invalid object size");
        assert_malformed(unframe(b"blob -1\0x"), "invalid object size");
        assert_malformed(unframe(b"bolb 1\0x"), "unknown object type `bolb`");
        assert_malformed(unframe(b"\xff 1\0x"), "not valid UTF-8");
        assert_malformed(
            unframe(b"blob 99999999999999999999999999\0"),
            "too large",
        );
    }

    #[test]
    fn unframe_noncanonical_size() {
        assert_malformed(unframe(b"blob 01\0x"), "leading zeros");
        assert_malformed(unframe(b"blob 00\0"), "leading zeros");

        let o = unframe(b"blob 0\0").unwrap();
        assert_eq!(o.framed(), b"blob 0\0".to_vec());

        let o = unframe(b"blob 10\x000123456789").unwrap();
        assert_eq!(o.framed(), b"blob 10\x000123456789".to_vec());
    }

    #[test]
    fn unframe_size_mismatch() {
        assert_corrupt(
            unframe(b"blob 12\0hello world"),
            Corruption::SizeMismatch {
                declared: 12,
                actual: 11,
            },
        );

        assert_corrupt(
            unframe(b"blob 1\0ab"),
            Corruption::SizeMismatch {
                declared: 1,
                actual: 2,
            },
        );
    }

    #[test]
    fn compress_matches_command_line_git() {
        // Bytes of .git/objects/3b/18e512dba79e4c8300dd08aeb37f8e728b8dad
        // as written by `git hash-object -w` for "hello world\n".
        let expected: &[u8] = &[
            0x78, 0x9c, 0x4b, 0xca, 0xc9, 0x4f, 0x52, 0x30, 0x34, 0x62, 0xc8, 0x48, 0xcd, 0xc9,
            0xc9, 0x57, 0x28, 0xcf, 0x2f, 0xca, 0x49, 0xe1, 0x02, 0x00, 0x44, 0x11, 0x06, 0x89,
        ];

        let stored = compress(b"blob 12\0hello world\n", Compression::default()).unwrap();
        assert_eq!(stored, expected);
    }

    #[test]
    fn decompress_round_trip() {
        let big = "foobar".repeat(50_000);
        let inputs: &[&[u8]] = &[b"", b"\0", b"blob 0\0", big.as_bytes()];

        for input in inputs {
            let stored = compress(input, Compression::default()).unwrap();
            assert_eq!(decompress(&stored).unwrap(), input.to_vec());
        }
    }

    #[test]
    fn decompress_incompressible_input() {
        let input: Vec<u8> = (0..100_000u32)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
            .collect();
        let stored = compress(&input, Compression::best()).unwrap();
        assert_eq!(decompress(&stored).unwrap(), input);
    }

    #[test]
    fn decompress_truncated() {
        let stored = compress(b"blob 12\0hello world\n", Compression::default()).unwrap();

        for len in 0..stored.len() {
            let err = decompress(&stored[..len]).unwrap_err();
            assert!(err.is_corrupt(), "truncation to {} bytes: {:?}", len, err);
        }

        assert_corrupt(
            decompress(&stored[..stored.len() - 1]),
            Corruption::Truncated,
        );
    }

    #[test]
    fn decompress_trailing_garbage() {
        let mut stored = compress(b"blob 0\0", Compression::default()).unwrap();
        stored.push(0);
        assert_corrupt(decompress(&stored), Corruption::TrailingGarbage);
    }

    #[test]
    fn decompress_not_zlib() {
        match decompress(b"blob 12\0hello world\n") {
            Err(Error::CorruptObject {
                reason: Corruption::Inflate(_),
                ..
            }) => (),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn encode_then_decode() {
        let o = Object::new(Kind::Blob, b"hello world\n".to_vec());
        let stored = encode(&o, Compression::fast()).unwrap();
        assert_eq!(decode(&stored).unwrap(), o);
    }
}
