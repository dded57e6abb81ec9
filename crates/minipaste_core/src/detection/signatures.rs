//! Ordered signature table used by the sniffer.

pub(super) enum Signature {
    /// Literal prefix of the raw data.
    Prefix(&'static [u8], &'static str),
    /// Prefix compared under a byte mask (`0x00` mask bytes are wildcards).
    Masked {
        pattern: &'static [u8],
        mask: &'static [u8],
        mime: &'static str,
    },
    /// Case-insensitive HTML tag after leading whitespace, followed by a space or `>`.
    HtmlTag(&'static [u8]),
    /// Literal prefix after leading whitespace.
    AfterWhitespace(&'static [u8], &'static str),
    /// ISO base media file with an `mp4` brand.
    Mp4,
}

const RIFF_MASK: &[u8] = b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF";

pub(super) static SIGNATURES: &[Signature] = &[
    Signature::HtmlTag(b"<!DOCTYPE HTML"),
    Signature::HtmlTag(b"<HTML"),
    Signature::HtmlTag(b"<HEAD"),
    Signature::HtmlTag(b"<SCRIPT"),
    Signature::HtmlTag(b"<IFRAME"),
    Signature::HtmlTag(b"<H1"),
    Signature::HtmlTag(b"<DIV"),
    Signature::HtmlTag(b"<FONT"),
    Signature::HtmlTag(b"<TABLE"),
    Signature::HtmlTag(b"<A"),
    Signature::HtmlTag(b"<STYLE"),
    Signature::HtmlTag(b"<TITLE"),
    Signature::HtmlTag(b"<B"),
    Signature::HtmlTag(b"<BODY"),
    Signature::HtmlTag(b"<BR"),
    Signature::HtmlTag(b"<P"),
    Signature::HtmlTag(b"<!--"),
    Signature::AfterWhitespace(b"<?xml", "text/xml"),
    Signature::Prefix(b"%PDF-", "application/pdf"),
    Signature::Prefix(b"%!PS-Adobe-", "application/postscript"),
    // Byte order marks.
    Signature::Prefix(b"\xFE\xFF", "text/plain"),
    Signature::Prefix(b"\xFF\xFE", "text/plain"),
    Signature::Prefix(b"\xEF\xBB\xBF", "text/plain"),
    // Images.
    Signature::Prefix(b"\x00\x00\x01\x00", "image/x-icon"),
    Signature::Prefix(b"\x00\x00\x02\x00", "image/x-icon"),
    Signature::Prefix(b"BM", "image/bmp"),
    Signature::Prefix(b"GIF87a", "image/gif"),
    Signature::Prefix(b"GIF89a", "image/gif"),
    Signature::Masked {
        pattern: b"RIFF\x00\x00\x00\x00WEBPVP",
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF\xFF\xFF",
        mime: "image/webp",
    },
    Signature::Prefix(b"\x89PNG\x0D\x0A\x1A\x0A", "image/png"),
    Signature::Prefix(b"\xFF\xD8\xFF", "image/jpeg"),
    // Audio and video.
    Signature::Prefix(b".snd", "audio/basic"),
    Signature::Masked {
        pattern: b"FORM\x00\x00\x00\x00AIFF",
        mask: RIFF_MASK,
        mime: "audio/aiff",
    },
    Signature::Prefix(b"ID3", "audio/mpeg"),
    Signature::Prefix(b"OggS\x00", "application/ogg"),
    Signature::Prefix(b"MThd\x00\x00\x00\x06", "audio/midi"),
    Signature::Masked {
        pattern: b"RIFF\x00\x00\x00\x00AVI ",
        mask: RIFF_MASK,
        mime: "video/avi",
    },
    Signature::Masked {
        pattern: b"RIFF\x00\x00\x00\x00WAVE",
        mask: RIFF_MASK,
        mime: "audio/wave",
    },
    Signature::Mp4,
    Signature::Prefix(b"\x1A\x45\xDF\xA3", "video/webm"),
    // Fonts.
    Signature::Prefix(b"\x00\x01\x00\x00", "font/ttf"),
    Signature::Prefix(b"OTTO", "font/otf"),
    Signature::Prefix(b"ttcf", "font/collection"),
    Signature::Prefix(b"wOFF", "font/woff"),
    Signature::Prefix(b"wOF2", "font/woff2"),
    // Archives.
    Signature::Prefix(b"\x1F\x8B\x08", "application/x-gzip"),
    Signature::Prefix(b"PK\x03\x04", "application/zip"),
    Signature::Prefix(b"Rar!\x1A\x07\x00", "application/x-rar-compressed"),
    Signature::Prefix(b"Rar!\x1A\x07\x01\x00", "application/x-rar-compressed"),
    Signature::Prefix(b"\x00asm", "application/wasm"),
];

impl Signature {
    /// Match against the raw head and the whitespace-trimmed head.
    pub(super) fn match_bytes(&self, raw: &[u8], trimmed: &[u8]) -> Option<&'static str> {
        match self {
            Self::Prefix(prefix, mime) => raw.starts_with(prefix).then_some(*mime),
            Self::Masked {
                pattern,
                mask,
                mime,
            } => masked_prefix(raw, pattern, mask).then_some(*mime),
            Self::HtmlTag(tag) => html_tag(trimmed, tag).then_some("text/html"),
            Self::AfterWhitespace(prefix, mime) => trimmed.starts_with(prefix).then_some(*mime),
            Self::Mp4 => is_mp4(raw).then_some("video/mp4"),
        }
    }
}

fn masked_prefix(data: &[u8], pattern: &[u8], mask: &[u8]) -> bool {
    data.len() >= pattern.len()
        && pattern
            .iter()
            .zip(mask)
            .zip(data)
            .all(|((expected, mask), actual)| actual & mask == *expected)
}

fn html_tag(data: &[u8], tag: &[u8]) -> bool {
    if data.len() <= tag.len() || !data[..tag.len()].eq_ignore_ascii_case(tag) {
        return false;
    }
    matches!(data[tag.len()], b' ' | b'>')
}

fn is_mp4(data: &[u8]) -> bool {
    if data.len() < 12 {
        return false;
    }
    let box_size = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if box_size < 12 || data.len() < box_size || box_size % 4 != 0 {
        return false;
    }
    if &data[4..8] != b"ftyp" {
        return false;
    }
    // Major brand at 8..12, minor version at 12..16, compatible brands after.
    (8..box_size)
        .step_by(4)
        .filter(|offset| *offset != 12)
        .any(|offset| data[offset..].starts_with(b"mp4"))
}
