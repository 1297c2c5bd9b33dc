//! DDS container parsing.
//!
//! Understands the classic 128-byte header (`"DDS "` magic plus a 124-byte
//! surface descriptor) followed by a DXT1/DXT3/DXT5 block payload: base level
//! first, each mip level stored immediately after the previous one.
//!
//! Parsing is pure: no file IO and no device types. `loader` does the IO and
//! `upload` turns the parsed payload into a device texture.

use thiserror::Error;

/// File magic, the first four bytes of every DDS file.
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";

/// Total header length: 4-byte magic + 124-byte surface descriptor.
pub const HEADER_LEN: usize = 128;

// Field offsets within the surface descriptor (relative to byte 4 of the
// file, where the descriptor starts).
const OFF_HEIGHT: usize = 8;
const OFF_WIDTH: usize = 12;
const OFF_PITCH_OR_LINEAR_SIZE: usize = 16;
const OFF_MIP_COUNT: usize = 24;
const OFF_FOURCC: usize = 80;

/// Four-character compression code as stored in the header.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FourCc(pub [u8; 4]);

impl std::fmt::Display for FourCc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.0.escape_ascii())
    }
}

/// Block-compressed pixel formats this parser understands.
///
/// All three encode 4x4 texel blocks; DXT1 packs a block into 8 bytes, the
/// alpha-carrying variants into 16.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BlockFormat {
    Dxt1,
    Dxt3,
    Dxt5,
}

impl BlockFormat {
    pub fn from_fourcc(code: FourCc) -> Option<Self> {
        match &code.0 {
            b"DXT1" => Some(BlockFormat::Dxt1),
            b"DXT3" => Some(BlockFormat::Dxt3),
            b"DXT5" => Some(BlockFormat::Dxt5),
            _ => None,
        }
    }

    /// Bytes per 4x4 block.
    pub const fn block_size(self) -> u32 {
        match self {
            BlockFormat::Dxt1 => 8,
            BlockFormat::Dxt3 | BlockFormat::Dxt5 => 16,
        }
    }

    /// Byte size of one mip level: blocks on each axis round up, so partial
    /// blocks at the right/bottom edges are stored in full.
    pub fn level_size(self, width: u32, height: u32) -> usize {
        let blocks_w = width.div_ceil(4) as u64;
        let blocks_h = height.div_ceil(4) as u64;
        let bytes = blocks_w
            .saturating_mul(blocks_h)
            .saturating_mul(self.block_size() as u64);
        usize::try_from(bytes).unwrap_or(usize::MAX)
    }
}

/// DDS parse failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DdsError {
    /// The first four bytes are not the DDS signature. Callers can treat
    /// this as "try another decoder".
    #[error("missing \"DDS \" signature")]
    NotDds,

    #[error("unsupported compression code {0}")]
    UnsupportedFourCc(FourCc),

    #[error("zero texture dimension ({width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    #[error("mip count {declared} exceeds the {max}-level chain for this size")]
    MipCountOutOfRange { declared: u32, max: u32 },

    #[error("truncated data: need {expected} bytes, have {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// One mip level's placement within the compressed payload.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MipLevel {
    pub level: u32,
    pub width: u32,
    pub height: u32,

    /// Byte offset into the payload.
    pub offset: usize,

    /// Byte length of this level.
    pub size: usize,
}

impl MipLevel {
    /// Bytes per row of blocks at this level.
    pub fn row_pitch(&self, format: BlockFormat) -> u32 {
        self.width.div_ceil(4) * format.block_size()
    }

    /// Number of block rows at this level.
    pub fn block_rows(&self) -> u32 {
        self.height.div_ceil(4)
    }
}

/// A parsed DDS texture: header fields plus the complete block payload.
///
/// Invariant: the payload length equals the sum of all mip level sizes, so
/// every level can be sliced out without bounds checks failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsTexture {
    width: u32,
    height: u32,
    mip_count: u32,
    format: BlockFormat,
    linear_size: u32,
    data: Vec<u8>,
}

impl DdsTexture {
    /// Whether `bytes` begin with the DDS signature.
    ///
    /// Only the first four bytes are examined, so this is safe to call on
    /// arbitrary (possibly tiny) buffers for format dispatch.
    pub fn sniff(bytes: &[u8]) -> bool {
        bytes.len() >= 4 && &bytes[..4] == DDS_MAGIC
    }

    /// Parses a complete in-memory DDS file.
    pub fn parse(bytes: &[u8]) -> Result<Self, DdsError> {
        if !Self::sniff(bytes) {
            return Err(DdsError::NotDds);
        }
        if bytes.len() < HEADER_LEN {
            return Err(DdsError::Truncated {
                expected: HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let desc = &bytes[4..HEADER_LEN];
        let height = read_u32(desc, OFF_HEIGHT);
        let width = read_u32(desc, OFF_WIDTH);
        let linear_size = read_u32(desc, OFF_PITCH_OR_LINEAR_SIZE);
        let mip_count = read_u32(desc, OFF_MIP_COUNT);
        let fourcc = FourCc([
            desc[OFF_FOURCC],
            desc[OFF_FOURCC + 1],
            desc[OFF_FOURCC + 2],
            desc[OFF_FOURCC + 3],
        ]);
        let format =
            BlockFormat::from_fourcc(fourcc).ok_or(DdsError::UnsupportedFourCc(fourcc))?;

        Self::build(
            width,
            height,
            mip_count,
            format,
            linear_size,
            bytes[HEADER_LEN..].to_vec(),
        )
    }

    /// Builds a texture from already-parsed fields, applying the same
    /// validation as `parse`.
    pub fn new(
        width: u32,
        height: u32,
        mip_count: u32,
        format: BlockFormat,
        data: Vec<u8>,
    ) -> Result<Self, DdsError> {
        Self::build(width, height, mip_count, format, 0, data)
    }

    fn build(
        width: u32,
        height: u32,
        declared_mip_count: u32,
        format: BlockFormat,
        linear_size: u32,
        mut data: Vec<u8>,
    ) -> Result<Self, DdsError> {
        if width == 0 || height == 0 {
            return Err(DdsError::ZeroDimension { width, height });
        }

        // Writers disagree on whether a no-mipmap file stores 0 or 1 here.
        let mip_count = declared_mip_count.max(1);

        let max = full_chain_len(width, height);
        if mip_count > max {
            return Err(DdsError::MipCountOutOfRange {
                declared: declared_mip_count,
                max,
            });
        }

        let expected = payload_len(width, height, mip_count, format);
        if data.len() < expected {
            return Err(DdsError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        // Writers pad the tail; drop extra bytes so the payload is exactly
        // the sum of the mip level sizes.
        data.truncate(expected);

        Ok(Self {
            width,
            height,
            mip_count,
            format,
            linear_size,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn mip_count(&self) -> u32 {
        self.mip_count
    }

    #[inline]
    pub fn format(&self) -> BlockFormat {
        self.format
    }

    /// The complete block payload, all mip levels back to back.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Per-level payload layout in ascending level order.
    ///
    /// Dimensions halve per level, flooring at 1 on each axis independently.
    pub fn mip_levels(&self) -> Vec<MipLevel> {
        let mut levels = Vec::with_capacity(self.mip_count as usize);
        let (mut w, mut h) = (self.width, self.height);
        let mut offset = 0usize;

        for level in 0..self.mip_count {
            let size = self.format.level_size(w, h);
            levels.push(MipLevel {
                level,
                width: w,
                height: h,
                offset,
                size,
            });
            offset += size;
            w = (w / 2).max(1);
            h = (h / 2).max(1);
        }

        levels
    }

    /// Header linear-size field vs the computed level-0 size, when they
    /// disagree.
    ///
    /// Exporters routinely write a row pitch here instead of a linear size.
    /// Layout always trusts the computed value; this is diagnostics only.
    pub fn pitch_mismatch(&self) -> Option<(u32, usize)> {
        let level0 = self.format.level_size(self.width, self.height);
        (self.linear_size != 0 && self.linear_size as usize != level0)
            .then_some((self.linear_size, level0))
    }
}

fn read_u32(desc: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([desc[off], desc[off + 1], desc[off + 2], desc[off + 3]])
}

/// Number of levels in a full mip chain: halve the larger dimension down
/// to 1, counting every step.
fn full_chain_len(width: u32, height: u32) -> u32 {
    32 - width.max(height).leading_zeros()
}

/// Total payload bytes for a mip chain starting at `width` x `height`.
fn payload_len(width: u32, height: u32, mip_count: u32, format: BlockFormat) -> usize {
    let mut total = 0usize;
    let (mut w, mut h) = (width, height);
    for _ in 0..mip_count {
        total = total.saturating_add(format.level_size(w, h));
        w = (w / 2).max(1);
        h = (h / 2).max(1);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 128-byte header with the fields the parser reads; the rest stays zero.
    fn header(width: u32, height: u32, mip_count: u32, fourcc: &[u8; 4], linear: u32) -> Vec<u8> {
        let mut h = vec![0u8; HEADER_LEN];
        h[..4].copy_from_slice(DDS_MAGIC);
        h[4..8].copy_from_slice(&124u32.to_le_bytes()); // descriptor dwSize
        h[12..16].copy_from_slice(&height.to_le_bytes());
        h[16..20].copy_from_slice(&width.to_le_bytes());
        h[20..24].copy_from_slice(&linear.to_le_bytes());
        h[28..32].copy_from_slice(&mip_count.to_le_bytes());
        h[84..88].copy_from_slice(fourcc);
        h
    }

    fn chain_len(width: u32, height: u32, mip_count: u32, format: BlockFormat) -> usize {
        let mut total = 0;
        let (mut w, mut h) = (width, height);
        for _ in 0..mip_count {
            total += format.level_size(w, h);
            w = (w / 2).max(1);
            h = (h / 2).max(1);
        }
        total
    }

    /// Complete file: header plus a correctly sized zero payload.
    fn file(width: u32, height: u32, mip_count: u32, fourcc: &[u8; 4]) -> Vec<u8> {
        let format = BlockFormat::from_fourcc(FourCc(*fourcc)).unwrap();
        let mut bytes = header(width, height, mip_count, fourcc, 0);
        bytes.extend(std::iter::repeat_n(
            0u8,
            chain_len(width, height, mip_count.max(1), format),
        ));
        bytes
    }

    // ── header parsing ────────────────────────────────────────────────────

    #[test]
    fn parse_reads_header_fields() {
        let dds = DdsTexture::parse(&file(64, 32, 3, b"DXT5")).unwrap();
        assert_eq!(dds.width(), 64);
        assert_eq!(dds.height(), 32);
        assert_eq!(dds.mip_count(), 3);
        assert_eq!(dds.format(), BlockFormat::Dxt5);
    }

    #[test]
    fn non_dds_magic_is_rejected_from_four_bytes() {
        // Classification needs only the signature, not a full header.
        assert_eq!(DdsTexture::parse(b"PNG\0"), Err(DdsError::NotDds));
        assert_eq!(DdsTexture::parse(b"BM"), Err(DdsError::NotDds));
        assert_eq!(DdsTexture::parse(&[]), Err(DdsError::NotDds));
    }

    #[test]
    fn sniff_requires_exact_signature() {
        assert!(DdsTexture::sniff(b"DDS \x7c\x00\x00\x00"));
        assert!(!DdsTexture::sniff(b"DDS"));
        assert!(!DdsTexture::sniff(b"dds \x7c\x00\x00\x00"));
    }

    #[test]
    fn truncated_header_is_rejected() {
        let mut bytes = file(4, 4, 1, b"DXT1");
        bytes.truncate(100);
        assert_eq!(
            DdsTexture::parse(&bytes),
            Err(DdsError::Truncated {
                expected: HEADER_LEN,
                actual: 100,
            })
        );
    }

    #[test]
    fn unknown_fourcc_is_rejected() {
        let bytes = header(4, 4, 1, b"DXT2", 0);
        let err = DdsTexture::parse(&bytes).unwrap_err();
        assert_eq!(err, DdsError::UnsupportedFourCc(FourCc(*b"DXT2")));
        assert!(err.to_string().contains("DXT2"));
    }

    // ── level sizing ──────────────────────────────────────────────────────

    #[test]
    fn block_sizes_per_format() {
        assert_eq!(BlockFormat::Dxt1.block_size(), 8);
        assert_eq!(BlockFormat::Dxt3.block_size(), 16);
        assert_eq!(BlockFormat::Dxt5.block_size(), 16);
    }

    #[test]
    fn level_size_rounds_partial_blocks_up() {
        // 17x9 spans 5x3 blocks; partial edge blocks are stored in full.
        assert_eq!(BlockFormat::Dxt3.level_size(17, 9), 5 * 3 * 16);
        assert_eq!(BlockFormat::Dxt1.level_size(17, 9), 5 * 3 * 8);
        // Exact multiples do not round.
        assert_eq!(BlockFormat::Dxt5.level_size(16, 8), 4 * 2 * 16);
    }

    #[test]
    fn mip_dimensions_floor_at_one() {
        let dds = DdsTexture::parse(&file(16, 4, 5, b"DXT5")).unwrap();
        let dims: Vec<(u32, u32)> = dds.mip_levels().iter().map(|l| (l.width, l.height)).collect();
        assert_eq!(dims, vec![(16, 4), (8, 2), (4, 1), (2, 1), (1, 1)]);
    }

    #[test]
    fn offsets_accumulate_level_sizes() {
        let dds = DdsTexture::parse(&file(8, 8, 2, b"DXT1")).unwrap();
        let levels = dds.mip_levels();
        assert_eq!(levels[0].offset, 0);
        assert_eq!(levels[0].size, 32);
        assert_eq!(levels[1].offset, 32);
        assert_eq!(levels[1].size, 8);
        assert_eq!(dds.data().len(), 40);
    }

    #[test]
    fn row_pitch_counts_partial_blocks() {
        let dds = DdsTexture::parse(&file(17, 9, 1, b"DXT3")).unwrap();
        let level0 = dds.mip_levels()[0];
        assert_eq!(level0.size, 240);
        assert_eq!(level0.row_pitch(BlockFormat::Dxt3), 5 * 16);
        assert_eq!(level0.block_rows(), 3);
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn mip_count_zero_means_single_level() {
        let dds = DdsTexture::parse(&file(8, 8, 0, b"DXT1")).unwrap();
        assert_eq!(dds.mip_count(), 1);
        assert_eq!(dds.mip_levels().len(), 1);
    }

    #[test]
    fn payload_must_cover_all_levels() {
        let mut bytes = file(8, 8, 2, b"DXT1");
        bytes.truncate(bytes.len() - 1);
        assert_eq!(
            DdsTexture::parse(&bytes),
            Err(DdsError::Truncated {
                expected: 40,
                actual: 39,
            })
        );
    }

    #[test]
    fn trailing_payload_bytes_are_dropped() {
        let mut bytes = file(8, 8, 2, b"DXT1");
        bytes.extend_from_slice(&[0xAB; 7]);
        let dds = DdsTexture::parse(&bytes).unwrap();
        assert_eq!(dds.data().len(), 40);
    }

    #[test]
    fn oversized_mip_count_is_rejected() {
        // A 4x4 texture tops out at 3 levels (4, 2, 1).
        let bytes = file(4, 4, 3, b"DXT1");
        assert!(DdsTexture::parse(&bytes).is_ok());

        let mut bytes = header(4, 4, 4, b"DXT1", 0);
        bytes.extend(std::iter::repeat_n(0u8, 64));
        assert_eq!(
            DdsTexture::parse(&bytes),
            Err(DdsError::MipCountOutOfRange {
                declared: 4,
                max: 3,
            })
        );
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let bytes = header(0, 16, 1, b"DXT1", 0);
        assert_eq!(
            DdsTexture::parse(&bytes),
            Err(DdsError::ZeroDimension {
                width: 0,
                height: 16,
            })
        );
    }

    // ── diagnostics ───────────────────────────────────────────────────────

    #[test]
    fn pitch_mismatch_flags_disagreement() {
        // 8x8 DXT1 level 0 is 32 bytes; a writer storing the 16-byte row
        // pitch instead gets flagged.
        let mut bytes = header(8, 8, 1, b"DXT1", 16);
        bytes.extend(std::iter::repeat_n(0u8, 32));
        let dds = DdsTexture::parse(&bytes).unwrap();
        assert_eq!(dds.pitch_mismatch(), Some((16, 32)));
    }

    #[test]
    fn pitch_mismatch_quiet_when_consistent_or_absent() {
        let mut bytes = header(8, 8, 1, b"DXT1", 32);
        bytes.extend(std::iter::repeat_n(0u8, 32));
        assert_eq!(DdsTexture::parse(&bytes).unwrap().pitch_mismatch(), None);

        let dds = DdsTexture::parse(&file(8, 8, 1, b"DXT1")).unwrap();
        assert_eq!(dds.pitch_mismatch(), None);
    }

    #[test]
    fn fourcc_displays_as_ascii() {
        assert_eq!(FourCc(*b"DXT1").to_string(), "\"DXT1\"");
    }
}
