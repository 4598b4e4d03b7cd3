//! # header
//!
//! Reads and validates the file header and the info header of a 1bpp bitmap.
use std::io::Read;

use byteorder::{
    ReadBytesExt,
    LittleEndian,
};

use crate::error::{
    Result,
    FormatError,
};

/// The `BM` tag read as a little-endian `u16`.
pub const BMP_MAGIC: u16 = 0x4D42;

/// Size of the file header on disk.
pub const FILE_HEADER_SIZE: usize = 14;

/// Size of the info header on disk.
pub const INFO_HEADER_SIZE: usize = 40;

/// The 14 byte header at the start of every bitmap file.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct FileHeader {
    pub file_type: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub pixel_offset: u32,
}

/// The 40 byte `BITMAPINFOHEADER` that follows the file header.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bpp: u16,
    pub compression: u32,
    pub image_size: u32,
    pub ppm_x: i32,
    pub ppm_y: i32,
    pub used_colors: u32,
    pub important_colors: u32,
}

/// Row layout derived from the info header.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    /// Padded bytes per stored row, always a multiple of 4.
    pub stride: usize,
    /// Set for bottom-up files, where file row 0 is the last visual row.
    pub flip_vertical: bool,
}

/// Both headers of a validated 1bpp, uncompressed bitmap.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct Header {
    pub file: FileHeader,
    pub info: InfoHeader,
}

impl FileHeader {
    fn from_reader<R: Read>( input: &mut R ) -> Result<FileHeader> {
        let file_type = input.read_u16::<LittleEndian>()?;
        if file_type != BMP_MAGIC {
            return Err( FormatError::NotBmp( file_type ).into() );
        }

        let file_size = input.read_u32::<LittleEndian>()?;
        let reserved1 = input.read_u16::<LittleEndian>()?;
        let reserved2 = input.read_u16::<LittleEndian>()?;
        let pixel_offset = input.read_u32::<LittleEndian>()?;

        Ok( FileHeader {
            file_type,
            file_size,
            reserved1,
            reserved2,
            pixel_offset,
        } )
    }
}

impl InfoHeader {
    fn from_reader<R: Read>( input: &mut R ) -> Result<InfoHeader> {
        let header_size = input.read_u32::<LittleEndian>()?;
        let width = input.read_i32::<LittleEndian>()?;
        let height = input.read_i32::<LittleEndian>()?;
        let planes = input.read_u16::<LittleEndian>()?;

        let bpp = input.read_u16::<LittleEndian>()?;
        if bpp != 1 {
            return Err( FormatError::UnsupportedDepth( bpp ).into() );
        }

        let compression = input.read_u32::<LittleEndian>()?;
        if compression != 0 {
            return Err( FormatError::UnsupportedCompression( compression ).into() );
        }

        let image_size = input.read_u32::<LittleEndian>()?;
        let ppm_x = input.read_i32::<LittleEndian>()?;
        let ppm_y = input.read_i32::<LittleEndian>()?;
        let used_colors = input.read_u32::<LittleEndian>()?;
        let important_colors = input.read_u32::<LittleEndian>()?;

        Ok( InfoHeader {
            header_size,
            width,
            height,
            planes,
            bpp,
            compression,
            image_size,
            ppm_x,
            ppm_y,
            used_colors,
            important_colors,
        } )
    }
}

impl Header {
    /// Reads both headers back to back from the start of `input`.
    ///
    /// Leaves the cursor `FILE_HEADER_SIZE + INFO_HEADER_SIZE` bytes further
    /// on. Fails on a wrong magic, a depth other than 1 or any compression.
    pub fn from_reader<R: Read>( input: &mut R ) -> Result<Header> {
        let file = FileHeader::from_reader( input )?;
        let info = InfoHeader::from_reader( input )?;

        debug!( "file header {:?}", file );
        debug!( "info header {:?}", info );

        Ok( Header { file, info } )
    }

    pub fn width( &self ) -> u32 {
        self.info.width.unsigned_abs()
    }

    pub fn height( &self ) -> u32 {
        self.info.height.unsigned_abs()
    }

    pub fn pixel_offset( &self ) -> u32 {
        self.file.pixel_offset
    }

    pub fn used_colors( &self ) -> u32 {
        self.info.used_colors
    }

    /// A positive height means the rows are stored bottom-up.
    pub fn flip_vertical( &self ) -> bool {
        self.info.height > 0
    }

    /// Padded bytes per stored row.
    pub fn stride( &self ) -> usize {
        ( ( self.width() as usize + 31 ) / 32 ) * 4
    }

    pub fn geometry( &self ) -> Geometry {
        Geometry {
            width: self.width(),
            height: self.height(),
            stride: self.stride(),
            flip_vertical: self.flip_vertical(),
        }
    }
}

#[cfg( test )]
pub( crate ) mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::error::Error;

    /// Builds both headers for a 1bpp image with the given fields.
    pub fn header_bytes(
        width: i32, height: i32, bpp: u16, compression: u32, used_colors: u32, pixel_offset: u32 ) -> Vec<u8> {

        let mut buf = Vec::with_capacity( FILE_HEADER_SIZE + INFO_HEADER_SIZE );
        buf.extend_from_slice( b"BM" );
        buf.extend_from_slice( &0u32.to_le_bytes() );
        buf.extend_from_slice( &[0; 4] );
        buf.extend_from_slice( &pixel_offset.to_le_bytes() );

        buf.extend_from_slice( &40u32.to_le_bytes() );
        buf.extend_from_slice( &width.to_le_bytes() );
        buf.extend_from_slice( &height.to_le_bytes() );
        buf.extend_from_slice( &1u16.to_le_bytes() );
        buf.extend_from_slice( &bpp.to_le_bytes() );
        buf.extend_from_slice( &compression.to_le_bytes() );
        buf.extend_from_slice( &[0; 12] );
        buf.extend_from_slice( &used_colors.to_le_bytes() );
        buf.extend_from_slice( &0u32.to_le_bytes() );
        buf
    }

    #[test]
    fn reads_both_headers() {
        let bytes = header_bytes( -10, 3, 1, 0, 2, 62 );
        let mut cursor = Cursor::new( &bytes );

        let header = Header::from_reader( &mut cursor ).unwrap();

        assert_eq!( cursor.position() as usize, FILE_HEADER_SIZE + INFO_HEADER_SIZE );
        assert_eq!( header.width(), 10 );
        assert_eq!( header.height(), 3 );
        assert_eq!( header.pixel_offset(), 62 );
        assert_eq!( header.used_colors(), 2 );
        assert!( header.flip_vertical() );
    }

    #[test]
    fn geometry_pads_rows_to_four_bytes() {
        let cases = [ ( 1, 4 ), ( 8, 4 ), ( 32, 4 ), ( 33, 8 ), ( 64, 8 ), ( 65, 12 ) ];

        for &( width, stride ) in cases.iter() {
            let bytes = header_bytes( width, -1, 1, 0, 0, 62 );
            let header = Header::from_reader( &mut Cursor::new( &bytes ) ).unwrap();

            assert_eq!( header.stride(), stride, "width {}", width );
        }
    }

    #[test]
    fn non_positive_height_is_top_down() {
        for &height in [ 0, -4 ].iter() {
            let bytes = header_bytes( 8, height, 1, 0, 0, 62 );
            let geometry = Header::from_reader( &mut Cursor::new( &bytes ) ).unwrap().geometry();

            assert!( !geometry.flip_vertical );
            assert_eq!( geometry.height, height.unsigned_abs() );
        }
    }

    #[test]
    fn extreme_dimensions_do_not_overflow() {
        let bytes = header_bytes( i32::MIN, i32::MIN, 1, 0, 0, 62 );
        let header = Header::from_reader( &mut Cursor::new( &bytes ) ).unwrap();

        assert_eq!( header.width(), 1 << 31 );
        assert_eq!( header.height(), 1 << 31 );
    }

    #[test]
    fn rejects_wrong_magic() {
        let mut bytes = header_bytes( 8, 8, 1, 0, 0, 62 );
        bytes[0] = b'P';

        match Header::from_reader( &mut Cursor::new( &bytes ) ) {
            Err( Error::Format( FormatError::NotBmp( 0x4D50 ) ) ) => {},
            other => panic!( "unexpected result {:?}", other ),
        }
    }

    #[test]
    fn rejects_other_depths() {
        let bytes = header_bytes( 8, 8, 24, 0, 0, 54 );

        match Header::from_reader( &mut Cursor::new( &bytes ) ) {
            Err( Error::Format( FormatError::UnsupportedDepth( 24 ) ) ) => {},
            other => panic!( "unexpected result {:?}", other ),
        }
    }

    #[test]
    fn rejects_compression() {
        let bytes = header_bytes( 8, 8, 1, 1, 0, 62 );

        match Header::from_reader( &mut Cursor::new( &bytes ) ) {
            Err( Error::Format( FormatError::UnsupportedCompression( 1 ) ) ) => {},
            other => panic!( "unexpected result {:?}", other ),
        }
    }

    #[test]
    fn truncated_header_is_an_io_error() {
        let bytes = header_bytes( 8, 8, 1, 0, 0, 62 );

        match Header::from_reader( &mut Cursor::new( &bytes[..20] ) ) {
            Err( Error::Io( _ ) ) => {},
            other => panic!( "unexpected result {:?}", other ),
        }
    }
}
