//! # palette
//!
//! Resolves the 2-entry color table of a 1bpp bitmap.
use std::io::{
    Read,
    Seek,
    SeekFrom,
};

use byteorder::ReadBytesExt;

use crate::error::{
    Result,
    FormatError,
};
use crate::header::Header;

/// Bytes per color table entry on disk: blue, green, red, reserved.
pub const ENTRY_SIZE: u32 = 4;

/// One color table entry with the reserved byte dropped.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Color {
    pub const BLACK: Color = Color { b: 0x00, g: 0x00, r: 0x00 };
    pub const WHITE: Color = Color { b: 0xFF, g: 0xFF, r: 0xFF };

    fn from_reader<R: Read>( input: &mut R ) -> Result<Color> {
        let b = input.read_u8()?;
        let g = input.read_u8()?;
        let r = input.read_u8()?;
        let _ = input.read_u8()?; // reserved

        Ok( Color { b, g, r } )
    }

    /// Channels in on-disk order.
    pub fn bgr( &self ) -> [u8; 3] {
        [ self.b, self.g, self.r ]
    }
}

/// The two palette entries, index 0 first.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct Palette {
    pub colors: [Color; 2],
}

impl Default for Palette {
    fn default() -> Palette {
        Palette { colors: [ Color::BLACK, Color::WHITE ] }
    }
}

impl Palette {
    /// Reads the color table that ends right where the pixel data starts.
    ///
    /// Files that declare no used colors get black and white without any
    /// I/O. Tables of any size other than 2 are rejected.
    pub fn from_reader<R: Read + Seek>( input: &mut R, header: &Header ) -> Result<Palette> {
        match header.used_colors() {
            0 => {
                debug!( "no color table, using the default palette" );
                Ok( Palette::default() )
            },
            2 => {
                let offset = header.pixel_offset();
                let start = offset.checked_sub( ENTRY_SIZE * 2 )
                    .ok_or( FormatError::PaletteOutOfBounds( offset ) )?;

                input.seek( SeekFrom::Start( start as u64 ) )?;
                let first = Color::from_reader( input )?;
                let second = Color::from_reader( input )?;

                debug!( "color table at {}: {:?} {:?}", start, first, second );

                Ok( Palette { colors: [ first, second ] } )
            },
            n => Err( FormatError::UnsupportedPaletteSize( n ).into() ),
        }
    }

    /// Blue, green and red of both entries, 6 bytes in total.
    pub fn channels( &self ) -> [u8; 6] {
        let [ b0, g0, r0 ] = self.colors[0].bgr();
        let [ b1, g1, r1 ] = self.colors[1].bgr();

        [ b0, g0, r0, b1, g1, r1 ]
    }
}

#[cfg( test )]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::error::Error;
    use crate::header::tests::header_bytes;

    fn with_table( used_colors: u32, table: &[u8] ) -> ( Header, Cursor<Vec<u8>> ) {
        let offset = 54 + table.len() as u32;
        let mut data = header_bytes( 8, 1, 1, 0, used_colors, offset );
        data.extend_from_slice( table );
        data.extend_from_slice( &[ 0; 4 ] );

        let mut input = Cursor::new( data );
        let header = Header::from_reader( &mut input ).unwrap();
        ( header, input )
    }

    #[test]
    fn default_palette_is_black_and_white() {
        let ( header, mut input ) = with_table( 0, &[] );
        let palette = Palette::from_reader( &mut input, &header ).unwrap();

        assert_eq!( palette.channels(), [ 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF ] );
    }

    #[test]
    fn default_palette_does_not_read() {
        let ( header, mut input ) = with_table( 0, &[] );
        let before = input.position();

        Palette::from_reader( &mut input, &header ).unwrap();

        assert_eq!( input.position(), before );
    }

    #[test]
    fn reads_table_in_bgr_order() {
        let table = [ 0x10, 0x20, 0x30, 0x99, 0x40, 0x50, 0x60, 0x99 ];
        let ( header, mut input ) = with_table( 2, &table );

        let palette = Palette::from_reader( &mut input, &header ).unwrap();

        assert_eq!( palette.colors[0], Color { b: 0x10, g: 0x20, r: 0x30 } );
        assert_eq!( palette.channels(), [ 0x10, 0x20, 0x30, 0x40, 0x50, 0x60 ] );
    }

    #[test]
    fn table_ends_at_pixel_offset() {
        // 8 unrelated bytes between the headers and the color table.
        let mut data = header_bytes( 8, 1, 1, 0, 2, 54 + 16 );
        data.extend_from_slice( &[ 0xEE; 8 ] );
        data.extend_from_slice( &[ 0x01, 0x02, 0x03, 0x00, 0x04, 0x05, 0x06, 0x00 ] );
        data.extend_from_slice( &[ 0; 4 ] );
        let mut input = Cursor::new( data );
        let header = Header::from_reader( &mut input ).unwrap();

        let palette = Palette::from_reader( &mut input, &header ).unwrap();

        assert_eq!( palette.channels(), [ 0x01, 0x02, 0x03, 0x04, 0x05, 0x06 ] );
    }

    #[test]
    fn rejects_other_table_sizes() {
        for &used in [ 1, 3, 16, 256 ].iter() {
            let ( header, mut input ) = with_table( used, &[ 0; 8 ] );

            match Palette::from_reader( &mut input, &header ) {
                Err( Error::Format( FormatError::UnsupportedPaletteSize( n ) ) ) => assert_eq!( n, used ),
                other => panic!( "unexpected result {:?}", other ),
            }
        }
    }

    #[test]
    fn rejects_table_before_file_start() {
        let mut data = header_bytes( 8, 1, 1, 0, 2, 4 );
        data.extend_from_slice( &[ 0; 4 ] );
        let mut input = Cursor::new( data );
        let header = Header::from_reader( &mut input ).unwrap();

        match Palette::from_reader( &mut input, &header ) {
            Err( Error::Format( FormatError::PaletteOutOfBounds( 4 ) ) ) => {},
            other => panic!( "unexpected result {:?}", other ),
        }
    }
}
