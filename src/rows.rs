//! # rows
//!
//! Random access to the padded rows of the pixel array.
use std::io::{
    Read,
    Seek,
    SeekFrom,
};

use crate::error::Result;
use crate::header::Geometry;

/// Reads stored rows in visual order, top row first.
///
/// Owns a single row buffer that is reused for every row. Contiguous rows
/// are read without seeking, so a buffered input keeps its buffer.
pub struct RowReader<'a, R> {
    input: &'a mut R,
    /// Stream position after the last read, unknown before the first one.
    position: Option<u64>,
    pixel_offset: u64,
    geometry: Geometry,
    buffer: Vec<u8>,
}

impl<'a, R: Read + Seek> RowReader<'a, R> {
    pub fn new( input: &'a mut R, pixel_offset: u32, geometry: Geometry ) -> RowReader<'a, R> {
        RowReader {
            input,
            position: None,
            pixel_offset: pixel_offset as u64,
            geometry,
            buffer: vec![0; geometry.stride],
        }
    }

    /// Maps a visual row to the row index it has in the file.
    pub fn file_row( &self, row: u32 ) -> u32 {
        if self.geometry.flip_vertical {
            self.geometry.height - 1 - row
        } else {
            row
        }
    }

    /// Seeks to and reads the padded bytes of visual row `row`.
    ///
    /// A truncated file surfaces as an `Io` error from `read_exact`.
    pub fn read_row( &mut self, row: u32 ) -> Result<&[u8]> {
        let y = self.file_row( row );
        let offset = self.pixel_offset + y as u64 * self.geometry.stride as u64;

        trace!( "visual row {} -> file row {} at offset {}", row, y, offset );

        if self.position != Some( offset ) {
            self.position = None;
            self.input.seek( SeekFrom::Start( offset ) )?;
        }
        self.input.read_exact( &mut self.buffer )?;
        self.position = Some( offset + self.buffer.len() as u64 );

        Ok( &self.buffer )
    }
}

#[cfg( test )]
mod tests {
    use super::*;
    use std::io;
    use std::io::Cursor;

    use crate::error::Error;

    /// Counts the seeks made on the wrapped cursor.
    struct CountingSeeks {
        inner: Cursor<Vec<u8>>,
        seeks: usize,
    }

    impl Read for CountingSeeks {
        fn read( &mut self, buf: &mut [u8] ) -> io::Result<usize> {
            self.inner.read( buf )
        }
    }

    impl Seek for CountingSeeks {
        fn seek( &mut self, pos: SeekFrom ) -> io::Result<u64> {
            self.seeks += 1;
            self.inner.seek( pos )
        }
    }

    fn geometry( height: u32, flip_vertical: bool ) -> Geometry {
        Geometry { width: 8, height, stride: 4, flip_vertical }
    }

    fn pixel_rows( offset: usize, rows: &[u8] ) -> Vec<u8> {
        let mut data = vec![0xEE; offset];
        for &row in rows {
            data.extend_from_slice( &[ row, 0, 0, 0 ] );
        }
        data
    }

    #[test]
    fn top_down_reads_in_file_order() {
        let mut input = Cursor::new( pixel_rows( 10, &[ 0x11, 0x22, 0x33 ] ) );
        let mut rows = RowReader::new( &mut input, 10, geometry( 3, false ) );

        assert_eq!( rows.read_row( 0 ).unwrap(), &[ 0x11, 0, 0, 0 ] );
        assert_eq!( rows.read_row( 1 ).unwrap(), &[ 0x22, 0, 0, 0 ] );
        assert_eq!( rows.read_row( 2 ).unwrap(), &[ 0x33, 0, 0, 0 ] );
    }

    #[test]
    fn bottom_up_starts_at_last_file_row() {
        let mut input = Cursor::new( pixel_rows( 10, &[ 0x11, 0x22, 0x33 ] ) );
        let mut rows = RowReader::new( &mut input, 10, geometry( 3, true ) );

        assert_eq!( rows.file_row( 0 ), 2 );
        assert_eq!( rows.read_row( 0 ).unwrap()[0], 0x33 );
        assert_eq!( rows.read_row( 1 ).unwrap()[0], 0x22 );
        assert_eq!( rows.read_row( 2 ).unwrap()[0], 0x11 );
    }

    #[test]
    fn truncated_pixel_data_fails() {
        let mut data = pixel_rows( 10, &[ 0x11, 0x22 ] );
        data.truncate( data.len() - 1 );
        let mut input = Cursor::new( data );
        let mut rows = RowReader::new( &mut input, 10, geometry( 2, false ) );

        assert!( rows.read_row( 0 ).is_ok() );
        match rows.read_row( 1 ) {
            Err( Error::Io( _ ) ) => {},
            other => panic!( "unexpected result {:?}", other ),
        }
    }

    #[test]
    fn contiguous_rows_seek_once() {
        let mut input = CountingSeeks {
            inner: Cursor::new( pixel_rows( 10, &[ 0x11, 0x22, 0x33 ] ) ),
            seeks: 0,
        };

        {
            let mut rows = RowReader::new( &mut input, 10, geometry( 3, false ) );
            for ( row, &expected ) in [ 0x11, 0x22, 0x33 ].iter().enumerate() {
                assert_eq!( rows.read_row( row as u32 ).unwrap()[0], expected );
            }
        }
        assert_eq!( input.seeks, 1 );

        {
            let mut rows = RowReader::new( &mut input, 10, geometry( 3, true ) );
            for ( row, &expected ) in [ 0x33, 0x22, 0x11 ].iter().enumerate() {
                assert_eq!( rows.read_row( row as u32 ).unwrap()[0], expected );
            }
        }
        assert_eq!( input.seeks, 4 );
    }
}
