//! Builds small 1bpp bitmaps in memory.
#![allow( dead_code )]

pub struct Bmp {
    pub magic: [u8; 2],
    pub width: i32,
    pub height: i32,
    pub bpp: u16,
    pub compression: u32,
    pub used_colors: u32,
    pub table: Vec<u8>,
    /// Stored rows in file order, padded to the stride by `bytes`.
    pub rows: Vec<Vec<u8>>,
}

impl Bmp {
    /// A top-down image whose rows are given in visual order.
    pub fn top_down( width: i32, rows: &[&[u8]] ) -> Bmp {
        Bmp {
            magic: *b"BM",
            width,
            height: -( rows.len() as i32 ),
            bpp: 1,
            compression: 0,
            used_colors: 0,
            table: Vec::new(),
            rows: rows.iter().map( |row| row.to_vec() ).collect(),
        }
    }

    /// A bottom-up image whose rows are given in visual order.
    pub fn bottom_up( width: i32, rows: &[&[u8]] ) -> Bmp {
        let mut bmp = Bmp::top_down( width, rows );
        bmp.height = rows.len() as i32;
        bmp.rows.reverse();
        bmp
    }

    pub fn with_table( mut self, table: &[u8] ) -> Bmp {
        self.used_colors = ( table.len() / 4 ) as u32;
        self.table = table.to_vec();
        self
    }

    pub fn stride( &self ) -> usize {
        ( ( self.width.unsigned_abs() as usize + 31 ) / 32 ) * 4
    }

    pub fn bytes( &self ) -> Vec<u8> {
        let stride = self.stride();
        let offset = ( 54 + self.table.len() ) as u32;
        let size = offset as usize + stride * self.rows.len();

        let mut buf = Vec::with_capacity( size );
        buf.extend_from_slice( &self.magic );
        buf.extend_from_slice( &( size as u32 ).to_le_bytes() );
        buf.extend_from_slice( &[ 0; 4 ] );
        buf.extend_from_slice( &offset.to_le_bytes() );

        buf.extend_from_slice( &40u32.to_le_bytes() );
        buf.extend_from_slice( &self.width.to_le_bytes() );
        buf.extend_from_slice( &self.height.to_le_bytes() );
        buf.extend_from_slice( &1u16.to_le_bytes() );
        buf.extend_from_slice( &self.bpp.to_le_bytes() );
        buf.extend_from_slice( &self.compression.to_le_bytes() );
        buf.extend_from_slice( &[ 0; 12 ] );
        buf.extend_from_slice( &self.used_colors.to_le_bytes() );
        buf.extend_from_slice( &0u32.to_le_bytes() );
        buf.extend_from_slice( &self.table );

        for row in &self.rows {
            let mut padded = row.clone();
            // Padding is filled with ones so masking is observable.
            padded.resize( stride, 0xFF );
            buf.extend_from_slice( &padded );
        }
        buf
    }
}

/// The pixel array lines between `bmp_data[] = {` and `};`.
pub fn data_lines( text: &str ) -> Vec<String> {
    text.lines()
        .skip_while( |line| !line.starts_with( "unsigned char bmp_data[]" ) )
        .skip( 1 )
        .take_while( |line| *line != "};" )
        .map( String::from )
        .collect()
}
