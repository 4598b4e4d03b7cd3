//! # emit
//!
//! Writes the C header holding the packed image.
use std::io::Write;

use crate::error::Result;
use crate::pack::BitOrder;

/// Serializes dimensions, pixel rows and the optional palette, in that order.
///
/// Performs no validation, every value is written as given.
pub struct Emitter<W> {
    output: W,
}

impl<W: Write> Emitter<W> {
    pub fn new( output: W ) -> Emitter<W> {
        Emitter { output }
    }

    /// Padding note, size macros, bit order comment and the array opening.
    pub fn begin( &mut self, width: u32, height: u32, bit_order: BitOrder ) -> Result<()> {
        writeln!( self.output,
            "// Last byte of each row may contain unused padding bits if BMP_WIDTH is not a multiple of 8" )?;
        writeln!( self.output, "#define BMP_WIDTH  {}", width )?;
        writeln!( self.output, "#define BMP_HEIGHT {}", height )?;
        writeln!( self.output, "{}", bit_order_comment( bit_order ) )?;
        writeln!( self.output )?;
        writeln!( self.output, "unsigned char bmp_data[] = {{" )?;
        Ok( () )
    }

    /// One line per row, every byte followed by a comma.
    pub fn row( &mut self, bytes: &[u8] ) -> Result<()> {
        for ( i, &byte ) in bytes.iter().enumerate() {
            let separator = if i + 1 < bytes.len() { ", " } else { ",\n" };
            write!( self.output, "0x{:02X}{}", byte, separator )?;
        }
        Ok( () )
    }

    pub fn end( &mut self ) -> Result<()> {
        writeln!( self.output, "}};" )?;
        Ok( () )
    }

    pub fn palette( &mut self, channels: &[u8] ) -> Result<()> {
        writeln!( self.output )?;
        writeln!( self.output, "unsigned char bmp_palette[] = {{" )?;

        let literals: Vec<String> = channels.iter()
            .map( |byte| format!( "0x{:02X}", byte ) )
            .collect();
        writeln!( self.output, "{}", literals.join( ", " ) )?;

        writeln!( self.output, "}};" )?;
        Ok( () )
    }

    pub fn flush( &mut self ) -> Result<()> {
        self.output.flush()?;
        Ok( () )
    }

    pub fn into_inner( self ) -> W {
        self.output
    }
}

fn bit_order_comment( bit_order: BitOrder ) -> &'static str {
    match bit_order {
        BitOrder::MsbFirst => "// Bit order: MSB first (leftmost pixel in bit 7)",
        BitOrder::LsbFirst => "// Bit order: LSB first (leftmost pixel in bit 0)",
    }
}

#[cfg( test )]
mod tests {
    use super::*;

    fn text( emitter: Emitter<Vec<u8>> ) -> String {
        String::from_utf8( emitter.into_inner() ).unwrap()
    }

    #[test]
    fn writes_preamble() {
        let mut emitter = Emitter::new( Vec::new() );
        emitter.begin( 12, 3, BitOrder::MsbFirst ).unwrap();

        let text = text( emitter );
        let lines: Vec<&str> = text.lines().collect();

        assert!( lines[0].starts_with( "// Last byte of each row" ) );
        assert_eq!( lines[1], "#define BMP_WIDTH  12" );
        assert_eq!( lines[2], "#define BMP_HEIGHT 3" );
        assert_eq!( lines[3], "// Bit order: MSB first (leftmost pixel in bit 7)" );
        assert_eq!( lines[5], "unsigned char bmp_data[] = {" );
    }

    #[test]
    fn bit_order_comment_follows_flag() {
        let mut emitter = Emitter::new( Vec::new() );
        emitter.begin( 8, 8, BitOrder::LsbFirst ).unwrap();

        assert!( text( emitter ).contains( "// Bit order: LSB first (leftmost pixel in bit 0)\n" ) );
    }

    #[test]
    fn rows_end_with_newline() {
        let mut emitter = Emitter::new( Vec::new() );
        emitter.row( &[ 0x0A, 0xFF, 0x00 ] ).unwrap();
        emitter.row( &[ 0xC0 ] ).unwrap();
        emitter.end().unwrap();

        assert_eq!( text( emitter ), "0x0A, 0xFF, 0x00,\n0xC0,\n};\n" );
    }

    #[test]
    fn palette_is_a_second_array() {
        let mut emitter = Emitter::new( Vec::new() );
        emitter.palette( &[ 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF ] ).unwrap();

        assert_eq!(
            text( emitter ),
            "\nunsigned char bmp_palette[] = {\n0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF\n};\n" );
    }
}
