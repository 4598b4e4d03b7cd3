//! # pack
//!
//! Repacks padded 1bpp rows into dense output bytes.
//!
//! Source bytes already hold 8 pixels each with the leftmost pixel in bit 7,
//! so packing is a byte copy plus an optional bit reversal. Bits past the
//! image width in the last byte of a row are cleared so the output never
//! carries the file's padding garbage.

/// Which end of an output byte holds the leftmost pixel.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub enum BitOrder {
    /// Leftmost pixel in bit 7, as stored in the bitmap.
    MsbFirst,
    /// Leftmost pixel in bit 0.
    LsbFirst,
}

impl Default for BitOrder {
    fn default() -> BitOrder {
        BitOrder::MsbFirst
    }
}

impl BitOrder {
    /// Puts a byte stored MSB-first into this bit order.
    pub fn apply( self, byte: u8 ) -> u8 {
        match self {
            BitOrder::MsbFirst => byte,
            BitOrder::LsbFirst => reverse_bits( byte ),
        }
    }
}

/// Swaps bit 7 with 0, 6 with 1, 5 with 2 and 4 with 3.
pub fn reverse_bits( byte: u8 ) -> u8 {
    byte.reverse_bits()
}

/// Output bytes per row for an image `width` pixels wide.
pub fn packed_len( width: u32 ) -> usize {
    ( width as usize + 7 ) / 8
}

/// Keeps the first `valid` visual columns of a byte in the given order.
fn column_mask( valid: u32, bit_order: BitOrder ) -> u8 {
    let mask = 0xFFu8 << ( 8 - valid );
    bit_order.apply( mask )
}

/// Appends the `packed_len( width )` output bytes of one padded row to `out`.
///
/// The trailing byte of a row whose width is not a multiple of 8 is masked
/// after the bit order is applied, so the cleared bits are always the
/// columns past the right edge of the image.
pub fn pack_row( row: &[u8], width: u32, bit_order: BitOrder, out: &mut Vec<u8> ) {
    let len = packed_len( width );
    out.reserve( len );

    for ( k, &byte ) in row[..len].iter().enumerate() {
        let byte = bit_order.apply( byte );
        let valid = width - ( k as u32 ) * 8;

        if valid < 8 {
            out.push( byte & column_mask( valid, bit_order ) );
        } else {
            out.push( byte );
        }
    }
}

#[cfg( test )]
mod tests {
    use super::*;

    fn pack( row: &[u8], width: u32, bit_order: BitOrder ) -> Vec<u8> {
        let mut out = Vec::new();
        pack_row( row, width, bit_order, &mut out );
        out
    }

    #[test]
    fn reverse_is_an_involution() {
        for byte in 0..=255u8 {
            assert_eq!( reverse_bits( reverse_bits( byte ) ), byte );
        }
        assert_eq!( reverse_bits( 0xA5 ), 0xA5 );
        assert_eq!( reverse_bits( 0x01 ), 0x80 );
        assert_eq!( reverse_bits( 0xF0 ), 0x0F );
    }

    #[test]
    fn output_length_ignores_padding() {
        let row = [ 0xFF; 8 ];

        assert_eq!( pack( &row, 0, BitOrder::MsbFirst ).len(), 0 );
        assert_eq!( pack( &row, 1, BitOrder::MsbFirst ).len(), 1 );
        assert_eq!( pack( &row, 8, BitOrder::MsbFirst ).len(), 1 );
        assert_eq!( pack( &row, 9, BitOrder::MsbFirst ).len(), 2 );
        assert_eq!( pack( &row, 33, BitOrder::MsbFirst ).len(), 5 );
    }

    #[test]
    fn full_bytes_pass_through() {
        let row = [ 0xF0, 0x0F, 0x12, 0x34 ];

        assert_eq!( pack( &row, 16, BitOrder::MsbFirst ), vec![ 0xF0, 0x0F ] );
        assert_eq!( pack( &row, 16, BitOrder::LsbFirst ), vec![ 0x0F, 0xF0 ] );
    }

    #[test]
    fn trailing_columns_are_cleared_msb_first() {
        let row = [ 0xFF; 4 ];

        assert_eq!( pack( &row, 10, BitOrder::MsbFirst ), vec![ 0xFF, 0xC0 ] );
        assert_eq!( pack( &row, 15, BitOrder::MsbFirst ), vec![ 0xFF, 0xFE ] );
        assert_eq!( pack( &row, 1, BitOrder::MsbFirst ), vec![ 0x80 ] );
    }

    #[test]
    fn trailing_columns_are_cleared_lsb_first() {
        let row = [ 0xFF; 4 ];

        assert_eq!( pack( &row, 10, BitOrder::LsbFirst ), vec![ 0xFF, 0x03 ] );
        assert_eq!( pack( &row, 15, BitOrder::LsbFirst ), vec![ 0xFF, 0x7F ] );
        assert_eq!( pack( &row, 1, BitOrder::LsbFirst ), vec![ 0x01 ] );
    }

    #[test]
    fn masking_keeps_visible_pixels() {
        // Columns 0..3 are 1010, the rest is padding.
        let row = [ 0b1010_1111, 0, 0, 0 ];

        assert_eq!( pack( &row, 4, BitOrder::MsbFirst ), vec![ 0b1010_0000 ] );
        assert_eq!( pack( &row, 4, BitOrder::LsbFirst ), vec![ 0b0000_0101 ] );
    }

    #[test]
    fn appends_to_existing_output() {
        let mut out = vec![ 0xAA ];
        pack_row( &[ 0x0F, 0, 0, 0 ], 8, BitOrder::MsbFirst, &mut out );

        assert_eq!( out, vec![ 0xAA, 0x0F ] );
    }
}
