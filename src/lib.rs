//! # bmp2c_rs
//!
//! Converts 1 bit per pixel *bmp* files into C byte arrays for firmware
//! (sprites, masks, glyph tables).
//!
//! Each row becomes `ceil(width / 8)` bytes, top row first, no matter how the
//! file stores its rows. Bits past the right edge of the image are cleared.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use bmp2c_rs::{
//!     Result,
//!     Options,
//!     BitOrder,
//! };
//!
//! fn main() -> Result<()> {
//!     let input = BufReader::new( File::open( "glyphs.bmp" )? );
//!     let output = File::create( "glyphs.h" )?;
//!
//!     let options = Options { bit_order: BitOrder::LsbFirst, emit_palette: true };
//!     let header = bmp2c_rs::convert( input, output, &options )?;
//!
//!     println!( "{}x{}", header.width(), header.height() );
//!     Ok( () )
//! }
//! ```
//!
extern crate byteorder;
#[macro_use]
extern crate log;

pub mod args;
pub mod emit;
pub mod error;
pub mod header;
pub mod pack;
pub mod palette;
pub mod rows;

use std::io::{
    Read,
    Seek,
    SeekFrom,
    Write,
};

pub use crate::emit::Emitter;
pub use crate::error::{
    Error,
    FormatError,
    Result,
};
pub use crate::header::{
    Geometry,
    Header,
};
pub use crate::pack::BitOrder;
pub use crate::palette::Palette;
pub use crate::rows::RowReader;

/// Conversion flags. Bit order and palette emission are independent.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Default )]
pub struct Options {
    pub bit_order: BitOrder,
    pub emit_palette: bool,
}

/// A validated 1bpp bitmap waiting to be written out.
///
/// Creating one reads and checks the headers, so format errors surface
/// before any output exists.
pub struct Converter<R> {
    input: R,
    header: Header,
}

impl<R: Read + Seek> Converter<R> {
    pub fn new( mut input: R ) -> Result<Converter<R>> {
        input.seek( SeekFrom::Start( 0 ) )?;
        let header = Header::from_reader( &mut input )?;

        debug!( "geometry {:?}", header.geometry() );

        Ok( Converter { input, header } )
    }

    pub fn header( &self ) -> &Header {
        &self.header
    }

    /// Writes the whole C header for this bitmap to `output`.
    pub fn write_to<W: Write>( &mut self, output: W, options: &Options ) -> Result<()> {
        let header = self.header;
        let geometry = header.geometry();
        let mut emitter = Emitter::new( output );

        emitter.begin( geometry.width, geometry.height, options.bit_order )?;

        {
            let mut rows = RowReader::new( &mut self.input, header.pixel_offset(), geometry );
            let mut packed = Vec::with_capacity( pack::packed_len( geometry.width ) );

            for row in 0..geometry.height {
                packed.clear();
                pack::pack_row( rows.read_row( row )?, geometry.width, options.bit_order, &mut packed );
                emitter.row( &packed )?;
            }
        }

        emitter.end()?;

        if options.emit_palette {
            let palette = Palette::from_reader( &mut self.input, &header )?;
            emitter.palette( &palette.channels() )?;
        }

        emitter.flush()?;

        info!( "converted {}x{} image, {:?}, palette {}",
            geometry.width, geometry.height, options.bit_order, options.emit_palette );

        Ok( () )
    }
}

/// Reads a 1bpp bitmap from `input` and writes its C header to `output`.
///
/// Returns the parsed header so callers can report the image size.
pub fn convert<R, W>( input: R, output: W, options: &Options ) -> Result<Header>
    where R: Read + Seek, W: Write {

    let mut converter = Converter::new( input )?;
    converter.write_to( output, options )?;
    Ok( *converter.header() )
}
