//! # error
//!
//! Error types shared by every stage of the conversion.
use std::io;
use std::result;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = result::Result<T, Error>;

/// Reasons a bitmap file is rejected.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Error )]
pub enum FormatError {
    /// The file does not start with the `BM` tag.
    #[error( "Not a BMP file (file type 0x{0:04X})" )]
    NotBmp( u16 ),

    /// Only 1 bit per pixel is supported.
    #[error( "BMP is not 1bpp ({0} bits per pixel)" )]
    UnsupportedDepth( u16 ),

    /// Only uncompressed pixel data is supported.
    #[error( "Unsupported compression 0x{0:X}" )]
    UnsupportedCompression( u32 ),

    /// The color table holds something other than 0 or 2 entries.
    #[error( "Unsupported palette size {0}, expected 0 or 2 colors" )]
    UnsupportedPaletteSize( u32 ),

    /// The pixel data offset leaves no room for a 2-entry color table.
    #[error( "Pixel data offset {0} leaves no room for the color table" )]
    PaletteOutOfBounds( u32 ),
}

/// Every error the converter can report. All of them are terminal.
#[derive( Debug, Error )]
pub enum Error {
    /// Bad command line: missing positionals or an unknown flag.
    #[error( "{0}" )]
    Argument( String ),

    /// Opening, seeking, reading or writing failed.
    #[error( "{0}" )]
    Io( #[from] io::Error ),

    /// The input is not a bitmap this tool can convert.
    #[error( "{0}" )]
    Format( #[from] FormatError ),
}

impl Error {
    pub( crate ) fn argument<S>( message: S ) -> Error
        where S: Into<String> {

        Error::Argument( message.into() )
    }
}

#[cfg( test )]
mod tests {
    use super::*;

    #[test]
    fn format_errors_convert_into_error() {
        let error: Error = FormatError::UnsupportedDepth( 8 ).into();

        match error {
            Error::Format( FormatError::UnsupportedDepth( 8 ) ) => {},
            other => panic!( "unexpected error {:?}", other ),
        }
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            FormatError::NotBmp( 0x5089 ).to_string(),
            "Not a BMP file (file type 0x5089)" );
        assert_eq!(
            Error::argument( "Unsupported flag -x" ).to_string(),
            "Unsupported flag -x" );
    }
}
