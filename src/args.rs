//! # args
//!
//! Command line recognition for the `bmp2c` binary.
//!
//! Every flag has four spellings: `-x`, `--long`, `/x` and `/long`. The
//! slash forms ignore case.
use std::ffi::OsStr;
use std::path::PathBuf;

use crate::error::{
    Error,
    Result,
};
use crate::pack::BitOrder;
use crate::Options;

/// A flag and its short and long names.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct Flag {
    pub short: &'static str,
    pub long: &'static str,
}

pub const HELP: Flag = Flag { short: "h", long: "help" };
pub const LSB_FIRST: Flag = Flag { short: "l", long: "lsb" };
pub const PALETTE: Flag = Flag { short: "p", long: "pal" };

impl Flag {
    /// All accepted spellings, dash forms first.
    pub fn spellings( &self ) -> [String; 4] {
        [
            format!( "-{}", self.short ),
            format!( "--{}", self.long ),
            format!( "/{}", self.short ),
            format!( "/{}", self.long ),
        ]
    }

    pub fn matches( &self, arg: &str ) -> bool {
        self.spellings().iter().any( |spelling| {
            if spelling.starts_with( '/' ) {
                spelling.eq_ignore_ascii_case( arg )
            } else {
                spelling == arg
            }
        } )
    }
}

/// What the binary has been asked to do.
#[derive( Debug, Clone, PartialEq, Eq )]
pub enum Command {
    Help,
    Convert {
        input: PathBuf,
        output: PathBuf,
        options: Options,
    },
}

/// Parses the arguments that follow the program name.
///
/// A help flag in first position wins over everything else, as does a help
/// flag among the trailing flags. Positionals are kept as raw OS strings;
/// a flag that is not valid UTF-8 is unsupported. Nothing here touches the
/// file system.
pub fn parse<S: AsRef<OsStr>>( args: &[S] ) -> Result<Command> {
    let args: Vec<&OsStr> = args.iter().map( |arg| arg.as_ref() ).collect();

    match args.first().and_then( |first| first.to_str() ) {
        Some( first ) if HELP.matches( first ) => return Ok( Command::Help ),
        _ => {},
    }

    if args.len() < 2 {
        return Err( Error::argument( "Missing input or output file" ) );
    }

    let mut options = Options::default();
    for &arg in &args[2..] {
        match arg.to_str() {
            Some( flag ) if HELP.matches( flag ) => return Ok( Command::Help ),
            Some( flag ) if LSB_FIRST.matches( flag ) => options.bit_order = BitOrder::LsbFirst,
            Some( flag ) if PALETTE.matches( flag ) => options.emit_palette = true,
            _ => return Err( Error::argument(
                format!( "Unsupported flag {}", arg.to_string_lossy() ) ) ),
        }
    }

    Ok( Command::Convert {
        input: PathBuf::from( args[0] ),
        output: PathBuf::from( args[1] ),
        options,
    } )
}

pub fn usage( program: &str ) -> String {
    format!(
"Convert a 1bpp BMP file into a C byte array.

Usage: {} <input.bmp> <output.h> [flags]

Flags (-x, --long, /x or /long):
  l, lsb    leftmost pixel in bit 0 of each byte (default: bit 7)
  p, pal    also emit the 2-color palette as BGR bytes
  h, help   print this help
", program )
}

#[cfg( test )]
mod tests {
    use super::*;

    fn convert( args: &[&str] ) -> Options {
        match parse( args ).unwrap() {
            Command::Convert { options, .. } => options,
            other => panic!( "unexpected command {:?}", other ),
        }
    }

    #[test]
    fn every_spelling_matches() {
        for arg in [ "-l", "--lsb", "/l", "/lsb", "/L", "/LSB", "/Lsb" ].iter() {
            assert!( LSB_FIRST.matches( arg ), "{}", arg );
        }
        for arg in [ "-L", "--LSB", "-lsb", "--l", "lsb", "l", "/ls", "-p" ].iter() {
            assert!( !LSB_FIRST.matches( arg ), "{}", arg );
        }
    }

    #[test]
    fn positionals_only_use_defaults() {
        match parse( &[ "in.bmp", "out.h" ] ).unwrap() {
            Command::Convert { input, output, options } => {
                assert_eq!( input, PathBuf::from( "in.bmp" ) );
                assert_eq!( output, PathBuf::from( "out.h" ) );
                assert_eq!( options, Options::default() );
                assert_eq!( options.bit_order, BitOrder::MsbFirst );
                assert!( !options.emit_palette );
            },
            other => panic!( "unexpected command {:?}", other ),
        }
    }

    #[test]
    fn flags_are_independent_of_order() {
        let a = convert( &[ "in.bmp", "out.h", "/PAL", "-l" ] );
        let b = convert( &[ "in.bmp", "out.h", "--lsb", "-p" ] );

        assert_eq!( a, b );
        assert_eq!( a.bit_order, BitOrder::LsbFirst );
        assert!( a.emit_palette );

        let palette_only = convert( &[ "in.bmp", "out.h", "/p" ] );
        assert_eq!( palette_only.bit_order, BitOrder::MsbFirst );
        assert!( palette_only.emit_palette );
    }

    #[test]
    fn help_first_wins() {
        assert_eq!( parse( &[ "-h" ] ).unwrap(), Command::Help );
        assert_eq!( parse( &[ "/HELP", "in.bmp", "out.h", "-x" ] ).unwrap(), Command::Help );
        assert_eq!( parse( &[ "in.bmp", "out.h", "--help" ] ).unwrap(), Command::Help );
    }

    #[test]
    fn missing_positionals_fail() {
        let empty: [&str; 0] = [];

        for &args in [ &empty[..], &[ "in.bmp" ][..] ].iter() {
            match parse( args ) {
                Err( Error::Argument( _ ) ) => {},
                other => panic!( "unexpected result {:?}", other ),
            }
        }
    }

    #[test]
    fn unknown_flag_fails() {
        match parse( &[ "in.bmp", "out.h", "-l", "--msb" ] ) {
            Err( Error::Argument( message ) ) => assert_eq!( message, "Unsupported flag --msb" ),
            other => panic!( "unexpected result {:?}", other ),
        }
    }

    #[cfg( unix )]
    #[test]
    fn positionals_may_be_any_os_string() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let output = OsString::from_vec( b"out\xff.h".to_vec() );
        let args = [ OsString::from( "in.bmp" ), output.clone(), OsString::from( "-p" ) ];

        match parse( &args ).unwrap() {
            Command::Convert { output: path, options, .. } => {
                assert_eq!( path.as_os_str(), output.as_os_str() );
                assert!( options.emit_palette );
            },
            other => panic!( "unexpected command {:?}", other ),
        }

        let bad_flag = [ OsString::from( "in.bmp" ), OsString::from( "out.h" ), OsString::from_vec( b"-\xff".to_vec() ) ];
        match parse( &bad_flag ) {
            Err( Error::Argument( message ) ) => assert!( message.starts_with( "Unsupported flag -" ) ),
            other => panic!( "unexpected result {:?}", other ),
        }
    }

    #[test]
    fn usage_names_the_program() {
        assert!( usage( "bmp2c" ).contains( "Usage: bmp2c <input.bmp> <output.h> [flags]" ) );
    }
}
