mod common;

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::process::{
    Command,
    Output,
};

use common::{
    Bmp,
    data_lines,
};

/// A scratch directory unique to one test, removed on drop.
struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new( name: &str ) -> Scratch {
        let dir = env::temp_dir().join( format!( "bmp2c-{}-{}", name, std::process::id() ) );
        let _ = fs::remove_dir_all( &dir );
        fs::create_dir_all( &dir ).unwrap();
        Scratch { dir }
    }

    fn path<P: AsRef<std::path::Path>>( &self, file: P ) -> PathBuf {
        self.dir.join( file )
    }

    fn write_bmp( &self, file: &str, bmp: &Bmp ) -> PathBuf {
        let path = self.path( file );
        fs::write( &path, bmp.bytes() ).unwrap();
        path
    }
}

impl Drop for Scratch {
    fn drop( &mut self ) {
        let _ = fs::remove_dir_all( &self.dir );
    }
}

fn bmp2c( args: &[&OsStr] ) -> Output {
    Command::new( env!( "CARGO_BIN_EXE_bmp2c" ) )
        .args( args )
        .env_remove( "RUST_LOG" )
        .output()
        .unwrap()
}

fn sample() -> Bmp {
    Bmp::top_down( 8, &[ &[ 0b1111_0000 ], &[ 0b0000_1111 ] ] )
}

#[test]
fn converts_with_flags() {
    let scratch = Scratch::new( "flags" );
    let input = scratch.write_bmp( "in.bmp", &sample() );
    let output = scratch.path( "out.h" );

    let result = bmp2c( &[ input.as_os_str(), output.as_os_str(), OsStr::new( "/L" ), OsStr::new( "--pal" ) ] );

    assert_eq!( result.status.code(), Some( 0 ) );
    let stdout = String::from_utf8_lossy( &result.stdout );
    assert!( stdout.starts_with( "Converted " ) );
    assert!( stdout.trim_end().ends_with( "(8x2)" ) );

    let text = fs::read_to_string( &output ).unwrap();
    assert_eq!( data_lines( &text ), vec![ "0x0F,", "0xF0," ] );
    assert!( text.contains( "unsigned char bmp_palette[] = {" ) );
}

#[test]
fn help_touches_no_files() {
    let scratch = Scratch::new( "help" );
    let output = scratch.path( "out.h" );

    for flag in [ "-h", "--help", "/H", "/Help" ].iter() {
        let result = bmp2c( &[ OsStr::new( flag ), scratch.path( "missing.bmp" ).as_os_str(), output.as_os_str() ] );

        assert_eq!( result.status.code(), Some( 0 ) );
        assert!( String::from_utf8_lossy( &result.stdout ).contains( "Usage:" ) );
        assert!( !output.exists() );
    }
}

#[test]
fn unknown_flag_touches_no_files() {
    let scratch = Scratch::new( "unknown" );
    let input = scratch.write_bmp( "in.bmp", &sample() );
    let output = scratch.path( "out.h" );

    let result = bmp2c( &[ input.as_os_str(), output.as_os_str(), OsStr::new( "-x" ) ] );

    assert_eq!( result.status.code(), Some( 1 ) );
    assert!( String::from_utf8_lossy( &result.stderr ).contains( "Unsupported flag -x" ) );
    assert!( !output.exists() );
}

#[test]
fn missing_arguments() {
    let result = bmp2c( &[ OsStr::new( "only-one.bmp" ) ] );

    assert_eq!( result.status.code(), Some( 1 ) );
}

#[test]
fn missing_input_file() {
    let scratch = Scratch::new( "missing" );
    let output = scratch.path( "out.h" );

    let result = bmp2c( &[ scratch.path( "nope.bmp" ).as_os_str(), output.as_os_str() ] );

    assert_eq!( result.status.code(), Some( 1 ) );
    assert!( String::from_utf8_lossy( &result.stderr ).contains( "Failed to open input file" ) );
    assert!( !output.exists() );
}

#[test]
fn malformed_input_writes_no_output() {
    let scratch = Scratch::new( "malformed" );

    let mut wrong_magic = sample();
    wrong_magic.magic = *b"GI";
    let mut deep = sample();
    deep.bpp = 4;
    let mut compressed = sample();
    compressed.compression = 2;

    for ( i, bmp ) in [ wrong_magic, deep, compressed ].iter().enumerate() {
        let input = scratch.write_bmp( &format!( "bad{}.bmp", i ), bmp );
        let output = scratch.path( &format!( "bad{}.h", i ) );

        let result = bmp2c( &[ input.as_os_str(), output.as_os_str() ] );

        assert_eq!( result.status.code(), Some( 1 ) );
        assert!( !output.exists() );
    }
}

#[test]
fn late_palette_error_removes_partial_output() {
    let scratch = Scratch::new( "palette" );
    let input = scratch.write_bmp( "in.bmp", &sample().with_table( &[ 0; 64 ] ) );
    let output = scratch.path( "out.h" );

    let result = bmp2c( &[ input.as_os_str(), output.as_os_str(), OsStr::new( "-p" ) ] );

    assert_eq!( result.status.code(), Some( 1 ) );
    assert!( String::from_utf8_lossy( &result.stderr ).contains( "Unsupported palette size 16" ) );
    assert!( !output.exists() );
}

#[cfg( unix )]
#[test]
fn non_utf8_output_path() {
    use std::os::unix::ffi::OsStrExt;

    let scratch = Scratch::new( "non-utf8" );
    let input = scratch.write_bmp( "in.bmp", &sample() );
    let output = scratch.path( OsStr::from_bytes( b"out\xff.h" ) );

    let result = bmp2c( &[ input.as_os_str(), output.as_os_str() ] );

    assert_eq!( result.status.code(), Some( 0 ) );
    let text = fs::read_to_string( &output ).unwrap();
    assert_eq!( data_lines( &text ), vec![ "0xF0,", "0x0F," ] );
}
