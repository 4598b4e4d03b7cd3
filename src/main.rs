extern crate bmp2c_rs;
extern crate env_logger;
#[macro_use]
extern crate log;

use std::env;
use std::ffi::OsString;
use std::fs::{
    self,
    File,
};
use std::io::{
    self,
    BufReader,
    BufWriter,
};
use std::path::Path;
use std::process;

use bmp2c_rs::args::{
    self,
    Command,
};
use bmp2c_rs::{
    Converter,
    Options,
    Result,
};

fn open_error( what: &str, path: &Path, error: io::Error ) -> io::Error {
    io::Error::new( error.kind(), format!( "Failed to open {} {}: {}", what, path.display(), error ) )
}

fn convert_files( input_path: &Path, output_path: &Path, options: &Options ) -> Result<()> {
    let input = File::open( input_path )
        .map_err( |e| open_error( "input file", input_path, e ) )?;

    // Headers are validated before the output file exists.
    let mut converter = Converter::new( BufReader::new( input ) )?;

    let output = File::create( output_path )
        .map_err( |e| open_error( "output file", output_path, e ) )?;
    let mut output = BufWriter::new( output );

    if let Err( error ) = converter.write_to( &mut output, options ) {
        drop( output );
        if let Err( remove_error ) = fs::remove_file( output_path ) {
            warn!( "could not remove partial output {}: {}", output_path.display(), remove_error );
        }
        return Err( error );
    }

    let header = converter.header();
    println!( "Converted {} -> {} ({}x{})",
        input_path.display(), output_path.display(), header.width(), header.height() );

    Ok( () )
}

fn run( argv: &[OsString] ) -> Result<()> {
    let program = argv.first()
        .map( |arg| arg.to_string_lossy().into_owned() )
        .unwrap_or_else( || String::from( "bmp2c" ) );

    match args::parse( &argv[argv.len().min( 1 )..] ) {
        Ok( Command::Help ) => {
            print!( "{}", args::usage( &program ) );
            Ok( () )
        },
        Ok( Command::Convert { input, output, options } ) => {
            debug!( "{} -> {} with {:?}", input.display(), output.display(), options );
            convert_files( &input, &output, &options )
        },
        Err( error ) => {
            eprint!( "{}", args::usage( &program ) );
            Err( error )
        },
    }
}

fn main() {
    env_logger::Builder::from_env( env_logger::Env::default().default_filter_or( "warn" ) ).init();

    let argv: Vec<OsString> = env::args_os().collect();

    if let Err( error ) = run( &argv ) {
        eprintln!( "error: {}", error );
        process::exit( 1 );
    }
}
