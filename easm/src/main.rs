#[macro_use]
extern crate clap;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Arg;
use eobj::Format;

#[derive(Debug)]
enum IOErrorContext {
    ReadInput,
    WriteOutput,
}

#[derive(Debug)]
enum Error {
    Io(std::io::Error, IOErrorContext, PathBuf),
    Asm(Vec<easm::Error>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err, context, path) => writeln!(
                f,
                "ERROR: {} file \"{}\" failed: {}",
                match context {
                    IOErrorContext::ReadInput => "reading input",
                    IOErrorContext::WriteOutput => "writing output",
                },
                path.display(),
                err
            ),
            Error::Asm(errors) => {
                for err in errors {
                    writeln!(f, "ERROR: {}", err)?;
                }
                Ok(())
            }
        }
    }
}

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the assembly source file to use")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .takes_value(true)
                .value_name("FORMAT")
                .possible_values(&["bin", "hex", "srec"])
                .default_value("bin")
                .help("Sets the object file format to write"),
        )
        .get_matches();

    let input = matches.value_of("INPUT").unwrap();
    let format = match matches.value_of("format").unwrap() {
        "hex" => Format::Hex,
        "srec" => Format::Srec,
        _ => Format::Bin,
    };

    if let Err(err) = easm(input, format) {
        eprint!("{}", err);
        std::process::exit(1);
    }
}

fn easm(input: &str, format: Format) -> Result<(), Error> {
    let input_path = Path::new(input);

    let source = fs::read_to_string(input_path)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadInput, input_path.to_owned()))?;

    let output = easm::assemble(&source).map_err(Error::Asm)?;

    let object_path = input_path.with_extension(format.extension());
    let object = eobj::generate(format, &output.image);
    let object_len = object.len();
    fs::write(&object_path, object)
        .map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, object_path.clone()))?;

    match format {
        Format::Hex => println!("Intel HEX: {}", object_path.display()),
        Format::Srec => println!("Motorola SREC: {}", object_path.display()),
        Format::Bin => println!(
            "Binary:  {} ({} bytes)",
            object_path.display(),
            object_len
        ),
    }

    let listing_path = input_path.with_extension("lst");
    fs::write(&listing_path, easm::render_listing(&output.listing))
        .map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, listing_path.clone()))?;
    println!("Listing: {}", listing_path.display());

    Ok(())
}
