#[macro_use]
extern crate clap;

use std::fs;
use std::io;
use std::process;

use clap::{Arg, ArgGroup};
use eobj::Image;

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("PROGRAM")
                .help("Program files to load (.bin, .hex or .srec)")
                .multiple(true)
                .index(1),
        )
        .arg(
            Arg::with_name("assembly")
                .short("a")
                .long("assembly")
                .takes_value(true)
                .value_name("ASSEMBLY")
                .help("Assembles and runs a source file directly"),
        )
        .arg(
            Arg::with_name("trace")
                .long("trace")
                .help("Prints CPU state before each instruction"),
        )
        .arg(
            Arg::with_name("max_cycles")
                .long("max-cycles")
                .takes_value(true)
                .value_name("N")
                .default_value("65536")
                .help("Maximum number of cycles to execute"),
        )
        .group(
            ArgGroup::with_name("input")
                .args(&["PROGRAM", "assembly"])
                .required(true),
        )
        .get_matches();

    let max_cycles = value_t!(matches.value_of("max_cycles"), u64).unwrap_or_else(|e| e.exit());

    let images: Vec<Image> = if let Some(path) = matches.value_of("assembly") {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("ERROR: reading \"{}\" failed: {}", path, err);
                process::exit(1);
            }
        };
        match easm::assemble(&source) {
            Ok(output) => vec![output.image],
            Err(errors) => {
                for err in errors {
                    eprintln!("ERROR: {}", err);
                }
                process::exit(1);
            }
        }
    } else {
        let paths: Vec<&str> = matches.values_of("PROGRAM").unwrap().collect();
        let programs = match erun::load_programs(&paths) {
            Ok(programs) => programs,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                process::exit(1);
            }
        };

        let overlaps = erun::overlap_diagnostics(&programs);
        if !overlaps.is_empty() {
            for message in overlaps {
                eprintln!("ERROR: {}", message);
            }
            process::exit(1);
        }

        programs.into_iter().map(|p| p.image).collect()
    };

    let mut processor = erun::load_processor(images.iter());
    let options = erun::RunOptions {
        trace: matches.is_present("trace"),
        max_cycles,
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    let result = erun::execute(
        &mut processor,
        &options,
        &mut stdout.lock(),
        &mut stderr.lock(),
    );

    if let Err(fault) = result {
        eprintln!("\nRuntime error: {}", fault);
        process::exit(1);
    }
}
