//! Loader and run loop for EDU-CPU program images.
//!
//! Programs arrive as object files ([`load_programs`]) or as one image
//! assembled in-process; [`execute`] drives a [`Processor`] to
//! completion, streaming output-port bytes to one writer and `--trace`
//! lines to another. The binary in this crate wires those to stdout and
//! stderr.

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use ecpu::constants::DEFAULT_MAX_CYCLES;
use ecpu::{Fault, FaultKind, Processor, Reg, StepResult};
use eobj::{Format, Image};

#[derive(Debug, Error)]
pub enum Error {
    #[error("loading \"{path}\" failed: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: eobj::Error,
    },
    #[error(
        "raw binary format ({path}) cannot be used when loading multiple files; use .hex or .srec"
    )]
    RawBinaryOverlay { path: PathBuf },
}

/// A program file parsed into an address map.
#[derive(Debug)]
pub struct LoadedProgram {
    pub path: PathBuf,
    pub format: Format,
    pub image: Image,
}

/// Reads and parses program files. A raw binary image claims the whole
/// address range from zero, so it is only allowed on its own.
pub fn load_programs(paths: &[&str]) -> Result<Vec<LoadedProgram>, Error> {
    let multiple = paths.len() > 1;
    let mut programs = Vec::with_capacity(paths.len());

    for path in paths {
        let (format, image) = eobj::read_file(path).map_err(|source| Error::Load {
            path: PathBuf::from(path),
            source,
        })?;
        if multiple && format == Format::Bin {
            return Err(Error::RawBinaryOverlay {
                path: PathBuf::from(path),
            });
        }
        programs.push(LoadedProgram {
            path: PathBuf::from(path),
            format,
            image,
        });
    }

    Ok(programs)
}

/// Describes addresses written by more than one file, one message per
/// conflicting file pair, at most eight addresses spelled out. Empty when
/// the images are disjoint.
pub fn overlap_diagnostics(programs: &[LoadedProgram]) -> Vec<String> {
    let mut messages = Vec::new();

    for (i, first) in programs.iter().enumerate() {
        for second in &programs[i + 1..] {
            let common = first.image.common_addresses(&second.image);
            if common.is_empty() {
                continue;
            }

            let shown: Vec<String> = common.iter().take(8).map(|a| format!("0x{:02X}", a)).collect();
            let suffix = if common.len() > 8 {
                format!(", ... ({} addresses total)", common.len())
            } else {
                String::new()
            };
            messages.push(format!(
                "Overlap between {} and {} at {}{}",
                first.path.display(),
                second.path.display(),
                shown.join(", "),
                suffix
            ));
        }
    }

    messages
}

/// Builds a processor with the images applied in order; later images
/// overlay earlier ones.
pub fn load_processor<'a, I: IntoIterator<Item = &'a Image>>(images: I) -> Processor {
    let mut processor = Processor::new();
    for image in images {
        for (addr, value) in image.iter() {
            processor.load(addr, value);
        }
    }
    processor
}

pub struct RunOptions {
    pub trace: bool,
    pub max_cycles: u64,
}

impl Default for RunOptions {
    fn default() -> RunOptions {
        RunOptions {
            trace: false,
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

/// One `--trace` line: the machine state just before the next
/// instruction executes.
pub fn trace_line(processor: &Processor) -> String {
    let pc = processor.pc();
    format!(
        "  PC={:02X} OP={:02X}  A={:02X} R0={:02X} R1={:02X}  SP={} [{}{}]",
        pc,
        processor.memory().read(pc),
        processor.register(Reg::A),
        processor.register(Reg::R0),
        processor.register(Reg::R1),
        processor.sp(),
        if processor.zero() { "Z" } else { "." },
        if processor.carry() { "C" } else { "." },
    )
}

/// Runs the processor until it halts, faults or hits the cycle cap.
/// Output-port bytes stream to `out` as they are produced; trace lines
/// and the halt summary go to `err`.
pub fn execute<W: Write, E: Write>(
    processor: &mut Processor,
    options: &RunOptions,
    out: &mut W,
    err: &mut E,
) -> Result<u64, Fault> {
    let mut written = 0;

    let result = loop {
        if processor.halted() {
            break Ok(processor.cycles());
        }
        if processor.cycles() >= options.max_cycles {
            break Err(Fault {
                kind: FaultKind::CycleLimit(options.max_cycles),
                addr: processor.pc(),
                cycle: processor.cycles(),
            });
        }

        if options.trace {
            let _ = writeln!(err, "{}", trace_line(processor));
        }

        let step = processor.step();

        let output = processor.output();
        if output.len() > written {
            let _ = out.write_all(&output[written..]);
            let _ = out.flush();
            written = output.len();
        }

        match step {
            Ok(StepResult::Running) => {}
            Ok(StepResult::Done) => break Ok(processor.cycles()),
            Err(fault) => break Err(fault),
        }
    };

    if options.trace {
        if let Ok(cycles) = result {
            let _ = writeln!(err, "\nHalted after {} cycles.", cycles);
        }
    }

    result
}
