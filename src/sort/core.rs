/// Text driver for fhsort.
///
/// Reads newline- (or NUL-) separated integers from files or stdin into one
/// contiguous buffer, parses them, sorts them with a `SortEngine`, and writes
/// one value per line. `--indexed` pairs each value with its input line number
/// and writes `key<TAB>line`.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::num::ParseIntError;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use super::parse::{ParseError, parse_indexed, parse_keys};
use crate::common::io::{FileData, read_file, read_stdin};
use crate::common::io_error_msg;
use crate::element::{Element, IndexedElement, SortKey};
use crate::engine::{EngineConfig, EngineError, Gather, SortEngine};
use crate::micro::Algorithm;

/// Output writer enum to avoid Box<dyn Write> vtable dispatch overhead.
enum SortOutput<'a> {
    Stdout(BufWriter<io::StdoutLock<'a>>),
    File(BufWriter<File>),
}

impl Write for SortOutput<'_> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SortOutput::Stdout(w) => w.write(buf),
            SortOutput::File(w) => w.write(buf),
        }
    }
    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            SortOutput::Stdout(w) => w.write_all(buf),
            SortOutput::File(w) => w.write_all(buf),
        }
    }
    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        match self {
            SortOutput::Stdout(w) => w.flush(),
            SortOutput::File(w) => w.flush(),
        }
    }
}

/// 4MB output buffer: fewer flushes on large inputs.
const OUTPUT_BUF_SIZE: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub enum CheckMode {
    None,
    Diagnose,
    Quiet,
}

/// Configuration for one fhsort run.
#[derive(Debug, Clone)]
pub struct SortConfig {
    pub engine: EngineConfig,
    pub gather: Gather,
    pub algorithm: Algorithm,
    /// Parse values as `u32` instead of `i32`.
    pub unsigned: bool,
    pub indexed: bool,
    pub check: CheckMode,
    pub output_file: Option<String>,
    pub zero_terminated: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            engine: EngineConfig::default(),
            gather: Gather::default(),
            algorithm: Algorithm::default(),
            unsigned: false,
            indexed: false,
            check: CheckMode::None,
            output_file: None,
            zero_terminated: false,
        }
    }
}

impl SortConfig {
    fn delimiter(&self) -> u8 {
        if self.zero_terminated { b'\0' } else { b'\n' }
    }
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("open failed: {path}: {}", io_error_msg(.source))]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{}", io_error_msg(.0))]
    Io(#[from] io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// What a run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Sorted { values: usize },
    InOrder { values: usize },
    /// First value smaller than its predecessor; `line` is 1-based.
    Disorder { line: usize, value: i64 },
}

/// Read every input into one buffer. A single regular file is read (or
/// mapped) directly; otherwise inputs are concatenated, with a delimiter added
/// after any input that lacks a trailing one.
pub fn read_all_input(inputs: &[String], delimiter: u8) -> Result<FileData, DriverError> {
    let open = |path: &str| {
        read_file(Path::new(path)).map_err(|source| DriverError::Open {
            path: path.to_string(),
            source,
        })
    };

    if inputs.len() == 1 && inputs[0] != "-" {
        return open(&inputs[0]);
    }

    let mut data = Vec::new();
    for input in inputs {
        if input == "-" {
            data.extend_from_slice(&read_stdin()?);
        } else {
            data.extend_from_slice(&open(input)?);
        }
        if data.last().is_some_and(|&b| b != delimiter) {
            data.push(delimiter);
        }
    }
    Ok(FileData::Owned(data))
}

/// Scan parsed values for the first out-of-order one.
pub fn check_sorted<K>(data: &[u8], delimiter: u8) -> Result<Outcome, ParseError>
where
    K: SortKey + FromStr<Err = ParseIntError>,
{
    let values = parse_indexed::<K>(data, delimiter)?;
    let disorder = values.windows(2).find(|w| w[0].key > w[1].key);
    Ok(match disorder {
        Some(w) => Outcome::Disorder {
            line: w[1].payload as usize + 1,
            value: w[1].key.to_i64(),
        },
        None => Outcome::InOrder {
            values: values.len(),
        },
    })
}

fn sort_keys<K>(data: &[u8], config: &SortConfig, engine: &SortEngine) -> Result<Vec<K>, ParseError>
where
    K: Element + FromStr<Err = ParseIntError>,
{
    let mut values = parse_keys::<K>(data, config.delimiter())?;
    engine.sort(&mut values, config.gather, config.algorithm);
    Ok(values)
}

fn sort_pairs<K>(
    data: &[u8],
    config: &SortConfig,
    engine: &SortEngine,
) -> Result<Vec<IndexedElement<K>>, ParseError>
where
    K: FromStr<Err = ParseIntError>,
    IndexedElement<K>: Element,
{
    let mut values = parse_indexed::<K>(data, config.delimiter())?;
    engine.sort(&mut values, config.gather, config.algorithm);
    Ok(values)
}

/// Write one value per line.
pub fn write_keys<K: itoa::Integer + Copy>(
    values: &[K],
    out: &mut impl Write,
    terminator: u8,
) -> io::Result<()> {
    let mut buf = itoa::Buffer::new();
    for &v in values {
        out.write_all(buf.format(v).as_bytes())?;
        out.write_all(&[terminator])?;
    }
    Ok(())
}

/// Write `key<TAB>payload` per line.
pub fn write_pairs<K: itoa::Integer + Copy>(
    values: &[IndexedElement<K>],
    out: &mut impl Write,
    terminator: u8,
) -> io::Result<()> {
    let mut key_buf = itoa::Buffer::new();
    let mut payload_buf = itoa::Buffer::new();
    for p in values {
        out.write_all(key_buf.format(p.key).as_bytes())?;
        out.write_all(b"\t")?;
        out.write_all(payload_buf.format(p.payload).as_bytes())?;
        out.write_all(&[terminator])?;
    }
    Ok(())
}

/// Open the output only after input is fully read and sorted, so `-o` may
/// name one of the inputs and a parse error leaves it untouched.
fn emit(
    config: &SortConfig,
    write: impl FnOnce(&mut SortOutput<'_>) -> io::Result<()>,
) -> Result<(), DriverError> {
    let stdout = io::stdout();
    let mut writer = match config.output_file {
        Some(ref path) => {
            let file = File::create(path).map_err(|source| DriverError::Open {
                path: path.clone(),
                source,
            })?;
            SortOutput::File(BufWriter::with_capacity(OUTPUT_BUF_SIZE, file))
        }
        None => SortOutput::Stdout(BufWriter::with_capacity(OUTPUT_BUF_SIZE, stdout.lock())),
    };
    write(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Main driver entry point: check or sort `inputs` according to `config`.
pub fn sort_and_output(inputs: &[String], config: &SortConfig) -> Result<Outcome, DriverError> {
    let delimiter = config.delimiter();
    let buffer = read_all_input(inputs, delimiter)?;
    let data: &[u8] = &buffer;
    debug!("read {} bytes from {} input(s)", data.len(), inputs.len());

    if config.check != CheckMode::None {
        let outcome = if config.unsigned {
            check_sorted::<u32>(data, delimiter)?
        } else {
            check_sorted::<i32>(data, delimiter)?
        };
        return Ok(outcome);
    }

    let engine = SortEngine::new(config.engine.clone())?;
    let values = match (config.unsigned, config.indexed) {
        (false, false) => {
            let v = sort_keys::<i32>(data, config, &engine)?;
            emit(config, |w| write_keys(&v, w, delimiter))?;
            v.len()
        }
        (true, false) => {
            let v = sort_keys::<u32>(data, config, &engine)?;
            emit(config, |w| write_keys(&v, w, delimiter))?;
            v.len()
        }
        (false, true) => {
            let v = sort_pairs::<i32>(data, config, &engine)?;
            emit(config, |w| write_pairs(&v, w, delimiter))?;
            v.len()
        }
        (true, true) => {
            let v = sort_pairs::<u32>(data, config, &engine)?;
            emit(config, |w| write_pairs(&v, w, delimiter))?;
            v.len()
        }
    };
    Ok(Outcome::Sorted { values })
}
