use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use huffzip::huff_tree::FrequencyTable;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Mode {
  Compress,
  Decompress,
}

#[derive(Debug, PartialEq, Eq)]
struct Opts {
  mode: Mode,
  infile: PathBuf,
}

fn print_usage(prog_name: &str) {
  println!("Usage: {} [-d] <filename>", prog_name);
  println!(
    r#"Compress or decompress a file using Huffman coding.
    Compressing foo.txt writes foo.bin next to it; decompressing (-d) foo.bin
    writes foo.txt. Set RUST_LOG=debug for per-stage details."#
  );
}

fn try_parse_args(args: &[String]) -> Option<Opts> {
  let (mode, infile) = match args {
    [_, file] if file != "-d" => (Mode::Compress, file),
    [_, flag, file] if flag == "-d" && file != "-d" => (Mode::Decompress, file),
    [_, file, flag] if flag == "-d" && file != "-d" => (Mode::Decompress, file),
    _ => return None,
  };
  Some(Opts {
    mode,
    infile: PathBuf::from(infile),
  })
}

/// The output sits next to the input, named after everything in the input's
/// file name up to its first dot.
fn derive_output_path(input: &Path, mode: Mode) -> PathBuf {
  let ext = match mode {
    Mode::Compress => "bin",
    Mode::Decompress => "txt",
  };
  let name = input
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();
  let stem = match name.find('.') {
    Some(0) | None => &name[..],
    Some(i) => &name[..i],
  };
  input.with_file_name(format!("{}.{}", stem, ext))
}

fn compress_file(bytes: &[u8]) -> Vec<u8> {
  let start = Instant::now();
  let packed = match huffzip::compress(bytes) {
    Ok(p) => p,
    Err(e) => {
      println!("{}", e);
      process::exit(1);
    }
  };
  log::debug!("compress took {:?}", start.elapsed());

  if bytes.is_empty() {
    println!("Input was empty; compression ratio is not applicable");
  } else {
    let ratio = packed.len() as f64 / bytes.len() as f64 * 100.0;
    let entropy = FrequencyTable::build(bytes).entropy();
    let achieved = (packed.len() * 8) as f64 / bytes.len() as f64;
    println!(
      "File compressed to {:.2}% of its original size ({} -> {} bytes)",
      ratio,
      bytes.len(),
      packed.len()
    );
    println!(
      "Input entropy is {:.3} bits/byte, container uses {:.3} bits/byte",
      entropy, achieved
    );
  }
  packed
}

fn decompress_file(bytes: &[u8]) -> Vec<u8> {
  let start = Instant::now();
  let unpacked = match huffzip::decompress(bytes) {
    Ok(u) => u,
    Err(e) => {
      println!("{}", e);
      process::exit(1);
    }
  };
  log::debug!("decompress took {:?}", start.elapsed());
  unpacked
}

fn main() {
  let args: Vec<String> = env::args().collect();

  let opts = match try_parse_args(&args) {
    Some(o) => o,
    None => {
      print_usage(&args[0]);
      process::exit(1);
    }
  };

  pretty_env_logger::init();

  let outfile = derive_output_path(&opts.infile, opts.mode);
  if outfile == opts.infile {
    println!(
      "Refusing to overwrite {}: output name is the same as the input",
      outfile.display()
    );
    process::exit(1);
  }

  let start = Instant::now();
  let bytes = std::fs::read(&opts.infile)
    .unwrap_or_else(|_| panic!("Could not open input file {}", opts.infile.display()));

  let out = match opts.mode {
    Mode::Compress => compress_file(&bytes),
    Mode::Decompress => decompress_file(&bytes),
  };

  std::fs::write(&outfile, out)
    .unwrap_or_else(|_| panic!("Could not write output file {}", outfile.display()));

  let verb = match opts.mode {
    Mode::Compress => "compressed",
    Mode::Decompress => "decompressed",
  };
  println!(
    "File {} to {} in {:.8} seconds",
    verb,
    outfile.display(),
    start.elapsed().as_secs_f64()
  );
}
