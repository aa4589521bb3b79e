use std::collections::BTreeMap;
use std::{env, io::Read, io::Write, process};

use huffzip::container::Container;
use huffzip::huff_tree::CodeTable;

use serde::Serialize;

#[derive(Debug, Serialize)]
struct ContainerSummary {
  padding_count: u8,
  table_len: usize,
  payload_bytes: usize,
  payload_bits: usize,
  codes: BTreeMap<u8, String>,
}

fn main() -> Result<(), std::io::Error> {
  let args: Vec<String> = env::args().collect();

  if args.len() != 3 {
    println!("Usage: {} <container-in> <json-out>", &args[0]);
    println!("\tDumps the header and code table of a compressed file to JSON for further examination");
    process::exit(1);
  }

  pretty_env_logger::init();

  let mut infile = std::fs::File::open(&args[1])
    .unwrap_or_else(|_| panic!("Could not open input file {}", args[1]));
  let mut outfile = std::fs::OpenOptions::new()
    .read(false)
    .write(true)
    .create(true)
    .append(false)
    .truncate(true)
    .open(&args[2])
    .unwrap_or_else(|_| panic!("Could not open output file {}", args[2]));

  let mut data = Vec::new();
  infile.read_to_end(&mut data)?;

  let container = match Container::new_from_container_data(&data[..]) {
    Ok(c) => c,
    Err(e) => {
      println!("{}", e);
      process::exit(1);
    }
  };
  print!("{}", container);

  let table = match CodeTable::deserialize(container.table_bytes()) {
    Ok(t) => t,
    Err(e) => {
      println!("{}", e);
      process::exit(1);
    }
  };
  println!(
    "Code table: {} symbols, longest code {} bits",
    table.len(),
    table.max_code_len()
  );

  let summary = ContainerSummary {
    padding_count: container.padding(),
    table_len: container.table_bytes().len(),
    payload_bytes: container.payload().len(),
    payload_bits: container.payload_bits(),
    codes: table.code_strings(),
  };
  let json_string = serde_json::to_string_pretty(&summary)?;

  outfile.write_all(json_string.as_bytes())?;
  println!("Output written to {}", args[2]);

  Ok(())
}
