//! Paged-memory simulator - Main Entry Point
//!
//! Usage: pagesim [OPTIONS] <commands>
//!
//! Commands are consumed left to right and may be chained freely:
//!   np n c   - new process n with c data pages
//!   kp n     - kill process n, reclaiming its pages
//!   sb n a v - store byte v at virtual address a of process n
//!   lb n a   - load the byte at virtual address a of process n
//!   ppt n    - print process n's page table
//!   pfm      - print the page free map
//!
//! Options:
//!   -v, --verbose  Log allocation and lifecycle events
//!   -h, --help     Print help information

use std::env;
use std::process;

use log::debug;
use thiserror::Error;

use pagesim::address::VirtualAddress;
use pagesim::constants::MAX_PROCS;
use pagesim::memory::PhysicalMemory;
use pagesim::process::{create_process, destroy_process};
use pagesim::report;
use pagesim::translation::translate;

/// One simulator command, decoded from the argument stream.
enum Command {
    FreeMap,
    PageTable { proc: u8 },
    NewProcess { proc: u8, pages: usize },
    KillProcess { proc: u8 },
    StoreByte { proc: u8, vaddr: u16, value: u8 },
    LoadByte { proc: u8, vaddr: u16 },
}

#[derive(Debug, Error)]
enum ParseError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{command}: missing argument")]
    MissingArgument { command: &'static str },
    #[error("{command}: invalid argument `{value}`")]
    InvalidArgument { command: &'static str, value: String },
    #[error("{command}: process id {proc} out of range")]
    ProcOutOfRange { command: &'static str, proc: usize },
}

fn main() {
    let mut verbose = false;
    let mut words: Vec<String> = Vec::new();

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "-v" | "--verbose" => {
                verbose = true;
            }
            _ => words.push(arg),
        }
    }

    let mut logger = env_logger::Builder::from_default_env();
    if verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if words.is_empty() {
        eprintln!("usage: pagesim commands");
        process::exit(1);
    }

    let commands = match parse_commands(&words) {
        Ok(commands) => commands,
        Err(e) => {
            eprintln!("pagesim: {e}");
            process::exit(1);
        }
    };

    run(&commands);
}

fn print_help() {
    eprintln!("Paged-memory simulator - allocates, maps, and addresses 256-byte pages");
    eprintln!();
    eprintln!("Usage: pagesim [OPTIONS] <commands>");
    eprintln!();
    eprintln!("Commands (chainable, consumed left to right):");
    eprintln!("  np n c   - new process n with c data pages");
    eprintln!("  kp n     - kill process n, reclaiming its pages");
    eprintln!("  sb n a v - store byte v at virtual address a of process n");
    eprintln!("  lb n a   - load the byte at virtual address a of process n");
    eprintln!("  ppt n    - print process n's page table");
    eprintln!("  pfm      - print the page free map");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v, --verbose  Log allocation and lifecycle events");
    eprintln!("  -h, --help     Print this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  pagesim np 1 2 pfm ppt 1");
    eprintln!("  pagesim np 1 1 sb 1 10 99 lb 1 10");
}

/// Decode the whole argument stream before executing anything.
fn parse_commands(words: &[String]) -> Result<Vec<Command>, ParseError> {
    let mut commands = Vec::new();
    let mut it = words.iter();

    while let Some(word) = it.next() {
        let command = match word.as_str() {
            "pfm" => Command::FreeMap,
            "ppt" => Command::PageTable {
                proc: parse_proc(&mut it, "ppt")?,
            },
            "np" => Command::NewProcess {
                proc: parse_proc(&mut it, "np")?,
                pages: parse_number(&mut it, "np")?,
            },
            "kp" => Command::KillProcess {
                proc: parse_proc(&mut it, "kp")?,
            },
            "sb" => Command::StoreByte {
                proc: parse_proc(&mut it, "sb")?,
                vaddr: parse_number(&mut it, "sb")?,
                value: parse_number(&mut it, "sb")?,
            },
            "lb" => Command::LoadByte {
                proc: parse_proc(&mut it, "lb")?,
                vaddr: parse_number(&mut it, "lb")?,
            },
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };
        commands.push(command);
    }

    Ok(commands)
}

fn parse_number<'a, T, I>(it: &mut I, command: &'static str) -> Result<T, ParseError>
where
    T: std::str::FromStr,
    I: Iterator<Item = &'a String>,
{
    let word = it
        .next()
        .ok_or(ParseError::MissingArgument { command })?;
    word.parse().map_err(|_| ParseError::InvalidArgument {
        command,
        value: word.clone(),
    })
}

fn parse_proc<'a, I>(it: &mut I, command: &'static str) -> Result<u8, ParseError>
where
    I: Iterator<Item = &'a String>,
{
    let proc: usize = parse_number(it, command)?;
    if proc >= MAX_PROCS {
        return Err(ParseError::ProcOutOfRange { command, proc });
    }
    Ok(proc as u8)
}

fn run(commands: &[Command]) {
    let mut mem = PhysicalMemory::new();

    for command in commands {
        match *command {
            Command::FreeMap => print!("{}", report::page_free_map(&mem)),
            Command::PageTable { proc } => print!("{}", report::page_table(&mem, proc)),
            Command::NewProcess { proc, pages } => {
                // OOM aborts this command only; the run continues
                if let Err(e) = create_process(&mut mem, proc, pages) {
                    println!("{e}");
                }
            }
            Command::KillProcess { proc } => destroy_process(&mut mem, proc),
            Command::StoreByte { proc, vaddr, value } => {
                let va = VirtualAddress::from_raw(vaddr);
                let addr = translate(&mem, proc, va);
                debug!("proc {proc}: {va} -> {addr}");
                mem.write(addr, value);
                println!("{}", report::store_line(proc, vaddr, addr, value));
            }
            Command::LoadByte { proc, vaddr } => {
                let va = VirtualAddress::from_raw(vaddr);
                let addr = translate(&mem, proc, va);
                debug!("proc {proc}: {va} -> {addr}");
                println!("{}", report::load_line(proc, vaddr, addr, mem.read(addr)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_command_stream() {
        let commands = parse_commands(&words("np 1 2 pfm ppt 1 sb 1 261 99 lb 1 261 kp 1")).unwrap();
        assert_eq!(commands.len(), 6);
        match commands[3] {
            Command::StoreByte { proc, vaddr, value } => {
                assert_eq!((proc, vaddr, value), (1, 261, 99));
            }
            _ => panic!("expected sb"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_command() {
        assert!(matches!(
            parse_commands(&words("np 1 2 bogus")),
            Err(ParseError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_parse_rejects_missing_argument() {
        assert!(matches!(
            parse_commands(&words("sb 1 10")),
            Err(ParseError::MissingArgument { command: "sb" })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        assert!(matches!(
            parse_commands(&words("np one 2")),
            Err(ParseError::InvalidArgument { command: "np", .. })
        ));
    }

    #[test]
    fn test_parse_rejects_out_of_range_proc() {
        assert!(matches!(
            parse_commands(&words("kp 200")),
            Err(ParseError::ProcOutOfRange { proc: 200, .. })
        ));
    }
}
