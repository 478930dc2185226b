use crate::options::Options;
use crate::{classify, format_with_options, sanitize_with_log};
use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} [OPTIONS] [INPUT]\n\
         \n\
         INPUT: optional input file. When omitted, reads from stdin.\n\
         \n\
         Modes (default: sanitize to stdout):\n\
           -f, --format              Repair and pretty-print (2-space indent);\n\
                                     exits 1 when the input cannot be made valid\n\
               --no-repair           With --format, strict parse only\n\
           -c, --check               Print idle|valid|invalid; exits 1 on invalid\n\
         \n\
         Options:\n\
           -o, --output FILE         Write output to FILE (default stdout)\n\
               --in-place            Overwrite INPUT file\n\
               --log                 Print the repair log to stderr\n\
               --no-single-quotes    Keep single-quoted segments as-is\n\
               --no-bare-keys        Do not quote bare object keys\n\
               --no-semicolons       Keep loose semicolons\n\
               --no-trailing-commas  Keep trailing commas\n\
               --no-auto-close       Do not close unbalanced brackets\n\
           -h, --help                Show this help\n",
        prog = program
    );
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Sanitize,
    Format,
    Check,
}

struct CliMode {
    mode: Mode,
    repair: bool,
    input: Option<String>,
    output: Option<String>,
    in_place: bool,
}

fn parse_args() -> (Options, CliMode) {
    let mut args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| "jsonfield".to_string());
    args.remove(0);

    let mut opts = Options::default();
    let mut mode = Mode::Sanitize;
    let mut repair = true;
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut in_place = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help(&program);
                std::process::exit(0);
            }
            "-f" | "--format" => {
                mode = Mode::Format;
            }
            "-c" | "--check" => {
                mode = Mode::Check;
            }
            "--no-repair" => {
                repair = false;
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing FILE for --output");
                    std::process::exit(2);
                }
                output = Some(args[i].clone());
            }
            "--in-place" => {
                in_place = true;
            }
            "--log" => {
                opts.logging = true;
            }
            "--no-single-quotes" => {
                opts.convert_single_quotes = false;
            }
            "--no-bare-keys" => {
                opts.quote_bare_keys = false;
            }
            "--no-semicolons" => {
                opts.strip_semicolons = false;
            }
            "--no-trailing-commas" => {
                opts.strip_trailing_commas = false;
            }
            "--no-auto-close" => {
                opts.auto_close = false;
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown option: {}", s);
                std::process::exit(2);
            }
            path => {
                input = Some(path.to_string());
            }
        }
        i += 1;
    }

    let mode = CliMode {
        mode,
        repair,
        input,
        output,
        in_place,
    };
    (opts, mode)
}

fn read_input(input: &Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    match input {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s)?;
            Ok(s)
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (opts, mode) = parse_args();
    let content = read_input(&mode.input)?;

    if mode.mode == Mode::Check {
        println!("{}", classify(&content));
        if classify(&content) == crate::MetadataStatus::Invalid {
            std::process::exit(1);
        }
        return Ok(());
    }

    let out = match mode.mode {
        Mode::Sanitize => {
            let (s, log) = sanitize_with_log(&content, &opts);
            for entry in &log {
                eprintln!("{}: {} ({:?})", entry.position, entry.message, entry.context);
            }
            s
        }
        Mode::Format => {
            let formatted = format_with_options(&content, mode.repair, &opts);
            match formatted {
                Some(s) => s,
                None => {
                    eprintln!("Unable to format: input cannot be repaired into valid JSON");
                    std::process::exit(1);
                }
            }
        }
        Mode::Check => unreachable!(),
    };

    if mode.in_place {
        let inp = mode
            .input
            .as_ref()
            .ok_or("--in-place requires INPUT file")?;
        fs::write(inp, out)?;
        return Ok(());
    }

    let mut writer: Box<dyn Write> = if let Some(ref o) = mode.output {
        Box::new(BufWriter::new(File::create(o)?))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };
    writer.write_all(out.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
