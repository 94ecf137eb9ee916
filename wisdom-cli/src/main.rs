use std::process::exit;

use wisdom_core::model::corpus::Corpus;
use wisdom_core::model::passage::{Assembler, Count, PassageInput};

const USAGE: &str = "\
Usage: wisdom [OPTIONS] <CORPUS-FILE>

Generates a passage of pseudo-profound verses from a text corpus.

Options:
    --verses N|N-M      verses per passage (default 3-6)
    --sentences N|N-M   sentences per verse (default 2-5)
    --words N|N-M       words per sentence (default 5-20)
    --width N           wrap width in columns, 0 disables wrapping (default 40)
    --plain             no line wrapping (same as --width 0)
    --retry-cap N       give up after N failed attempts per sentence
    -h, --help          show this help";

fn usage_error(message: &str) -> ! {
    eprintln!("wisdom: {message}");
    eprintln!("{USAGE}");
    exit(2);
}

fn count_value(option: &str, value: Option<String>) -> Count {
    let value = value.unwrap_or_else(|| usage_error(&format!("{option} needs a value")));
    value.parse().unwrap_or_else(|err: String| usage_error(&err))
}

fn number_value(option: &str, value: Option<String>) -> usize {
    let value = value.unwrap_or_else(|| usage_error(&format!("{option} needs a value")));
    value
        .parse()
        .unwrap_or_else(|_| usage_error(&format!("invalid number for {option}: {value:?}")))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut input = PassageInput::default();
    let mut retry_cap = None;
    let mut corpus_path: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verses" => input.verses = count_value(&arg, args.next()),
            "--sentences" => input.sentences = count_value(&arg, args.next()),
            "--words" => input.words = count_value(&arg, args.next()),
            "--width" => input.width = number_value(&arg, args.next()),
            "--plain" => input.width = 0,
            "--retry-cap" => retry_cap = Some(number_value(&arg, args.next())),
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ if arg.starts_with('-') => usage_error(&format!("unknown option {arg}")),
            _ => {
                if corpus_path.is_some() {
                    usage_error("expected exactly one corpus file");
                }
                corpus_path = Some(arg);
            }
        }
    }
    let corpus_path = corpus_path.unwrap_or_else(|| usage_error("missing corpus file"));

    let mut corpus = Corpus::new(&corpus_path)?;
    corpus.set_retry_cap(retry_cap);
    corpus.build()?;

    let assembler = Assembler::new(input);
    let passage = assembler.passage(&mut corpus, &mut rand::rng())?;
    println!("{passage}");
    Ok(())
}
