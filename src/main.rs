#![warn(clippy::all)]

use std::io::{self, Write as _};

use structopt::StructOpt;

use contest_cli::{Console, Opt, Result};

fn main() -> Result<()> {
    let opt = Opt::from_args();
    let mut cnsl = Console::term(opt.console_config());
    let stdout = io::stdout();
    let result = opt.run(&mut stdout.lock(), &mut cnsl);
    result.map_err(|err| {
        io::stdout().flush().expect("Could not flush stdout");
        eprintln!();
        err
    })
}
