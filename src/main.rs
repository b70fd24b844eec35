use std::env;
use std::process;

use salestally::pipeline::{self, RunOptions};
use salestally::sales::DuplicatePolicy;

fn main() {
    env_logger::init();

    let options = RunOptions {
        commodity: cfg!(feature = "commodity"),
        duplicates: if cfg!(feature = "strict-definitions") {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::LastWriteWins
        },
    };

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(err) = pipeline::run_args(&args, &options) {
        eprintln!("{}", err);
        process::exit(err.exit_code());
    }
}
