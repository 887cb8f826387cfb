use agentlog::{Cli, run};
use clap::Parser;

fn main() {
    // Restore the default SIGPIPE action so `agentlog view ... | head`
    // exits quietly instead of panicking on a closed pipe
    #[cfg(unix)]
    reset_sigpipe();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
