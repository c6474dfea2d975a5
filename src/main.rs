use fnscan::{cli, logging, output, router};

fn main() {
    let cli = cli::parse();
    logging::init_logger(cli.debug);
    if let Err(err) = router::dispatch(cli) {
        std::process::exit(output::format_error(&err));
    }
}
