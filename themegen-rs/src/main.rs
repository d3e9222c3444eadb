use themegen::cli::{self, Invocation, USAGE};
use themegen::ThemeError;

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() {
    init_tracing();

    let args = match cli::parse_args() {
        Ok(Invocation::Convert(a)) => a,
        Ok(Invocation::Help) => {
            println!("{USAGE}");
            return;
        }
        Err(e) => {
            eprintln!("themegen: {e}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    let output = match themegen::convert(&args) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("themegen: {e}");
            std::process::exit(1);
        }
    };

    // ── Write result ──────────────────────────────────────────────────────────
    match &args.out {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &output) {
                eprintln!("themegen: {}", ThemeError::io(path, e));
                std::process::exit(1);
            }
            tracing::info!("wrote {}", path.display());
        }
        None => print!("{output}"),
    }
}
