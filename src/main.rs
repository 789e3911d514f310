use clap::Parser;
use miette::Result;
use hoscon::cli::{Cli, Commands};
use hoscon::core::logging;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    logging::init(global.verbosity());

    match cli.command {
        Commands::Init => hoscon::cli::commands::init::run(&global),
        Commands::Seed => hoscon::cli::commands::seed::run(&global),
        Commands::Status => hoscon::cli::commands::status::run(&global),
        Commands::Dept(cmd) => hoscon::cli::commands::dept::run(cmd, &global),
        Commands::Staff(cmd) => hoscon::cli::commands::staff::run(cmd, &global),
        Commands::Incident(cmd) => hoscon::cli::commands::incident::run(cmd, &global),
        Commands::Task(cmd) => hoscon::cli::commands::task::run(cmd, &global),
        Commands::Resource(cmd) => hoscon::cli::commands::resource::run(cmd, &global),
        Commands::Comms(cmd) => hoscon::cli::commands::comms::run(cmd, &global),
        Commands::Export(args) => hoscon::cli::commands::export::run(args, &global),
        Commands::Completions(args) => hoscon::cli::commands::completions::run(args),
    }
}
