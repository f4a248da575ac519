use clap::{Parser, Subcommand};

mod demos;
mod headless;
mod settings;
mod viewer;

use demos::Demo;
use settings::SceneArgs;

#[derive(Parser)]
#[command(name = "nature")]
#[command(about = "nature - a small 2D particle runtime", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in demos
    List,
    /// Open a demo in a window
    Run {
        demo: Demo,
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Run a demo without a window and print per-frame counts
    Headless {
        demo: Demo,
        /// Number of frames to run
        #[arg(long, default_value_t = 120)]
        frames: usize,
        #[command(flatten)]
        scene: SceneArgs,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::List => {
            for demo in Demo::ALL {
                println!("{:<10} {}", demo.name(), demo.description());
            }
        }
        Commands::Run { demo, scene } => viewer::run(demo, scene)?,
        Commands::Headless {
            demo,
            frames,
            scene,
        } => headless::run(demo, frames, &scene)?,
    }
    Ok(())
}
