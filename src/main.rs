use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vgc_site::types::BuildContext;
use vgc_site::{collect, config, generate, logging, output};

#[derive(Parser)]
#[command(name = "vgc-site")]
#[command(about = "Static site builder for Markdown study notes")]
#[command(long_about = "\
Static site builder for Markdown study notes

Every .md file under the markdown directory becomes a page; the index lists
them oldest first and can be filtered by front matter in the browser.

Project structure:

  project/
  ├── config.toml                  # Optional, see 'vgc-site gen-config'
  ├── styles.css                   # Copied to dist/ when present
  └── markdown/
      ├── intro.md                 # → dist/intro.html
      ├── teams/
      │   └── rain.md              # → dist/teams/rain.html
      └── VGC/pics/team.png        # → dist/VGC/pics/team.png

Front matter (all optional):
  title        default: file name
  date         default: file modification date
  description  default: first 150 characters of the body
  format       shown as a tag on the index card

Images are embedded with ![[team.png]].")]
#[command(version)]
struct Cli {
    /// Project directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site (default)
    Build,
    /// Collect documents and report them without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print the response headers the static server should send
    Headers,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init()?;
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let site_config = config::load_config(&cli.root)?;
            let ctx = BuildContext::now();
            tracing::debug!(version = %ctx.version, "build context");

            let summary = generate::build(&cli.root, &site_config, &ctx)?;
            output::print_build_output(&summary);
        }
        Command::Check => {
            let site_config = config::load_config(&cli.root)?;
            let source = cli.root.join(&site_config.markdown_dir);
            println!("==> Checking {}", source.display());
            let documents = collect::collect(&source)?;
            output::print_check_output(&documents);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Headers => {
            let site_config = config::load_config(&cli.root)?;
            for line in config::format_headers(&site_config.headers) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
