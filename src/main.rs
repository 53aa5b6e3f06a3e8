use clap::{Parser, Subcommand};
use std::path::PathBuf;
use topical::{build, config, glossary, output, references, scan, validate};

#[derive(Parser)]
#[command(name = "topical")]
#[command(about = "Content pipeline and validator for learning-path course sites")]
#[command(long_about = "\
Content pipeline and validator for learning-path course sites

Your filesystem is the data source. Directories become blocks and
articles, explicit order fields define the learning path, and front
matter carries titles, descriptions, prerequisites, and glossary terms.

Site structure:

  site/
  ├── config.toml                  # Site config (optional)
  ├── references.json              # Bibliography: key → {title, url, authors, venue, year}
  └── topics/
      ├── foundations/             # Block (has _block.json)
      │   ├── _block.json          # {\"title\": \"Foundations\", \"order\": 1}
      │   ├── what-is-a-neuron/    # Article (has index.md)
      │   │   └── index.md         # Front matter + markdown body
      │   └── gradient-descent/
      │       └── index.md
      └── architectures/
          ├── _block.json
          └── convnets/
              └── index.md

Article bodies may cite references inline: {% cite \"key\" %}. The
validator checks every citation, prerequisite link, glossary term, and
ordering invariant before anything is built; set SKIP_VALIDATION=1 to
bypass it during local iteration.

Run 'topical gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the topics tree and print the discovered structure
    Scan,
    /// Validate content without building
    Check,
    /// Run the full pipeline: scan, validate, emit, index
    Build {
        /// Skip the post-build search indexer
        #[arg(long)]
        no_index: bool,
    },
    /// Print the aggregated glossary
    Glossary,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let site_config = config::load_config(&cli.site)?;
            let path = scan::scan(&cli.site.join(&site_config.topics_dir))?;
            output::print_scan_output(&path);
        }
        Command::Check => {
            let site_config = config::load_config(&cli.site)?;
            let topics_dir = cli.site.join(&site_config.topics_dir);
            println!("==> Checking {}", topics_dir.display());

            let path = scan::scan(&topics_dir)?;
            let refs = references::load(&cli.site.join(&site_config.references))?;
            let report = validate::validate(&path, &refs, &topics_dir);
            if !report.is_empty() {
                return Err(build::BuildError::Validation(report).into());
            }

            output::print_scan_output(&path);
            println!("==> Content is valid");
        }
        Command::Build { no_index } => {
            let site_config = config::load_config(&cli.site)?;
            let options = build::BuildOptions {
                validate: !build::skip_validation_requested(),
                index: !no_index,
            };

            println!("==> Building {}", cli.site.display());
            if !options.validate {
                println!("==> Validation skipped (SKIP_VALIDATION set)");
            }

            let summary = build::build(&cli.site, &site_config, &options)?;
            output::print_build_summary(&summary);
            println!("==> Build complete: {}", summary.output.display());
        }
        Command::Glossary => {
            let site_config = config::load_config(&cli.site)?;
            let path = scan::scan(&cli.site.join(&site_config.topics_dir))?;
            output::print_glossary_output(&glossary::aggregate(&path));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
