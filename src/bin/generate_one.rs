use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use imaginate::{
    logger,
    output::{default_name, write_fallback, write_generated, StatusLine},
    Config, Generator,
};

/// Generate one image and write it under the assets directory.
#[derive(Parser, Debug)]
#[command(name = "generate-one", version)]
struct Args {
    #[arg(
        short,
        long,
        default_value = "A dreamy futuristic city in the clouds, neon, cinematic"
    )]
    prompt: String,

    /// `WxH`; any size is accepted for the fallback artwork
    #[arg(short, long, default_value = "1024x1024")]
    size: String,

    /// File name without extension [default: sample-YYYYMMDD-HHMMSS]
    #[arg(short, long)]
    name: Option<String>,

    /// Output directory [default: $ASSETS_DIR or public/assets]
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let _ = dotenv::dotenv();
    logger::init_or_warn(logger::LoggerConfig::from_env());

    let args = Args::parse();
    let config = Config::from_env();
    let out_dir = args.out_dir.clone().unwrap_or_else(|| config.assets_dir.clone());
    let name = args.name.clone().unwrap_or_else(default_name);

    let status = match run(&config, &args, &out_dir, &name).await {
        Ok(status) => status,
        Err(e) if e.is_validation() => fail(&e.to_string()),
        Err(e) => {
            log::error!("❌ Generation failed, writing fallback image: {}", e);
            match write_fallback(&out_dir, &name, args.prompt.trim(), &args.size) {
                Ok(path) => StatusLine::ok(&imaginate::Provenance::Fallback, &path),
                Err(nested) => fail(&nested.to_string()),
            }
        }
    };

    println!("{}", status.to_json());
}

async fn run(config: &Config, args: &Args, out_dir: &Path, name: &str) -> imaginate::Result<StatusLine> {
    let generator = Generator::from_config(config);
    let file = generator.generate_file(&args.prompt, &args.size).await?;
    let path = write_generated(out_dir, name, &file)?;
    Ok(StatusLine::ok(&file.provenance, &path))
}

fn fail(message: &str) -> ! {
    eprintln!("{}", StatusLine::error(message).to_json());
    process::exit(1);
}
