//! Offline trainer
//!
//! Usage: `train [--data corpus.jsonl] [--alpha 1.0] [--out sentiment_model.json]`
//! Without `--data` the built-in demo corpus is used.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use sentiment_core::constants;
use sentiment_core::logic::dataset::{default_corpus, load_examples};
use sentiment_core::logic::model::{artifact, Trainer};

#[derive(Debug)]
struct Args {
    data: Option<PathBuf>,
    alpha: f64,
    out: PathBuf,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        data: None,
        alpha: constants::DEFAULT_SMOOTHING_ALPHA,
        out: PathBuf::from(constants::get_model_path()),
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || iter.next().with_context(|| format!("{} needs a value", flag));
        match flag.as_str() {
            "--data" => args.data = Some(PathBuf::from(value()?)),
            "--out" => args.out = PathBuf::from(value()?),
            "--alpha" => {
                let raw = value()?;
                args.alpha = raw.parse().with_context(|| format!("invalid alpha {:?}", raw))?;
            }
            other => bail!("unknown argument {:?}", other),
        }
    }

    Ok(args)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;

    let examples = match &args.data {
        Some(path) => load_examples(path)?,
        None => {
            log::info!("No --data given, using built-in demo corpus");
            default_corpus()
        }
    };

    log::info!("Currently training the model, hold tight!");
    let model = Trainer::new()
        .with_alpha(args.alpha)
        .fit(&examples)
        .context("training aborted, no artifact written")?;

    artifact::save(&model, &args.out)?;
    log::info!("Model saved as {}", args.out.display());
    Ok(())
}
