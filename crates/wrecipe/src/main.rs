//! # `wrecipe`
//!
//! Decodes BPE token id streams with a binary `wordrecipe` model.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use wordrecipe::vocab::io::load_binary_model_path;
use wordrecipe::{
    BpeModel,
    ModelLoadOptions,
    RecipeDecoder,
    SpaceMarkerPolicy,
    TokenDecoder,
    TokenId,
};

/// BPE token id decoder.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the binary BPE model.
    #[arg(long)]
    pub model: PathBuf,

    #[command(flatten)]
    pub marker: MarkerArgs,

    /// Increase logging verbosity; repeatable.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Silence logging.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Word-start marker selection.
#[derive(ClapArgs, Debug, Default)]
pub struct MarkerArgs {
    /// Select the marker with the legacy zero-sentinel minimum scan.
    #[arg(long, conflicts_with = "space_glyph")]
    pub legacy_space_marker: bool,

    /// Use this character's id as the marker (e.g. '▁').
    #[arg(long)]
    pub space_glyph: Option<char>,
}

impl MarkerArgs {
    /// Build the model load options.
    pub fn load_options(&self) -> ModelLoadOptions {
        let policy = match (self.legacy_space_marker, self.space_glyph) {
            (_, Some(glyph)) => SpaceMarkerPolicy::Glyph(glyph),
            (true, None) => SpaceMarkerPolicy::LegacyZeroSentinel,
            (false, None) => SpaceMarkerPolicy::MinimumId,
        };
        ModelLoadOptions::new().with_space_marker(policy)
    }
}

/// `wrecipe` subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode whitespace-separated token ids, one sentence per line.
    Decode {
        /// Read ids from this file instead of stdin.
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Decode individual token ids.
    Tokens {
        /// Keep the word-start marker glyph.
        #[arg(long)]
        raw: bool,

        /// Token ids.
        #[arg(required = true)]
        ids: Vec<TokenId>,
    },

    /// Summarize the model.
    Inspect,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    stderrlog::new()
        .module(module_path!())
        .module("wordrecipe")
        .quiet(args.quiet)
        .verbosity(args.verbose as usize + 1)
        .init()?;
    log::debug!("{args:#?}");

    let model: Arc<BpeModel> = load_binary_model_path(&args.model, args.marker.load_options())
        .with_context(|| format!("failed to load model {:?}", args.model))?
        .into();
    let decoder = RecipeDecoder::new(model);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match &args.command {
        Command::Decode { input } => match input {
            Some(path) => {
                let file =
                    File::open(path).with_context(|| format!("failed to open {path:?}"))?;
                run_decode(&decoder, BufReader::new(file), &mut out)?
            }
            None => run_decode(&decoder, std::io::stdin().lock(), &mut out)?,
        },
        Command::Tokens { raw, ids } => run_tokens(&decoder, ids, !raw, &mut out)?,
        Command::Inspect => run_inspect(decoder.model(), &args.model, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

/// Decode a token id stream, writing one sentence per line.
///
/// Sentences decoded before a failure are still written.
fn run_decode<R: BufRead, W: Write>(
    decoder: &RecipeDecoder,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    let (sentences, error) = decoder.decode_from_stream(input).into_parts();
    for sentence in &sentences {
        writeln!(out, "{sentence}")?;
    }
    match error {
        None => Ok(()),
        Some(err) => {
            out.flush()?;
            Err(err).with_context(|| format!("decoding stopped after {} sentences", sentences.len()))
        }
    }
}

fn run_tokens<W: Write>(
    decoder: &RecipeDecoder,
    ids: &[TokenId],
    replace_space_marker: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    for &id in ids {
        let token = decoder.id_to_token(id, replace_space_marker)?;
        writeln!(out, "{id}\t{token}")?;
    }
    Ok(())
}

fn run_inspect<W: Write>(
    model: &BpeModel,
    path: &Path,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "model: {}", path.display())?;
    writeln!(out, "- chars: {}", model.char_vocab().len())?;
    writeln!(out, "- rules: {}", model.rules().len())?;
    writeln!(out, "- recipes: {}", model.recipe_table().len())?;
    writeln!(out, "- spellings: {}", model.spelling_count())?;

    match model.space_id() {
        Some(id) => {
            let glyph = model.char_vocab().lookup_char(id).unwrap_or('?');
            writeln!(out, "- space marker: {id} ({glyph:?})")?;
        }
        None => writeln!(out, "- space marker: none")?,
    }

    let specials = model.special_tokens();
    for (name, id) in [
        ("unk", specials.unk),
        ("pad", specials.pad),
        ("bos", specials.bos),
        ("eos", specials.eos),
    ] {
        match id {
            Some(id) => writeln!(out, "- {name}: {id}")?,
            None => writeln!(out, "- {name}: unset")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordrecipe::WRError;
    use wordrecipe::testing::example_decoder;

    #[test]
    fn test_marker_args() {
        assert_eq!(
            MarkerArgs::default().load_options().space_marker,
            SpaceMarkerPolicy::MinimumId
        );
        let args = MarkerArgs {
            legacy_space_marker: true,
            space_glyph: None,
        };
        assert_eq!(
            args.load_options().space_marker,
            SpaceMarkerPolicy::LegacyZeroSentinel
        );
        let args = MarkerArgs {
            legacy_space_marker: false,
            space_glyph: Some('▁'),
        };
        assert_eq!(args.load_options().space_marker, SpaceMarkerPolicy::Glyph('▁'));
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "wrecipe",
            "--model",
            "m.bpe",
            "--space-glyph",
            "▁",
            "tokens",
            "4",
            "2",
        ])
        .unwrap();
        assert_eq!(args.model, PathBuf::from("m.bpe"));
        assert_eq!(args.marker.space_glyph, Some('▁'));
        assert!(matches!(args.command, Command::Tokens { raw: false, ref ids } if ids == &[4, 2]));

        assert!(
            Args::try_parse_from([
                "wrecipe",
                "--model",
                "m.bpe",
                "--legacy-space-marker",
                "--space-glyph",
                "▁",
                "inspect",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_run_decode() {
        let decoder = example_decoder();
        let mut out = Vec::new();
        run_decode(&decoder, "4 2\n100 4 2\n".as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ab\n<BOS>ab\n");
    }

    #[test]
    fn test_run_decode_partial() {
        let decoder = example_decoder();
        let mut out = Vec::new();
        let err = run_decode(&decoder, "4 2\n9999\n1\n".as_bytes(), &mut out).unwrap_err();
        assert_eq!(String::from_utf8(out).unwrap(), "ab\n");
        assert!(matches!(
            err.downcast_ref::<WRError>(),
            Some(WRError::UnknownTokenId(9999))
        ));
    }

    #[test]
    fn test_run_tokens() {
        let decoder = example_decoder();

        let mut out = Vec::new();
        run_tokens(&decoder, &[4, 100], true, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "4\t a\n100\t<BOS>\n");

        let mut out = Vec::new();
        run_tokens(&decoder, &[4], false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "4\t▁a\n");
    }

    #[test]
    fn test_run_inspect() {
        let decoder = example_decoder();
        let mut out = Vec::new();
        run_inspect(decoder.model(), Path::new("example.bpe"), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("- chars: 3\n"));
        assert!(text.contains("- rules: 1\n"));
        assert!(text.contains("- space marker: 3 ('▁')\n"));
        assert!(text.contains("- bos: 100\n"));
        assert!(text.contains("- unk: unset\n"));
    }

    #[test]
    fn test_load_from_disk() {
        use wordrecipe::testing::{example_image, example_options};

        let dir = tempdir::TempDir::new("wrecipe").unwrap();
        let path = dir.path().join("example.bpe");
        std::fs::write(&path, example_image().to_bytes()).unwrap();

        let decoder: RecipeDecoder = load_binary_model_path(&path, example_options())
            .unwrap()
            .into();
        assert_eq!(decoder.decode_sentence(&[4, 2]).unwrap(), "ab");
    }
}
