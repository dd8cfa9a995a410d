use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use exprtok_lexer::Tokenizer;
use exprtok_protocol::{OperatorKind, TokenType, Vocabulary};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about = "Compiles operator vocabularies and inspects tokenizer output")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a JSON vocabulary to an rkyv binary
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Tokenize an expression and print the tokens as JSON
    Tokenize {
        /// Compiled vocabulary; the standard operators when omitted
        #[arg(short, long, value_name = "FILE")]
        vocab: Option<PathBuf>,

        /// Fail if any non-whitespace symbol was not recognized
        #[arg(long)]
        strict: bool,

        expression: String,
    },
}

#[derive(Serialize)]
struct TokenReport {
    text: String,
    start: usize,
    end: usize,
    token_type: TokenType,
    operator_kind: Option<OperatorKind>,
}

#[derive(Serialize)]
struct TokenizeReport {
    normalized: String,
    tokens: Vec<TokenReport>,
    buckets: Vec<(TokenType, usize)>,
    unrecognized: Vec<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Compile { input, output } => compile(&input, &output),
        Command::Tokenize {
            vocab,
            strict,
            expression,
        } => tokenize(vocab.as_deref(), strict, &expression),
    }
}

fn compile(input: &Path, output: &Path) -> anyhow::Result<()> {
    log::info!("reading vocabulary JSON from {:?}", input);
    let input_data = fs::read_to_string(input).with_context(|| format!("reading {:?}", input))?;

    // 1. Deserialize JSON and reject vocabularies the tokenizer cannot use
    let vocab: Vocabulary = serde_json::from_str(&input_data).context("parsing vocabulary JSON")?;
    exprtok_lexer::table::validate(&vocab)?;

    log::info!(
        "compiling vocabulary version {} with {} operators",
        vocab.version,
        vocab.len()
    );

    // 2. Serialize to RKYV
    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&vocab)
        .map_err(|e| anyhow!("rkyv serialization failed: {:?}", e))?;
    let bytes = serializer.into_serializer().into_inner();

    // 3. Make sure the archive loads back before writing it
    Tokenizer::from_archive(&bytes).context("compiled archive failed to load")?;

    fs::write(output, bytes.as_slice()).with_context(|| format!("writing {:?}", output))?;

    println!("Wrote {} bytes to {:?}", bytes.len(), output);
    Ok(())
}

fn tokenize(vocab: Option<&Path>, strict: bool, expression: &str) -> anyhow::Result<()> {
    let tokenizer = match vocab {
        Some(path) => {
            let bytes = fs::read(path).with_context(|| format!("reading {:?}", path))?;
            Tokenizer::from_archive(&bytes).with_context(|| format!("loading {:?}", path))?
        }
        None => Tokenizer::default(),
    };

    let tokenization = tokenizer.tokenize(expression);
    let unrecognized = tokenization.unrecognized();

    let report = TokenizeReport {
        normalized: tokenization.symbols().iter().collect(),
        tokens: tokenization
            .tokens()
            .iter()
            .map(|token| TokenReport {
                text: token.text(),
                start: token.start(),
                end: token.end(),
                token_type: token.token_type(),
                operator_kind: token.operator_kind(),
            })
            .collect(),
        buckets: tokenization
            .index()
            .flags()
            .map(|(flag, ids)| (flag, ids.len()))
            .collect(),
        unrecognized: unrecognized.clone(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    if strict && !unrecognized.is_empty() {
        bail!("unrecognized symbols at {:?}", unrecognized);
    }
    Ok(())
}
