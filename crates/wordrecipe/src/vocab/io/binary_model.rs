//! # Binary Model IO

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use crate::errors::{WRError, WRResult};
use crate::types::TokenId;
use crate::vocab::{BpeModel, MergeRule, ModelLoadOptions, SpecialTokens};

/// Size of the `(n_chars, n_rules)` header, in bytes.
pub const HEADER_SIZE: usize = 8;

/// Size of a `(char, id)` record, in bytes.
pub const CHAR_RECORD_SIZE: usize = 8;

/// Size of a `(left, right, result)` record, in bytes.
pub const RULE_RECORD_SIZE: usize = 12;

/// Size of the trailing special tokens record, in bytes.
pub const SPECIALS_RECORD_SIZE: usize = 16;

/// Sequential big-endian field reader.
struct FieldReader<R> {
    reader: R,
}

impl<R: Read> FieldReader<R> {
    fn read_array<const N: usize>(
        &mut self,
        field: &'static str,
    ) -> WRResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.reader.read_exact(&mut buf).map_err(|err| {
            log::error!("broken model input reading {field}: {err}");
            match err.kind() {
                ErrorKind::UnexpectedEof => WRError::TruncatedInput { field },
                _ => WRError::Io(err),
            }
        })?;
        Ok(buf)
    }

    fn read_u32(
        &mut self,
        field: &'static str,
    ) -> WRResult<u32> {
        Ok(u32::from_be_bytes(self.read_array(field)?))
    }

    fn read_rule(&mut self) -> WRResult<MergeRule> {
        let buf: [u8; RULE_RECORD_SIZE] = self.read_array("merge rule")?;
        let word = |i: usize| u32::from_be_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);
        Ok(MergeRule::new(word(0), word(4), word(8)))
    }

    fn read_specials(&mut self) -> WRResult<SpecialTokens> {
        let buf: [u8; SPECIALS_RECORD_SIZE] = self.read_array("special tokens")?;
        let word = |i: usize| i32::from_be_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);
        Ok(SpecialTokens::from_wire([word(0), word(4), word(8), word(12)]))
    }
}

/// Load a [`BpeModel`] from a binary model stream.
///
/// The stream is read once, sequentially; loading stops at the first error.
///
/// ## Arguments
/// * `reader` - The byte source.
/// * `options` - Load options.
///
/// ## Errors
/// * [`WRError::TruncatedInput`] if the stream ends mid-field.
/// * [`WRError::UnresolvedReference`] if a rule cites an undefined token id.
/// * [`WRError::UnresolvedCharacter`] if a merged recipe cannot be spelled.
/// * [`WRError::Io`] on any other read fault.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(reader, options))
)]
pub fn load_binary_model<R: Read>(
    reader: R,
    options: ModelLoadOptions,
) -> WRResult<BpeModel> {
    let mut reader = FieldReader { reader };

    let n_chars = reader.read_u32("character count")? as usize;
    let n_rules = reader.read_u32("rule count")? as usize;

    let mut builder = BpeModel::builder(options);
    // Counts are untrusted; cap the up-front reservation.
    builder.reserve(n_chars.min(1 << 16), n_rules.min(1 << 20));

    for _ in 0..n_chars {
        let value = reader.read_u32("character value")?;
        let id: TokenId = reader.read_u32("character id")?;
        builder.add_char_value(value, id);
    }

    for _ in 0..n_rules {
        let rule = reader.read_rule()?;
        builder.add_rule(rule)?;
    }

    let specials = reader.read_specials()?;
    builder.with_special_tokens(specials);

    let model = builder.build();
    log::debug!(
        "loaded bpe model: {} chars, {} rules, space id {:?}",
        model.char_vocab().len(),
        model.rules().len(),
        model.space_id(),
    );
    Ok(model)
}

/// Load a [`BpeModel`] from a binary model file.
///
/// ## Arguments
/// * `path` - The model file path.
/// * `options` - Load options.
pub fn load_binary_model_path<P: AsRef<Path>>(
    path: P,
    options: ModelLoadOptions,
) -> WRResult<BpeModel> {
    let reader = BufReader::new(File::open(path)?);
    load_binary_model(reader, options)
}

/// Write a [`BpeModel`] in the binary model format.
///
/// Character records and rules are written in load order, exactly as
/// recorded; reloading with the same options yields the same model.
///
/// ## Errors
/// * [`WRError::InvalidSpecialToken`] if a special id exceeds `i32::MAX`.
/// * [`WRError::Io`] on write faults.
pub fn save_binary_model<W: Write>(
    model: &BpeModel,
    mut writer: W,
) -> WRResult<()> {
    let specials = model.special_tokens().to_wire()?;

    let records = model.char_records();

    writer.write_all(&(records.len() as u32).to_be_bytes())?;
    writer.write_all(&(model.rules().len() as u32).to_be_bytes())?;

    for &(value, id) in records {
        writer.write_all(&value.to_be_bytes())?;
        writer.write_all(&id.to_be_bytes())?;
    }

    for rule in model.rules() {
        writer.write_all(&rule.left.to_be_bytes())?;
        writer.write_all(&rule.right.to_be_bytes())?;
        writer.write_all(&rule.result.to_be_bytes())?;
    }

    for value in specials {
        writer.write_all(&value.to_be_bytes())?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a [`BpeModel`] to a binary model file.
pub fn save_binary_model_path<P: AsRef<Path>>(
    model: &BpeModel,
    path: P,
) -> WRResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    save_binary_model(model, writer)
}
