/// Command-line argument parsing
///
/// Flags take their value from the next argument. A missing value, or one that
/// looks like another flag, is an error instead of being silently dropped.

use crate::db::Bird;
use crate::error::{BirdError, Result};
use std::path::PathBuf;

// Next argument as the value of `flag`
fn flag_value(flag: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.starts_with("--") => Ok(v),
        _ => Err(BirdError::InvalidArgument(format!("{} needs a value", flag))),
    }
}

/// Pull `--db <path>` out of the args, wherever it appears
pub fn take_db_flag(args: Vec<String>) -> Result<(Option<PathBuf>, Vec<String>)> {
    let mut db = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        if arg == "--db" {
            db = Some(PathBuf::from(flag_value("--db", iter.next())?));
        } else {
            rest.push(arg);
        }
    }

    Ok((db, rest))
}

/// Build an unsaved bird from `add` flags; every flag is optional
pub fn parse_bird_flags(args: &[String]) -> Result<Bird> {
    let mut bird = Bird::new(None, None, None);
    let mut iter = args.iter().cloned();

    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--name" => &mut bird.name,
            "--species" => &mut bird.species,
            "--image" => &mut bird.image,
            other => {
                return Err(BirdError::InvalidArgument(format!(
                    "unexpected argument '{}'",
                    other
                )))
            }
        };
        *slot = Some(flag_value(&arg, iter.next())?);
    }

    Ok(bird)
}
