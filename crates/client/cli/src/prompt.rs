//! Pick source that reads squares from standard input.
use std::str::FromStr;

use anyhow::{Context, bail};
use async_trait::async_trait;
use tactics_core::{Coordinate, PickOutcome};
use tactics_runtime::{PickRequest, PickSource, Result, RuntimeError};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// Parses `x,y` scene coordinates.
pub fn parse_point(input: &str) -> anyhow::Result<Coordinate> {
    let (x, y) = input
        .split_once(',')
        .with_context(|| format!("expected `x,y`, got `{input}`"))?;
    let x = f64::from_str(x.trim()).with_context(|| format!("bad x in `{input}`"))?;
    let y = f64::from_str(y.trim()).with_context(|| format!("bad y in `{input}`"))?;
    if !x.is_finite() || !y.is_finite() {
        bail!("coordinates must be finite, got `{input}`");
    }
    Ok(Coordinate::new(x, y))
}

/// What one line of input means. `None` asks the user again.
fn parse_line(line: &str) -> Option<PickOutcome> {
    match line.trim() {
        "" | "c" | "cancel" | "q" => Some(PickOutcome::Cancelled),
        other => parse_point(other).ok().map(PickOutcome::Picked),
    }
}

pub struct StdinPickSource {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl StdinPickSource {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

#[async_trait]
impl PickSource for StdinPickSource {
    async fn pick(&self, request: &PickRequest) -> Result<PickOutcome> {
        let mut lines = self.lines.lock().await;
        loop {
            eprint!(
                "pick a square within {} of {} (x,y or c to cancel)> ",
                request.range, request.origin
            );
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return Err(RuntimeError::PickSourceClosed),
                Err(err) => {
                    tracing::error!(%err, "failed to read stdin");
                    return Err(RuntimeError::PickSourceClosed);
                }
            };
            match parse_line(&line) {
                Some(outcome) => return Ok(outcome),
                None => eprintln!("could not read `{}` as a square", line.trim()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_allow_spaces_and_fractions() {
        assert_eq!(parse_point(" 150, 170.5 ").unwrap(), Coordinate::new(150.0, 170.5));
        assert!(parse_point("150").is_err());
        assert!(parse_point("a,1").is_err());
        assert!(parse_point("inf,1").is_err());
    }

    #[test]
    fn blank_line_cancels() {
        assert_eq!(parse_line(""), Some(PickOutcome::Cancelled));
        assert_eq!(parse_line("cancel"), Some(PickOutcome::Cancelled));
        assert_eq!(
            parse_line("40,60"),
            Some(PickOutcome::Picked(Coordinate::new(40.0, 60.0)))
        );
        assert_eq!(parse_line("over there"), None);
    }
}
