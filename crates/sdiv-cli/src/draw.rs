//! # Draw Subcommand
//!
//! Runs the seeded draws offline and prints the result as JSON. A draw
//! printed here with a given seed matches the API's draw for that seed.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::{json, Value};

use sdiv_draw::iching::{self, DrawRequest};
use sdiv_draw::runes::{self, RuneDrawRequest};
use sdiv_draw::tarot::{self, CardDrawRequest};

/// Arguments for the `sdiv draw` subcommand.
#[derive(Args, Debug)]
pub struct DrawArgs {
    #[command(subcommand)]
    pub command: DrawCommand,
}

#[derive(Subcommand, Debug)]
pub enum DrawCommand {
    /// Cast I Ching lines.
    Coins {
        /// Seed to draw under; generated when omitted.
        #[arg(long)]
        seed: Option<String>,
        /// Lines to cast, clamped to 1..=6.
        #[arg(long, allow_negative_numbers = true)]
        rounds: Option<i64>,
    },

    /// Draw tarot cards.
    Cards {
        #[arg(long)]
        seed: Option<String>,
        /// Cards to draw, 1..=10.
        #[arg(long, allow_negative_numbers = true)]
        count: i64,
        /// Keep every card upright.
        #[arg(long)]
        no_reversed: bool,
    },

    /// Draw runes.
    Runes {
        #[arg(long)]
        seed: Option<String>,
        /// Runes to draw, 1..=5.
        #[arg(long, default_value_t = runes::DEFAULT_RUNES, allow_negative_numbers = true)]
        count: i64,
        /// Keep every rune upright.
        #[arg(long)]
        no_reversed: bool,
    },
}

/// Execute the draw subcommand.
pub fn run_draw(args: &DrawArgs) -> Result<u8> {
    let output = draw_json(&args.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(0)
}

/// Perform the draw `command` describes and shape it as JSON.
pub fn draw_json(command: &DrawCommand) -> Result<Value> {
    let output = match command {
        DrawCommand::Coins { seed, rounds } => {
            let request = DrawRequest::new(*rounds, seed.clone());
            let result = iching::draw(&request);
            json!({ "seed": request.seed(), "result": result })
        }
        DrawCommand::Cards {
            seed,
            count,
            no_reversed,
        } => {
            let draw = tarot::draw_cards(CardDrawRequest {
                count: *count,
                allow_reversed: !no_reversed,
                seed: seed.clone(),
            })?;
            json!({ "seed": draw.seed, "result": draw.cards, "encoded": draw.encoded })
        }
        DrawCommand::Runes {
            seed,
            count,
            no_reversed,
        } => {
            let draw = runes::draw_runes(RuneDrawRequest {
                count: *count,
                allow_reversed: !no_reversed,
                seed: seed.clone(),
            })?;
            json!({ "seed": draw.seed, "result": draw.runes, "encoded": draw.encoded })
        }
    };
    tracing::debug!("draw complete");
    Ok(output)
}
