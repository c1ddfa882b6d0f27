//! Hand Evaluation Example
//!
//! Ranks a few hands, picks a showdown winner and estimates equity for a
//! flopped draw.

use poker_copilot::{
    Card,
    equity::{estimate_equity, pot_odds},
    functional::{argmax, eval},
};
use rand::{SeedableRng, rngs::SmallRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Poker Hand Evaluation Example ===\n");

    let royal = Card::parse_many(&["Ah", "Kh", "Qh", "Jh", "Th", "9s", "2c"])?;
    println!("{:?} -> {}", royal, eval(&royal));

    let board = ["Tc", "9d", "5c", "3s", "2h"];
    let holes = [["As", "Ad"], ["Kc", "Kd"], ["Ah", "Ac"]];
    let mut ranks = Vec::with_capacity(holes.len());
    for hole in holes {
        let mut hand = Card::parse_many(&hole)?;
        hand.extend(Card::parse_many(&board)?);
        let rank = eval(&hand);
        println!("{} {} -> {rank}", hole[0], hole[1]);
        ranks.push(rank);
    }
    println!("Winners: {:?}\n", argmax(&ranks));

    let hero = Card::parse_many(&["Ah", "Kh"])?;
    let flop = Card::parse_many(&["Qh", "7h", "2c"])?;
    let mut rng = SmallRng::seed_from_u64(7);
    let equity = estimate_equity(&hero, &flop, 10_000, &mut rng);
    println!(
        "AhKh on Qh7h2c: {:.1}% equity, calling 50 into 100 needs {:.1}%",
        equity.probability * 100.0,
        pot_odds(100, 50) * 100.0
    );
    Ok(())
}
