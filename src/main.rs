use mendel::{Activation, Evolution, EvolutionTarget, GameXOR, Policy, Scenario};
use std::error::Error;

const GENERATIONS: usize = 200;
const POPULATION: usize = 150;
const HIDDEN: usize = 3;

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = rand::rng();
    let (sensory, action) = GameXOR::io();
    let evolution = Evolution::new(vec![sensory, HIDDEN, action], Activation::Sigmoid)?;

    let champs = GameXOR.evolve(
        &evolution,
        EvolutionTarget::Generation(GENERATIONS),
        POPULATION,
        Policy::Roulette,
        Policy::TopK,
        true,
        &mut |gen_idx, survivors| {
            if gen_idx % 20 == 0 {
                if let Some(champ) = survivors.first() {
                    println!("champ {gen_idx}: {}", champ.fitness());
                }
            }
        },
        &mut rng,
    )?;

    for (idx, champ) in champs.iter().take(3).enumerate() {
        println!("champ {idx}: {}", champ.fitness());
    }
    Ok(())
}
